use crate::constants::*;
use crate::scroll::ScrollProgress;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationId {
    Intro,
    Messaging,
    Game,
    Finance,
    About,
}

impl StationId {
    pub const ALL: [StationId; 5] = [
        StationId::Intro,
        StationId::Messaging,
        StationId::Game,
        StationId::Finance,
        StationId::About,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StationId::Intro => "intro",
            StationId::Messaging => "messaging",
            StationId::Game => "game",
            StationId::Finance => "finance",
            StationId::About => "about",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("station layout is empty")]
    Empty,
    #[error("station {station} at {offset} is ahead of the previous station at {previous}")]
    NotMonotonic {
        station: &'static str,
        offset: f32,
        previous: f32,
    },
    #[error("station {0} has a non-finite offset")]
    NonFinite(&'static str),
}

/// Fixed station offsets along the travel axis, in travel order.
#[derive(Debug, Clone, PartialEq)]
pub struct StationLayout {
    entries: Vec<(StationId, f32)>,
}

impl Default for StationLayout {
    fn default() -> Self {
        Self {
            entries: vec![
                (StationId::Intro, STATION_Z_INTRO),
                (StationId::Messaging, STATION_Z_MESSAGING),
                (StationId::Game, STATION_Z_GAME),
                (StationId::Finance, STATION_Z_FINANCE),
                (StationId::About, STATION_Z_ABOUT),
            ],
        }
    }
}

impl StationLayout {
    pub fn new(entries: Vec<(StationId, f32)>) -> Result<Self, LayoutError> {
        if entries.is_empty() {
            return Err(LayoutError::Empty);
        }
        let mut previous: Option<f32> = None;
        for &(id, offset) in &entries {
            if !offset.is_finite() {
                return Err(LayoutError::NonFinite(id.name()));
            }
            if let Some(prev) = previous {
                if offset > prev {
                    return Err(LayoutError::NotMonotonic {
                        station: id.name(),
                        offset,
                        previous: prev,
                    });
                }
            }
            previous = Some(offset);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(StationId, f32)] {
        &self.entries
    }

    pub fn offset(&self, id: StationId) -> Option<f32> {
        self.entries
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, z)| *z)
    }

    /// Absolute offset of the furthest station.
    pub fn total_distance(&self) -> f32 {
        self.entries.last().map(|(_, z)| z.abs()).unwrap_or(0.0)
    }
}

/// How the travel position closes the gap to its target each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TravelSmoothing {
    /// Close a fixed fraction of the remaining distance every frame,
    /// regardless of frame duration.
    PerFrame { damping: f32 },
    /// Same decay as `PerFrame` at `reference_fps`, scaled by the real `dt`.
    TimeScaled { damping: f32, reference_fps: f32 },
}

impl Default for TravelSmoothing {
    fn default() -> Self {
        TravelSmoothing::PerFrame {
            damping: TRAVEL_DAMPING_PER_FRAME,
        }
    }
}

impl TravelSmoothing {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frame" | "per-frame" => Some(Self::default()),
            "time" | "time-scaled" => Some(TravelSmoothing::TimeScaled {
                damping: TRAVEL_DAMPING_PER_FRAME,
                reference_fps: TRAVEL_REFERENCE_FPS,
            }),
            _ => None,
        }
    }

    /// Fraction of the remaining distance to close for a frame of `dt_sec`.
    pub fn alpha(&self, dt_sec: f32) -> f32 {
        match *self {
            TravelSmoothing::PerFrame { damping } => damping.clamp(0.0, 1.0),
            TravelSmoothing::TimeScaled {
                damping,
                reference_fps,
            } => {
                let frames = (dt_sec.max(0.0) * reference_fps).max(0.0);
                (1.0 - (1.0 - damping.clamp(0.0, 1.0)).powf(frames)).clamp(0.0, 1.0)
            }
        }
    }
}

/// Smoothed position along the travel axis. Only the composer steps it.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTravel {
    current: f32,
    total_distance: f32,
    smoothing: TravelSmoothing,
}

impl CameraTravel {
    pub fn new(total_distance: f32, smoothing: TravelSmoothing) -> Self {
        Self {
            current: 0.0,
            total_distance: total_distance.abs(),
            smoothing,
        }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target_for(&self, progress: ScrollProgress) -> f32 {
        progress.get() * self.total_distance
    }

    /// Move toward the target implied by `progress`; returns the new position.
    pub fn step(&mut self, progress: ScrollProgress, dt_sec: f32) -> f32 {
        let target = self.target_for(progress);
        let alpha = self.smoothing.alpha(dt_sec);
        self.current += (target - self.current) * alpha;
        self.current
    }
}
