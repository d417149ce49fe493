/// Raw page geometry sampled from the window on a scroll notification.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Distance the document can scroll; never negative.
    #[inline]
    pub fn scrollable_height(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }
}

/// Normalized scroll position, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct ScrollProgress(f32);

impl ScrollProgress {
    pub const START: Self = Self(0.0);
    pub const END: Self = Self(1.0);

    /// Clamp an arbitrary value into range. NaN maps to 0.
    #[inline]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// `scroll_y / scrollable_height`, or 0 when nothing can scroll.
    pub fn from_metrics(m: ScrollMetrics) -> Self {
        let range = m.scrollable_height();
        if range <= 0.0 || !range.is_finite() {
            return Self::START;
        }
        Self::new((m.scroll_y / range) as f32)
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

/// Holds the most recently published progress value.
///
/// The host samples on every scroll notification and once eagerly on attach;
/// the render loop reads it once per frame so every consumer within a frame
/// sees the same value.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    latest: ScrollProgress,
    samples: u64,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, metrics: ScrollMetrics) -> ScrollProgress {
        self.latest = ScrollProgress::from_metrics(metrics);
        self.samples += 1;
        self.latest
    }

    #[inline]
    pub fn latest(&self) -> ScrollProgress {
        self.latest
    }

    pub fn sample_count(&self) -> u64 {
        self.samples
    }
}
