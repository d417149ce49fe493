use crate::constants::*;
use crate::scroll::ScrollProgress;

/// Background and fog derived from scroll progress. Recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub background: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn smoothstep(f: f32) -> f32 {
    let f = f.clamp(0.0, 1.0);
    f * f * (3.0 - 2.0 * f)
}

/// Triangular ramp over the game window: 0 at the edges, 1 at the midpoint,
/// 0 outside.
pub fn transition_factor(progress: f32) -> f32 {
    if progress <= GAME_WINDOW_START || progress >= GAME_WINDOW_END {
        return 0.0;
    }
    if progress < GAME_WINDOW_MID {
        (progress - GAME_WINDOW_START) / (GAME_WINDOW_MID - GAME_WINDOW_START)
    } else {
        1.0 - (progress - GAME_WINDOW_MID) / (GAME_WINDOW_END - GAME_WINDOW_MID)
    }
}

/// Eased blend factor used for every atmosphere parameter.
#[inline]
pub fn blend_factor(progress: f32) -> f32 {
    smoothstep(transition_factor(progress))
}

impl Atmosphere {
    pub fn at(progress: ScrollProgress) -> Self {
        let t = blend_factor(progress.get());
        Self {
            background: [
                lerp(BG_BASE[0], BG_GAME[0], t),
                lerp(BG_BASE[1], BG_GAME[1], t),
                lerp(BG_BASE[2], BG_GAME[2], t),
            ],
            fog_near: lerp(FOG_NEAR_BASE, FOG_NEAR_GAME, t),
            fog_far: lerp(FOG_FAR_BASE, FOG_FAR_GAME, t),
            ambient_intensity: lerp(AMBIENT_BASE, AMBIENT_GAME, t),
            directional_intensity: lerp(DIRECTIONAL_BASE, DIRECTIONAL_GAME, t),
        }
    }

    /// Fog color: the background quantized to 8-bit channels.
    pub fn fog_color(&self) -> [f32; 3] {
        self.background
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() / 255.0)
    }
}
