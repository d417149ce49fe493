use crate::textures::{TextureId, TextureRegistry};

/// sRGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`, as written in CSS.
    pub fn hex(v: u32) -> Self {
        let c = |shift: u32| ((v >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(c(16), c(8), c(0))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_linear(self) -> [f32; 3] {
        self.to_array().map(srgb_to_linear)
    }

    pub fn scaled(self, k: f32) -> [f32; 3] {
        self.to_linear().map(|c| c * k)
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Texture reference on a basic material. Until the texture is ready the
/// material draws its own flat color instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureMap {
    pub texture: TextureId,
    pub repeat: [f32; 2],
    pub transparent: bool,
}

impl TextureMap {
    pub fn new(texture: TextureId) -> Self {
        Self {
            texture,
            repeat: [1.0, 1.0],
            transparent: false,
        }
    }

    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    pub fn repeat(mut self, u: f32, v: f32) -> Self {
        self.repeat = [u, v];
        self
    }
}

/// Unlit material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMaterial {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub map: Option<TextureMap>,
}

impl BasicMaterial {
    pub fn color(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
            map: None,
        }
    }

    pub fn translucent(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            transparent: true,
            map: None,
        }
    }

    pub fn with_map(mut self, map: TextureMap) -> Self {
        self.map = Some(map);
        self
    }
}

/// Lit material with an emissive term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterial {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
    pub transparent: bool,
}

impl StandardMaterial {
    pub fn color(color: Color) -> Self {
        Self {
            color,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            metalness: 0.0,
            roughness: 1.0,
            opacity: 1.0,
            transparent: false,
        }
    }

    /// Emits its own color at `intensity`.
    pub fn glowing(color: Color, intensity: f32) -> Self {
        Self {
            emissive: color,
            emissive_intensity: intensity,
            ..Self::color(color)
        }
    }

    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_finish(mut self, metalness: f32, roughness: f32) -> Self {
        self.metalness = metalness;
        self.roughness = roughness;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }
}

/// Vertical gradient for a sky dome; channels are used as-is, not
/// color-managed, and the dome is never fogged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyGradient {
    pub top: [f32; 3],
    pub bottom: [f32; 3],
    pub offset: f32,
    pub exponent: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Basic(BasicMaterial),
    Standard(StandardMaterial),
    Sky(SkyGradient),
}

impl From<BasicMaterial> for Material {
    fn from(m: BasicMaterial) -> Self {
        Material::Basic(m)
    }
}

impl From<StandardMaterial> for Material {
    fn from(m: StandardMaterial) -> Self {
        Material::Standard(m)
    }
}

impl From<SkyGradient> for Material {
    fn from(m: SkyGradient) -> Self {
        Material::Sky(m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    Unlit = 0,
    Lit = 1,
    Sky = 2,
}

/// What a material looks like this frame, after texture availability is
/// taken into account.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub shading: Shading,
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub texture: Option<TextureId>,
    pub uv_repeat: [f32; 2],
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub fog: bool,
    pub sky: Option<SkyGradient>,
}

impl Surface {
    fn flat(shading: Shading, color: Color) -> Self {
        Self {
            shading,
            color,
            opacity: 1.0,
            transparent: false,
            texture: None,
            uv_repeat: [1.0, 1.0],
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            metalness: 0.0,
            roughness: 1.0,
            fog: true,
            sky: None,
        }
    }
}

impl Material {
    pub fn resolve(&self, textures: &TextureRegistry) -> Surface {
        match *self {
            Material::Basic(m) => match m.map {
                Some(map) if textures.is_ready(map.texture) => Surface {
                    opacity: 1.0,
                    transparent: map.transparent,
                    texture: Some(map.texture),
                    uv_repeat: map.repeat,
                    ..Surface::flat(Shading::Unlit, Color::WHITE)
                },
                _ => Surface {
                    opacity: m.opacity,
                    transparent: m.transparent,
                    ..Surface::flat(Shading::Unlit, m.color)
                },
            },
            Material::Standard(m) => Surface {
                opacity: m.opacity,
                transparent: m.transparent,
                emissive: m.emissive,
                emissive_intensity: m.emissive_intensity,
                metalness: m.metalness,
                roughness: m.roughness,
                ..Surface::flat(Shading::Lit, m.color)
            },
            Material::Sky(sky) => Surface {
                fog: false,
                sky: Some(sky),
                ..Surface::flat(Shading::Sky, Color::WHITE)
            },
        }
    }
}
