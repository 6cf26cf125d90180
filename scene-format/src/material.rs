//! Material summaries written to the descriptor

/// RGBA color, components in source units (usually 0..1)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from an RGB triple
    pub const fn rgb(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 1.0)
    }
}

impl From<[f32; 4]> for Color4 {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Texture slots carried into the descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Diffuse,
    Specular,
    Normal,
    Height,
}

impl TextureSlot {
    /// Descriptor key for this slot
    pub const fn key(self) -> &'static str {
        match self {
            TextureSlot::Diffuse => "diffuse_texture",
            TextureSlot::Specular => "specular_texture",
            TextureSlot::Normal => "normal_texture",
            TextureSlot::Height => "height_texture",
        }
    }
}

/// Summary of one source material
///
/// Texture paths use `/` separators; an empty string means "no texture".
/// `shininess` is always positive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    pub index: u32,
    pub name: String,

    pub diffuse: Color4,
    pub ambient: Color4,
    pub specular: Color4,
    pub emissive: Color4,
    pub shininess: f32,

    pub diffuse_texture: String,
    pub specular_texture: String,
    pub normal_texture: String,
    pub height_texture: String,
}

impl Material {
    /// Texture path for a slot, `None` when absent
    pub fn texture(&self, slot: TextureSlot) -> Option<&str> {
        let path = match slot {
            TextureSlot::Diffuse => &self.diffuse_texture,
            TextureSlot::Specular => &self.specular_texture,
            TextureSlot::Normal => &self.normal_texture,
            TextureSlot::Height => &self.height_texture,
        };
        (!path.is_empty()).then_some(path.as_str())
    }
}
