//! Source scene model
//!
//! What an import collaborator hands to the exporter: triangulated meshes with
//! normals (and tangent frames where derivable), plus raw material properties.
//! Importers live in [`crate::import`].

use scene_format::{Color4, TextureSlot};

/// Maximum number of UV channels a source mesh can carry
pub const MAX_UV_CHANNELS: usize = 8;

/// One imported mesh
#[derive(Clone, Debug, Default)]
pub struct SourceMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals (same length as `positions`)
    pub normals: Vec<[f32; 3]>,
    pub tangents: Option<Vec<[f32; 3]>>,
    pub bitangents: Option<Vec<[f32; 3]>>,
    pub tex_coords: [Option<Vec<[f32; 2]>>; MAX_UV_CHANNELS],
    /// Triangles as vertex indices
    pub faces: Vec<[u32; 3]>,
    pub material_index: u32,
}

impl SourceMesh {
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Whether tangents and bitangents exist for every vertex
    pub fn has_tangents_and_bitangents(&self) -> bool {
        let n = self.positions.len();
        matches!(
            (&self.tangents, &self.bitangents),
            (Some(t), Some(b)) if t.len() == n && b.len() == n
        )
    }

    /// Whether UV channel `channel` exists for every vertex
    pub fn has_tex_coords(&self, channel: usize) -> bool {
        self.tex_coords
            .get(channel)
            .and_then(Option::as_ref)
            .is_some_and(|uv| uv.len() == self.positions.len())
    }

    /// First UV channel, if complete
    pub fn uv0(&self) -> Option<&[[f32; 2]]> {
        if self.has_tex_coords(0) {
            self.tex_coords[0].as_deref()
        } else {
            None
        }
    }
}

/// Raw material properties as found in the source file
///
/// Absent values stay `None`; defaults are applied during extraction.
#[derive(Clone, Debug, Default)]
pub struct SourceMaterial {
    pub name: String,
    pub diffuse: Option<Color4>,
    pub ambient: Option<Color4>,
    pub specular: Option<Color4>,
    pub emissive: Option<Color4>,
    pub shininess: Option<f32>,
    pub diffuse_texture: Option<String>,
    pub specular_texture: Option<String>,
    pub normal_texture: Option<String>,
    pub height_texture: Option<String>,
}

impl SourceMaterial {
    pub fn texture(&self, slot: TextureSlot) -> Option<&str> {
        match slot {
            TextureSlot::Diffuse => self.diffuse_texture.as_deref(),
            TextureSlot::Specular => self.specular_texture.as_deref(),
            TextureSlot::Normal => self.normal_texture.as_deref(),
            TextureSlot::Height => self.height_texture.as_deref(),
        }
    }

    pub fn set_texture(&mut self, slot: TextureSlot, path: String) {
        let target = match slot {
            TextureSlot::Diffuse => &mut self.diffuse_texture,
            TextureSlot::Specular => &mut self.specular_texture,
            TextureSlot::Normal => &mut self.normal_texture,
            TextureSlot::Height => &mut self.height_texture,
        };
        *target = Some(path);
    }
}

/// A whole imported scene
#[derive(Clone, Debug, Default)]
pub struct SourceScene {
    pub meshes: Vec<SourceMesh>,
    pub materials: Vec<SourceMaterial>,
}
