//! Source vertex -> export vertex

use scene_format::ExportVertex;

use crate::scene::SourceMesh;

/// Which optional attributes a mesh contributes
///
/// Decided once per mesh from its capabilities, then applied to every vertex.
/// Attributes that are not copied stay zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexPolicy {
    pub copy_tangents: bool,
    pub copy_uv: bool,
}

impl VertexPolicy {
    pub fn for_mesh(mesh: &SourceMesh) -> Self {
        Self {
            copy_tangents: mesh.has_tangents_and_bitangents(),
            copy_uv: mesh.has_tex_coords(0),
        }
    }
}

/// Build the export vertex for source vertex `index`
///
/// Values are copied verbatim; no normalization or axis conversion happens here.
pub fn reformat_vertex(mesh: &SourceMesh, policy: VertexPolicy, index: usize) -> ExportVertex {
    let mut v = ExportVertex {
        position: mesh.positions[index],
        normal: mesh.normals.get(index).copied().unwrap_or_default(),
        ..Default::default()
    };

    if policy.copy_tangents {
        if let (Some(tangents), Some(bitangents)) = (&mesh.tangents, &mesh.bitangents) {
            v.tangent = tangents[index];
            v.bitangent = bitangents[index];
        }
    }

    if policy.copy_uv {
        if let Some(uv) = mesh.uv0() {
            v.uv = uv[index];
        }
    }

    v
}
