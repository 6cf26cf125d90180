//! glTF/GLB scene import
//!
//! Every triangle primitive of every mesh becomes one source mesh, in document
//! order. Images are not decoded; only their paths reach the descriptor.

use glam::Vec3;
use gltf::mesh::Mode;
use scene_format::{Color4, TextureSlot};
use std::path::Path;

use super::DEFAULT_MATERIAL_NAME;
use crate::error::ImportError;
use crate::scene::{MAX_UV_CHANNELS, SourceMaterial, SourceMesh, SourceScene};

/// Load a .gltf or .glb file
pub fn import_gltf(input: &Path) -> Result<SourceScene, ImportError> {
    if !input.exists() {
        return Err(ImportError::Io {
            path: input.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }

    let gltf::Gltf { document, blob } = gltf::Gltf::open(input)?;
    let buffers = gltf::import_buffers(&document, input.parent(), blob)?;

    let mut materials: Vec<SourceMaterial> =
        document.materials().map(convert_material).collect();
    let default_material = materials.len() as u32;
    let mut needs_default = false;

    let mut meshes = Vec::new();
    for mesh in document.meshes() {
        let mesh_name = mesh.name().unwrap_or_default();
        let multi_primitive = mesh.primitives().count() > 1;

        for primitive in mesh.primitives() {
            let name = if multi_primitive {
                format!("{}#{}", mesh_name, primitive.index())
            } else {
                mesh_name.to_string()
            };

            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let Some(positions) = reader.read_positions() else {
                tracing::warn!("Primitive {:?} has no positions, skipping", name);
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();

            let corner_indices: Vec<u32> = reader
                .read_indices()
                .map(|iter| iter.into_u32().collect())
                .unwrap_or_else(|| (0..positions.len() as u32).collect());

            let Some(faces) = triangulate(primitive.mode(), &corner_indices) else {
                tracing::warn!(
                    "Primitive {:?} is not a triangle primitive ({:?}), skipping",
                    name,
                    primitive.mode()
                );
                continue;
            };

            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_default();

            let mut tex_coords: [Option<Vec<[f32; 2]>>; MAX_UV_CHANNELS] = Default::default();
            for (set, slot) in tex_coords.iter_mut().enumerate() {
                *slot = reader
                    .read_tex_coords(set as u32)
                    .map(|iter| iter.into_f32().collect());
            }

            // Tangents (vec4): xyz = direction, w = handedness
            let tangent_frame = match reader.read_tangents() {
                Some(iter) if normals.len() == positions.len() => {
                    let tangents: Vec<[f32; 4]> = iter.collect();
                    (tangents.len() == positions.len()).then(|| split_tangents(&normals, &tangents))
                }
                _ => None,
            };
            let (tangents, bitangents) = match tangent_frame {
                Some((t, b)) => (Some(t), Some(b)),
                None => (None, None),
            };

            let material_index = match primitive.material().index() {
                Some(i) => i as u32,
                None => {
                    needs_default = true;
                    default_material
                }
            };

            meshes.push(SourceMesh {
                name,
                positions,
                normals,
                tangents,
                bitangents,
                tex_coords,
                faces,
                material_index,
            });
        }
    }

    if needs_default {
        materials.push(SourceMaterial {
            name: DEFAULT_MATERIAL_NAME.to_string(),
            ..Default::default()
        });
    }

    Ok(SourceScene { meshes, materials })
}

/// Turn an index stream into triangles; `None` for point and line modes
fn triangulate(mode: Mode, indices: &[u32]) -> Option<Vec<[u32; 3]>> {
    let faces = match mode {
        Mode::Triangles => indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect(),
        Mode::TriangleStrip => (0..indices.len().saturating_sub(2))
            .map(|i| {
                if i % 2 == 0 {
                    [indices[i], indices[i + 1], indices[i + 2]]
                } else {
                    [indices[i + 1], indices[i], indices[i + 2]]
                }
            })
            .collect(),
        Mode::TriangleFan => (1..indices.len().saturating_sub(1))
            .map(|i| [indices[0], indices[i], indices[i + 1]])
            .collect(),
        Mode::Points | Mode::Lines | Mode::LineLoop | Mode::LineStrip => return None,
    };
    Some(faces)
}

/// Split glTF vec4 tangents into tangent and bitangent arrays
///
/// bitangent = cross(normal, tangent.xyz) * w
fn split_tangents(
    normals: &[[f32; 3]],
    tangents: &[[f32; 4]],
) -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
    normals
        .iter()
        .zip(tangents)
        .map(|(n, t)| {
            let n = Vec3::from_array(*n);
            let dir = Vec3::new(t[0], t[1], t[2]);
            (dir.to_array(), (n.cross(dir) * t[3]).to_array())
        })
        .unzip()
}

fn texture_path(texture: gltf::Texture<'_>) -> String {
    match texture.source().source() {
        gltf::image::Source::Uri { uri, .. } => uri.to_string(),
        // Embedded images are referenced by index
        gltf::image::Source::View { .. } => format!("*{}", texture.source().index()),
    }
}

fn convert_material(material: gltf::Material<'_>) -> SourceMaterial {
    let pbr = material.pbr_metallic_roughness();

    let mut out = SourceMaterial {
        name: material.name().unwrap_or_default().to_string(),
        diffuse: Some(Color4::from(pbr.base_color_factor())),
        emissive: Some(Color4::rgb(material.emissive_factor())),
        ..Default::default()
    };

    if let Some(info) = pbr.base_color_texture() {
        out.set_texture(TextureSlot::Diffuse, texture_path(info.texture()));
    }
    if let Some(normal) = material.normal_texture() {
        out.set_texture(TextureSlot::Normal, texture_path(normal.texture()));
    }

    out
}
