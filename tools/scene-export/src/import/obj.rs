//! Wavefront OBJ import
//!
//! Faces are fan-triangulated and expanded per corner (no vertex sharing).
//! A new mesh starts whenever the object, group or material changes, so every
//! mesh has exactly one material.

use hashbrown::HashMap;
use std::path::Path;

use super::DEFAULT_MATERIAL_NAME;
use super::mtl::parse_mtl;
use crate::error::ImportError;
use crate::scene::{SourceMaterial, SourceMesh, SourceScene};

/// Corner reference: (position, uv, normal), zero-based
type Corner = (usize, Option<usize>, Option<usize>);

/// Mesh under construction
#[derive(Default)]
struct MeshBuilder {
    name: String,
    material: Option<String>,
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    faces: Vec<[u32; 3]>,
}

impl MeshBuilder {
    fn new(name: String, material: Option<String>) -> Self {
        Self {
            name,
            material,
            ..Default::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Load an OBJ file and the material libraries it references
pub fn import_obj(path: &Path) -> Result<SourceScene, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    parse_obj(path, &text, base_dir)
}

/// Parse OBJ text; `mtllib` paths resolve against `base_dir`
pub fn parse_obj(path: &Path, text: &str, base_dir: &Path) -> Result<SourceScene, ImportError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut tex_coords: Vec<[f32; 2]> = Vec::new();
    let mut normals_raw: Vec<[f32; 3]> = Vec::new();

    let mut materials: Vec<SourceMaterial> = Vec::new();
    let mut finished: Vec<MeshBuilder> = Vec::new();
    let mut current = MeshBuilder::default();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parse_err = |message: String| ImportError::Parse {
            path: path.to_path_buf(),
            line: line_no + 1,
            message,
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => positions.push(parse_floats::<3>(&parts[1..]).map_err(parse_err)?),
            "vt" => tex_coords.push(parse_floats::<2>(&parts[1..]).map_err(parse_err)?),
            "vn" => normals_raw.push(parse_floats::<3>(&parts[1..]).map_err(parse_err)?),
            "o" | "g" => {
                let name = parts[1..].join(" ");
                let material = current.material.clone();
                if current.is_empty() {
                    current.name = name;
                } else {
                    finished.push(std::mem::replace(
                        &mut current,
                        MeshBuilder::new(name, material),
                    ));
                }
            }
            "usemtl" => {
                let material = Some(parts[1..].join(" "));
                if current.is_empty() {
                    current.material = material;
                } else if current.material != material {
                    let name = current.name.clone();
                    finished.push(std::mem::replace(
                        &mut current,
                        MeshBuilder::new(name, material),
                    ));
                }
            }
            "mtllib" => {
                for lib in &parts[1..] {
                    let lib_path = base_dir.join(lib);
                    match std::fs::read_to_string(&lib_path) {
                        Ok(lib_text) => materials.extend(parse_mtl(&lib_path, &lib_text)?),
                        Err(e) => {
                            tracing::warn!("Couldn't read material library {:?}: {}", lib_path, e)
                        }
                    }
                }
            }
            "f" => {
                let corners = parts[1..]
                    .iter()
                    .map(|c| {
                        parse_obj_vertex(c, positions.len(), tex_coords.len(), normals_raw.len())
                    })
                    .collect::<Result<Vec<Corner>, String>>()
                    .map_err(parse_err)?;

                if corners.len() < 3 {
                    return Err(parse_err(format!(
                        "face needs at least 3 vertices, got {}",
                        corners.len()
                    )));
                }

                // Fan triangulation (convex polygons)
                for i in 1..corners.len() - 1 {
                    let base = current.positions.len() as u32;
                    for &idx in &[0, i, i + 1] {
                        let (vi, vti, vni) = corners[idx];
                        current.positions.push(positions[vi]);
                        if let Some(ti) = vti {
                            current.uvs.push(tex_coords[ti]);
                        }
                        if let Some(ni) = vni {
                            current.normals.push(normals_raw[ni]);
                        }
                    }
                    current.faces.push([base, base + 1, base + 2]);
                }
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        finished.push(current);
    }

    Ok(assemble_scene(finished, materials))
}

/// Resolve material names to indices and build the final meshes
fn assemble_scene(builders: Vec<MeshBuilder>, mut materials: Vec<SourceMaterial>) -> SourceScene {
    let mut by_name: HashMap<String, u32> = HashMap::new();
    for (i, m) in materials.iter().enumerate() {
        by_name.entry(m.name.clone()).or_insert(i as u32);
    }

    let mut default_index: Option<u32> = None;
    let mut meshes = Vec::with_capacity(builders.len());

    for b in builders {
        let resolved = b.material.as_ref().and_then(|name| {
            let found = by_name.get(name).copied();
            if found.is_none() {
                tracing::warn!("Mesh {:?} uses unknown material {:?}", b.name, name);
            }
            found
        });
        let material_index = resolved.unwrap_or_else(|| {
            *default_index.get_or_insert_with(|| {
                materials.push(SourceMaterial {
                    name: DEFAULT_MATERIAL_NAME.to_string(),
                    ..Default::default()
                });
                (materials.len() - 1) as u32
            })
        });

        let vertex_count = b.positions.len();
        let mut mesh = SourceMesh {
            name: b.name,
            positions: b.positions,
            faces: b.faces,
            material_index,
            ..Default::default()
        };
        // Attributes count only when every corner supplied them
        if b.normals.len() == vertex_count {
            mesh.normals = b.normals;
        }
        if b.uvs.len() == vertex_count {
            mesh.tex_coords[0] = Some(b.uvs);
        }
        meshes.push(mesh);
    }

    SourceScene { meshes, materials }
}

/// Parse the first `N` whitespace-separated floats
fn parse_floats<const N: usize>(args: &[&str]) -> Result<[f32; N], String> {
    if args.len() < N {
        return Err(format!("expected {} values, got {}", N, args.len()));
    }
    let mut out = [0.0f32; N];
    for (slot, s) in out.iter_mut().zip(args) {
        *slot = s
            .parse()
            .map_err(|e| format!("invalid number {s:?}: {e}"))?;
    }
    Ok(out)
}

/// Resolve a 1-based (or negative, relative) OBJ index to zero-based
fn resolve_index(raw: &str, len: usize, what: &str) -> Result<usize, String> {
    let value: i64 = raw
        .parse()
        .map_err(|_| format!("invalid {what} index {raw:?}"))?;
    let resolved = match value {
        v if v > 0 => (v - 1) as usize,
        v if v < 0 => len
            .checked_sub(v.unsigned_abs() as usize)
            .ok_or_else(|| format!("{what} index {v} out of range"))?,
        _ => return Err(format!("{what} index 0 is invalid")),
    };
    if resolved >= len {
        return Err(format!("{what} index {value} out of range (have {len})"));
    }
    Ok(resolved)
}

/// Parse OBJ vertex reference: "v", "v/vt", "v/vt/vn", or "v//vn"
fn parse_obj_vertex(
    s: &str,
    num_positions: usize,
    num_uvs: usize,
    num_normals: usize,
) -> Result<Corner, String> {
    let parts: Vec<&str> = s.split('/').collect();

    let vi = resolve_index(parts[0], num_positions, "vertex")?;

    let vti = match parts.get(1).filter(|s| !s.is_empty()) {
        Some(raw) => Some(resolve_index(raw, num_uvs, "texture coordinate")?),
        None => None,
    };

    let vni = match parts.get(2).filter(|s| !s.is_empty()) {
        Some(raw) => Some(resolve_index(raw, num_normals, "normal")?),
        None => None,
    };

    Ok((vi, vti, vni))
}
