//! Post-import mesh fix-ups
//!
//! Runs after an importer and before conversion, in this order:
//! 1. validate face indices
//! 2. generate smooth normals where missing
//! 3. compute a tangent frame where UVs exist but tangents do not
//! 4. flip winding order
//!
//! Normals and tangents are derived from the source winding, so flipping
//! happens last.

use glam::{Vec2, Vec3};
use hashbrown::HashMap;

use crate::config::ImportOptions;
use crate::error::ImportError;
use crate::scene::{SourceMesh, SourceScene};

/// Apply every enabled step to every mesh
pub fn apply(scene: &mut SourceScene, options: &ImportOptions) -> Result<(), ImportError> {
    for mesh in &mut scene.meshes {
        validate_faces(mesh)?;

        if mesh.normals.len() != mesh.positions.len() {
            if options.generate_normals {
                generate_smooth_normals(mesh);
            } else {
                tracing::warn!("Mesh {:?} has no normals, exporting zero normals", mesh.name);
                mesh.normals = vec![[0.0; 3]; mesh.positions.len()];
            }
        }

        let needs_tangents = !mesh.has_tangents_and_bitangents() && mesh.has_tex_coords(0);
        if options.calc_tangent_space && needs_tangents {
            calc_tangent_space(mesh);
        }

        if options.flip_winding_order {
            flip_winding_order(mesh);
        }
    }
    Ok(())
}

/// Reject faces that point past the vertex list
pub fn validate_faces(mesh: &SourceMesh) -> Result<(), ImportError> {
    let count = mesh.positions.len() as u32;
    if let Some((face, &bad)) = mesh
        .faces
        .iter()
        .enumerate()
        .find_map(|(i, f)| f.iter().find(|&&v| v >= count).map(|v| (i, v)))
    {
        return Err(ImportError::Malformed {
            mesh: mesh.name.clone(),
            message: format!(
                "face {} references vertex {} but the mesh has {} vertices",
                face, bad, count
            ),
        });
    }
    Ok(())
}

/// Reverse each triangle's winding: (a, b, c) -> (a, c, b)
pub fn flip_winding_order(mesh: &mut SourceMesh) {
    for face in &mut mesh.faces {
        face.swap(1, 2);
    }
}

fn face_positions(mesh: &SourceMesh, face: &[u32; 3]) -> [Vec3; 3] {
    (*face).map(|i| Vec3::from_array(mesh.positions[i as usize]))
}

/// Exact position key; -0.0 and 0.0 map to the same key
fn position_key(p: [f32; 3]) -> [u32; 3] {
    p.map(|c| (c + 0.0).to_bits())
}

/// Area-weighted average of adjacent face normals
///
/// Faces are gathered per position rather than per vertex index, so corners
/// that were split apart by the importer still get one shared normal.
pub fn generate_smooth_normals(mesh: &mut SourceMesh) {
    let mut accum: HashMap<[u32; 3], Vec3> = HashMap::new();

    for face in &mesh.faces {
        let [p0, p1, p2] = face_positions(mesh, face);
        // Unnormalized cross product weights by triangle area
        let face_normal = (p1 - p0).cross(p2 - p0);
        for &i in face {
            *accum
                .entry(position_key(mesh.positions[i as usize]))
                .or_insert(Vec3::ZERO) += face_normal;
        }
    }

    mesh.normals = mesh
        .positions
        .iter()
        .map(|p| {
            accum
                .get(&position_key(*p))
                .copied()
                .unwrap_or(Vec3::ZERO)
                .normalize_or_zero()
                .to_array()
        })
        .collect();
}

/// Per-vertex tangent and bitangent from UV channel 0
///
/// Face tangents are accumulated per vertex and then made orthogonal to the
/// vertex normal. Faces with degenerate UV mappings contribute nothing.
pub fn calc_tangent_space(mesh: &mut SourceMesh) {
    let Some(uvs) = mesh.uv0() else {
        return;
    };

    let n = mesh.positions.len();
    let mut tangents = vec![Vec3::ZERO; n];
    let mut bitangents = vec![Vec3::ZERO; n];

    for face in &mesh.faces {
        let [p0, p1, p2] = face_positions(mesh, face);
        let [t0, t1, t2] = (*face).map(|i| Vec2::from_array(uvs[i as usize]));

        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let d1 = t1 - t0;
        let d2 = t2 - t0;

        let det = d1.x * d2.y - d2.x * d1.y;
        if det.abs() < f32::EPSILON {
            continue;
        }
        let r = 1.0 / det;
        let tangent = (e1 * d2.y - e2 * d1.y) * r;
        let bitangent = (e2 * d1.x - e1 * d2.x) * r;

        for &i in face {
            tangents[i as usize] += tangent;
            bitangents[i as usize] += bitangent;
        }
    }

    let mut out_t = Vec::with_capacity(n);
    let mut out_b = Vec::with_capacity(n);
    for i in 0..n {
        let normal = Vec3::from_array(mesh.normals[i]);
        let t = (tangents[i] - normal * normal.dot(tangents[i])).normalize_or_zero();
        let b = (bitangents[i] - normal * normal.dot(bitangents[i])).normalize_or_zero();
        out_t.push(t.to_array());
        out_b.push(b.to_array());
    }

    mesh.tangents = Some(out_t);
    mesh.bitangents = Some(out_b);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit quad in the XY plane, CCW seen from +Z
    fn quad() -> SourceMesh {
        let mut mesh = SourceMesh {
            name: "quad".to_string(),
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            faces: vec![[0, 1, 2], [0, 2, 3]],
            ..Default::default()
        };
        mesh.tex_coords[0] = Some(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        mesh
    }

    fn assert_vec_eq(a: [f32; 3], b: [f32; 3]) {
        let d = Vec3::from_array(a) - Vec3::from_array(b);
        assert!(d.length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_smooth_normals_face_outward() {
        let mut mesh = quad();
        generate_smooth_normals(&mut mesh);
        for n in &mesh.normals {
            assert_vec_eq(*n, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_split_corners_share_smooth_normal() {
        // Two triangles folded along the edge (0,0,0)-(1,0,0), one corner per vertex
        let mut mesh = SourceMesh {
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            faces: vec![[0, 1, 2], [3, 4, 5]],
            ..Default::default()
        };
        generate_smooth_normals(&mut mesh);

        let folded = [0.0, std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2];
        assert_vec_eq(mesh.normals[0], folded);
        assert_vec_eq(mesh.normals[4], folded);
        assert_vec_eq(mesh.normals[1], folded);
        assert_vec_eq(mesh.normals[3], folded);
        assert_vec_eq(mesh.normals[2], [0.0, 0.0, 1.0]);
        assert_vec_eq(mesh.normals[5], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_negative_zero_shares_position() {
        assert_eq!(position_key([-0.0, 1.0, 0.0]), position_key([0.0, 1.0, -0.0]));
    }

    #[test]
    fn test_tangent_frame_follows_uvs() {
        let mut mesh = quad();
        generate_smooth_normals(&mut mesh);
        calc_tangent_space(&mut mesh);

        assert!(mesh.has_tangents_and_bitangents());
        for (t, b) in mesh
            .tangents
            .as_ref()
            .unwrap()
            .iter()
            .zip(mesh.bitangents.as_ref().unwrap())
        {
            assert_vec_eq(*t, [1.0, 0.0, 0.0]);
            assert_vec_eq(*b, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_flip_winding() {
        let mut mesh = quad();
        flip_winding_order(&mut mesh);
        assert_eq!(mesh.faces, vec![[0, 2, 1], [0, 3, 2]]);
    }

    #[test]
    fn test_apply_runs_all_steps() {
        let mut scene = SourceScene {
            meshes: vec![quad()],
            materials: Vec::new(),
        };
        apply(&mut scene, &ImportOptions::default()).unwrap();

        let mesh = &scene.meshes[0];
        assert_eq!(mesh.normals.len(), 4);
        assert_vec_eq(mesh.normals[0], [0.0, 0.0, 1.0]);
        assert!(mesh.has_tangents_and_bitangents());
        assert_eq!(mesh.faces[0], [0, 2, 1]);
    }

    #[test]
    fn test_apply_without_generation_fills_zero_normals() {
        let mut scene = SourceScene {
            meshes: vec![quad()],
            materials: Vec::new(),
        };
        let options = ImportOptions {
            flip_winding_order: false,
            generate_normals: false,
            calc_tangent_space: false,
        };
        apply(&mut scene, &options).unwrap();

        let mesh = &scene.meshes[0];
        assert_eq!(mesh.normals, vec![[0.0; 3]; 4]);
        assert!(!mesh.has_tangents_and_bitangents());
        assert_eq!(mesh.faces[0], [0, 1, 2]);
    }

    #[test]
    fn test_out_of_range_face_rejected() {
        let mut mesh = quad();
        mesh.faces.push([0, 1, 4]);
        let err = validate_faces(&mesh).unwrap_err();
        assert!(matches!(err, ImportError::Malformed { .. }));
    }
}
