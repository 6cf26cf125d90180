//! Per-mesh conversion

use rand::Rng;

use super::reformat::{VertexPolicy, reformat_vertex};
use super::types::{Centering, ConvertedMesh};
use crate::bounding_sphere::bounding_sphere;
use crate::geometry::{Point3, points_from_arrays};
use crate::scene::SourceMesh;

/// Convert one source mesh
///
/// With [`Centering::BoundingSphereCenter`] the bounding-sphere center becomes
/// the new origin and is reported as the mesh position. Faces are flattened in
/// order; winding and degenerate triangles are left as imported.
pub fn convert_mesh<R: Rng>(
    mesh: &SourceMesh,
    centering: Centering,
    rng: &mut R,
) -> ConvertedMesh {
    let offset = match centering {
        Centering::BoundingSphereCenter => {
            bounding_sphere(&points_from_arrays(&mesh.positions), rng)
                .map(|sphere| sphere.center)
                .unwrap_or(Point3::ZERO)
        }
        Centering::None => Point3::ZERO,
    };

    let policy = VertexPolicy::for_mesh(mesh);
    let mut max_distance_sq = 0.0f32;

    let vertices = (0..mesh.num_vertices())
        .map(|i| {
            let mut v = reformat_vertex(mesh, policy, i);
            v.position[0] -= offset.x;
            v.position[1] -= offset.y;
            v.position[2] -= offset.z;
            max_distance_sq = max_distance_sq.max(v.position_length_squared());
            v
        })
        .collect();

    let indices = mesh.faces.iter().flatten().copied().collect();

    ConvertedMesh {
        vertices,
        indices,
        position: offset,
        radius_from_origo: max_distance_sq.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn triangle() -> SourceMesh {
        SourceMesh {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            faces: vec![[0, 1, 2]],
            ..Default::default()
        }
    }

    fn offset_box() -> SourceMesh {
        let mut positions = Vec::new();
        for &x in &[9.0, 11.0] {
            for &y in &[-4.0, -2.0] {
                for &z in &[100.0, 104.0] {
                    positions.push([x, y, z]);
                }
            }
        }
        SourceMesh {
            normals: vec![[0.0, 1.0, 0.0]; positions.len()],
            positions,
            faces: vec![[0, 1, 2], [2, 1, 3], [4, 5, 6], [6, 5, 7]],
            ..Default::default()
        }
    }

    #[test]
    fn test_uncentered_triangle() {
        let mut rng = Pcg32::seed_from_u64(0);
        let converted = convert_mesh(&triangle(), Centering::None, &mut rng);

        assert_eq!(converted.vertices.len(), 3);
        assert_eq!(converted.indices, vec![0, 1, 2]);
        assert_eq!(converted.position, Vec3::ZERO);
        assert!((converted.radius_from_origo - 1.0).abs() < 1e-6);
        assert_eq!(converted.vertices[2].position, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_indices_flattened_in_face_order() {
        let mut rng = Pcg32::seed_from_u64(0);
        let converted = convert_mesh(&offset_box(), Centering::None, &mut rng);
        assert_eq!(converted.indices, vec![0, 1, 2, 2, 1, 3, 4, 5, 6, 6, 5, 7]);
    }

    /// Octahedron around (10, -3, 102); its extremal pair already bounds it
    fn offset_octahedron() -> SourceMesh {
        let c = [10.0, -3.0, 102.0];
        let mut positions = Vec::new();
        for axis in 0..3 {
            for sign in [-1.0, 1.0] {
                let mut p = c;
                p[axis] += sign;
                positions.push(p);
            }
        }
        SourceMesh {
            normals: vec![[0.0, 1.0, 0.0]; positions.len()],
            positions,
            faces: vec![[0, 2, 4], [1, 3, 5]],
            ..Default::default()
        }
    }

    #[test]
    fn test_centering_moves_sphere_center_to_origin() {
        let mesh = offset_octahedron();
        let mut rng = Pcg32::seed_from_u64(5489);
        let converted = convert_mesh(&mesh, Centering::BoundingSphereCenter, &mut rng);

        assert!((converted.position - Vec3::new(10.0, -3.0, 102.0)).length() < 1e-2);
        assert!((converted.radius_from_origo - 1.0).abs() < 1e-2);

        let centered: Vec<Vec3> = converted
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.position))
            .collect();
        let resolved = bounding_sphere(&centered, &mut rng).unwrap();
        assert!(resolved.center.length() < 1e-2);
    }

    #[test]
    fn test_centering_subtracts_offset_from_every_vertex() {
        let mesh = offset_box();
        let mut rng = Pcg32::seed_from_u64(11);
        let converted = convert_mesh(&mesh, Centering::BoundingSphereCenter, &mut rng);
        for (src, out) in mesh.positions.iter().zip(&converted.vertices) {
            let expected = Vec3::from_array(*src) - converted.position;
            assert!((Vec3::from_array(out.position) - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_empty_mesh() {
        let mut rng = Pcg32::seed_from_u64(0);
        let converted = convert_mesh(
            &SourceMesh::default(),
            Centering::BoundingSphereCenter,
            &mut rng,
        );
        assert!(converted.vertices.is_empty());
        assert!(converted.indices.is_empty());
        assert_eq!(converted.position, Vec3::ZERO);
        assert_eq!(converted.radius_from_origo, 0.0);
    }
}
