//! Geometric primitives
//!
//! Points are plain `glam::Vec3`; glam provides the arithmetic (sub, add,
//! scale, dot, length). This module only bridges to the `[f32; 3]` arrays used
//! by source meshes and wire records.

use glam::Vec3;

/// A 3D coordinate (vertex position or sphere center)
pub type Point3 = Vec3;

/// Build a point from a source array
#[inline]
pub fn point(p: [f32; 3]) -> Point3 {
    Vec3::from_array(p)
}

/// Collect source positions into points
pub fn points_from_arrays(positions: &[[f32; 3]]) -> Vec<Point3> {
    positions.iter().copied().map(point).collect()
}

/// Squared Euclidean distance between two points
#[inline]
pub fn distance_squared(a: Point3, b: Point3) -> f32 {
    let d = a - b;
    d.dot(d)
}
