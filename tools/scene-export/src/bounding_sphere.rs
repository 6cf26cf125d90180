//! Approximate minimum bounding sphere
//!
//! Ritter's two-pass construction followed by iterative refinement, as laid
//! out in Ericson's *Real-Time Collision Detection* (section 4.3.4):
//!
//! 1. Pick the most separated pair among the six axis-extremal points.
//! 2. Seed a sphere on that pair and grow it over every point in input order.
//! 3. Repeatedly shrink a working sphere by 5%, regrow it over a shuffled copy
//!    of the points, and keep it whenever it beats the best radius so far.
//!
//! The result is a heuristic: it always contains every point (up to float
//! rounding) but carries no optimality guarantee. The shuffle draws from a
//! caller-owned generator, so a fixed seed and call order give reproducible
//! spheres.

use rand::Rng;

use crate::geometry::{Point3, distance_squared};

/// Number of refinement passes
pub const REFINEMENT_PASSES: usize = 16;

/// Working radius scale applied at the start of each refinement pass
pub const SHRINK_FACTOR: f32 = 0.95;

/// Sphere given by center and radius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Point3,
    pub radius: f32,
}

impl BoundingSphere {
    pub const fn new(center: Point3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether `p` lies within `radius + epsilon` of the center
    pub fn contains(&self, p: Point3, epsilon: f32) -> bool {
        let r = self.radius + epsilon;
        distance_squared(p, self.center) <= r * r
    }

    /// Enlarge minimally so that `p` is inside
    ///
    /// The new sphere is the smallest one containing both the old sphere and
    /// `p`. Points on or inside the sphere leave it untouched.
    pub fn grow_to_contain(&mut self, p: Point3) {
        let d = p - self.center;
        let dist_sq = d.dot(d);

        if dist_sq <= self.radius * self.radius {
            return;
        }

        let dist = dist_sq.sqrt();
        if dist == 0.0 {
            return;
        }

        let new_radius = (self.radius + dist) * 0.5;
        let k = (new_radius - self.radius) / dist;
        self.radius = new_radius;
        self.center += d * k;
    }
}

/// Index pair (min, max) of the most separated axis-extremal points
fn most_separated_points(points: &[Point3]) -> (usize, usize) {
    let (mut min_x, mut max_x) = (0, 0);
    let (mut min_y, mut max_y) = (0, 0);
    let (mut min_z, mut max_z) = (0, 0);

    for (i, p) in points.iter().enumerate().skip(1) {
        if p.x < points[min_x].x {
            min_x = i;
        }
        if p.x > points[max_x].x {
            max_x = i;
        }
        if p.y < points[min_y].y {
            min_y = i;
        }
        if p.y > points[max_y].y {
            max_y = i;
        }
        if p.z < points[min_z].z {
            min_z = i;
        }
        if p.z > points[max_z].z {
            max_z = i;
        }
    }

    let dist_x = distance_squared(points[max_x], points[min_x]);
    let dist_y = distance_squared(points[max_y], points[min_y]);
    let dist_z = distance_squared(points[max_z], points[min_z]);

    // x wins ties
    let mut pair = (min_x, max_x);
    if dist_y > dist_x && dist_y > dist_z {
        pair = (min_y, max_y);
    }
    if dist_z > dist_x && dist_z > dist_y {
        pair = (min_z, max_z);
    }
    pair
}

/// Ritter's sphere without refinement
///
/// Returns `None` for an empty point set.
pub fn ritter_sphere(points: &[Point3]) -> Option<BoundingSphere> {
    if points.is_empty() {
        return None;
    }

    let (min, max) = most_separated_points(points);
    let center = (points[min] + points[max]) * 0.5;
    let radius = distance_squared(points[max], center).sqrt();

    let mut sphere = BoundingSphere::new(center, radius);
    for &p in points {
        sphere.grow_to_contain(p);
    }
    Some(sphere)
}

/// Ritter's sphere plus [`REFINEMENT_PASSES`] randomized refinement passes
///
/// The working sphere and the shuffled point order both carry over from one
/// pass to the next; a pass that fails to improve on the best radius is
/// discarded from the result but not rewound.
///
/// Returns `None` for an empty point set.
pub fn bounding_sphere<R: Rng>(points: &[Point3], rng: &mut R) -> Option<BoundingSphere> {
    let mut best = ritter_sphere(points)?;

    let n = points.len();
    let mut shuffled = points.to_vec();
    let mut working = best;

    for _ in 0..REFINEMENT_PASSES {
        working.radius *= SHRINK_FACTOR;

        // Swap p[i] with a random p[j], j in [i+1, n-1], then grow over p[i]
        for i in 0..n - 1 {
            let j = rng.random_range(i + 1..n);
            shuffled.swap(i, j);
            working.grow_to_contain(shuffled[i]);
        }
        working.grow_to_contain(shuffled[n - 1]);

        if working.radius < best.radius {
            best = working;
        }
    }

    Some(best)
}
