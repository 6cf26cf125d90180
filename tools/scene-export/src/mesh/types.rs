//! Types for mesh conversion

use scene_format::{ExportVertex, IndexType};
use serde::Deserialize;

use crate::geometry::Point3;

/// Where a converted mesh's local origin goes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Centering {
    /// Move the origin to the mesh's bounding-sphere center
    #[default]
    BoundingSphereCenter,
    /// Keep source coordinates
    None,
}

/// Result of converting one source mesh
#[derive(Clone, Debug, Default)]
pub struct ConvertedMesh {
    pub vertices: Vec<ExportVertex>,
    pub indices: Vec<IndexType>,
    /// Offset subtracted from every position
    pub position: Point3,
    /// Largest vertex distance from the new origin
    pub radius_from_origo: f32,
}
