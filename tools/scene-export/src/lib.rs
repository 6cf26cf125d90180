//! scene-export library
//!
//! Converts a 3D scene file into a binary vertex/index blob plus a Lua scene
//! descriptor. The binary is a thin wrapper over [`export::Exporter`].

pub mod bounding_sphere;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod import;
pub mod layout;
pub mod material;
pub mod mesh;
pub mod scene;

// Output record types live in scene-format so loaders can share them
pub use scene_format::{Color4, ExportMesh, ExportVertex, Material, TextureSlot};

pub use bounding_sphere::{BoundingSphere, bounding_sphere, ritter_sphere};
pub use config::{ExportConfig, ImportOptions};
pub use error::{ExportError, ImportError};
pub use export::{ExportStage, ExportSummary, Exporter, export_scene};
pub use mesh::{Centering, ConvertedMesh, convert_mesh};
