//! Shared wire types for exported scenes
//!
//! An export run produces two files:
//! - a binary blob holding every mesh's vertex and index bytes back-to-back
//! - a text descriptor listing the per-mesh regions and per-material summaries
//!
//! This crate owns the record types that tie the two together, so that both the
//! exporter and any loader agree on the byte layout.
//!
//! # Modules
//!
//! - [`vertex`] - Fixed 56-byte export vertex and 32-bit indices
//! - [`layout`] - Per-mesh blob regions ([`ExportMesh`])
//! - [`material`] - Material summaries ([`Material`], [`Color4`])

pub mod layout;
pub mod material;
pub mod vertex;

pub use layout::{ExportMesh, read_indices, read_vertices};
pub use material::{Color4, Material, TextureSlot};
pub use vertex::{ExportVertex, INDEX_SIZE, IndexType, VERTEX_SIZE};
