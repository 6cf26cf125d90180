//! Mesh conversion (source mesh -> export vertices + flat indices)

mod convert;
mod reformat;
mod types;

// Re-export public API
pub use convert::convert_mesh;
pub use reformat::{VertexPolicy, reformat_vertex};
pub use types::{Centering, ConvertedMesh};
