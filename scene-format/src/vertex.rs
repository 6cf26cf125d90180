//! Export vertex format
//!
//! POD record, no padding. Field order is part of the blob format.
//!
//! # Layout
//! ```text
//! 0x00: position  f32 x 3
//! 0x0C: uv        f32 x 2
//! 0x14: normal    f32 x 3
//! 0x20: tangent   f32 x 3
//! 0x2C: bitangent f32 x 3
//! ```
//! Total: 56 bytes (14 floats). Indices follow as `u32`.

use bytemuck::{Pod, Zeroable};

/// Index type written to the blob (one per triangle corner)
pub type IndexType = u32;

/// Size of one [`ExportVertex`] in bytes
pub const VERTEX_SIZE: usize = 56;

/// Size of one [`IndexType`] in bytes
pub const INDEX_SIZE: usize = 4;

/// One vertex as stored in the blob
///
/// Every field is always present. Attributes the source mesh lacks are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ExportVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

const _: () = assert!(std::mem::size_of::<ExportVertex>() == VERTEX_SIZE);
const _: () = assert!(std::mem::size_of::<IndexType>() == INDEX_SIZE);

impl ExportVertex {
    /// Squared distance of the position from the local origin
    #[inline]
    pub fn position_length_squared(&self) -> f32 {
        let [x, y, z] = self.position;
        x * x + y * y + z * z
    }
}
