//! Blob region records
//!
//! The blob has no header, magic or checksum. Each mesh contributes a vertex
//! region immediately followed by its index region, in export order, with no
//! gaps. The descriptor is the only index into the blob, so [`ExportMesh`]
//! carries the absolute offsets.

use std::ops::Range;

use crate::vertex::{ExportVertex, INDEX_SIZE, IndexType, VERTEX_SIZE};

/// Layout record for one exported mesh
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExportMesh {
    /// Zero-based material index (the descriptor writes it 1-based)
    pub material_index: u32,
    /// Origin offset subtracted from every vertex position
    pub position: [f32; 3],
    /// Largest vertex distance from the (offset) origin
    pub radius: f32,

    pub num_vertices: u32,
    pub vertices_offset: u64,
    pub vertices_size: u64,

    pub num_indices: u32,
    pub indices_offset: u64,
    pub indices_size: u64,
}

impl ExportMesh {
    /// Byte range of the vertex region within the blob
    pub fn vertex_range(&self) -> Range<usize> {
        let start = self.vertices_offset as usize;
        start..start + self.vertices_size as usize
    }

    /// Byte range of the index region within the blob
    pub fn index_range(&self) -> Range<usize> {
        let start = self.indices_offset as usize;
        start..start + self.indices_size as usize
    }

    /// Offset one past the last byte this mesh occupies
    pub fn end_offset(&self) -> u64 {
        self.indices_offset + self.indices_size
    }
}

/// Read a mesh's vertices back out of a blob
///
/// Returns `None` if the region lies outside `blob` or its size is not a
/// whole number of vertices.
pub fn read_vertices(blob: &[u8], mesh: &ExportMesh) -> Option<Vec<ExportVertex>> {
    let region = blob.get(mesh.vertex_range())?;
    if region.len() % VERTEX_SIZE != 0 {
        return None;
    }
    Some(
        region
            .chunks_exact(VERTEX_SIZE)
            .map(bytemuck::pod_read_unaligned)
            .collect(),
    )
}

/// Read a mesh's indices back out of a blob
pub fn read_indices(blob: &[u8], mesh: &ExportMesh) -> Option<Vec<IndexType>> {
    let region = blob.get(mesh.index_range())?;
    if region.len() % INDEX_SIZE != 0 {
        return None;
    }
    Some(
        region
            .chunks_exact(INDEX_SIZE)
            .map(bytemuck::pod_read_unaligned)
            .collect(),
    )
}
