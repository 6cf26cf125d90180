//! Blob layout writer
//!
//! Appends each converted mesh's vertex bytes then index bytes to one output
//! stream and records where they landed. Writes are strictly sequential: no
//! seeking, no rewriting, one running offset for the whole run.

use std::io::{self, Write};

use scene_format::{ExportMesh, INDEX_SIZE, VERTEX_SIZE};

use crate::mesh::ConvertedMesh;

/// Sequential blob writer with a running byte offset
pub struct BlobWriter<W: Write> {
    writer: W,
    offset: u64,
}

impl<W: Write> BlobWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, offset: 0 }
    }

    /// Bytes written so far
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Append one mesh and return its layout record
    pub fn append(&mut self, mesh: &ConvertedMesh, material_index: u32) -> io::Result<ExportMesh> {
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&mesh.indices);
        debug_assert_eq!(vertex_bytes.len(), mesh.vertices.len() * VERTEX_SIZE);
        debug_assert_eq!(index_bytes.len(), mesh.indices.len() * INDEX_SIZE);

        let vertices_offset = self.offset;
        self.writer.write_all(vertex_bytes)?;
        self.offset += vertex_bytes.len() as u64;

        let indices_offset = self.offset;
        self.writer.write_all(index_bytes)?;
        self.offset += index_bytes.len() as u64;

        Ok(ExportMesh {
            material_index,
            position: mesh.position.to_array(),
            radius: mesh.radius_from_origo,
            num_vertices: mesh.vertices.len() as u32,
            vertices_offset,
            vertices_size: vertex_bytes.len() as u64,
            num_indices: mesh.indices.len() as u32,
            indices_offset,
            indices_size: index_bytes.len() as u64,
        })
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
