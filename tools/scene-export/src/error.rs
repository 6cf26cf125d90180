//! Error types

use std::io;
use std::path::PathBuf;

/// Failure inside an import collaborator
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported scene format {extension:?} (use .obj, .gltf, or .glb)")]
    UnsupportedFormat { extension: String },

    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("{path:?} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("mesh {mesh:?}: {message}")]
    Malformed { mesh: String, message: String },
}

/// Fatal export failure
///
/// Every variant aborts the whole run; there is no partial success.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("error loading scene from {path:?}")]
    Import {
        path: PathBuf,
        #[source]
        source: ImportError,
    },

    #[error("error loading scene from {path:?}: file contains no loadable meshes")]
    EmptyScene { path: PathBuf },

    #[error("couldn't create {path:?}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed writing mesh data to {path:?}")]
    WriteBlob {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed writing scene descriptor {path:?}")]
    WriteDescriptor {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path:?}: {message}")]
    Config { path: PathBuf, message: String },
}
