//! Import collaborators (scene file -> [`SourceScene`])
//!
//! Supported inputs:
//! - .gltf / .glb (glTF 2.0)
//! - .obj (Wavefront OBJ, with .mtl material libraries)
//!
//! Every importer hands back triangles only. [`FileImporter`] then runs the
//! shared post-processing steps from [`postprocess`].

mod gltf;
mod mtl;
mod obj;
pub mod postprocess;

use std::path::Path;

use crate::config::ImportOptions;
use crate::error::ImportError;
use crate::scene::SourceScene;

pub use self::gltf::import_gltf;
pub use self::obj::import_obj;

/// Name given to the material synthesized for meshes that reference none
pub const DEFAULT_MATERIAL_NAME: &str = "DefaultMaterial";

/// Something that can turn a file into a source scene
pub trait SceneImporter {
    fn import(&self, path: &Path) -> Result<SourceScene, ImportError>;
}

/// Picks an importer by file extension and post-processes the result
#[derive(Clone, Copy, Debug, Default)]
pub struct FileImporter {
    pub options: ImportOptions,
}

impl FileImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }
}

impl SceneImporter for FileImporter {
    fn import(&self, path: &Path) -> Result<SourceScene, ImportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        let mut scene = match ext.as_str() {
            "obj" => import_obj(path)?,
            "gltf" | "glb" => import_gltf(path)?,
            _ => return Err(ImportError::UnsupportedFormat { extension: ext }),
        };

        postprocess::apply(&mut scene, &self.options)?;
        Ok(scene)
    }
}
