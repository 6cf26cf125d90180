//! Export configuration
//!
//! Everything has a default, so the tool runs with no config at all. When a
//! `scene-export.toml` sits in the working directory it overrides the defaults:
//!
//! ```toml
//! centering = "bounding_sphere_center"   # or "none"
//! seed = 5489
//! blob_file = "meshdata.bin"
//! descriptor_file = "scene.lua"
//!
//! [import]
//! flip_winding_order = true
//! generate_normals = true
//! calc_tangent_space = true
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::ExportError;
use crate::mesh::Centering;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "scene-export.toml";

/// Top-level export settings
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub centering: Centering,
    /// Seed for the bounding-sphere refinement shuffle
    pub seed: u64,
    pub blob_file: String,
    pub descriptor_file: String,
    pub import: ImportOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            centering: Centering::BoundingSphereCenter,
            seed: 5489,
            blob_file: "meshdata.bin".to_string(),
            descriptor_file: "scene.lua".to_string(),
            import: ImportOptions::default(),
        }
    }
}

/// Post-processing the import collaborator applies before conversion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportOptions {
    /// Reverse triangle winding (a,b,c) -> (a,c,b)
    pub flip_winding_order: bool,
    /// Compute smooth normals for meshes that have none
    pub generate_normals: bool,
    /// Compute tangents/bitangents for meshes with UVs but no tangent frame
    pub calc_tangent_space: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            flip_winding_order: true,
            generate_normals: true,
            calc_tangent_space: true,
        }
    }
}

impl ExportConfig {
    /// Parse a TOML config document
    pub fn from_toml_str(path: &Path, text: &str) -> Result<Self, ExportError> {
        toml::from_str(text).map_err(|e| ExportError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `dir/scene-export.toml`, or defaults if it does not exist
    pub fn load_from_dir(dir: &Path) -> Result<Self, ExportError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|e| ExportError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::info!("Using config {:?}", path);
        Self::from_toml_str(&path, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = ExportConfig::from_toml_str(Path::new("x.toml"), "").unwrap();
        assert_eq!(config, ExportConfig::default());
        assert_eq!(config.centering, Centering::BoundingSphereCenter);
        assert!(config.import.flip_winding_order);
    }

    #[test]
    fn test_partial_override() {
        let text = r#"
            centering = "none"
            seed = 7

            [import]
            flip_winding_order = false
        "#;
        let config = ExportConfig::from_toml_str(Path::new("x.toml"), text).unwrap();
        assert_eq!(config.centering, Centering::None);
        assert_eq!(config.seed, 7);
        assert_eq!(config.blob_file, "meshdata.bin");
        assert!(!config.import.flip_winding_order);
        assert!(config.import.generate_normals);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ExportConfig::from_toml_str(Path::new("x.toml"), "centred = true").unwrap_err();
        assert!(matches!(err, ExportError::Config { .. }));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, ExportConfig::default());
    }
}
