//! Material extraction (source material -> descriptor summary)

use scene_format::{Color4, Material, TextureSlot};

use crate::scene::{SourceMaterial, SourceScene};

pub const DEFAULT_DIFFUSE: Color4 = Color4::new(0.8, 0.8, 0.8, 1.0);
pub const DEFAULT_AMBIENT: Color4 = Color4::new(0.01, 0.01, 0.01, 1.0);
pub const DEFAULT_SPECULAR: Color4 = Color4::new(1.0, 1.0, 1.0, 1.0);
pub const DEFAULT_EMISSIVE: Color4 = Color4::new(0.0, 0.0, 0.0, 1.0);

/// Substituted when the source shininess is absent or exactly zero
pub const DEFAULT_SHININESS: f32 = 40.0 * 4.0;

/// Source shininess is stored scaled by this factor
pub const SHININESS_SCALE: f32 = 4.0;

/// Summarize every material in scene order
pub fn extract_materials(scene: &SourceScene) -> Vec<Material> {
    scene
        .materials
        .iter()
        .enumerate()
        .map(|(i, m)| summarize_material(i as u32, m))
        .collect()
}

/// Apply defaults and normalize one material
///
/// A zero shininess is treated the same as a missing one, including a zero the
/// artist set on purpose.
pub fn summarize_material(index: u32, source: &SourceMaterial) -> Material {
    let shininess = match source.shininess {
        Some(s) if s != 0.0 => s,
        _ => DEFAULT_SHININESS,
    };

    let texture = |slot| {
        source
            .texture(slot)
            .map(normalize_texture_path)
            .unwrap_or_default()
    };

    Material {
        index,
        name: source.name.clone(),
        diffuse: source.diffuse.unwrap_or(DEFAULT_DIFFUSE),
        ambient: source.ambient.unwrap_or(DEFAULT_AMBIENT),
        specular: source.specular.unwrap_or(DEFAULT_SPECULAR),
        emissive: source.emissive.unwrap_or(DEFAULT_EMISSIVE),
        shininess: shininess / SHININESS_SCALE,
        diffuse_texture: texture(TextureSlot::Diffuse),
        specular_texture: texture(TextureSlot::Specular),
        normal_texture: texture(TextureSlot::Normal),
        height_texture: texture(TextureSlot::Height),
    }
}

/// Texture paths always use forward slashes
pub fn normalize_texture_path(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_empty_material() {
        let mat = summarize_material(3, &SourceMaterial::default());
        assert_eq!(mat.index, 3);
        assert_eq!(mat.diffuse, DEFAULT_DIFFUSE);
        assert_eq!(mat.ambient, DEFAULT_AMBIENT);
        assert_eq!(mat.specular, DEFAULT_SPECULAR);
        assert_eq!(mat.emissive, DEFAULT_EMISSIVE);
        assert_eq!(mat.shininess, 40.0);
        assert!(mat.diffuse_texture.is_empty());
        assert!(mat.height_texture.is_empty());
    }

    #[test]
    fn test_zero_shininess_uses_fallback() {
        let source = SourceMaterial {
            shininess: Some(0.0),
            ..Default::default()
        };
        assert_eq!(summarize_material(0, &source).shininess, 40.0);
    }

    #[test]
    fn test_shininess_is_scaled() {
        let source = SourceMaterial {
            shininess: Some(96.0),
            ..Default::default()
        };
        assert_eq!(summarize_material(0, &source).shininess, 24.0);
    }

    #[test]
    fn test_texture_paths_use_forward_slashes() {
        let mut source = SourceMaterial {
            name: "brick".to_string(),
            diffuse: Some(Color4::rgb([0.5, 0.25, 0.125])),
            ..Default::default()
        };
        source.set_texture(TextureSlot::Diffuse, "textures\\brick.png".to_string());
        source.set_texture(TextureSlot::Height, "textures\\brick_h.png".to_string());

        let mat = summarize_material(0, &source);
        assert_eq!(mat.name, "brick");
        assert_eq!(mat.diffuse, Color4::new(0.5, 0.25, 0.125, 1.0));
        assert_eq!(mat.diffuse_texture, "textures/brick.png");
        assert_eq!(mat.height_texture, "textures/brick_h.png");
        assert!(mat.specular_texture.is_empty());
    }

    #[test]
    fn test_extract_keeps_scene_order() {
        let scene = SourceScene {
            meshes: Vec::new(),
            materials: vec![
                SourceMaterial {
                    name: "a".to_string(),
                    ..Default::default()
                },
                SourceMaterial {
                    name: "b".to_string(),
                    ..Default::default()
                },
            ],
        };
        let materials = extract_materials(&scene);
        assert_eq!(materials.len(), 2);
        assert_eq!(materials[1].name, "b");
        assert_eq!(materials[1].index, 1);
    }
}
