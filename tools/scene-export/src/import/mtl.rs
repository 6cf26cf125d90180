//! Wavefront MTL material libraries

use std::path::Path;

use scene_format::{Color4, TextureSlot};

use crate::error::ImportError;
use crate::scene::SourceMaterial;

/// Parse every material defined in an MTL file, in definition order
pub fn parse_mtl(path: &Path, text: &str) -> Result<Vec<SourceMaterial>, ImportError> {
    let mut materials: Vec<SourceMaterial> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let keyword = parts[0];
        let args = &parts[1..];

        if keyword == "newmtl" {
            materials.push(SourceMaterial {
                name: args.join(" "),
                ..Default::default()
            });
            continue;
        }

        // Statements before the first newmtl have nothing to attach to
        let Some(current) = materials.last_mut() else {
            continue;
        };

        let parse_err = |message: String| ImportError::Parse {
            path: path.to_path_buf(),
            line: line_no + 1,
            message,
        };

        match keyword {
            "Kd" => current.diffuse = Some(parse_color(args).map_err(parse_err)?),
            "Ka" => current.ambient = Some(parse_color(args).map_err(parse_err)?),
            "Ks" => current.specular = Some(parse_color(args).map_err(parse_err)?),
            "Ke" => current.emissive = Some(parse_color(args).map_err(parse_err)?),
            "Ns" => {
                let value = args
                    .first()
                    .and_then(|s| s.parse::<f32>().ok())
                    .ok_or_else(|| parse_err(format!("invalid Ns statement: {line}")))?;
                current.shininess = Some(value);
            }
            "map_Kd" => set_texture(current, TextureSlot::Diffuse, args),
            "map_Ks" => set_texture(current, TextureSlot::Specular, args),
            "norm" | "map_Kn" => set_texture(current, TextureSlot::Normal, args),
            "bump" | "map_bump" | "map_Bump" => set_texture(current, TextureSlot::Height, args),
            _ => {}
        }
    }

    Ok(materials)
}

/// `r g b` (a single value means grey)
fn parse_color(args: &[&str]) -> Result<Color4, String> {
    let values: Vec<f32> = args
        .iter()
        .take(3)
        .map(|s| s.parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid color component: {e}"))?;

    match values.as_slice() {
        [v] => Ok(Color4::rgb([*v, *v, *v])),
        [r, g, b] => Ok(Color4::rgb([*r, *g, *b])),
        _ => Err(format!("expected 1 or 3 color components, got {}", values.len())),
    }
}

/// Texture statements may carry options (`-bm 0.5 file.png`); the path is last
fn set_texture(material: &mut SourceMaterial, slot: TextureSlot, args: &[&str]) {
    if let Some(path) = args.last() {
        material.set_texture(slot, (*path).to_string());
    }
}
