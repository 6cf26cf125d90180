//! Lua scene descriptor
//!
//! The descriptor is a Lua chunk returning one table:
//!
//! ```text
//! return {
//!     datafile='meshdata.bin',
//!     meshes = {
//!         { material_index=1, position={x=0, y=0, z=0}, vertices_size=168, ... },
//!     },
//!
//!     materials = {
//!         { diffuse={r=0.8, g=0.8,b=0.8, a=1}, ..., shininess=40 },
//!     }
//! }
//! ```
//!
//! Mesh `material_index` is 1-based to match Lua arrays. Optional texture keys
//! are only written when the material has that texture.

use std::io::{self, Write};

use scene_format::{Color4, ExportMesh, Material, TextureSlot};

fn lua_color(c: &Color4) -> String {
    format!("{{r={}, g={},b={}, a={}}}", c.r, c.g, c.b, c.a)
}

fn lua_vec3(v: &[f32; 3]) -> String {
    format!("{{x={}, y={}, z={}}}", v[0], v[1], v[2])
}

/// Single-quoted Lua string literal
fn lua_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Three digits so a following digit cannot extend the escape
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03}", c as u32)),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

fn write_texture<W: Write>(w: &mut W, material: &Material, slot: TextureSlot) -> io::Result<()> {
    if let Some(path) = material.texture(slot) {
        write!(w, "{}={}, ", slot.key(), lua_string(path))?;
    }
    Ok(())
}

/// Write the descriptor for one export run
pub fn write_lua_descriptor<W: Write>(
    w: &mut W,
    datafile: &str,
    meshes: &[ExportMesh],
    materials: &[Material],
) -> io::Result<()> {
    writeln!(w, "return {{")?;
    writeln!(w, "\tdatafile={},", lua_string(datafile))?;

    writeln!(w, "\tmeshes = {{")?;
    for mesh in meshes {
        write!(w, "\t\t{{ ")?;
        write!(w, "material_index={}, ", mesh.material_index + 1)?;
        write!(w, "position={}, ", lua_vec3(&mesh.position))?;
        write!(w, "vertices_size={}, ", mesh.vertices_size)?;
        write!(w, "vertices_offset = {}, ", mesh.vertices_offset)?;
        write!(w, "num_vertices={}, ", mesh.num_vertices)?;
        write!(w, "indices_size={}, ", mesh.indices_size)?;
        write!(w, "indices_offset = {}, ", mesh.indices_offset)?;
        write!(w, "num_indices={}, ", mesh.num_indices)?;
        write!(w, "radius={},", mesh.radius)?;
        writeln!(w, " }},")?;
    }
    writeln!(w, "\t}},\n")?;

    writeln!(w, "\tmaterials = {{")?;
    for material in materials {
        write!(w, "\t\t{{ diffuse={}, ", lua_color(&material.diffuse))?;
        write_texture(w, material, TextureSlot::Diffuse)?;
        write!(w, "specular={}, ", lua_color(&material.specular))?;
        write_texture(w, material, TextureSlot::Specular)?;
        write!(w, "ambient={}, ", lua_color(&material.ambient))?;
        write_texture(w, material, TextureSlot::Normal)?;
        write_texture(w, material, TextureSlot::Height)?;
        write!(w, "emissive={}, ", lua_color(&material.emissive))?;
        write!(w, "shininess={}", material.shininess)?;
        writeln!(w, " }},")?;
    }
    writeln!(w, "\t}}\n}}")?;

    Ok(())
}
