//! Test asset generation for integration tests.
//!
//! Writes small OBJ/MTL and glTF scenes into a temp directory.

use std::io::Write;
use std::path::Path;

/// One triangle using material `red` from `tri.mtl`
pub fn generate_triangle_obj(dir: &Path) -> std::io::Result<std::path::PathBuf> {
    std::fs::write(
        dir.join("tri.mtl"),
        "newmtl red\n\
         Kd 1 0 0\n\
         Ka 0.1 0.1 0.1\n\
         Ns 100\n\
         map_Kd textures\\red.png\n",
    )?;

    let obj_path = dir.join("tri.obj");
    std::fs::write(
        &obj_path,
        "mtllib tri.mtl\n\
         o tri\n\
         v 0 0 0\n\
         v 1 0 0\n\
         v 0 1 0\n\
         usemtl red\n\
         f 1 2 3\n",
    )?;
    Ok(obj_path)
}

/// Two objects away from the origin: a quad and a triangle, no materials
pub fn generate_two_object_obj(dir: &Path) -> std::io::Result<std::path::PathBuf> {
    let obj_path = dir.join("pair.obj");
    let mut file = std::fs::File::create(&obj_path)?;

    writeln!(file, "o quad")?;
    writeln!(file, "v 10 0 0")?;
    writeln!(file, "v 12 0 0")?;
    writeln!(file, "v 12 2 0")?;
    writeln!(file, "v 10 2 0")?;
    writeln!(file, "vt 0 0")?;
    writeln!(file, "vt 1 0")?;
    writeln!(file, "vt 1 1")?;
    writeln!(file, "vt 0 1")?;
    writeln!(file, "f 1/1 2/2 3/3 4/4")?;

    writeln!(file, "o tri")?;
    writeln!(file, "v -5 -5 3")?;
    writeln!(file, "v -4 -5 3")?;
    writeln!(file, "v -5 -4 3")?;
    writeln!(file, "f 5 6 7")?;

    Ok(obj_path)
}

/// Indexed triangle in `tri.gltf` with its buffer in `tri.bin`
pub fn generate_triangle_gltf(dir: &Path) -> std::io::Result<std::path::PathBuf> {
    let positions: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let indices: [u16; 3] = [0, 1, 2];

    let mut buffer = Vec::new();
    for p in positions.iter().flatten() {
        buffer.extend_from_slice(&p.to_le_bytes());
    }
    for i in indices {
        buffer.extend_from_slice(&i.to_le_bytes());
    }
    // 4-byte aligned buffer length
    buffer.extend_from_slice(&[0, 0]);
    std::fs::write(dir.join("tri.bin"), &buffer)?;

    let json = format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "buffers": [{{ "uri": "tri.bin", "byteLength": {len} }}],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 6 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ],
  "materials": [
    {{ "name": "green", "pbrMetallicRoughness": {{ "baseColorFactor": [0.0, 1.0, 0.0, 1.0] }} }}
  ],
  "meshes": [
    {{ "name": "tri", "primitives": [{{ "attributes": {{ "POSITION": 0 }}, "indices": 1, "material": 0 }}] }}
  ],
  "nodes": [{{ "mesh": 0 }}],
  "scenes": [{{ "nodes": [0] }}],
  "scene": 0
}}
"#,
        len = buffer.len()
    );

    let gltf_path = dir.join("tri.gltf");
    std::fs::write(&gltf_path, json)?;
    Ok(gltf_path)
}

/// Config that leaves mesh positions where they are
pub fn write_uncentered_config(dir: &Path) -> std::io::Result<()> {
    std::fs::write(dir.join("scene-export.toml"), "centering = \"none\"\n")
}
