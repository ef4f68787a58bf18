//! Fixture generators for integration tests

#![allow(dead_code)]

use std::fmt::Write as _;
use std::io;
use std::path::Path;

/// Unit cube corners
pub const CUBE_VERTICES: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Cube faces as 0-based quads
pub const CUBE_FACES: [[u32; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [1, 2, 6, 5],
    [0, 4, 7, 3],
];

/// Write an OBJ with the given 0-based faces (converted to 1-based)
pub fn write_obj(path: &Path, vertices: &[[f32; 3]], faces: &[&[u32]]) -> io::Result<()> {
    let mut text = String::from("# generated\n");
    for v in vertices {
        let _ = writeln!(text, "v {} {} {}", v[0], v[1], v[2]);
    }
    for face in faces {
        text.push('f');
        for i in *face {
            let _ = write!(text, " {}", i + 1);
        }
        text.push('\n');
    }
    std::fs::write(path, text)
}

/// Header of a binary little-endian PLY
pub fn ply_header(vertex_count: usize, face_count: usize) -> String {
    format!(
        "ply\nformat binary_little_endian 1.0\nelement vertex {vertex_count}\n\
         property float x\nproperty float y\nproperty float z\n\
         element face {face_count}\nproperty list uchar uint vertex_index\nend_header\n"
    )
}

/// Write a binary little-endian PLY
pub fn write_ply(path: &Path, vertices: &[[f32; 3]], faces: &[&[u32]]) -> io::Result<()> {
    let mut bytes = ply_header(vertices.len(), faces.len()).into_bytes();
    for v in vertices {
        for c in v {
            bytes.extend_from_slice(&c.to_le_bytes());
        }
    }
    for face in faces {
        bytes.push(face.len() as u8);
        for i in *face {
            bytes.extend_from_slice(&i.to_le_bytes());
        }
    }
    std::fs::write(path, bytes)
}

/// Single triangle shifted along x
pub fn generate_triangle_obj(path: &Path, x: f32) -> io::Result<()> {
    write_obj(
        path,
        &[[x, 0.0, 0.0], [x + 1.0, 0.0, 0.0], [x, 1.0, 0.0]],
        &[&[0, 1, 2]],
    )
}

pub fn generate_cube_obj(path: &Path) -> io::Result<()> {
    let faces: Vec<&[u32]> = CUBE_FACES.iter().map(|f| &f[..]).collect();
    write_obj(path, &CUBE_VERTICES, &faces)
}

pub fn generate_cube_ply(path: &Path) -> io::Result<()> {
    let faces: Vec<&[u32]> = CUBE_FACES.iter().map(|f| &f[..]).collect();
    write_ply(path, &CUBE_VERTICES, &faces)
}

/// PLY whose header never reaches `end_header`
pub fn generate_headless_ply(path: &Path) -> io::Result<()> {
    let header = ply_header(0, 0).replace("end_header\n", "");
    std::fs::write(path, header)
}
