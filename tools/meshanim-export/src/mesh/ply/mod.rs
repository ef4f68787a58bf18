//! Binary little-endian PLY frame parsing
//!
//! The file is a text header followed directly by packed vertex and face
//! records. Unlike OBJ there is no line to resynchronize on, so any problem in
//! the header or payload rejects the whole file.

mod header;

use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use meshanim_shared::{index_in_range, Mesh, MeshBuilder};
use smallvec::SmallVec;

use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::types::ParseError;

pub use header::{parse_ply_header, HeaderState, PlyHeader};

/// Marker ending the text header
const END_HEADER: &[u8] = b"end_header";

/// Parse a complete PLY file held in memory.
///
/// Leftover bytes after the last face and a malformed header terminator are
/// reported to `diagnostics`; everything else that is wrong is fatal and no
/// mesh is returned.
pub fn parse_ply(
    bytes: &[u8],
    source: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Mesh, ParseError> {
    let marker = bytes
        .windows(END_HEADER.len())
        .position(|w| w == END_HEADER)
        .ok_or(ParseError::MissingEndHeader)?;
    let header_end = marker + END_HEADER.len();

    let header = parse_ply_header(&String::from_utf8_lossy(&bytes[..header_end]))?;
    let marker_line = bytes[..marker].iter().filter(|&&b| b == b'\n').count() + 1;

    let payload_start = match &bytes[header_end..] {
        [b'\n', ..] => header_end + 1,
        [b'\r', b'\n', ..] => {
            diagnostics.report_line(source, marker_line, DiagnosticKind::MissingHeaderNewline);
            header_end + 2
        }
        _ => {
            diagnostics.report_line(source, marker_line, DiagnosticKind::MissingHeaderNewline);
            header_end
        }
    };
    let payload = &bytes[payload_start..];

    // Vertex block
    let vertex_data_size = header
        .vertex_data_size()
        .ok_or(ParseError::VertexCountTooLarge(header.vertex_count))?;
    if (payload.len() as u64) < vertex_data_size {
        return Err(ParseError::TruncatedVertexData {
            expected: vertex_data_size,
            actual: payload.len(),
        });
    }
    // Both fit in usize now that the block is known to be inside `payload`
    let vertex_data_size = vertex_data_size as usize;
    let vertex_count = header.vertex_count as usize;

    let mut builder = MeshBuilder::with_vertex_capacity(vertex_count);
    let mut vertices = &payload[..vertex_data_size];
    for _ in 0..vertex_count {
        let mut position = [0f32; 3];
        vertices
            .read_f32_into::<LittleEndian>(&mut position)
            .map_err(|_| ParseError::TruncatedVertexData {
                expected: vertex_data_size as u64,
                actual: payload.len(),
            })?;
        builder.push_vertex(position);
    }

    // Face block: u8 index count, then that many u32 indices
    let mut cursor = &payload[vertex_data_size..];
    for face in 0..header.face_count {
        let index_count = cursor.read_u8().map_err(|_| ParseError::TruncatedFaces {
            expected: header.face_count,
            got: face,
        })?;

        let mut indices: SmallVec<[i32; 4]> = SmallVec::with_capacity(index_count as usize);
        for _ in 0..index_count {
            let index = cursor
                .read_u32::<LittleEndian>()
                .map_err(|_| ParseError::TruncatedIndex { face })?;
            let stored = index_in_range(u64::from(index), vertex_count)
                .ok_or(ParseError::InvalidIndex { face, index })?;
            indices.push(stored);
        }
        builder.push_face(&indices);
    }

    if !cursor.is_empty() {
        diagnostics.report(source, DiagnosticKind::ExtraBytes(cursor.len()));
    }

    Ok(builder.build())
}

/// Read and parse a PLY file
pub fn load_ply(input: &Path, diagnostics: &mut Diagnostics) -> Result<Mesh, ParseError> {
    let bytes = std::fs::read(input)?;
    let mesh = parse_ply(&bytes, &input.display().to_string(), diagnostics)?;

    tracing::debug!(
        "Parsed PLY {:?}: {} vertices, {} faces",
        input,
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}
