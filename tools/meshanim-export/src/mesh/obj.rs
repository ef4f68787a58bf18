//! OBJ frame parsing
//!
//! Only `v x y z` and `f a b c [d]` lines are interpreted. Every other line
//! (comments, normals, texture coordinates, groups, materials) is dropped
//! without a diagnostic.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use meshanim_shared::{one_based_index, Mesh, MeshBuilder};
use smallvec::SmallVec;

use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::types::ParseError;

/// Outcome of matching one OBJ line
#[derive(Debug, Clone, PartialEq)]
pub enum ObjLine {
    /// Vertex position
    Vertex([f32; 3]),
    /// Face of 3 or 4 validated, 0-based indices
    Face(SmallVec<[i32; 4]>),
    /// Line kind this parser does not interpret
    Ignored,
    /// Recognized line kind that failed to parse; the line is dropped
    Malformed(DiagnosticKind),
}

/// Classify one line against the vertices declared so far.
///
/// Face indices are 1-based in the file and must not reference vertices that
/// appear later in the file.
pub fn classify_obj_line(line: &str, vertex_count: usize) -> ObjLine {
    if let Some(rest) = line.strip_prefix("v ") {
        parse_vertex(rest)
    } else if let Some(rest) = line.strip_prefix("f ") {
        parse_face(rest, vertex_count)
    } else {
        ObjLine::Ignored
    }
}

fn parse_vertex(rest: &str) -> ObjLine {
    let mut position = [0.0f32; 3];
    let mut tokens = rest.split_whitespace();
    for component in &mut position {
        match tokens.next().map(str::parse::<f32>) {
            Some(Ok(value)) => *component = value,
            _ => return ObjLine::Malformed(DiagnosticKind::InvalidVertex),
        }
    }
    if tokens.next().is_some() {
        return ObjLine::Malformed(DiagnosticKind::InvalidVertex);
    }
    ObjLine::Vertex(position)
}

fn parse_face(rest: &str, vertex_count: usize) -> ObjLine {
    let mut parsed: SmallVec<[i64; 4]> = SmallVec::new();
    for token in rest.split_whitespace() {
        if parsed.len() == 4 {
            return ObjLine::Malformed(DiagnosticKind::InvalidIndexFormat);
        }
        match token.parse::<i64>() {
            Ok(value) => parsed.push(value),
            Err(_) => return ObjLine::Malformed(DiagnosticKind::InvalidIndexFormat),
        }
    }
    if parsed.len() < 3 {
        return ObjLine::Malformed(DiagnosticKind::InvalidIndexFormat);
    }

    // One bad index rejects the whole face
    let mut indices: SmallVec<[i32; 4]> = SmallVec::new();
    for value in parsed {
        match one_based_index(value, vertex_count) {
            Some(zero_based) => indices.push(zero_based),
            None => return ObjLine::Malformed(DiagnosticKind::InvalidIndex),
        }
    }
    ObjLine::Face(indices)
}

/// Parse OBJ text into a frame.
///
/// Malformed lines are reported to `diagnostics` and skipped; the only fatal
/// error is a failure to read from `reader`.
pub fn parse_obj<R: BufRead>(
    reader: R,
    source: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Mesh, ParseError> {
    let mut builder = MeshBuilder::new();

    for (line_index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line = String::from_utf8_lossy(&line);

        match classify_obj_line(&line, builder.vertex_count()) {
            ObjLine::Vertex(position) => builder.push_vertex(position),
            ObjLine::Face(indices) => builder.push_face(&indices),
            ObjLine::Ignored => {}
            ObjLine::Malformed(kind) => diagnostics.report_line(source, line_index + 1, kind),
        }
    }

    Ok(builder.build())
}

/// Open and parse an OBJ file
pub fn load_obj(input: &Path, diagnostics: &mut Diagnostics) -> Result<Mesh, ParseError> {
    let file = File::open(input)?;
    let mesh = parse_obj(
        BufReader::new(file),
        &input.display().to_string(),
        diagnostics,
    )?;

    tracing::debug!(
        "Parsed OBJ {:?}: {} vertices, {} faces",
        input,
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn parse(text: &str) -> (Mesh, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let mesh = parse_obj(text.as_bytes(), "test.obj", &mut diagnostics).unwrap();
        (mesh, diagnostics)
    }

    #[test]
    fn test_classify_vertex() {
        assert_eq!(
            classify_obj_line("v 1 -2.5 3e2", 0),
            ObjLine::Vertex([1.0, -2.5, 300.0])
        );
        assert_eq!(
            classify_obj_line("v 1 2", 0),
            ObjLine::Malformed(DiagnosticKind::InvalidVertex)
        );
        assert_eq!(
            classify_obj_line("v 1 2 3 4", 0),
            ObjLine::Malformed(DiagnosticKind::InvalidVertex)
        );
        assert_eq!(
            classify_obj_line("v 1 two 3", 0),
            ObjLine::Malformed(DiagnosticKind::InvalidVertex)
        );
    }

    #[test]
    fn test_classify_face_converts_to_zero_based() {
        assert_eq!(
            classify_obj_line("f 1 2 3", 3),
            ObjLine::Face(smallvec![0, 1, 2])
        );
        assert_eq!(
            classify_obj_line("f 4 3 2 1", 4),
            ObjLine::Face(smallvec![3, 2, 1, 0])
        );
    }

    #[test]
    fn test_classify_face_token_count() {
        for line in ["f 1 2", "f 1 2 3 4 5", "f ", "f 1/1/1 2/2/2 3/3/3", "f 1 2 x"] {
            assert_eq!(
                classify_obj_line(line, 10),
                ObjLine::Malformed(DiagnosticKind::InvalidIndexFormat),
                "{line}"
            );
        }
    }

    #[test]
    fn test_classify_face_index_range() {
        assert_eq!(
            classify_obj_line("f 1 2 4", 3),
            ObjLine::Malformed(DiagnosticKind::InvalidIndex)
        );
        assert_eq!(
            classify_obj_line("f 0 1 2", 3),
            ObjLine::Malformed(DiagnosticKind::InvalidIndex)
        );
        assert_eq!(
            classify_obj_line("f -1 1 2", 3),
            ObjLine::Malformed(DiagnosticKind::InvalidIndex)
        );
        // Integers past the signed 32-bit cap are out of range, not malformed
        assert_eq!(
            classify_obj_line("f 2147483648 1 2", 3),
            ObjLine::Malformed(DiagnosticKind::InvalidIndex)
        );
        assert_eq!(
            classify_obj_line("f 1 2 99999999999", 3),
            ObjLine::Malformed(DiagnosticKind::InvalidIndex)
        );
    }

    #[test]
    fn test_classify_ignored_lines() {
        for line in [
            "",
            "# comment",
            "vn 0 1 0",
            "vt 0.5 0.5",
            "g group",
            "o object",
            "s off",
            "usemtl red",
            " v 1 2 3",
            "v\t1 2 3",
        ] {
            assert_eq!(classify_obj_line(line, 3), ObjLine::Ignored, "{line:?}");
        }
    }

    #[test]
    fn test_parse_quad_and_triangle() {
        let (mesh, diagnostics) = parse(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\nf 1 2 3\n",
        );
        assert!(diagnostics.is_empty());
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_counts(), &[4, 3]);
        assert_eq!(mesh.indices(), &[0, 1, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn test_forward_reference_rejected() {
        let (mesh, diagnostics) = parse("v 0 0 0\nf 1 2 3\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::InvalidIndex]);
        assert_eq!(diagnostics.iter().next().unwrap().line, Some(2));
    }

    #[test]
    fn test_malformed_lines_leave_counts_unchanged() {
        let (mesh, diagnostics) = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1\nf 1 2\nf 1 2 3 1 2\nf 1 2 3\n",
        );
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(
            diagnostics.kinds(),
            vec![
                DiagnosticKind::InvalidVertex,
                DiagnosticKind::InvalidIndexFormat,
                DiagnosticKind::InvalidIndexFormat,
            ]
        );
        let lines: Vec<_> = diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![Some(4), Some(5), Some(6)]);
    }

    #[test]
    fn test_crlf_and_missing_trailing_newline() {
        let (mesh, diagnostics) = parse("v 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3");
        assert!(diagnostics.is_empty());
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_empty_input_is_empty_mesh() {
        let (mesh, diagnostics) = parse("");
        assert!(mesh.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_non_utf8_line_does_not_abort() {
        let mut diagnostics = Diagnostics::new();
        let bytes: &[u8] = b"# \xff\xfe\nv 0 0 0\n";
        let mesh = parse_obj(bytes, "bin.obj", &mut diagnostics).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
    }

    #[test]
    fn test_stored_indices_within_vertex_count() {
        let (mesh, _) = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 3 2 1\nv 2 2 2\nf 4 1 2 3\n");
        let n = mesh.vertex_count() as i32;
        assert!(mesh.indices().iter().all(|&i| (0..n).contains(&i)));
        assert_eq!(mesh.indices(), &[2, 1, 0, 3, 0, 1, 2]);
    }
}
