//! PLY header state machine
//!
//! Only one header layout is accepted, line for line:
//!
//! ```text
//! ply
//! format binary_little_endian 1.0
//! element vertex <count>
//! property float x
//! property float y
//! property float z
//! element face <count>
//! property list uchar uint vertex_index
//! end_header
//! ```

use crate::mesh::types::ParseError;

/// Header parser state, named after the line it expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Magic,
    Format,
    VertexElement,
    VertexX,
    VertexY,
    VertexZ,
    FaceElement,
    FaceVertexIndex,
    EndHeader,
    /// Header complete; no further header lines are allowed
    Data,
}

impl HeaderState {
    /// The line this state accepts
    pub fn expected(&self) -> &'static str {
        match self {
            HeaderState::Magic => "ply",
            HeaderState::Format => "format binary_little_endian 1.0",
            HeaderState::VertexElement => "element vertex <count>",
            HeaderState::VertexX => "property float x",
            HeaderState::VertexY => "property float y",
            HeaderState::VertexZ => "property float z",
            HeaderState::FaceElement => "element face <count>",
            HeaderState::FaceVertexIndex => "property list uchar uint vertex_index",
            HeaderState::EndHeader => "end_header",
            HeaderState::Data => "binary data",
        }
    }

    /// Diagnostic for a line this state rejects
    pub fn error_message(&self) -> &'static str {
        match self {
            HeaderState::Magic => "not a PLY file",
            HeaderState::Format => "unsupported format",
            HeaderState::VertexElement => "unsupported vertex element",
            HeaderState::VertexX | HeaderState::VertexY | HeaderState::VertexZ => {
                "unsupported vertex property"
            }
            HeaderState::FaceElement => "unsupported face element",
            HeaderState::FaceVertexIndex => "unsupported vertex_index property",
            HeaderState::EndHeader => "unsupported field",
            HeaderState::Data => "missing newline after end_header",
        }
    }

    /// Consume one header line, returning the next state.
    ///
    /// `None` means the line does not match and the header is rejected.
    fn advance(self, line: &str, header: &mut PlyHeader) -> Option<HeaderState> {
        let next = match self {
            HeaderState::VertexElement => {
                header.vertex_count = parse_count(line, "element vertex ")?;
                HeaderState::VertexX
            }
            HeaderState::FaceElement => {
                header.face_count = parse_count(line, "element face ")?;
                HeaderState::FaceVertexIndex
            }
            HeaderState::Data => return None,
            fixed => {
                if line != fixed.expected() {
                    return None;
                }
                fixed.following()
            }
        };
        Some(next)
    }

    fn following(self) -> HeaderState {
        match self {
            HeaderState::Magic => HeaderState::Format,
            HeaderState::Format => HeaderState::VertexElement,
            HeaderState::VertexElement => HeaderState::VertexX,
            HeaderState::VertexX => HeaderState::VertexY,
            HeaderState::VertexY => HeaderState::VertexZ,
            HeaderState::VertexZ => HeaderState::FaceElement,
            HeaderState::FaceElement => HeaderState::FaceVertexIndex,
            HeaderState::FaceVertexIndex => HeaderState::EndHeader,
            HeaderState::EndHeader | HeaderState::Data => HeaderState::Data,
        }
    }
}

fn parse_count(line: &str, prefix: &str) -> Option<u64> {
    line.strip_prefix(prefix)?.parse().ok()
}

/// Element counts declared by a PLY header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlyHeader {
    pub vertex_count: u64,
    pub face_count: u64,
}

impl PlyHeader {
    /// Bytes per vertex record (3 × f32)
    pub const VERTEX_SIZE: u64 = 12;

    /// Size of the vertex block, `None` on overflow
    pub fn vertex_data_size(&self) -> Option<u64> {
        self.vertex_count.checked_mul(Self::VERTEX_SIZE)
    }
}

/// Run the header state machine over the header text.
///
/// `text` runs from the start of the file through the `end_header` marker.
/// Any line that does not match the current state is fatal and reports the
/// 1-based line number and the state that rejected it.
pub fn parse_ply_header(text: &str) -> Result<PlyHeader, ParseError> {
    let mut header = PlyHeader::default();
    let mut state = HeaderState::Magic;
    let mut line_number = 0;

    for line in text.split('\n') {
        line_number += 1;
        state = state
            .advance(line, &mut header)
            .ok_or(ParseError::Header {
                line: line_number,
                state,
            })?;
    }

    if state != HeaderState::Data {
        return Err(ParseError::Header {
            line: line_number + 1,
            state,
        });
    }
    Ok(header)
}
