//! Mesh frame parsers (OBJ/PLY -> Mesh)

mod diagnostics;
mod obj;
mod ply;
mod types;

// Re-export public API
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use obj::{classify_obj_line, load_obj, parse_obj, ObjLine};
pub use ply::{load_ply, parse_ply, parse_ply_header, HeaderState, PlyHeader};
pub use types::ParseError;
