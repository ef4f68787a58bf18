//! meshanim-export library
//!
//! Parses per-frame OBJ and PLY meshes and writes them as the time samples of
//! a single MeshAnim archive.

pub mod config;
pub mod dispatch;
pub mod formats;
pub mod mesh;

// Re-export the shared frame type
pub use meshanim_shared::{Mesh, MeshBuilder, ARCHIVE_FORMAT};

pub use config::{load_parameters, ExportParameters};
pub use dispatch::{export_frames, load_mesh, run_export, ExportError, ExportSummary, MeshFormat};
pub use formats::{export_meshes, ArchiveFile, ArchiveWriter, FrameSink};
pub use mesh::{parse_obj, parse_ply, Diagnostic, Diagnostics, ParseError};
