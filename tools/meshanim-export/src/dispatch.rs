//! Input dispatch: pick a parser per file and feed frames to a sink in order

use std::io;
use std::path::{Path, PathBuf};

use meshanim_shared::Mesh;

use crate::config::ExportParameters;
use crate::formats::{ArchiveFile, FrameSink};
use crate::mesh::{load_obj, load_ply, Diagnostics, ParseError};

/// Input mesh format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    /// Line-based `.obj`
    Obj,
    /// Binary little-endian `.ply`
    Ply,
}

impl MeshFormat {
    /// Detect the format from the extension (case-sensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "obj" => Some(MeshFormat::Obj),
            "ply" => Some(MeshFormat::Ply),
            _ => None,
        }
    }

    /// Parse one file in this format
    pub fn load(self, path: &Path, diagnostics: &mut Diagnostics) -> Result<Mesh, ParseError> {
        match self {
            MeshFormat::Obj => load_obj(path, diagnostics),
            MeshFormat::Ply => load_ply(path, diagnostics),
        }
    }
}

/// Error that aborts the whole export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unknown file type: {0:?}")]
    UnknownFileType(PathBuf),

    #[error("{path:?}: {source}")]
    Parse { path: PathBuf, source: ParseError },

    #[error("failed to write archive: {0}")]
    Archive(#[from] io::Error),
}

/// Result of a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Frames written, one per input file
    pub frames: usize,
    /// Records dropped across all inputs
    pub diagnostics: usize,
    pub output: PathBuf,
}

/// Resolve the format of every input before any of them is read
pub fn detect_formats<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Vec<(PathBuf, MeshFormat)>, ExportError> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            MeshFormat::from_path(path)
                .map(|format| (path.to_path_buf(), format))
                .ok_or_else(|| ExportError::UnknownFileType(path.to_path_buf()))
        })
        .collect()
}

/// Parse a single input file, choosing the parser by extension
pub fn load_mesh(path: &Path, diagnostics: &mut Diagnostics) -> Result<Mesh, ExportError> {
    let format =
        MeshFormat::from_path(path).ok_or_else(|| ExportError::UnknownFileType(path.to_path_buf()))?;
    format
        .load(path, diagnostics)
        .map_err(|source| ExportError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Parse every input in order, handing each frame to `sink` as soon as it is
/// parsed.
///
/// Returns the number of frames written. The first fatal error stops the run;
/// frames already handed to the sink are its responsibility to discard.
pub fn export_frames<P, S>(
    paths: &[P],
    sink: &mut S,
    diagnostics: &mut Diagnostics,
) -> Result<usize, ExportError>
where
    P: AsRef<Path>,
    S: FrameSink + ?Sized,
{
    let inputs = detect_formats(paths)?;

    for (frame, (path, format)) in inputs.iter().enumerate() {
        tracing::info!("Frame {}: {:?}", frame, path);
        let mesh = format
            .load(path, diagnostics)
            .map_err(|source| ExportError::Parse {
                path: path.clone(),
                source,
            })?;
        sink.write_frame(mesh)?;
    }

    Ok(inputs.len())
}

/// Convert all inputs into one archive at `output`.
///
/// The archive only exists once every input has been parsed; any fatal error
/// leaves `output` untouched.
pub fn run_export<P: AsRef<Path>>(
    paths: &[P],
    params: &ExportParameters,
    output: &Path,
) -> Result<ExportSummary, ExportError> {
    // Unknown extensions fail before the output directory is touched
    detect_formats(paths)?;

    let mut archive = ArchiveFile::create(output, params)?;
    let mut diagnostics = Diagnostics::new();
    let frames = export_frames(paths, &mut archive, &mut diagnostics)?;
    let output = archive.commit()?;

    Ok(ExportSummary {
        frames,
        diagnostics: diagnostics.len(),
        output,
    })
}
