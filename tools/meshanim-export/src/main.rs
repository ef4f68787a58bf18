//! meshanim-export - per-frame mesh to animation archive converter
//!
//! Reads one OBJ or PLY mesh per frame, in argument order, and writes them as
//! the time samples of a single archive (`out.mnarc`) in the working directory.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use meshanim_export::{config, dispatch, ExportParameters, ARCHIVE_FORMAT};

#[derive(Parser)]
#[command(name = "meshanim-export")]
#[command(about = "Convert a sequence of OBJ/PLY frames into a MeshAnim archive")]
#[command(version)]
struct Cli {
    /// Input frames (.obj or .ply), one per time sample, in order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// TOML file overriding the export parameters
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let params = match &cli.params {
        Some(path) => config::load_parameters(path)?,
        None => ExportParameters::default(),
    };

    let output = Path::new(ARCHIVE_FORMAT.output_file_name);
    tracing::info!("Converting {} frames -> {:?}", cli.inputs.len(), output);

    let summary = dispatch::run_export(&cli.inputs, &params, output)
        .with_context(|| format!("Export to {:?} failed, no archive written", output))?;

    if summary.diagnostics > 0 {
        tracing::warn!("{} malformed records were skipped", summary.diagnostics);
    }
    tracing::info!(
        "Wrote {} samples at {} fps to {:?}",
        summary.frames,
        params.frames_per_second,
        summary.output
    );
    tracing::info!("Done!");

    Ok(())
}
