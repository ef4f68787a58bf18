//! Export parameters
//!
//! Every field has a default, so a parameters file only needs the values it
//! changes:
//!
//! ```toml
//! application_name = "MyTool"
//! frames_per_second = 30.0
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Archive-level settings handed to the writer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportParameters {
    /// Recorded as the archive's application name
    #[serde(default = "default_application_name")]
    pub application_name: String,

    /// Free-form description stored in the archive metadata
    #[serde(default = "default_scene_description")]
    pub scene_description: String,

    /// Name of the animated geometry object
    #[serde(default = "default_object_name")]
    pub object_name: String,

    /// Sample rate; sample `i` sits at `i / frames_per_second` seconds
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: f64,
}

fn default_application_name() -> String {
    "AlEx".to_string()
}

fn default_scene_description() -> String {
    "An example mesh animation for Blender.".to_string()
}

fn default_object_name() -> String {
    "exobj".to_string()
}

fn default_frames_per_second() -> f64 {
    24.0
}

impl Default for ExportParameters {
    fn default() -> Self {
        Self {
            application_name: default_application_name(),
            scene_description: default_scene_description(),
            object_name: default_object_name(),
            frames_per_second: default_frames_per_second(),
        }
    }
}

impl ExportParameters {
    /// Check values the archive cannot represent
    pub fn validate(&self) -> Result<()> {
        if !self.frames_per_second.is_finite() || self.frames_per_second <= 0.0 {
            bail!(
                "frames_per_second must be a positive number, got {}",
                self.frames_per_second
            );
        }
        if self.object_name.is_empty() {
            bail!("object_name must not be empty");
        }
        Ok(())
    }
}

/// Load and validate export parameters from a TOML file
pub fn load_parameters(path: &Path) -> Result<ExportParameters> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameters: {:?}", path))?;
    let params: ExportParameters = toml::from_str(&content)
        .with_context(|| format!("Failed to parse parameters: {:?}", path))?;
    params.validate()?;
    Ok(params)
}
