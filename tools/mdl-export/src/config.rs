//! Export configuration
//!
//! Parsed from TOML. Every field has a default, so an empty document is a
//! valid configuration:
//!
//! ```toml
//! frame_name = "idle"
//! eye_position = [0.0, 0.0, 24.0]
//!
//! [texture]
//! max_dimension = 256
//! sample_factor = 10
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use mdl_common::formats::DEFAULT_EYE_POSITION;
use serde::Deserialize;

/// Settings shared by every model in an export run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Name of the frame built from the mesh's own vertices.
    pub frame_name: String,
    /// Eye position written to the header.
    pub eye_position: [f32; 3],
    pub texture: TextureConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            frame_name: "idle".to_string(),
            eye_position: DEFAULT_EYE_POSITION.to_array(),
            texture: TextureConfig::default(),
        }
    }
}

/// Texture indexer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextureConfig {
    /// Images larger than this on either axis are downsampled.
    pub max_dimension: u32,
    /// NeuQuant sampling factor, 1 (best) to 30 (fastest).
    pub sample_factor: i32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            max_dimension: 256,
            sample_factor: 10,
        }
    }
}

impl ExportConfig {
    pub fn eye_position(&self) -> Vec3 {
        Vec3::from_array(self.eye_position)
    }

    /// Parse and check a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).context("Failed to parse export config")?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        anyhow::ensure!(
            self.texture.max_dimension > 0,
            "texture.max_dimension must be at least 1"
        );
        anyhow::ensure!(
            (1..=30).contains(&self.texture.sample_factor),
            "texture.sample_factor must be between 1 and 30, got {}",
            self.texture.sample_factor
        );
        anyhow::ensure!(
            self.eye_position.iter().all(|c| c.is_finite()),
            "eye_position must be finite"
        );
        Ok(())
    }
}

/// Load an export config from a TOML file.
pub fn load_config(path: &Path) -> Result<ExportConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read export config: {}", path.display()))?;
    ExportConfig::from_toml_str(&content)
        .with_context(|| format!("Invalid export config: {}", path.display()))
}
