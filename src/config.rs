use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used for the PNG download.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "mini_artist_artwork.png";

/// Startup configuration of the drawing canvas.
///
/// Persisted through eframe storage alongside the tool settings; new fields
/// fall back to their defaults when older state is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistConfig {
    /// Brush color picked at startup, as RGB
    pub initial_color: [u8; 3],
    /// Brush width at startup
    pub initial_width: f32,
    /// Smallest width the slider offers
    pub min_width: f32,
    /// Largest width the slider offers
    pub max_width: f32,
    /// Name of the exported PNG file
    pub export_file_name: String,
    /// Directory the native build writes exports into
    pub export_dir: PathBuf,
    /// Color shown behind the (transparent) raster
    pub backdrop_color: [u8; 3],
}

impl Default for ArtistConfig {
    fn default() -> Self {
        Self {
            initial_color: [0, 0, 0],
            initial_width: 5.0,
            min_width: 1.0,
            max_width: 50.0,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
            export_dir: PathBuf::from("."),
            backdrop_color: [255, 255, 255],
        }
    }
}

impl ArtistConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_width, self.max_width);
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidWidthRange { min, max });
        }
        if !(min..=max).contains(&self.initial_width) {
            return Err(ConfigError::InitialWidthOutOfRange {
                width: self.initial_width,
                min,
                max,
            });
        }
        let name = self.export_file_name.trim();
        let stem_len = name.len().saturating_sub(".png".len());
        if !name.to_ascii_lowercase().ends_with(".png")
            || stem_len == 0
            || name.contains(['/', '\\'])
        {
            return Err(ConfigError::InvalidFileName(self.export_file_name.clone()));
        }
        Ok(())
    }

    pub fn initial_color(&self) -> Color32 {
        let [r, g, b] = self.initial_color;
        Color32::from_rgb(r, g, b)
    }

    pub fn backdrop_color(&self) -> Color32 {
        let [r, g, b] = self.backdrop_color;
        Color32::from_rgb(r, g, b)
    }

    /// Clamps a requested width into the configured slider range
    pub fn clamp_width(&self, width: f32) -> f32 {
        width.clamp(self.min_width, self.max_width)
    }
}
