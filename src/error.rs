use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting the artwork
#[derive(Error, Debug)]
pub enum ExportError {
    /// The surface has no pixels to encode
    #[error("Cannot export an empty {width}x{height} surface")]
    EmptySurface { width: u32, height: u32 },
    /// PNG encoding of the raster failed
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    /// Writing the exported file failed
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The host page refused to start the download
    #[error("Download failed: {0}")]
    Host(String),
}

/// Errors produced when validating or loading an `ArtistConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid width range {min}..={max}")]
    InvalidWidthRange { min: f32, max: f32 },
    #[error("Initial width {width} is outside {min}..={max}")]
    InitialWidthOutOfRange { width: f32, min: f32, max: f32 },
    #[error("Export file name must be a non-empty .png name, got {0:?}")]
    InvalidFileName(String),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
