use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbaImage};

use crate::config::ArtistConfig;
use crate::error::ExportError;

/// A PNG rendering of the whole raster, ready to hand to the host
#[derive(Debug, Clone)]
pub struct Artwork {
    pub file_name: String,
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Artwork {
    pub fn to_data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Encode the raster as PNG
pub fn encode_png(raster: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::EmptySurface { width, height });
    }
    let mut bytes = Cursor::new(Vec::new());
    raster.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

pub fn render_artwork(raster: &RgbaImage, file_name: &str) -> Result<Artwork, ExportError> {
    let png = encode_png(raster)?;
    Ok(Artwork {
        file_name: file_name.to_owned(),
        png,
        width: raster.width(),
        height: raster.height(),
    })
}

/// Where an exported artwork ends up
pub trait ExportSink {
    fn deliver(&self, artwork: &Artwork) -> Result<(), ExportError>;
}

/// The sink the current platform hands exports to
#[cfg(not(target_arch = "wasm32"))]
pub fn platform_sink(config: &ArtistConfig) -> Box<dyn ExportSink> {
    Box::new(FileSink::new(config.export_dir.clone()))
}

#[cfg(target_arch = "wasm32")]
pub fn platform_sink(_config: &ArtistConfig) -> Box<dyn ExportSink> {
    Box::new(DownloadSink)
}

/// Writes the PNG into a directory on disk
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSink {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ExportSink for FileSink {
    fn deliver(&self, artwork: &Artwork) -> Result<(), ExportError> {
        let path = self.dir.join(&artwork.file_name);
        std::fs::write(&path, &artwork.png).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("Exported {}x{} PNG to {}", artwork.width, artwork.height, path.display());
        Ok(())
    }
}

/// Triggers a browser download through a temporary anchor element
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct DownloadSink;

#[cfg(target_arch = "wasm32")]
impl ExportSink for DownloadSink {
    fn deliver(&self, artwork: &Artwork) -> Result<(), ExportError> {
        use eframe::wasm_bindgen::JsCast as _;

        let host = |what: &str| ExportError::Host(what.to_owned());
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| host("no document"))?;
        let body = document.body().ok_or_else(|| host("no body"))?;
        let anchor = document
            .create_element("a")
            .map_err(|_| host("cannot create anchor"))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| host("element is not an anchor"))?;

        anchor.set_download(&artwork.file_name);
        anchor.set_href(&artwork.to_data_uri());
        body.append_child(&anchor).map_err(|_| host("cannot attach anchor"))?;
        anchor.click();
        body.remove_child(&anchor).map_err(|_| host("cannot detach anchor"))?;

        log::info!("Downloaded {}x{} PNG as {}", artwork.width, artwork.height, artwork.file_name);
        Ok(())
    }
}
