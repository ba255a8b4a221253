use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::surface::Surface;

/// Keeps the GPU copy of the raster in sync with the surface.
///
/// The raster is only re-uploaded when the surface version moved on.
#[derive(Default)]
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    uploaded_version: Option<u64>,
}

impl CanvasTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texture for the current raster, or `None` for an empty surface
    pub fn texture_id(&mut self, ctx: &Context, surface: &Surface) -> Option<TextureId> {
        let [width, height] = surface.size();
        if width == 0 || height == 0 {
            return None;
        }

        if self.uploaded_version != Some(surface.version()) || self.handle.is_none() {
            let image = ColorImage::from_rgba_unmultiplied(
                [width as usize, height as usize],
                surface.raster().as_raw(),
            );
            match &mut self.handle {
                Some(handle) => handle.set(image, TextureOptions::LINEAR),
                None => {
                    self.handle = Some(ctx.load_texture("canvas", image, TextureOptions::LINEAR));
                }
            }
            self.uploaded_version = Some(surface.version());
        }

        self.handle.as_ref().map(TextureHandle::id)
    }

    pub fn uploaded_version(&self) -> Option<u64> {
        self.uploaded_version
    }
}
