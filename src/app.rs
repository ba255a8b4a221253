use egui::{Pos2, Rect, TextureId, Vec2};

use crate::artist::Artist;
use crate::config::ArtistConfig;
use crate::export;
use crate::input::{self, InputTranslator, Propagation};
use crate::panels::{central_panel, tools_panel};
use crate::texture::CanvasTexture;
use crate::tool::ToolState;

/// We derive Deserialize/Serialize so we can persist the tool settings on shutdown.
/// The raster itself is never persisted.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct MiniArtistApp {
    config: ArtistConfig,
    tool: ToolState,
    #[serde(skip)]
    artist: Artist,
    #[serde(skip)]
    input: InputTranslator,
    #[serde(skip)]
    texture: CanvasTexture,
    #[serde(skip)]
    canvas_size: Option<Vec2>,
}

impl Default for MiniArtistApp {
    fn default() -> Self {
        Self::with_config(ArtistConfig::default())
    }
}

impl MiniArtistApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::from_saved(Self::load_saved(cc), None)
    }

    /// Like [`Self::new`], but `config` replaces whatever configuration was
    /// saved; the saved tool settings are still restored.
    pub fn with_config_override(cc: &eframe::CreationContext<'_>, config: ArtistConfig) -> Self {
        Self::from_saved(Self::load_saved(cc), Some(config))
    }

    fn load_saved(cc: &eframe::CreationContext<'_>) -> Option<Self> {
        cc.storage
            .and_then(|storage| eframe::get_value::<Self>(storage, eframe::APP_KEY))
    }

    fn from_saved(saved: Option<Self>, config_override: Option<ArtistConfig>) -> Self {
        let Some(saved) = saved else {
            return Self::with_config(config_override.unwrap_or_default());
        };
        let config = config_override.unwrap_or(saved.config);
        match config.validate() {
            Ok(()) => Self::restore(config, saved.tool),
            Err(err) => {
                log::warn!("Ignoring saved settings: {}", err);
                Self::default()
            }
        }
    }

    pub fn with_config(config: ArtistConfig) -> Self {
        let artist = Artist::new(config.clone());
        Self::from_artist(config, artist)
    }

    fn restore(config: ArtistConfig, tool: ToolState) -> Self {
        log::info!("Restoring saved tool: {}", tool.active().name());
        let artist = Artist::with_tool(config.clone(), tool);
        Self::from_artist(config, artist)
    }

    fn from_artist(config: ArtistConfig, artist: Artist) -> Self {
        Self {
            config,
            tool: artist.tool().clone(),
            artist,
            input: InputTranslator::new(),
            texture: CanvasTexture::new(),
            canvas_size: None,
        }
    }

    pub fn artist(&self) -> &Artist {
        &self.artist
    }

    pub fn artist_mut(&mut self) -> &mut Artist {
        &mut self.artist
    }

    /// Resizes the surface when the canvas area changed since the last frame
    pub fn sync_canvas_size(&mut self, size: Vec2) {
        if self.canvas_size != Some(size) {
            self.canvas_size = Some(size);
            self.artist.resize(size);
        }
    }

    /// Feeds one frame of egui events to the drawing session.
    ///
    /// Positions where `covered` is true are hidden behind other UI and never
    /// reach the canvas. Returns `PreventDefault` when any event asked for the
    /// host's default handling to be suppressed.
    pub fn handle_events(
        &mut self,
        events: &[egui::Event],
        canvas: Rect,
        covered: impl Fn(Pos2) -> bool,
    ) -> Propagation {
        let mut propagation = Propagation::Continue;
        for event in self.input.translate(events, canvas, covered) {
            let requested = input::dispatch(&mut self.artist, &event, canvas.min);
            if requested == Propagation::PreventDefault {
                propagation = requested;
            }
        }
        propagation
    }

    pub fn canvas_texture_id(&mut self, ctx: &egui::Context) -> Option<TextureId> {
        self.texture.texture_id(ctx, self.artist.surface())
    }

    /// Exports the raster as PNG and hands it to the platform sink
    pub fn save_artwork(&self) {
        let sink = export::platform_sink(self.artist.config());
        let result = self
            .artist
            .export()
            .and_then(|artwork| sink.deliver(&artwork));
        if let Err(err) = result {
            log::error!("Failed to export artwork: {}", err);
        }
    }
}

impl eframe::App for MiniArtistApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.tool = self.artist.tool().clone();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
