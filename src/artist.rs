use egui::{Color32, Pos2, Vec2};

use crate::config::ArtistConfig;
use crate::error::ExportError;
use crate::export::{self, Artwork};
use crate::input::{PointerHandler, PointerSample};
use crate::preview::CursorPreview;
use crate::stroke::StrokeRenderer;
use crate::surface::{LineCap, LineJoin, Surface};
use crate::tool::{ToolKind, ToolState};

/// The drawing session: tool state, raster surface, stroke renderer and
/// cursor preview, mutated only through the control and pointer handlers.
#[derive(Debug)]
pub struct Artist {
    config: ArtistConfig,
    tool: ToolState,
    surface: Surface,
    renderer: StrokeRenderer,
    preview: CursorPreview,
}

impl Default for Artist {
    fn default() -> Self {
        Self::new(ArtistConfig::default())
    }
}

impl Artist {
    pub fn new(config: ArtistConfig) -> Self {
        let width = config.clamp_width(config.initial_width);
        let tool = ToolState::new(config.initial_color(), width);
        Self::with_tool(config, tool)
    }

    /// Restores a previously saved tool state, keeping its width inside the
    /// configured range
    pub fn with_tool(config: ArtistConfig, mut tool: ToolState) -> Self {
        tool.set_width(config.clamp_width(tool.width()));
        let mut artist = Self {
            config,
            tool,
            surface: Surface::default(),
            renderer: StrokeRenderer::new(),
            preview: CursorPreview::default(),
        };
        artist.apply_context_settings();
        artist
    }

    pub fn config(&self) -> &ArtistConfig {
        &self.config
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn preview(&self) -> &CursorPreview {
        &self.preview
    }

    pub fn renderer(&self) -> &StrokeRenderer {
        &self.renderer
    }

    /// Canvas-local position of the last pointer sample seen
    pub fn pointer_position(&self) -> Pos2 {
        self.preview.position()
    }

    pub fn is_drawing(&self) -> bool {
        self.renderer.is_drawing()
    }

    /// Whether the control for `tool` should be highlighted
    pub fn is_active_control(&self, tool: ToolKind) -> bool {
        self.tool.active() == tool
    }

    /// Matches the raster to its container and reapplies every context setting.
    ///
    /// Clears whatever was drawn.
    pub fn resize(&mut self, container: Vec2) {
        self.surface.resize(container);
        self.apply_context_settings();
    }

    /// Selects a tool; returns false when it was already active
    pub fn select_tool(&mut self, tool: ToolKind) -> bool {
        if !self.tool.select(tool) {
            return false;
        }
        self.apply_tool_style();
        log::info!("Tool selected: {}", tool.name());
        true
    }

    pub fn set_color(&mut self, color: Color32) {
        if self.tool.set_color(color) {
            self.apply_tool_style();
        }
    }

    /// Applies a slider value, clamped into the configured range
    pub fn set_width(&mut self, width: f32) {
        if !width.is_finite() {
            return;
        }
        let width = self.config.clamp_width(width);
        if self.tool.set_width(width) {
            self.surface.set_line_width(width);
            self.preview.set_size(width);
        }
    }

    /// Wipes the raster; tool, color and width stay as they are
    pub fn clear(&mut self) {
        self.surface.clear();
        log::info!("Canvas cleared");
    }

    pub fn export(&self) -> Result<Artwork, ExportError> {
        export::render_artwork(self.surface.raster(), &self.config.export_file_name)
    }

    fn apply_context_settings(&mut self) {
        self.apply_tool_style();
        self.surface.set_line_join(LineJoin::Round);
        self.surface.set_line_cap(LineCap::Round);
        self.surface.set_line_width(self.tool.width());
        self.preview.set_size(self.tool.width());
    }

    fn apply_tool_style(&mut self) {
        let style = self.tool.style();
        self.surface.set_stroke_color(style.stroke_color);
        self.surface.set_composite(style.composite);
        self.preview.apply_style(&style);
    }
}

impl PointerHandler for Artist {
    fn on_pointer_down(&mut self, sample: PointerSample) {
        self.preview.set_position(sample.position);
        self.renderer.begin(&mut self.surface, sample.position);
    }

    fn on_pointer_move(&mut self, sample: PointerSample) {
        self.preview.set_position(sample.position);
        self.renderer.extend(&mut self.surface, sample.position);
    }

    fn on_pointer_up(&mut self) {
        self.renderer.end();
    }

    fn on_pointer_enter(&mut self) {
        self.preview.show();
    }

    fn on_pointer_leave(&mut self) {
        self.preview.hide();
    }
}
