use egui::{Color32, Painter, Pos2, Stroke, Vec2};

use crate::tool::{PAINT_PREVIEW_BORDER, ToolStyle};

/// Width of the ring drawn around the cursor preview
pub const PREVIEW_BORDER_WIDTH: f32 = 2.0;

/// Floating marker that follows the pointer over the canvas.
///
/// Purely advisory: it is painted on top of the canvas texture and never
/// touches the raster.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPreview {
    position: Pos2,
    size: f32,
    fill: Color32,
    border: Color32,
    visible: bool,
}

impl Default for CursorPreview {
    fn default() -> Self {
        Self {
            position: Pos2::ZERO,
            size: 5.0,
            fill: Color32::BLACK,
            border: PAINT_PREVIEW_BORDER,
            visible: false,
        }
    }
}

impl CursorPreview {
    /// Moves the marker; `position` is in canvas-local coordinates
    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    pub fn set_style(&mut self, size: f32, fill: Color32, border: Color32) {
        self.size = size;
        self.fill = fill;
        self.border = border;
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    /// Takes the fill and border from a derived tool style
    pub fn apply_style(&mut self, style: &ToolStyle) {
        self.set_style(self.size, style.preview_fill, style.preview_border);
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn fill(&self) -> Color32 {
        self.fill
    }

    pub fn border(&self) -> Color32 {
        self.border
    }

    /// Paints the marker centered on its position, offset by the canvas origin
    pub fn paint(&self, painter: &Painter, canvas_origin: Pos2) {
        if !self.visible {
            return;
        }
        let center = canvas_origin + Vec2::new(self.position.x, self.position.y);
        let radius = self.size / 2.0;
        painter.circle(
            center,
            radius,
            self.fill,
            Stroke::new(PREVIEW_BORDER_WIDTH, self.border),
        );
    }
}
