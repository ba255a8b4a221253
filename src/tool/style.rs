use egui::Color32;

use super::ToolKind;
use crate::surface::CompositeMode;

/// Border of the cursor preview while painting
pub const PAINT_PREVIEW_BORDER: Color32 = Color32::from_rgba_premultiplied(230, 230, 230, 230);

/// What the eraser "paints" with; it matches the white backdrop
pub const ERASE_COLOR: Color32 = Color32::WHITE;

/// Everything the surface and the cursor preview derive from the tool state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolStyle {
    pub stroke_color: Color32,
    pub composite: CompositeMode,
    pub preview_fill: Color32,
    pub preview_border: Color32,
}

impl ToolStyle {
    pub fn derive(tool: ToolKind, picked: Color32) -> Self {
        match tool {
            ToolKind::Paint => Self {
                stroke_color: picked,
                composite: CompositeMode::SourceOver,
                preview_fill: picked,
                preview_border: PAINT_PREVIEW_BORDER,
            },
            // The border keeps the picked color so the white footprint stays visible
            ToolKind::Erase => Self {
                stroke_color: ERASE_COLOR,
                composite: CompositeMode::DestinationOut,
                preview_fill: ERASE_COLOR,
                preview_border: picked,
            },
        }
    }
}
