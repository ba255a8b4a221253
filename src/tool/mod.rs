mod style;

pub use style::{ERASE_COLOR, PAINT_PREVIEW_BORDER, ToolStyle};

use egui::Color32;
use serde::{Deserialize, Serialize};

/// The two tools the canvas offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Paint,
    Erase,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::Paint, ToolKind::Erase];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Paint => "Paint",
            Self::Erase => "Erase",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Paint => "🖌 Paint",
            Self::Erase => "⌫ Erase",
        }
    }
}

/// The single active tool configuration.
///
/// The picked color survives tool switches: while erasing it is only
/// remembered, and painting picks it up again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    active: ToolKind,
    color: Color32,
    width: f32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            active: ToolKind::Paint,
            color: Color32::BLACK,
            width: 5.0,
        }
    }
}

impl ToolState {
    pub fn new(color: Color32, width: f32) -> Self {
        let mut state = Self {
            color,
            ..Default::default()
        };
        state.set_width(width);
        state
    }

    pub fn active(&self) -> ToolKind {
        self.active
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> ToolStyle {
        ToolStyle::derive(self.active, self.color)
    }

    /// Switches tools; returns false when `tool` was already active
    pub fn select(&mut self, tool: ToolKind) -> bool {
        if self.active == tool {
            return false;
        }
        self.active = tool;
        true
    }

    /// Stores a newly picked color.
    ///
    /// Returns true when the applied style has to be refreshed now, which only
    /// happens while painting.
    pub fn set_color(&mut self, color: Color32) -> bool {
        self.color = color;
        self.active == ToolKind::Paint
    }

    /// Returns false (and keeps the old width) for non-positive or non-finite widths
    pub fn set_width(&mut self, width: f32) -> bool {
        if !width.is_finite() || width <= 0.0 {
            return false;
        }
        self.width = width;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CompositeMode;

    #[test]
    fn test_initial_state_is_paint() {
        let state = ToolState::new(Color32::RED, 5.0);
        assert_eq!(state.active(), ToolKind::Paint);
        let style = state.style();
        assert_eq!(style.stroke_color, Color32::RED);
        assert_eq!(style.composite, CompositeMode::SourceOver);
        assert_eq!(style.preview_fill, Color32::RED);
        assert_eq!(style.preview_border, PAINT_PREVIEW_BORDER);
    }

    #[test]
    fn test_erase_style() {
        let mut state = ToolState::new(Color32::RED, 5.0);
        assert!(state.select(ToolKind::Erase));
        let style = state.style();
        assert_eq!(style.stroke_color, Color32::WHITE);
        assert_eq!(style.composite, CompositeMode::DestinationOut);
        assert_eq!(style.preview_fill, Color32::WHITE);
        assert_eq!(style.preview_border, Color32::RED);
    }

    #[test]
    fn test_reselecting_is_a_no_op() {
        let mut state = ToolState::default();
        let before = state.clone();
        assert!(!state.select(ToolKind::Paint));
        assert_eq!(state, before);
    }

    #[test]
    fn test_color_while_erasing_is_remembered() {
        let mut state = ToolState::new(Color32::BLACK, 5.0);
        state.select(ToolKind::Erase);
        let erase_style = state.style();

        assert!(!state.set_color(Color32::BLUE));
        assert_eq!(state.color(), Color32::BLUE);
        assert_eq!(state.style().stroke_color, erase_style.stroke_color);
        assert_eq!(state.style().composite, erase_style.composite);

        state.select(ToolKind::Paint);
        assert_eq!(state.style().stroke_color, Color32::BLUE);
    }

    #[test]
    fn test_width_validation() {
        let mut state = ToolState::new(Color32::BLACK, 5.0);
        assert!(state.set_width(12.0));
        assert!(!state.set_width(0.0));
        assert!(!state.set_width(f32::NAN));
        assert_eq!(state.width(), 12.0);

        let fallback = ToolState::new(Color32::BLACK, -4.0);
        assert_eq!(fallback.width(), 5.0);
    }
}
