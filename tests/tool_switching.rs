use egui::{Color32, vec2};
use mini_artist::tool::PAINT_PREVIEW_BORDER;
use mini_artist::{Artist, ArtistConfig, CompositeMode, ToolKind};

#[test]
fn test_reselecting_active_tool_is_idempotent() {
    let mut artist = Artist::default();
    let settings = artist.surface().settings().clone();
    let preview = artist.preview().clone();

    assert!(!artist.select_tool(ToolKind::Paint));
    assert_eq!(artist.surface().settings(), &settings);
    assert_eq!(artist.preview(), &preview);
    assert!(artist.is_active_control(ToolKind::Paint));

    artist.select_tool(ToolKind::Erase);
    let settings = artist.surface().settings().clone();
    assert!(!artist.select_tool(ToolKind::Erase));
    assert_eq!(artist.surface().settings(), &settings);
    assert!(artist.is_active_control(ToolKind::Erase));
    assert!(!artist.is_active_control(ToolKind::Paint));
}

#[test]
fn test_paint_erase_paint_restores_color() {
    let mut artist = Artist::default();
    let picked = Color32::from_rgb(12, 120, 240);
    artist.set_color(picked);

    artist.select_tool(ToolKind::Erase);
    assert_eq!(artist.surface().settings().stroke_color, Color32::WHITE);
    assert_eq!(artist.surface().settings().composite, CompositeMode::DestinationOut);
    assert_eq!(artist.preview().fill(), Color32::WHITE);
    assert_eq!(artist.preview().border(), picked);

    artist.select_tool(ToolKind::Paint);
    assert_eq!(artist.surface().settings().stroke_color, picked);
    assert_eq!(artist.surface().settings().composite, CompositeMode::SourceOver);
    assert_eq!(artist.preview().fill(), picked);
    assert_eq!(artist.preview().border(), PAINT_PREVIEW_BORDER);
}

#[test]
fn test_color_change_while_painting_is_live() {
    let mut artist = Artist::default();
    artist.set_color(Color32::GREEN);
    assert_eq!(artist.surface().settings().stroke_color, Color32::GREEN);
    assert_eq!(artist.preview().fill(), Color32::GREEN);
}

#[test]
fn test_color_change_while_erasing_waits_for_paint() {
    let mut artist = Artist::default();
    artist.select_tool(ToolKind::Erase);
    artist.set_color(Color32::RED);

    assert_eq!(artist.surface().settings().stroke_color, Color32::WHITE);
    assert_eq!(artist.preview().border(), Color32::BLACK);
    assert_eq!(artist.tool().color(), Color32::RED);

    artist.select_tool(ToolKind::Paint);
    assert_eq!(artist.surface().settings().stroke_color, Color32::RED);
}

#[test]
fn test_resize_while_erasing_keeps_eraser() {
    let mut artist = Artist::default();
    artist.select_tool(ToolKind::Erase);
    artist.set_width(14.0);
    artist.resize(vec2(32.0, 32.0));

    let settings = artist.surface().settings();
    assert_eq!(settings.composite, CompositeMode::DestinationOut);
    assert_eq!(settings.line_width, 14.0);
    assert_eq!(artist.preview().size(), 14.0);
}

#[test]
fn test_config_drives_initial_state() {
    let config = ArtistConfig {
        initial_color: [255, 0, 0],
        initial_width: 9.0,
        ..Default::default()
    };
    let artist = Artist::new(config);
    assert_eq!(artist.tool().color(), Color32::RED);
    assert_eq!(artist.surface().settings().line_width, 9.0);
    assert_eq!(artist.preview().fill(), Color32::RED);
}
