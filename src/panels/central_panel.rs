use egui::{Color32, CursorIcon, Rect, Sense, pos2, vec2};

use crate::MiniArtistApp;
use crate::input::covered_by_other_layer;

pub fn central_panel(app: &mut MiniArtistApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let rect = response.rect;

            app.sync_canvas_size(rect.size());

            // The color picker popup can overlap the canvas
            let events = ctx.input(|i| i.events.clone());
            let covered = covered_by_other_layer(ctx, ui.layer_id());
            // eframe's web runner already calls preventDefault on every pointer
            // and touch event that reaches its canvas
            let _ = app.handle_events(&events, rect, covered);

            painter.rect_filled(rect, 0.0, app.artist().config().backdrop_color());

            let [width, height] = app.artist().surface().size();
            if let Some(texture_id) = app.canvas_texture_id(ctx) {
                let image_rect = Rect::from_min_size(rect.min, vec2(width as f32, height as f32));
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(texture_id, image_rect, uv, Color32::WHITE);
            }

            let preview = app.artist().preview();
            preview.paint(&painter, rect.min);
            if preview.is_visible() {
                ctx.set_cursor_icon(CursorIcon::None);
            }
        });
}
