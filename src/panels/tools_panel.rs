use egui::color_picker::{self, Alpha};
use egui::Slider;

use crate::MiniArtistApp;
use crate::tool::ToolKind;

pub fn tools_panel(app: &mut MiniArtistApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Mini Artist");
            ui.separator();

            // Exactly one tool button is highlighted at a time
            ui.horizontal(|ui| {
                for tool in ToolKind::ALL {
                    let selected = app.artist().is_active_control(tool);
                    if ui.selectable_label(selected, tool.label()).clicked() {
                        app.artist_mut().select_tool(tool);
                    }
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = app.artist().tool().color();
                if color_picker::color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    app.artist_mut().set_color(color);
                }
            });

            let config = app.artist().config();
            let range = config.min_width..=config.max_width;
            let mut width = app.artist().tool().width();
            ui.horizontal(|ui| {
                ui.label("Width:");
                if ui.add(Slider::new(&mut width, range).step_by(1.0)).changed() {
                    app.artist_mut().set_width(width);
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("🗑 Clear").clicked() {
                    app.artist_mut().clear();
                }
                if ui.button("💾 Save").clicked() {
                    app.save_artwork();
                }
            });
        });
}
