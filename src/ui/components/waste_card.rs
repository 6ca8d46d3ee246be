use eframe::egui;

use crate::common::WasteItem;

pub const CARD_WIDTH: f32 = 300.0;

/// Returns true when "Connect & Collaborate" was clicked.
pub fn render(ui: &mut egui::Ui, item: &WasteItem) -> bool {
    let mut connect = false;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&item.title).strong().size(16.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(&item.category).small().color(egui::Color32::from_rgb(22, 128, 61)));
            });
        });
        ui.hyperlink_to("View photo", &item.image_url);
        ui.label(&item.description);
        ui.add_space(4.0);

        egui::Grid::new(("listing", item.id.as_str()))
            .num_columns(2)
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Quantity").weak());
                ui.label(&item.quantity);
                ui.end_row();

                ui.label(egui::RichText::new("Location").weak());
                ui.label(&item.location);
                ui.end_row();

                ui.label(egui::RichText::new("Provider").weak());
                ui.label(format!("{} ({})", item.user.name, item.user.role.label()));
                ui.end_row();
            });

        ui.add_space(4.0);
        if ui.button("Connect & Collaborate").clicked() {
            connect = true;
        }
    });

    connect
}
