use eframe::egui;

pub fn render(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("© 2024 Waste2Worth. All rights reserved.").weak());
    });
}
