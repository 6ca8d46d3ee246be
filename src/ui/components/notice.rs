use eframe::egui;

/// Modal message box. Cleared when dismissed.
pub fn render(ctx: &egui::Context, notice: &mut Option<String>) {
    let Some(message) = notice.as_deref() else {
        return;
    };

    let mut dismissed = false;
    let response = egui::Modal::new(egui::Id::new("notice")).show(ctx, |ui| {
        ui.set_max_width(420.0);
        ui.label(message);
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    });

    if dismissed || response.should_close() {
        *notice = None;
    }
}
