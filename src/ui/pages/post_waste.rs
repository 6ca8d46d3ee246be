use eframe::egui;

use crate::common::ServiceCommand;
use crate::ui::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Option<ServiceCommand> {
    let mut command = None;

    ui.heading("Post Your Bio-Waste");
    ui.label("Upload a photo and our AI will suggest the details.");
    ui.add_space(8.0);

    let form = &mut state.post;
    ui.horizontal(|ui| {
        ui.label("Image file");
        ui.add(
            egui::TextEdit::singleline(&mut form.image_input)
                .hint_text("/path/to/photo.jpg")
                .desired_width(320.0),
        );
    });
    let analyzing = form.analyzing;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!analyzing, egui::Button::new("Analyze Image"))
            .clicked()
        {
            command = state.analyze_image();
        }
        if analyzing {
            ui.add(egui::Spinner::new());
            ui.label("Analyzing image...");
        }
    });

    let form = &mut state.post;
    if let Some(path) = &form.image_path {
        ui.label(egui::RichText::new(format!("Selected: {}", path.display())).weak());
    }
    if let Some(error) = &form.error {
        ui.colored_label(egui::Color32::RED, error);
    }
    ui.add_space(8.0);

    egui::Grid::new("listing_form")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Title");
            ui.text_edit_singleline(&mut form.title);
            ui.end_row();

            ui.label("Type");
            ui.add(egui::TextEdit::singleline(&mut form.category).hint_text("e.g., Food Waste"));
            ui.end_row();

            ui.label("Quantity");
            ui.add(egui::TextEdit::singleline(&mut form.quantity).hint_text("e.g., 50 kg/week"));
            ui.end_row();

            ui.label("Location");
            ui.text_edit_singleline(&mut form.location);
            ui.end_row();

            ui.label("Description");
            ui.text_edit_multiline(&mut form.description);
            ui.end_row();
        });

    ui.add_space(8.0);
    if ui.button("Post Listing").clicked() {
        state.submit_listing();
    }

    command
}
