use eframe::egui;

use crate::common::ServiceCommand;
use crate::ui::components::waste_card;
use crate::ui::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Option<ServiceCommand> {
    let mut command = None;

    ui.heading("Find Bio-Waste Resources");
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut state.search.term)
                .hint_text("Search for waste (e.g., 'coffee grounds')")
                .desired_width(360.0),
        );
        let label = if state.search.searching {
            "Searching..."
        } else {
            "Search with Geo"
        };
        if ui
            .add_enabled(!state.search.searching, egui::Button::new(label))
            .clicked()
        {
            command = state.search_with_geo();
        }
        if state.search.searching {
            ui.add(egui::Spinner::new());
        }
    });

    if let Some(error) = &state.geolocation.error {
        ui.colored_label(egui::Color32::from_rgb(202, 138, 4), error);
    }
    if let Some(error) = &state.search.error {
        ui.colored_label(egui::Color32::RED, error);
    }

    ui.horizontal_wrapped(|ui| {
        for category in state.category_chips() {
            let selected = state.search.category == category;
            if ui.selectable_label(selected, &category).clicked() {
                state.search.category = category;
            }
        }
    });
    ui.separator();

    let mut contact = None;
    {
        let visible = state.visible_listings();
        ui.label(format!("Showing {} listings", visible.len()));

        if visible.is_empty() {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("No Listings Found").strong().size(18.0));
                ui.label("Try adjusting your search or filters.");
            });
        } else {
            ui.horizontal_wrapped(|ui| {
                for item in visible {
                    if waste_card::render(ui, item) {
                        contact = Some(item.id.clone());
                    }
                }
            });
        }
    }

    if let Some(id) = contact {
        state.open_listing_chat(&id);
    }

    command
}
