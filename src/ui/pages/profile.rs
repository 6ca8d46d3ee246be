use eframe::egui;

use crate::common::User;

pub fn render(ui: &mut egui::Ui, user: &User) {
    ui.heading(&user.full_name);
    ui.label(egui::RichText::new(user.role.profile_label()).strong());
    ui.label(&user.organization);
    ui.add_space(12.0);

    ui.label(egui::RichText::new("User Information").size(18.0));
    egui::Grid::new("profile_details")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            let details = [
                ("Email", Some(user.email.as_str())),
                ("Phone", user.phone.as_deref()),
                ("Location", Some(user.location.as_str())),
                ("Field Type", Some(user.field_type.as_str())),
                ("User Category", Some(user.user_category.as_str())),
                ("Waste Type", user.waste_type.as_deref()),
            ];
            for (label, value) in details {
                let Some(value) = value.filter(|v| !v.is_empty()) else {
                    continue;
                };
                ui.label(egui::RichText::new(label).weak());
                ui.label(value);
                ui.end_row();
            }
        });
}
