use eframe::egui;

use crate::common::User;
use crate::ui::state::Page;

pub enum HeaderAction {
    Navigate(Page),
    Register,
    Logout,
}

pub fn render(ui: &mut egui::Ui, current: Page, user: Option<&User>) -> Option<HeaderAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading(egui::RichText::new("Waste2Worth").color(egui::Color32::from_rgb(22, 128, 61)));
        ui.separator();

        for page in Page::NAV {
            if ui.selectable_label(current == page, page.title()).clicked() {
                action = Some(HeaderAction::Navigate(page));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| match user {
            Some(user) => {
                if ui.button("Logout").clicked() {
                    action = Some(HeaderAction::Logout);
                }
                if ui
                    .selectable_label(current == Page::Profile, &user.full_name)
                    .clicked()
                {
                    action = Some(HeaderAction::Navigate(Page::Profile));
                }
            }
            None => {
                if ui.button("Login").clicked() {
                    action = Some(HeaderAction::Register);
                }
            }
        });
    });

    action
}
