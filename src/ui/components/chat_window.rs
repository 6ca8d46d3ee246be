use eframe::egui;

use crate::common::Sender;
use crate::ui::chat_panel::ChatPanel;

use super::input_bar;

#[derive(Default)]
pub struct ChatWindowActions {
    pub send: bool,
    pub close: bool,
}

pub fn render(ctx: &egui::Context, panel: &mut ChatPanel) -> ChatWindowActions {
    let mut actions = ChatWindowActions::default();
    let mut open = true;

    egui::Window::new(panel.title.clone())
        .id(egui::Id::new(panel.id()))
        .open(&mut open)
        .collapsible(false)
        .default_size([360.0, 420.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .max_height(340.0)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for message in &panel.messages {
                        let layout = match message.sender {
                            Sender::User => egui::Layout::right_to_left(egui::Align::TOP),
                            Sender::Bot => egui::Layout::left_to_right(egui::Align::TOP),
                        };
                        ui.with_layout(layout, |ui| {
                            egui::Frame::group(ui.style()).show(ui, |ui| {
                                ui.set_max_width(260.0);
                                ui.label(&message.text);
                            });
                        });
                    }
                    if panel.loading {
                        ui.add(egui::Spinner::new());
                    }
                });

            ui.separator();
            actions.send = input_bar::render(ui, &mut panel.input, !panel.loading);
        });

    actions.close = !open;
    actions
}
