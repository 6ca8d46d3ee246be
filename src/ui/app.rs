use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ServiceCommand, ServiceEvent};

use super::components::header::{self, HeaderAction};
use super::components::{chat_window, footer, notice};
use super::pages::{about, home, impact, post_waste, profile, search};
use super::state::{AppState, Page};

pub struct MarketplaceApp {
    state: AppState,
    command_sender: mpsc::Sender<ServiceCommand>,
    event_receiver: mpsc::Receiver<ServiceEvent>,
}

impl MarketplaceApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        state: AppState,
        command_sender: mpsc::Sender<ServiceCommand>,
        event_receiver: mpsc::Receiver<ServiceEvent>,
    ) -> Self {
        Self {
            state,
            command_sender,
            event_receiver,
        }
    }

    fn handle_service_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.apply_event(event);
        }
    }

    fn send_command(&mut self, command: Option<ServiceCommand>) {
        let Some(command) = command else {
            return;
        };
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to AI worker: {err}");
        }
    }

    fn render_page(&mut self, ui: &mut egui::Ui) -> Option<ServiceCommand> {
        match self.state.page() {
            Page::Home => {
                home::render(ui, &mut self.state);
                None
            }
            Page::Search => search::render(ui, &mut self.state),
            Page::PostWaste => post_waste::render(ui, &mut self.state),
            Page::Impact => impact::render(ui, &mut self.state),
            Page::About => {
                about::render(ui);
                None
            }
            Page::Profile => {
                if let Some(user) = self.state.current_user() {
                    profile::render(ui, user);
                }
                None
            }
        }
    }

    fn render_chats(&mut self, ctx: &egui::Context) {
        if let Some(panel) = self.state.assistant.as_mut() {
            let actions = chat_window::render(ctx, panel);
            let id = panel.id();
            if actions.close {
                self.state.assistant = None;
            } else if actions.send {
                let command = self.state.send_chat(id);
                self.send_command(command);
            }
        }

        if let Some(panel) = self.state.listing_chat.as_mut() {
            let actions = chat_window::render(ctx, panel);
            let id = panel.id();
            if actions.close {
                self.state.listing_chat = None;
            } else if actions.send {
                let command = self.state.send_chat(id);
                self.send_command(command);
            }
        }
    }
}

impl eframe::App for MarketplaceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_service_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let current = self.state.page();
            match header::render(ui, current, self.state.current_user()) {
                Some(HeaderAction::Navigate(page)) => self.state.navigate(page),
                Some(HeaderAction::Register) => self.state.start_registration(),
                Some(HeaderAction::Logout) => self.state.logout(),
                None => {}
            }
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, footer::render);

        let mut command = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                command = self.render_page(ui);
            });
        });
        self.send_command(command);

        egui::Area::new(egui::Id::new("assistant_toggle"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -48.0])
            .show(ctx, |ui| {
                let label = if self.state.assistant.is_some() {
                    "Close Assistant"
                } else {
                    "Ask Assistant"
                };
                if ui.button(label).clicked() {
                    self.state.toggle_assistant();
                }
            });

        self.render_chats(ctx);
        notice::render(ctx, &mut self.state.notice);

        ctx.request_repaint();
    }
}
