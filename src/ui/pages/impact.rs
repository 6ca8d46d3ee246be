use eframe::egui;

use crate::common::ServiceCommand;
use crate::ui::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Option<ServiceCommand> {
    let mut command = None;

    ui.heading("Learn About Bio-Waste Upcycling");
    ui.label("Ask anything about turning waste into valuable products. Answers are grounded in web search.");
    ui.add_space(8.0);

    ui.add(
        egui::TextEdit::multiline(&mut state.impact.query)
            .hint_text("e.g., How can I make bioplastics from citrus peels?")
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );

    let loading = state.impact.loading;
    let label = if loading { "Thinking..." } else { "Ask Question" };
    ui.horizontal(|ui| {
        if ui.add_enabled(!loading, egui::Button::new(label)).clicked() {
            command = state.ask_question();
        }
        if loading {
            ui.add(egui::Spinner::new());
        }
    });

    if let Some(error) = &state.impact.error {
        ui.colored_label(egui::Color32::RED, error);
    }

    if state.impact.answer.is_none() {
        return command;
    }

    ui.separator();
    let speak_label = if state.impact.speaking() { "Stop" } else { "Read Aloud" };
    ui.horizontal(|ui| {
        if ui.button(speak_label).clicked() {
            command = state.toggle_speech();
        }
        if state.impact.speech_pending {
            ui.add(egui::Spinner::new());
        }
        if let Some(clip) = &state.impact.clip {
            ui.label(format!("{:.1}s", clip.duration_secs));
            ui.hyperlink_to(
                clip.path.display().to_string(),
                format!("file://{}", clip.path.display()),
            );
        }
    });

    if let Some(answer) = &state.impact.answer {
        ui.label(&answer.text);

        let sources: Vec<_> = answer.web_sources().collect();
        if !sources.is_empty() {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Sources").strong());
            for source in sources {
                let title = if source.title.is_empty() {
                    &source.uri
                } else {
                    &source.title
                };
                ui.hyperlink_to(title, &source.uri);
            }
        }
    }

    command
}
