use std::sync::Arc;

use tokio::sync::mpsc;

use crate::common::{ServiceCommand, ServiceEvent};

use super::{AiService, ImageUpload};

/// Background task that turns UI commands into AI requests and reports the
/// results back as events.
pub struct AiWorker {
    service: Arc<dyn AiService>,
    event_sender: mpsc::Sender<ServiceEvent>,
    command_receiver: mpsc::Receiver<ServiceCommand>,
}

impl AiWorker {
    pub fn new(
        service: Arc<dyn AiService>,
        event_sender: mpsc::Sender<ServiceEvent>,
        command_receiver: mpsc::Receiver<ServiceCommand>,
    ) -> Self {
        Self {
            service,
            event_sender,
            command_receiver,
        }
    }

    /// Runs until the command channel closes. Each command is handled on its
    /// own task so a slow request does not hold up the others.
    pub async fn run(mut self) {
        log::info!("AI worker started");
        while let Some(command) = self.command_receiver.recv().await {
            let service = Arc::clone(&self.service);
            let sender = self.event_sender.clone();
            tokio::spawn(async move {
                let event = handle_command(service.as_ref(), command).await;
                if let Err(err) = sender.send(event).await {
                    log::warn!("Failed to notify UI about AI result: {err}");
                }
            });
        }
        log::info!("AI worker stopped");
    }
}

/// Run one command against `service`. Failures are logged here and reduced to
/// their description.
pub async fn handle_command(service: &dyn AiService, command: ServiceCommand) -> ServiceEvent {
    match command {
        ServiceCommand::AnalyzeImage { path } => {
            let result = match ImageUpload::from_path(&path).await {
                Ok(upload) => service.classify_waste_image(&upload).await,
                Err(err) => Err(err),
            };
            ServiceEvent::ImageAnalyzed(report("image analysis", result))
        }
        ServiceCommand::SearchNearby { query, location } => {
            let result = service.search_nearby(&query, location).await;
            ServiceEvent::NearbyResults {
                query,
                result: report("nearby search", result),
            }
        }
        ServiceCommand::AskEducation { query } => {
            let result = service.educational_answer(&query).await;
            ServiceEvent::EducationAnswered(report("educational query", result))
        }
        ServiceCommand::Speak { request, text } => {
            let result = service.text_to_speech(&text).await;
            ServiceEvent::SpeechReady {
                request,
                result: report("text-to-speech", result),
            }
        }
        ServiceCommand::SendChat {
            panel,
            session,
            message,
            system_instruction,
        } => {
            let result = service
                .send_chat(session, &message, &system_instruction)
                .await;
            ServiceEvent::ChatReplied {
                panel,
                result: report("chat", result),
            }
        }
    }
}

fn report<T>(operation: &str, result: Result<T, crate::error::ServiceError>) -> Result<T, String> {
    result.map_err(|err| {
        log::error!("AI {operation} failed: {err}");
        err.to_string()
    })
}
