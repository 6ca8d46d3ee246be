use std::path::PathBuf;

use uuid::Uuid;

use crate::common::types::Coordinates;
use crate::services::ChatSession;

/// Commands the UI sends to the AI worker.
#[derive(Debug, Clone)]
pub enum ServiceCommand {
    /// Classify a photo of waste and suggest listing fields.
    AnalyzeImage { path: PathBuf },
    /// Location-grounded search for a waste stream.
    SearchNearby {
        query: String,
        location: Option<Coordinates>,
    },
    /// Web-grounded question for the Impact page.
    AskEducation { query: String },
    /// Synthesize speech for an answer. `request` is echoed back so stale
    /// audio can be told apart.
    Speak { request: u64, text: String },
    /// One chat turn for the panel identified by `panel`.
    /// - session: handle returned by the previous turn, `None` on the first one
    SendChat {
        panel: Uuid,
        session: Option<ChatSession>,
        message: String,
        system_instruction: String,
    },
}
