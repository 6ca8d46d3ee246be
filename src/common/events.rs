use uuid::Uuid;

use super::types::{EducationAnswer, ImageAnalysis};
use crate::services::ChatReply;

/// Results the AI worker sends back to the UI. Errors are already logged and
/// carry only a description.
#[derive(Debug, Clone)]
pub enum ServiceEvent {
    ImageAnalyzed(Result<ImageAnalysis, String>),
    NearbyResults {
        query: String,
        result: Result<String, String>,
    },
    EducationAnswered(Result<EducationAnswer, String>),
    /// Base64 PCM audio for the `Speak` command with the same `request`.
    SpeechReady {
        request: u64,
        result: Result<String, String>,
    },
    ChatReplied {
        panel: Uuid,
        result: Result<ChatReply, String>,
    },
}
