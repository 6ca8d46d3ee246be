pub mod gemini;
pub mod worker;

pub use gemini::GeminiClient;
pub use worker::AiWorker;

use std::path::Path;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use crate::common::{ChatMessage, Coordinates, EducationAnswer, ImageAnalysis};
use crate::error::ServiceError;

/// Conversation handle threaded through chat turns. Holds everything needed to
/// continue the conversation; callers only pass it back.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    id: Uuid,
    system_instruction: String,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            system_instruction: system_instruction.into(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Completed turns, oldest first.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub(crate) fn record_turn(&mut self, message: &str, reply: &str) {
        self.history.push(ChatMessage::user(message));
        self.history.push(ChatMessage::bot(reply));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub session: ChatSession,
    pub text: String,
}

/// Inline image sent for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub mime_type: String,
    pub data_base64: String,
}

impl ImageUpload {
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data_base64: STANDARD.encode(bytes),
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, ServiceError> {
        let mime_type = mime_type_for(path)?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(mime_type, &bytes))
    }
}

/// Image MIME type from the file extension.
pub fn mime_type_for(path: &Path) -> Result<&'static str, ServiceError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        "heic" => Ok("image/heic"),
        "heif" => Ok("image/heif"),
        _ => Err(ServiceError::UnsupportedImage(path.display().to_string())),
    }
}

/// Hosted generative-AI operations used by the app. Each call is one
/// request/response exchange.
#[async_trait]
pub trait AiService: Send + Sync {
    /// Suggest listing title, type and description for a photo.
    async fn classify_waste_image(&self, image: &ImageUpload)
    -> Result<ImageAnalysis, ServiceError>;

    /// Maps-grounded search, biased to `location` when known.
    async fn search_nearby(
        &self,
        query: &str,
        location: Option<Coordinates>,
    ) -> Result<String, ServiceError>;

    /// Web-grounded answer with its sources.
    async fn educational_answer(&self, query: &str) -> Result<EducationAnswer, ServiceError>;

    /// One chat turn. A new session is started when `session` is `None`.
    async fn send_chat(
        &self,
        session: Option<ChatSession>,
        message: &str,
        system_instruction: &str,
    ) -> Result<ChatReply, ServiceError>;

    /// Base64 single-channel 24 kHz 16-bit PCM.
    async fn text_to_speech(&self, text: &str) -> Result<String, ServiceError>;
}

/// Used when no API key is configured; every call fails.
pub struct DisabledService;

#[async_trait]
impl AiService for DisabledService {
    async fn classify_waste_image(
        &self,
        _image: &ImageUpload,
    ) -> Result<ImageAnalysis, ServiceError> {
        Err(ServiceError::MissingApiKey)
    }

    async fn search_nearby(
        &self,
        _query: &str,
        _location: Option<Coordinates>,
    ) -> Result<String, ServiceError> {
        Err(ServiceError::MissingApiKey)
    }

    async fn educational_answer(&self, _query: &str) -> Result<EducationAnswer, ServiceError> {
        Err(ServiceError::MissingApiKey)
    }

    async fn send_chat(
        &self,
        _session: Option<ChatSession>,
        _message: &str,
        _system_instruction: &str,
    ) -> Result<ChatReply, ServiceError> {
        Err(ServiceError::MissingApiKey)
    }

    async fn text_to_speech(&self, _text: &str) -> Result<String, ServiceError> {
        Err(ServiceError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn mime_types_follow_extension() {
        assert_eq!(mime_type_for(Path::new("a/b.JPG")).unwrap(), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("peels.png")).unwrap(), "image/png");
        assert!(matches!(
            mime_type_for(Path::new("notes.txt")),
            Err(ServiceError::UnsupportedImage(_))
        ));
        assert!(mime_type_for(Path::new("no_extension")).is_err());
    }

    #[test]
    fn session_records_turns_in_order() {
        let mut session = ChatSession::new("be helpful");
        session.record_turn("hi", "hello");

        assert_eq!(session.system_instruction(), "be helpful");
        assert_eq!(
            session.history(),
            &[ChatMessage::user("hi"), ChatMessage::bot("hello")]
        );
    }

    #[tokio::test]
    async fn upload_reads_and_encodes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("grounds.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let upload = ImageUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.mime_type, "image/png");
        assert_eq!(upload.data_base64, "AQID");
    }

    #[tokio::test]
    async fn disabled_service_reports_missing_key() {
        let err = DisabledService.text_to_speech("hi").await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingApiKey));
    }
}
