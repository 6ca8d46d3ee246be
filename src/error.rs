use thiserror::Error;

/// Failures talking to the hosted AI service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("AI API key is not set. Set API_KEY or GEMINI_API_KEY.")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("AI API returned no text")]
    EmptyResponse,

    #[error("No audio data received from API.")]
    NoAudio,

    #[error("Failed to parse AI response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported image type: {0}")]
    UnsupportedImage(String),
}

/// Failures reading or writing the local key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}
