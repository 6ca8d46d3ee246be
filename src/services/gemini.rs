use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::common::{
    ChatMessage, Coordinates, EducationAnswer, GroundingSource, ImageAnalysis, Sender, SourceLink,
};
use crate::config::AiConfig;
use crate::error::ServiceError;

use super::{AiService, ChatReply, ChatSession, ImageUpload};

const IMAGE_PROMPT: &str = r#"Analyze this image of bio-waste. Identify it and provide a suitable title, waste type (e.g., Food Waste, Agricultural Waste, Wood Waste), and a brief, compelling description for a marketplace listing. Return the response as a single, clean JSON object with keys: "title", "type", and "description". Example: {"title": "Spent Coffee Grounds", "type": "Food Waste", "description": "High-quality arabica coffee grounds, perfect for compost or mushroom cultivation."}"#;

/// REST client for the Generative Language `generateContent` endpoint.
pub struct GeminiClient {
    config: AiConfig,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: AiConfig, api_key: String) -> Result<Self, ServiceError> {
        if api_key.trim().is_empty() {
            return Err(ServiceError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model
        )
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ServiceError> {
        log::debug!("POST generateContent model={model}");
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }
}

#[async_trait]
impl AiService for GeminiClient {
    async fn classify_waste_image(
        &self,
        image: &ImageUpload,
    ) -> Result<ImageAnalysis, ServiceError> {
        let response = self.generate(&self.config.model, &image_request(image)).await?;
        let text = response.text().ok_or(ServiceError::EmptyResponse)?;
        parse_image_analysis(&text)
    }

    async fn search_nearby(
        &self,
        query: &str,
        location: Option<Coordinates>,
    ) -> Result<String, ServiceError> {
        let response = self
            .generate(&self.config.model, &maps_request(query, location))
            .await?;
        response.text().ok_or(ServiceError::EmptyResponse)
    }

    async fn educational_answer(&self, query: &str) -> Result<EducationAnswer, ServiceError> {
        let response = self.generate(&self.config.model, &search_request(query)).await?;
        let text = response.text().ok_or(ServiceError::EmptyResponse)?;
        Ok(EducationAnswer {
            text,
            sources: response.sources(),
        })
    }

    async fn send_chat(
        &self,
        session: Option<ChatSession>,
        message: &str,
        system_instruction: &str,
    ) -> Result<ChatReply, ServiceError> {
        let mut session = session.unwrap_or_else(|| ChatSession::new(system_instruction));
        log::debug!(
            "chat turn {} for session {}",
            session.history().len() / 2 + 1,
            session.id()
        );
        let response = self
            .generate(&self.config.model, &chat_request(&session, message))
            .await?;
        let text = response.text().ok_or(ServiceError::EmptyResponse)?;
        session.record_turn(message, &text);
        Ok(ChatReply { session, text })
    }

    async fn text_to_speech(&self, text: &str) -> Result<String, ServiceError> {
        let request = speech_request(text, &self.config.voice);
        let response = self.generate(&self.config.speech_model, &request).await?;
        response.audio_data().ok_or(ServiceError::NoAudio)
    }
}

// --- Request builders ---

fn user_text(text: &str) -> Content {
    Content {
        role: Some("user".to_string()),
        parts: vec![Part::text(text)],
    }
}

pub(crate) fn image_request(image: &ImageUpload) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![
                Part::text(IMAGE_PROMPT),
                Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.data_base64.clone(),
                    }),
                },
            ],
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            ..GenerationConfig::default()
        }),
        ..GenerateContentRequest::default()
    }
}

pub(crate) fn maps_request(query: &str, location: Option<Coordinates>) -> GenerateContentRequest {
    let prompt = format!(
        "Find the following bio-waste for me: {query}. Provide a list of potential locations or types."
    );
    GenerateContentRequest {
        contents: vec![user_text(&prompt)],
        tools: vec![Tool {
            google_maps: Some(EmptyObject {}),
            ..Tool::default()
        }],
        tool_config: location.map(|coords| ToolConfig {
            retrieval_config: RetrievalConfig {
                lat_lng: LatLng {
                    latitude: coords.latitude,
                    longitude: coords.longitude,
                },
            },
        }),
        ..GenerateContentRequest::default()
    }
}

pub(crate) fn search_request(query: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![user_text(query)],
        tools: vec![Tool {
            google_search: Some(EmptyObject {}),
            ..Tool::default()
        }],
        ..GenerateContentRequest::default()
    }
}

pub(crate) fn chat_request(session: &ChatSession, message: &str) -> GenerateContentRequest {
    let mut contents: Vec<Content> = session
        .history()
        .iter()
        .map(|turn: &ChatMessage| Content {
            role: Some(
                match turn.sender {
                    Sender::User => "user",
                    Sender::Bot => "model",
                }
                .to_string(),
            ),
            parts: vec![Part::text(&turn.text)],
        })
        .collect();
    contents.push(user_text(message));

    GenerateContentRequest {
        contents,
        system_instruction: Some(Content {
            role: None,
            parts: vec![Part::text(session.system_instruction())],
        }),
        ..GenerateContentRequest::default()
    }
}

pub(crate) fn speech_request(text: &str, voice: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: None,
            parts: vec![Part::text(text)],
        }],
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["AUDIO".to_string()]),
            speech_config: Some(SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: voice.to_string(),
                    },
                },
            }),
            ..GenerationConfig::default()
        }),
        ..GenerateContentRequest::default()
    }
}

/// Parse the JSON object the model was asked for. Markdown code fences around
/// it are tolerated.
pub(crate) fn parse_image_analysis(text: &str) -> Result<ImageAnalysis, ServiceError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);
    Ok(serde_json::from_str(body.trim())?)
}

// --- Wire types ---

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct EmptyObject {}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    google_search: Option<EmptyObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    google_maps: Option<EmptyObject>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<ChunkLink>,
    #[serde(default)]
    maps: Option<ChunkLink>,
}

#[derive(Debug, Deserialize)]
struct ChunkLink {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

impl ChunkLink {
    fn into_link(self) -> SourceLink {
        SourceLink {
            uri: self.uri,
            title: self.title,
        }
    }
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text parts of the first candidate.
    pub(crate) fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }

    pub(crate) fn audio_data(&self) -> Option<String> {
        self.first_parts()
            .iter()
            .find_map(|part| part.inline_data.as_ref())
            .map(|inline| inline.data.clone())
            .filter(|data| !data.is_empty())
    }

    pub(crate) fn sources(self) -> Vec<GroundingSource> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.grounding_metadata)
            .map(|metadata| metadata.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| match (chunk.web, chunk.maps) {
                (Some(web), _) => Some(GroundingSource::Web(web.into_link())),
                (None, Some(maps)) => Some(GroundingSource::Maps(maps.into_link())),
                (None, None) => None,
            })
            .collect()
    }
}
