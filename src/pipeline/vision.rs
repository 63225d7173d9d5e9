//! Image OCR via a hosted vision model.
//!
//! The oracle is a black box behind an OpenAI-compatible chat-completions
//! endpoint: one system message constraining it to literal transcription,
//! one user message carrying the instruction text plus the image as a
//! base64 data URI, fixed low temperature. No retry, no streaming.
//!
//! The client is injected into the dispatcher as [`VisionOracle`] so tests
//! can substitute a stub without process-wide configuration. Reply content
//! may arrive as a single string or as an ordered list of text fragments;
//! [`MessageContent`] models that union explicitly and [`normalize_content`]
//! collapses it once, at the boundary.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::ExtractError;
use crate::prompts::{OCR_SYSTEM_PROMPT, OCR_USER_INSTRUCTION};

/// A vision-capable OCR oracle.
///
/// The production implementation is [`OpenAiOracle`]; tests inject stubs.
#[async_trait]
pub trait VisionOracle: Send + Sync {
    /// Transcribe the text visible in `image` (raw bytes of type `mime`).
    async fn transcribe(&self, image: &[u8], mime: &'static str) -> Result<String, ExtractError>;
}

/// Default oracle: an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiOracle {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: usize,
    system_prompt: String,
}

impl OpenAiOracle {
    /// Build the oracle client from the pipeline configuration.
    ///
    /// The reqwest client carries the configured request timeout; a timed-out
    /// call fails as a vision error and is never retried.
    pub fn new(config: &PipelineConfig) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.oracle_timeout_secs))
            .build()
            .map_err(|source| ExtractError::Vision { source })?;

        Ok(Self {
            client,
            base_url: config.resolved_base_url(),
            api_key: config.resolved_api_key()?,
            model: config.resolved_model(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            system_prompt: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| OCR_SYSTEM_PROMPT.to_string()),
        })
    }
}

#[async_trait]
impl VisionOracle for OpenAiOracle {
    async fn transcribe(&self, image: &[u8], mime: &'static str) -> Result<String, ExtractError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            messages: vec![
                RequestMessage {
                    role: "system",
                    content: RequestContent::Text(&self.system_prompt),
                },
                RequestMessage {
                    role: "user",
                    content: RequestContent::Parts(vec![
                        RequestPart::Text {
                            text: OCR_USER_INSTRUCTION,
                        },
                        RequestPart::ImageUrl {
                            image_url: ImageUrl {
                                url: data_uri(image, mime),
                            },
                        },
                    ]),
                },
            ],
        };

        debug!(model = %self.model, bytes = image.len(), %mime, "sending OCR request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|source| ExtractError::Vision { source })?
            .error_for_status()
            .map_err(|source| ExtractError::Vision { source })?;

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|source| ExtractError::Vision { source })?;

        let choice = reply
            .choices
            .into_iter()
            .next()
            .ok_or(ExtractError::EmptyOracleResponse {
                detail: "no choices in response",
            })?;

        let content = choice
            .message
            .content
            .ok_or(ExtractError::EmptyOracleResponse {
                detail: "missing content field",
            })?;

        let text = normalize_content(content);
        if text.is_empty() {
            return Err(ExtractError::EmptyOracleResponse {
                detail: "empty content",
            });
        }
        Ok(text)
    }
}

/// Encode image bytes as a base64 data URI for the request body.
pub fn data_uri(image: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(image))
}

/// Collapse the oracle's reply content into a single string.
///
/// Fragments are concatenated with no separator — the oracle splits
/// mid-word, so inserting anything would corrupt the transcription. Ends are
/// trimmed; interior whitespace is the oracle's to keep.
pub fn normalize_content(content: MessageContent) -> String {
    let joined = match content {
        MessageContent::Text(text) => text,
        MessageContent::Parts(parts) => parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<String>(),
    };
    joined.trim().to_string()
}

// ── Wire types ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: usize,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: RequestContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestContent<'a> {
    Text(&'a str),
    Parts(Vec<RequestPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum RequestPart<'a> {
    #[serde(rename = "text")]
    Text { text: &'a str },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<MessageContent>,
}

/// Reply content: a single string, or an ordered sequence of text parts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One fragment of a multi-part reply. Non-text parts carry no `text` field
/// and are skipped during normalization.
#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
}
