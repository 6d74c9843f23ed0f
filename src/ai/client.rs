use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AiConfig;

/// Failures talking to the generative endpoint. These never become hard
/// request failures; the handler degrades to a static fallback bundle.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("request to AI service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AI service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("AI service returned an empty response")]
    EmptyResponse,
}

impl AiError {
    /// Coarse failure kind for operator logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(code) if *code == reqwest::StatusCode::UNAUTHORIZED => "auth",
            Self::Status(code) if *code == reqwest::StatusCode::FORBIDDEN => "auth",
            Self::Status(code) if *code == reqwest::StatusCode::TOO_MANY_REQUESTS => "rate-limit",
            Self::Status(_) => "upstream",
            Self::EmptyResponse => "empty",
        }
    }
}

/// Seam for the external text-generation collaborator; swapped for a fake in
/// tests.
#[async_trait]
pub trait ReflectionClient: Send + Sync {
    /// Send one prompt and return the model's raw text reply.
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl ReflectionClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("X-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Status(status));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.first_text().ok_or(AiError::EmptyResponse)
    }
}

// Wire shapes for the generateContent endpoint.

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|p| p.text)
    }
}
