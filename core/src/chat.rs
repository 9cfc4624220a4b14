//! Stateless relay from the chat page to a Gemini model.
//!
//! Each message is forwarded verbatim as a single user turn and the first text part of
//! the first candidate is returned unmodified. There is no retry and no history.

use crate::error::ChatError;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[async_trait]
pub trait ChatRelay: Send + Sync {
    /// sends `message` to the model and returns its text reply
    async fn generate(&self, message: &str) -> Result<String, ChatError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

fn build_request(message: &str) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: [Content {
            role: "user",
            parts: [RequestPart { text: message }],
        }],
    }
}

fn extract_text(body: &str) -> Result<String, ChatError> {
    let response: GenerateResponse = serde_json::from_str(body).map_err(ChatError::Parse)?;

    if let Some(err) = response.error {
        return Err(ChatError::Api(err.message));
    }

    response
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
        .ok_or(ChatError::EmptyResponse)
}

/// relay backed by the Generative Language `generateContent` endpoint
pub struct GeminiRelay {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiRelay {
    pub fn new<T: Into<String>>(api_key: T) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: API_BASE_URL.to_owned(),
            client: Client::new(),
        }
    }

    pub fn with_model<T: Into<String>>(mut self, model: T) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

// keeps the key out of logs
impl fmt::Debug for GeminiRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiRelay")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatRelay for GeminiRelay {
    async fn generate(&self, message: &str) -> Result<String, ChatError> {
        debug!("relaying {} bytes to {}", message.len(), self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&build_request(message))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("model service returned {status}");
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        extract_text(&body)
    }
}
