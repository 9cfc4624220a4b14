use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::io;
use thiserror::Error;

/// failures while writing the record file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize entries: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// failures talking to the language model service
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request to model service failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("model service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not parse model response: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("model service error: {0}")]
    Api(String),
    #[error("model response had no text")]
    EmptyResponse,
}

// reqwest errors carry the request url, drop it so nothing upstream-specific leaks
impl From<reqwest::Error> for ChatError {
    fn from(e: reqwest::Error) -> Self {
        ChatError::Transport(e.without_url())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("data file path is empty")]
    EmptyDataFile,
}

/// errors surfaced by the http handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid value {value:?} for field {field}")]
    InvalidField { field: &'static str, value: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Chat(#[from] ChatError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidField { .. } => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Chat(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());
        match self {
            AppError::Chat(e) => res.json(json!({ "error": e.to_string() })),
            _ => res
                .content_type(ContentType::plaintext())
                .body(self.to_string()),
        }
    }
}
