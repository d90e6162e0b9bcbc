use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum TogetherApiError {
    MissingApiKey,
    InvalidBaseUrl(String),
    InvalidRequestPayload(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Serde(JsonError),
    EmptyCompletion,
    Unknown(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(rename = "error")]
    pub value: Option<ErrorPayloadFields>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayloadFields {
    pub message: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

impl ErrorPayloadFields {
    pub fn rate_limit_message(&self, status: StatusCode) -> Option<String> {
        let code = self
            .code
            .as_deref()
            .and_then(non_empty_string)
            .or_else(|| self.type_.as_deref().and_then(non_empty_string))
            .unwrap_or("");
        if !matches_rate_limit(code, status) {
            return None;
        }

        let detail = self
            .message
            .as_deref()
            .and_then(non_empty_string)
            .map(|value| format!(": {value}"))
            .unwrap_or_default();

        Some(format!("Rate limit reached for this API key{detail}"))
    }

    pub fn message_or_fallback(&self) -> Option<String> {
        let explicit = self.message.as_deref().and_then(non_empty_string)?;
        Some(explicit.to_owned())
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = &self.value {
            let message = value.message.as_deref().unwrap_or("unknown error");
            write!(f, "{message}")
        } else {
            write!(f, "unknown error")
        }
    }
}

impl fmt::Display for TogetherApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "API key is required"),
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::InvalidRequestPayload(message) => {
                write!(f, "invalid request payload: {message}")
            }
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::EmptyCompletion => {
                write!(f, "completion response contained no assistant content")
            }
            Self::Unknown(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for TogetherApiError {}

impl From<reqwest::Error> for TogetherApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for TogetherApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    let parsed = match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) => payload,
        Err(_) => {
            return if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.to_string()
            };
        }
    };

    if let Some(error) = parsed.value {
        if let Some(message) = error.rate_limit_message(status) {
            return message;
        }
        if let Some(message) = error.message_or_fallback() {
            return message;
        }
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

fn matches_rate_limit(code: &str, status: StatusCode) -> bool {
    matches!(status, StatusCode::TOO_MANY_REQUESTS)
        || code.eq_ignore_ascii_case("rate_limit_exceeded")
        || code.eq_ignore_ascii_case("model_rate_limit")
}

fn non_empty_string(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
