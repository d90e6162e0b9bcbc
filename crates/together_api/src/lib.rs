//! Transport-only client primitives for an OpenAI-compatible chat
//! completions endpoint hosted by Together.
//!
//! This crate owns request building, response parsing, and error
//! classification for the completions transport only. It intentionally
//! contains no conversation state, no retry policy (a failure is reported
//! once to the caller), and no runtime UI coupling.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod url;

pub use client::TogetherApiClient;
pub use config::TogetherApiConfig;
pub use error::TogetherApiError;
pub use payload::{ChatChoice, ChatRequest, ChatResponse, WireMessage};
pub use url::normalize_completions_url;
