//! Commerce assistant chat application.
//!
//! ## Provider bootstrap
//!
//! `commerce_chat` selects its completion provider at startup:
//!
//! - `COMMERCE_CHAT_PROVIDER=together` (default) for Together-hosted models.
//!   Requires `TOGETHER_API_KEY`; absence is fatal. `COMMERCE_CHAT_MODEL` and
//!   `COMMERCE_CHAT_BASE_URL` override the default model and endpoint.
//! - `COMMERCE_CHAT_PROVIDER=mock` for deterministic local runs and tests.
//!
//! ## System instructions
//!
//! Every completion request carries the built-in commerce system prompt. Set
//! `COMMERCE_CHAT_SYSTEM_INSTRUCTIONS` to override it.
//!
//! Conversation memory contract: the session keeps the full transcript for
//! display and persistence, but the provider only ever sees the most recent
//! exchange turns through a bounded context window.
//!
//! Saved conversations live as one JSON file each under `conversations/` in
//! the working directory; the file name doubles as the record id.

pub mod commands;
pub mod controller;
pub mod prompts;
pub mod providers;
pub mod repl;
pub mod session;
