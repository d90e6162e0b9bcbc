use std::collections::BTreeMap;

use crate::config::TogetherApiConfig;
use crate::error::TogetherApiError;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_USER_AGENT: &str = "User-Agent";

const DEFAULT_USER_AGENT: &str = concat!("commerce_chat/", env!("CARGO_PKG_VERSION"));

/// Build a deterministic header map for Together transport requests.
pub fn build_headers(
    config: &TogetherApiConfig,
    user_agent: Option<&str>,
) -> Result<BTreeMap<String, String>, TogetherApiError> {
    let mut headers = BTreeMap::new();

    if config.api_key.trim().is_empty() {
        return Err(TogetherApiError::MissingApiKey);
    }

    headers.insert(
        HEADER_AUTHORIZATION.to_owned(),
        format!("Bearer {}", config.api_key.trim()),
    );
    headers.insert(HEADER_ACCEPT.to_owned(), "application/json".to_owned());
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );

    let ua = match (user_agent, config.user_agent.as_deref()) {
        (Some(explicit), _) if !explicit.trim().is_empty() => explicit.trim().to_owned(),
        (None, Some(explicit)) if !explicit.trim().is_empty() => explicit.trim().to_owned(),
        _ => DEFAULT_USER_AGENT.to_owned(),
    };
    headers.insert(HEADER_USER_AGENT.to_owned(), ua);

    for (key, value) in &config.extra_headers {
        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
    }

    Ok(headers)
}
