use std::sync::Arc;

use chat_provider::{CompletionProvider, ProviderInitError};
use chat_provider_mock::{MockProvider, MOCK_PROVIDER_ID};
use chat_provider_together::{TogetherProvider, TogetherProviderConfig, TOGETHER_PROVIDER_ID};

pub const PROVIDER_ENV_VAR: &str = "COMMERCE_CHAT_PROVIDER";
pub const DEFAULT_PROVIDER_ID: &str = TOGETHER_PROVIDER_ID;

pub const API_KEY_ENV_VAR: &str = "TOGETHER_API_KEY";
pub const MODEL_ENV_VAR: &str = "COMMERCE_CHAT_MODEL";
pub const BASE_URL_ENV_VAR: &str = "COMMERCE_CHAT_BASE_URL";

pub fn provider_from_env() -> Result<Arc<dyn CompletionProvider>, ProviderInitError> {
    let provider_id = non_empty_env(PROVIDER_ENV_VAR);
    provider_for_id(provider_id.as_deref().unwrap_or(DEFAULT_PROVIDER_ID))
}

pub fn provider_for_id(provider_id: &str) -> Result<Arc<dyn CompletionProvider>, ProviderInitError> {
    match provider_id {
        TOGETHER_PROVIDER_ID => Ok(Arc::new(together_provider_from_env()?)),
        MOCK_PROVIDER_ID => Ok(Arc::new(MockProvider::default())),
        unknown => Err(ProviderInitError::new(format!(
            "Unsupported provider '{unknown}'. Available providers: {TOGETHER_PROVIDER_ID}, {MOCK_PROVIDER_ID}"
        ))),
    }
}

fn together_provider_from_env() -> Result<TogetherProvider, ProviderInitError> {
    let api_key = non_empty_env(API_KEY_ENV_VAR).ok_or_else(|| {
        ProviderInitError::new(format!(
            "{API_KEY_ENV_VAR} not found! Set it in your environment to use the together provider."
        ))
    })?;

    let mut config = TogetherProviderConfig::new(api_key);
    if let Some(model_id) = non_empty_env(MODEL_ENV_VAR) {
        config = config.with_model(model_id);
    }
    if let Some(base_url) = non_empty_env(BASE_URL_ENV_VAR) {
        config = config.with_base_url(base_url);
    }

    TogetherProvider::new(config)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
