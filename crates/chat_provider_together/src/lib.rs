//! Together-backed implementation of the shared `chat_provider` contract.
//!
//! This adapter translates the blocking `CompletionProvider` seam into one
//! `together_api` chat-completions request per turn. The async transport is
//! bridged with a current-thread runtime, so the caller observes exactly the
//! blocking request model the session layer expects.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chat_provider::{
    CompletionError, CompletionProvider, CompletionRequest, ProviderInitError, ProviderProfile,
    Role,
};
use together_api::{ChatRequest, TogetherApiClient, TogetherApiConfig, TogetherApiError, WireMessage};

/// Stable provider identifier used by `commerce_chat` startup selection.
pub const TOGETHER_PROVIDER_ID: &str = "together";

/// Default hosted model used when no override is configured.
pub const DEFAULT_TOGETHER_MODEL: &str = "meta-llama/Llama-3.2-90B-Vision-Instruct-Turbo";

/// Runtime configuration for the Together provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TogetherProviderConfig {
    pub api_key: String,
    pub model_id: String,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl TogetherProviderConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_id: DEFAULT_TOGETHER_MODEL.to_string(),
            base_url: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn into_together_api_config(self) -> TogetherApiConfig {
        let mut config = TogetherApiConfig::new(self.api_key);

        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

trait CompleteClient: Send + Sync {
    fn complete_text(&self, request: &ChatRequest) -> Result<String, TogetherApiError>;
}

#[derive(Debug)]
struct DefaultCompleteClient {
    client: TogetherApiClient,
}

impl CompleteClient for DefaultCompleteClient {
    fn complete_text(&self, request: &ChatRequest) -> Result<String, TogetherApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                TogetherApiError::Unknown(format!("failed to initialize tokio runtime: {error}"))
            })?;

        runtime.block_on(self.client.complete_text(request))
    }
}

/// `CompletionProvider` adapter backed by `together_api` transport primitives.
pub struct TogetherProvider {
    model_id: String,
    complete_client: Arc<dyn CompleteClient>,
}

impl TogetherProvider {
    /// Creates a provider using real Together API transport.
    pub fn new(config: TogetherProviderConfig) -> Result<Self, ProviderInitError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderInitError::new(
                "Together provider requires a non-empty API key",
            ));
        }

        let model_id = sanitize_model_id(&config.model_id);
        let complete_client = Arc::new(DefaultCompleteClient {
            client: TogetherApiClient::new(config.into_together_api_config())
                .map_err(map_init_error)?,
        });

        Ok(Self {
            model_id,
            complete_client,
        })
    }

    #[cfg(test)]
    fn with_complete_client_for_tests(
        model_id: impl Into<String>,
        complete_client: Arc<dyn CompleteClient>,
    ) -> Self {
        Self {
            model_id: sanitize_model_id(&model_id.into()),
            complete_client,
        }
    }
}

impl fmt::Debug for TogetherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TogetherProvider")
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}

impl CompletionProvider for TogetherProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: TOGETHER_PROVIDER_ID.to_string(),
            model_id: self.model_id.clone(),
        }
    }

    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let wire = wire_messages(request);
        let chat_request = ChatRequest::new(self.model_id.clone(), wire);

        self.complete_client
            .complete_text(&chat_request)
            .map_err(|error| CompletionError::new(format!("Together API request failed: {error}")))
    }
}

fn wire_messages(request: &CompletionRequest) -> Vec<WireMessage> {
    let mut wire = Vec::with_capacity(request.messages.len() + 1);

    if !request.instructions.trim().is_empty() {
        wire.push(WireMessage::system(request.instructions.clone()));
    }

    for message in &request.messages {
        wire.push(match message.role {
            Role::User => WireMessage::user(message.content.clone()),
            Role::Assistant => WireMessage::assistant(message.content.clone()),
        });
    }

    wire
}

fn sanitize_model_id(model_id: &str) -> String {
    let trimmed = model_id.trim();
    if trimmed.is_empty() {
        DEFAULT_TOGETHER_MODEL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn map_init_error(error: TogetherApiError) -> ProviderInitError {
    ProviderInitError::new(format!("Failed to initialize together provider: {error}"))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chat_provider::Message;

    use super::*;

    enum FakeOutcome {
        Success(String),
        Error(TogetherApiError),
    }

    struct FakeCompleteClient {
        observed_request: Mutex<Option<ChatRequest>>,
        outcome: Mutex<Option<FakeOutcome>>,
    }

    impl FakeCompleteClient {
        fn success(text: &str) -> Arc<Self> {
            Arc::new(Self {
                observed_request: Mutex::new(None),
                outcome: Mutex::new(Some(FakeOutcome::Success(text.to_string()))),
            })
        }

        fn failure(error: TogetherApiError) -> Arc<Self> {
            Arc::new(Self {
                observed_request: Mutex::new(None),
                outcome: Mutex::new(Some(FakeOutcome::Error(error))),
            })
        }

        fn observed_request(&self) -> Option<ChatRequest> {
            self.observed_request
                .lock()
                .expect("observed request lock")
                .clone()
        }
    }

    impl CompleteClient for FakeCompleteClient {
        fn complete_text(&self, request: &ChatRequest) -> Result<String, TogetherApiError> {
            *self.observed_request.lock().expect("observed request lock") = Some(request.clone());

            match self.outcome.lock().expect("outcome lock").take() {
                Some(FakeOutcome::Success(text)) => Ok(text),
                Some(FakeOutcome::Error(error)) => Err(error),
                None => panic!("fake outcome should be consumed exactly once"),
            }
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            instructions: "You are a commerce assistant.".to_string(),
            messages: vec![
                Message::user("find shoes"),
                Message::assistant("Here are options..."),
                Message::user("under $50 please"),
            ],
        }
    }

    #[test]
    fn profile_reports_together_provider_id_and_model() {
        let client = FakeCompleteClient::success("ok");
        let provider = TogetherProvider::with_complete_client_for_tests("some-model", client);

        let profile = provider.profile();
        assert_eq!(profile.provider_id, TOGETHER_PROVIDER_ID);
        assert_eq!(profile.model_id, "some-model");
    }

    #[test]
    fn complete_prepends_system_instructions_and_maps_roles() {
        let client = FakeCompleteClient::success("Sure, here are budget picks.");
        let provider = TogetherProvider::with_complete_client_for_tests(
            "some-model",
            Arc::clone(&client) as Arc<dyn CompleteClient>,
        );

        let reply = provider.complete(&request()).expect("completion");
        assert_eq!(reply, "Sure, here are budget picks.");

        let observed = client.observed_request().expect("request captured");
        assert_eq!(observed.model, "some-model");
        assert_eq!(observed.messages[0].role, "system");
        assert_eq!(observed.messages[1].role, "user");
        assert_eq!(observed.messages[2].role, "assistant");
        assert_eq!(observed.messages[3].content, "under $50 please");
    }

    #[test]
    fn complete_omits_system_message_when_instructions_blank() {
        let client = FakeCompleteClient::success("ok");
        let provider = TogetherProvider::with_complete_client_for_tests(
            "some-model",
            Arc::clone(&client) as Arc<dyn CompleteClient>,
        );

        let mut blank = request();
        blank.instructions = "   ".to_string();
        provider.complete(&blank).expect("completion");

        let observed = client.observed_request().expect("request captured");
        assert_eq!(observed.messages[0].role, "user");
    }

    #[test]
    fn complete_maps_transport_error_to_completion_error() {
        let client = FakeCompleteClient::failure(TogetherApiError::Unknown("boom".to_string()));
        let provider = TogetherProvider::with_complete_client_for_tests("some-model", client);

        let error = provider
            .complete(&request())
            .expect_err("transport failure must surface");
        assert!(error.message().contains("boom"));
    }

    #[test]
    fn new_rejects_blank_api_key() {
        let error = TogetherProvider::new(TogetherProviderConfig::new("   "))
            .expect_err("blank key must fail");
        assert!(error.message().contains("API key"));
    }

    #[test]
    fn blank_model_id_defaults_to_together_model() {
        let client = FakeCompleteClient::success("ok");
        let provider = TogetherProvider::with_complete_client_for_tests("  ", client);

        assert_eq!(provider.profile().model_id, DEFAULT_TOGETHER_MODEL);
    }
}
