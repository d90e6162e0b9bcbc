use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};

use crate::config::TogetherApiConfig;
use crate::error::{parse_error_message, TogetherApiError};
use crate::headers::build_headers;
use crate::payload::{ChatRequest, ChatResponse};
use crate::url::normalize_completions_url;

#[derive(Debug)]
pub struct TogetherApiClient {
    http: Client,
    config: TogetherApiConfig,
}

impl TogetherApiClient {
    pub fn new(config: TogetherApiConfig) -> Result<Self, TogetherApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TogetherApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &TogetherApiConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_completions_url(&self.config.base_url)
    }

    pub fn build_headers(&self, user_agent: Option<&str>) -> Result<HeaderMap, TogetherApiError> {
        let headers = build_headers(&self.config, user_agent)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    TogetherApiError::Unknown(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    TogetherApiError::Unknown(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &ChatRequest,
    ) -> Result<reqwest::RequestBuilder, TogetherApiError> {
        validate_request_payload_shape(request)?;

        let headers = self.build_headers(self.config.user_agent.as_deref())?;
        let payload = request_with_transport_defaults(request);
        Ok(self
            .http
            .post(self.normalized_endpoint())
            .headers(headers)
            .json(&payload))
    }

    /// Sends one completion request and returns the parsed response.
    ///
    /// Failures are reported once; there is no retry policy at this layer.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, TogetherApiError> {
        let response = self
            .build_request(request)?
            .send()
            .await
            .map_err(TogetherApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| fallback_body(status));
            return Err(TogetherApiError::Status(
                status,
                parse_error_message(status, &body),
            ));
        }

        let parsed = response
            .json::<ChatResponse>()
            .await
            .map_err(TogetherApiError::from)?;

        if parsed.first_content().is_none() {
            return Err(TogetherApiError::EmptyCompletion);
        }

        Ok(parsed)
    }

    /// Sends one completion request and returns the first choice's text.
    pub async fn complete_text(&self, request: &ChatRequest) -> Result<String, TogetherApiError> {
        let response = self.complete(request).await?;
        response
            .first_content()
            .map(str::to_owned)
            .ok_or(TogetherApiError::EmptyCompletion)
    }
}

fn validate_request_payload_shape(request: &ChatRequest) -> Result<(), TogetherApiError> {
    if request.model.trim().is_empty() {
        return Err(TogetherApiError::InvalidRequestPayload(
            "'model' must be a non-empty model id".to_string(),
        ));
    }
    if request.messages.is_empty() {
        return Err(TogetherApiError::InvalidRequestPayload(
            "'messages' must contain at least one message".to_string(),
        ));
    }

    Ok(())
}

fn request_with_transport_defaults(request: &ChatRequest) -> ChatRequest {
    let mut payload = request.clone();
    payload.stream = false;
    payload
}

fn fallback_body(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
