use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::{ControlError, Endpoint, FailureKind};

pub const DEFAULT_BASE_URL: &str = "https://waldeapi.fly.dev";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Overall per-request timeout. `None` waits for the backend indefinitely.
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn new(base_url: &str) -> Result<Self, ControlError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ControlError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ControlError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base address"),
            ));
        }
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url parses"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// The four control operations offered by the scheduler backend.
///
/// Every method resolves to the decoded JSON body on success. Failures of any
/// class come back as `ControlError`; callers turn them into result payloads
/// with [`ControlError::into_payload`].
#[async_trait::async_trait]
pub trait RemoteControl: Send + Sync {
    async fn scheduler_status(&self) -> Result<Value, ControlError>;
    async fn start_scheduler(&self, profile: &Value) -> Result<Value, ControlError>;
    async fn stop_scheduler(&self) -> Result<Value, ControlError>;
    async fn process_feed(&self, profile: &Value) -> Result<Value, ControlError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestControlClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestControlClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ControlError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ControlError::new(FailureKind::Transport, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ControlError> {
        let mut url = self.settings.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ControlError::new(FailureKind::InvalidUrl, "base address cannot take a path")
            })?
            .pop_if_empty()
            .push(endpoint.path());
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ControlError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            return Err(
                ControlError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_body(decode_lenient(&text)),
            );
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|err| {
            ControlError::new(FailureKind::MalformedPayload, err.to_string())
                .with_body(Some(Value::String(text)))
        })
    }
}

#[async_trait::async_trait]
impl RemoteControl for ReqwestControlClient {
    async fn scheduler_status(&self) -> Result<Value, ControlError> {
        let url = self.endpoint_url(Endpoint::SchedulerStatus)?;
        let payload = self.send(self.client.get(url)).await?;
        if !payload.is_object() {
            return Err(ControlError::new(
                FailureKind::MalformedPayload,
                format!("expected a status object, got {payload}"),
            ));
        }
        Ok(payload)
    }

    async fn start_scheduler(&self, profile: &Value) -> Result<Value, ControlError> {
        let url = self.endpoint_url(Endpoint::StartScheduler)?;
        self.send(self.client.post(url).json(profile)).await
    }

    async fn stop_scheduler(&self) -> Result<Value, ControlError> {
        let url = self.endpoint_url(Endpoint::StopScheduler)?;
        self.send(self.client.post(url)).await
    }

    async fn process_feed(&self, profile: &Value) -> Result<Value, ControlError> {
        let url = self.endpoint_url(Endpoint::ProcessFeed)?;
        self.send(self.client.post(url).json(profile)).await
    }
}

/// JSON if it parses, the raw text otherwise, nothing for an empty body.
fn decode_lenient(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

fn map_reqwest_error(err: reqwest::Error) -> ControlError {
    if err.is_timeout() {
        return ControlError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ControlError::new(FailureKind::MalformedPayload, err.to_string());
    }
    ControlError::new(FailureKind::Transport, err.to_string())
}
