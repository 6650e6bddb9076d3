use std::fmt;

use serde_json::{json, Value};
use thiserror::Error;

pub type CallId = u64;

/// Backend endpoints, relative to the configured base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    SchedulerStatus,
    ProcessFeed,
    StartScheduler,
    StopScheduler,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::SchedulerStatus => "scheduler-status",
            Endpoint::ProcessFeed => "process-feed",
            Endpoint::StartScheduler => "start-scheduler",
            Endpoint::StopScheduler => "stop-scheduler",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// A remote call as submitted to the engine. Bodies are already serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlRequest {
    Status,
    Start { body: Value },
    RunOnce { body: Value },
    Stop,
}

impl ControlRequest {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ControlRequest::Status => Endpoint::SchedulerStatus,
            ControlRequest::Start { .. } => Endpoint::StartScheduler,
            ControlRequest::RunOnce { .. } => Endpoint::ProcessFeed,
            ControlRequest::Stop => Endpoint::StopScheduler,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// A submitted call finished. Exactly one event per submitted call.
    Resolved {
        call_id: CallId,
        endpoint: Endpoint,
        result: Result<Value, ControlError>,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct ControlError {
    pub kind: FailureKind,
    pub message: String,
    /// Body returned by the server alongside the failure, if any.
    pub body: Option<Value>,
}

impl ControlError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            body: None,
        }
    }

    pub(crate) fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Coerces the failure into a response-shaped payload: the server's body
    /// when it sent one, else `{"error": <message>}`.
    pub fn into_payload(self) -> Value {
        match self.body {
            Some(body) if !body.is_null() => body,
            _ => json!({ "error": self.message }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// No response reached the client.
    Transport,
    Timeout,
    /// The server answered with a non-success status.
    HttpStatus(u16),
    /// A response arrived but could not be decoded.
    MalformedPayload,
}

impl FailureKind {
    pub fn is_transport(self) -> bool {
        matches!(
            self,
            FailureKind::InvalidUrl | FailureKind::Transport | FailureKind::Timeout
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Transport => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedPayload => write!(f, "malformed payload"),
        }
    }
}
