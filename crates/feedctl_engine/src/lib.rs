//! Feed control engine: HTTP client for the scheduler backend and the
//! background runtime that executes remote calls.
mod client;
mod engine;
mod types;

pub use client::{ClientSettings, RemoteControl, ReqwestControlClient, DEFAULT_BASE_URL};
pub use engine::ControlHandle;
pub use types::{CallId, ControlError, ControlEvent, ControlRequest, Endpoint, FailureKind};
