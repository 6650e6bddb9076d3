use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use feedctl_logging::{feed_debug, feed_error, feed_info, feed_warn, Redacted};
use serde_json::Value;

use crate::client::RemoteControl;
use crate::{CallId, ControlError, ControlEvent, ControlRequest, FailureKind};

enum EngineCommand {
    Submit {
        call_id: CallId,
        request: ControlRequest,
    },
}

/// Runs remote calls on a background tokio runtime.
///
/// Each submitted call yields exactly one [`ControlEvent::Resolved`], in
/// completion order. Nothing is cancelled or timed out here; a call that never
/// returns never produces its event.
pub struct ControlHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<ControlEvent>,
}

impl ControlHandle {
    pub fn new(remote: Arc<dyn RemoteControl>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("feedctl-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let remote = remote.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(remote.as_ref(), command, event_tx).await;
                    });
                }
                feed_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// Queues a call. Fails when the engine thread is gone, in which case no
    /// event will ever arrive for `call_id`.
    pub fn submit(&self, call_id: CallId, request: ControlRequest) -> Result<(), ControlError> {
        send_command(&self.cmd_tx, call_id, request)
    }

    pub fn try_recv(&self) -> Option<ControlEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<ControlEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn send_command(
    cmd_tx: &mpsc::Sender<EngineCommand>,
    call_id: CallId,
    request: ControlRequest,
) -> Result<(), ControlError> {
    let endpoint = request.endpoint();
    feed_debug!("submit call_id={} endpoint={}", call_id, endpoint);
    cmd_tx
        .send(EngineCommand::Submit { call_id, request })
        .map_err(|_| {
            feed_error!("engine stopped; dropping call_id={} endpoint={}", call_id, endpoint);
            ControlError::new(FailureKind::Transport, "engine is not running")
        })
}

async fn handle_command(
    remote: &dyn RemoteControl,
    command: EngineCommand,
    event_tx: mpsc::Sender<ControlEvent>,
) {
    match command {
        EngineCommand::Submit { call_id, request } => {
            let endpoint = request.endpoint();
            let result = match &request {
                ControlRequest::Status => remote.scheduler_status().await,
                ControlRequest::Start { body } => remote.start_scheduler(body).await,
                ControlRequest::RunOnce { body } => remote.process_feed(body).await,
                ControlRequest::Stop => remote.stop_scheduler().await,
            };
            match &result {
                Ok(payload) => {
                    feed_info!(
                        "backend response {} call_id={}: {}",
                        endpoint,
                        call_id,
                        redact_secrets(payload)
                    );
                }
                Err(err) if err.kind.is_transport() => {
                    feed_warn!("transport failure {} call_id={}: {}", endpoint, call_id, err);
                }
                Err(err) => {
                    feed_warn!("backend failure {} call_id={}: {}", endpoint, call_id, err);
                }
            }
            let _ = event_tx.send(ControlEvent::Resolved {
                call_id,
                endpoint,
                result,
            });
        }
    }
}

const SECRET_KEYS: [&str; 1] = ["ftp_password"];

/// Copy of `payload` with credential values masked, for logging.
fn redact_secrets(payload: &Value) -> Value {
    match payload {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::String(secret) if SECRET_KEYS.contains(&key.as_str()) => {
                            Value::String(Redacted(secret).to_string())
                        }
                        other => redact_secrets(other),
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_secrets).collect()),
        other => other.clone(),
    }
}
