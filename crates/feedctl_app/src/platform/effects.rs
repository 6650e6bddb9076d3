use std::io;
use std::sync::Arc;

use feedctl_core::{
    CallId, ConversionProfile, Effect, Msg, OperationResult, SchedulerStatus, StatusReply,
};
use feedctl_engine::{
    ControlError, ControlEvent, ControlHandle, ControlRequest, Endpoint, RemoteControl,
};
use feedctl_logging::{feed_error, feed_info, Redacted};
use serde_json::{json, Value};

/// Executes core effects on the engine and turns engine events back into
/// messages. Payloads are classified here, once, as they arrive.
pub struct EffectRunner {
    engine: ControlHandle,
    local: Vec<Msg>,
}

impl EffectRunner {
    pub fn new(remote: Arc<dyn RemoteControl>) -> io::Result<Self> {
        Ok(Self {
            engine: ControlHandle::new(remote)?,
            local: Vec::new(),
        })
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            let call_id = effect.call_id();
            let is_status = matches!(effect, Effect::QueryStatus { .. });
            let request = match effect {
                Effect::QueryStatus { .. } => Ok(ControlRequest::Status),
                Effect::StartScheduler { profile, .. } => {
                    log_profile("StartScheduler", call_id, &profile);
                    profile_body(&profile).map(|body| ControlRequest::Start { body })
                }
                Effect::RunOnce { profile, .. } => {
                    log_profile("RunOnce", call_id, &profile);
                    profile_body(&profile).map(|body| ControlRequest::RunOnce { body })
                }
                Effect::StopScheduler { .. } => Ok(ControlRequest::Stop),
            };
            // Calls that never reach the engine are settled locally so Loading
            // still drops.
            let failure = match request {
                Ok(request) => match self.engine.submit(call_id, request) {
                    Ok(()) => continue,
                    Err(err) => failure_result(err),
                },
                Err(err) => {
                    feed_error!("could not encode profile for call_id={}: {}", call_id, err);
                    OperationResult::from_payload(&json!({ "error": err.to_string() }))
                }
            };
            self.local.push(settled_locally(is_status, call_id, failure));
        }
    }

    /// Messages for every call resolved since the last drain.
    pub fn drain(&mut self) -> Vec<Msg> {
        let mut inbox = std::mem::take(&mut self.local);
        while let Some(event) = self.engine.try_recv() {
            inbox.push(event_to_msg(event));
        }
        inbox
    }
}

fn profile_body(profile: &ConversionProfile) -> Result<Value, serde_json::Error> {
    serde_json::to_value(profile)
}

fn log_profile(action: &str, call_id: CallId, profile: &ConversionProfile) {
    feed_info!(
        "{} call_id={} source_url={} ftp_host={} ftp_username={} ftp_password={} ftp_target_path={}",
        action,
        call_id,
        profile.source_url,
        profile.ftp_host,
        profile.ftp_username,
        Redacted(&profile.ftp_password),
        profile.ftp_target_path
    );
}

fn event_to_msg(event: ControlEvent) -> Msg {
    let ControlEvent::Resolved {
        call_id,
        endpoint,
        result,
    } = event;
    match endpoint {
        Endpoint::SchedulerStatus => {
            let reply = match result {
                Ok(payload) => StatusReply::Status(SchedulerStatus::from_payload(&payload)),
                Err(err) => StatusReply::Failed(failure_result(err)),
            };
            Msg::StatusResolved { call_id, reply }
        }
        Endpoint::ProcessFeed | Endpoint::StartScheduler | Endpoint::StopScheduler => {
            let result = match result {
                Ok(payload) => OperationResult::from_payload(&payload),
                Err(err) => failure_result(err),
            };
            Msg::ControlResolved { call_id, result }
        }
    }
}

fn settled_locally(is_status: bool, call_id: CallId, failure: Option<OperationResult>) -> Msg {
    if is_status {
        Msg::StatusResolved {
            call_id,
            reply: StatusReply::Failed(failure),
        }
    } else {
        Msg::ControlResolved {
            call_id,
            result: failure,
        }
    }
}

fn failure_result(err: ControlError) -> Option<OperationResult> {
    OperationResult::from_payload(&err.into_payload())
}
