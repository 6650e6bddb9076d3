use crate::{CallId, ConversionProfile};

/// Remote calls requested by `update`; executed by the platform layer, which
/// answers each with `Msg::StatusResolved` or `Msg::ControlResolved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    QueryStatus { call_id: CallId },
    StartScheduler {
        call_id: CallId,
        profile: ConversionProfile,
    },
    RunOnce {
        call_id: CallId,
        profile: ConversionProfile,
    },
    StopScheduler { call_id: CallId },
}

impl Effect {
    pub fn call_id(&self) -> CallId {
        match self {
            Effect::QueryStatus { call_id }
            | Effect::StartScheduler { call_id, .. }
            | Effect::RunOnce { call_id, .. }
            | Effect::StopScheduler { call_id } => *call_id,
        }
    }
}
