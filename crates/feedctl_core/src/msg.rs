use crate::{CallId, OperationResult, ProfileField, SchedulerStatus};

/// The three mutually exclusive control actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    StartScheduler,
    RunNow,
    StopScheduler,
}

impl ControlAction {
    pub const ALL: [ControlAction; 3] = [
        ControlAction::StartScheduler,
        ControlAction::RunNow,
        ControlAction::StopScheduler,
    ];
}

/// Resolution of the status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReply {
    Status(SchedulerStatus),
    /// The query failed; carries the coerced failure payload, if any.
    Failed(Option<OperationResult>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Session started. Only the first one issues the status query.
    Mounted,
    /// User edited one form field (full new value).
    FieldChanged {
        field: ProfileField,
        value: String,
    },
    /// Move input focus to the next form field.
    FocusNext,
    /// Move input focus to the previous form field.
    FocusPrevious,
    /// User triggered Start Scheduler, Run Now or Stop Scheduler.
    ActionClicked(ControlAction),
    /// Status query finished, successfully or not.
    StatusResolved { call_id: CallId, reply: StatusReply },
    /// Start/stop/run-once finished. `None` means an empty payload.
    ControlResolved {
        call_id: CallId,
        result: Option<OperationResult>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for unmapped input.
    NoOp,
}
