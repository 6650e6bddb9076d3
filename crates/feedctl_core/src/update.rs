use crate::{AppState, ControlAction, Effect, Msg, StatusReply};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if state.is_mounted() {
                return (state, Vec::new());
            }
            state.mark_mounted();
            let call_id = state.begin_call();
            vec![Effect::QueryStatus { call_id }]
        }
        Msg::FieldChanged { field, value } => {
            state.set_field(field, value);
            Vec::new()
        }
        Msg::FocusNext => {
            let next = state.focus().next();
            state.set_focus(next);
            Vec::new()
        }
        Msg::FocusPrevious => {
            let previous = state.focus().previous();
            state.set_focus(previous);
            Vec::new()
        }
        Msg::ActionClicked(action) => {
            // Loading gates all three actions; a click while busy is dropped.
            if state.is_loading() {
                return (state, Vec::new());
            }
            let call_id = state.begin_call();
            let effect = match action {
                ControlAction::StartScheduler => Effect::StartScheduler {
                    call_id,
                    profile: state.draft().clone(),
                },
                ControlAction::RunNow => Effect::RunOnce {
                    call_id,
                    profile: state.draft().clone(),
                },
                ControlAction::StopScheduler => Effect::StopScheduler { call_id },
            };
            vec![effect]
        }
        Msg::StatusResolved { call_id, reply } => {
            match reply {
                StatusReply::Status(status) => state.apply_status(call_id, status),
                StatusReply::Failed(result) => state.finish_call(call_id, result),
            }
            Vec::new()
        }
        Msg::ControlResolved { call_id, result } => {
            state.finish_call(call_id, result);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
