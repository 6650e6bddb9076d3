use std::time::Duration;

use feedctl_core::ControlAction;

/// Input poll interval; also bounds how late an engine result is drawn.
pub const TICK: Duration = Duration::from_millis(75);

pub const HEADING: &str = "Conversion Profile (FGP)";
pub const STATUS_TITLE: &str = "Scheduler Status:";
pub const RESPONSE_TITLE: &str = "Response:";
pub const FOOTER_HINT: &str =
    "Tab/Up/Down: move field | Ctrl-U: clear field | F2/Alt-S start | F3/Alt-N run now | F4/Alt-X stop";

pub fn action_key(action: ControlAction) -> &'static str {
    match action {
        ControlAction::StartScheduler => "F2",
        ControlAction::RunNow => "F3",
        ControlAction::StopScheduler => "F4",
    }
}
