//! Feed scheduler control core: pure state machine, response normalization and
//! the navigation guard policy.
mod effect;
mod guard;
mod msg;
mod profile;
mod result;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use guard::{GuardState, GuardVerdict, NavigationEvent, NavigationGuard};
pub use msg::{ControlAction, Msg, StatusReply};
pub use profile::{ConversionProfile, ProfileField, ProfilePatch};
pub use result::{display_text, OperationResult, SchedulerStatus, NO_RESPONSE_TEXT};
pub use state::{AppState, CallId, STATUS_RUNNING_TEXT, STATUS_STOPPED_TEXT};
pub use update::update;
pub use view_model::{ActionView, AppViewModel, FieldView, LOADING_TEXT};
