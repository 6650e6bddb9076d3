use std::collections::BTreeSet;

use crate::{ConversionProfile, OperationResult, ProfileField, SchedulerStatus};

pub type CallId = u64;

pub const STATUS_RUNNING_TEXT: &str = "Scheduler is already running";
pub const STATUS_STOPPED_TEXT: &str = "Scheduler is stopped";

/// Single owned session state: the configuration draft, the last result and
/// the calls still in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    mounted: bool,
    draft: ConversionProfile,
    result: Option<OperationResult>,
    in_flight: BTreeSet<CallId>,
    next_call_id: CallId,
    focus: ProfileField,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mounted: false,
            draft: ConversionProfile::default(),
            result: None,
            in_flight: BTreeSet::new(),
            next_call_id: 1,
            focus: ProfileField::SourceUrl,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ConversionProfile {
        &self.draft
    }

    pub fn result(&self) -> Option<&OperationResult> {
        self.result.as_ref()
    }

    pub fn focus(&self) -> ProfileField {
        self.focus
    }

    /// True while at least one remote call is unresolved.
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_mounted(&mut self) {
        self.mounted = true;
    }

    pub(crate) fn set_field(&mut self, field: ProfileField, value: String) {
        if self.draft.get(field) != value {
            self.draft.set(field, value);
            self.mark_dirty();
        }
    }

    pub(crate) fn set_focus(&mut self, focus: ProfileField) {
        if self.focus != focus {
            self.focus = focus;
            self.mark_dirty();
        }
    }

    /// Registers a new call and raises Loading.
    pub(crate) fn begin_call(&mut self) -> CallId {
        let call_id = self.next_call_id;
        self.next_call_id += 1;
        self.in_flight.insert(call_id);
        self.mark_dirty();
        call_id
    }

    /// Settles a call and replaces the result slot wholesale. Loading only
    /// drops once no other call is pending.
    pub(crate) fn finish_call(&mut self, call_id: CallId, result: Option<OperationResult>) {
        self.in_flight.remove(&call_id);
        self.result = result;
        self.mark_dirty();
    }

    /// Applies the status query outcome. The reported config of a running
    /// scheduler is merged into the draft key by key.
    pub(crate) fn apply_status(&mut self, call_id: CallId, status: SchedulerStatus) {
        let message = match status {
            SchedulerStatus::Running { config } => {
                self.draft.apply(&config);
                STATUS_RUNNING_TEXT
            }
            SchedulerStatus::Stopped => STATUS_STOPPED_TEXT,
        };
        self.finish_call(call_id, Some(OperationResult::message(message)));
    }
}
