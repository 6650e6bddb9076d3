use crate::{display_text, AppState, ControlAction, ProfileField};

/// Status region text before the first result arrives.
pub const LOADING_TEXT: &str = "Loading...";

const SECRET_MASK: char = '*';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub fields: Vec<FieldView>,
    pub actions: Vec<ActionView>,
    pub loading: bool,
    pub status_text: String,
    pub response_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: ProfileField,
    pub label: &'static str,
    pub hint: Option<&'static str>,
    pub placeholder: &'static str,
    /// Display value; masked for secret fields.
    pub value: String,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub action: ControlAction,
    pub label: &'static str,
    pub enabled: bool,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let loading = self.is_loading();
        let fields = ProfileField::ALL
            .into_iter()
            .map(|field| {
                let raw = self.draft().get(field);
                let value = if field.is_secret() {
                    std::iter::repeat(SECRET_MASK)
                        .take(raw.chars().count())
                        .collect()
                } else {
                    raw.to_string()
                };
                FieldView {
                    field,
                    label: field.label(),
                    hint: field.hint(),
                    placeholder: field.placeholder(),
                    value,
                    focused: field == self.focus(),
                }
            })
            .collect();

        let actions = ControlAction::ALL
            .into_iter()
            .map(|action| ActionView {
                action,
                label: action_label(action, loading),
                enabled: !loading,
            })
            .collect();

        let status_text = match self.result() {
            Some(result) => result.display_text(),
            None => LOADING_TEXT.to_string(),
        };

        AppViewModel {
            fields,
            actions,
            loading,
            status_text,
            response_text: display_text(self.result()),
        }
    }
}

fn action_label(action: ControlAction, loading: bool) -> &'static str {
    match (action, loading) {
        (ControlAction::StartScheduler, false) => "Start Scheduler",
        (ControlAction::StartScheduler, true) => "Starting...",
        (ControlAction::RunNow, false) => "Run Now",
        (ControlAction::RunNow, true) => "Processing...",
        (ControlAction::StopScheduler, _) => "Stop Scheduler",
    }
}
