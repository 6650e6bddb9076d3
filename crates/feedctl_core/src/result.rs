use serde_json::Value;

use crate::ProfilePatch;

/// Placeholder shown when nothing has been fetched or attempted yet.
pub const NO_RESPONSE_TEXT: &str = "No response yet.";

const SUMMARY_PLACEHOLDER: &str = "-";

/// Normalized outcome of a control call or of the status query.
///
/// The shape is decided once, when the payload arrives; rendering only
/// formats the chosen variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// A human readable `message` field.
    Message(String),
    /// Processing summary: any of `status`, `removed_images`, `ftp_target_path`.
    Summary {
        status: Option<String>,
        /// Reported count, in the form the server sent it.
        removed_images: Option<String>,
        ftp_target_path: Option<String>,
    },
    /// A raw `text` field, or a bare string payload.
    RawText(String),
    /// Chat-completion style `choices[0].message.content`.
    NestedContent(String),
    /// Anything else, kept as a pretty-printed dump of the whole payload.
    Unstructured(String),
}

impl OperationResult {
    /// Classifies an untyped payload. Returns `None` for payloads that carry
    /// nothing at all (null, false, zero, empty string).
    pub fn from_payload(payload: &Value) -> Option<Self> {
        if !is_truthy(payload) {
            return None;
        }
        if let Value::String(text) = payload {
            return Some(Self::RawText(text.clone()));
        }

        if let Some(message) = truthy_text(payload.get("message")) {
            return Some(Self::Message(message));
        }

        let status = truthy_text(payload.get("status"));
        let removed_images = truthy_text(payload.get("removed_images"));
        let ftp_target_path = truthy_text(payload.get("ftp_target_path"));
        if status.is_some() || removed_images.is_some() || ftp_target_path.is_some() {
            return Some(Self::Summary {
                status,
                removed_images,
                ftp_target_path,
            });
        }

        if let Some(text) = truthy_text(payload.get("text")) {
            return Some(Self::RawText(text));
        }

        let content = payload
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"));
        if let Some(content) = truthy_text(content) {
            return Some(Self::NestedContent(content));
        }

        let dump = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
        Some(Self::Unstructured(dump))
    }

    /// Wraps a plain message, as used for locally generated status lines.
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    pub fn display_text(&self) -> String {
        match self {
            Self::Message(text)
            | Self::RawText(text)
            | Self::NestedContent(text)
            | Self::Unstructured(text) => text.clone(),
            Self::Summary {
                status,
                removed_images,
                ftp_target_path,
            } => format!(
                "Status: {}\nRemoved images: {}\nFTP Path: {}",
                status.as_deref().unwrap_or(SUMMARY_PLACEHOLDER),
                removed_images.as_deref().unwrap_or("0"),
                ftp_target_path.as_deref().unwrap_or(SUMMARY_PLACEHOLDER),
            ),
        }
    }
}

/// Display text for the result slot, including the empty slot.
pub fn display_text(result: Option<&OperationResult>) -> String {
    match result {
        Some(result) => result.display_text(),
        None => NO_RESPONSE_TEXT.to_string(),
    }
}

/// Outcome of the status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerStatus {
    Stopped,
    /// Only the config keys the backend reported.
    Running { config: ProfilePatch },
}

impl SchedulerStatus {
    /// Reads `{running, config}`. Never fails: the scheduler counts as
    /// running only when `running` is truthy and `config` is an object.
    pub fn from_payload(payload: &Value) -> Self {
        let running = payload.get("running").is_some_and(is_truthy);
        match payload.get("config") {
            Some(config @ Value::Object(_)) if running => Self::Running {
                config: ProfilePatch::from_payload(config),
            },
            _ => Self::Stopped,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_text(value: Option<&Value>) -> Option<String> {
    let value = value.filter(|v| is_truthy(v))?;
    Some(match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}
