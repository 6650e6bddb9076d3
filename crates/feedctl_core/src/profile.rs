use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration draft sent with every start/run-once request.
///
/// All fields are opaque strings and default to empty; nothing here validates
/// URL or host syntax.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionProfile {
    pub source_url: String,
    pub ftp_host: String,
    pub ftp_username: String,
    pub ftp_password: String,
    pub ftp_target_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    SourceUrl,
    FtpHost,
    FtpUsername,
    FtpPassword,
    FtpTargetPath,
}

impl ProfileField {
    /// Form order.
    pub const ALL: [ProfileField; 5] = [
        ProfileField::SourceUrl,
        ProfileField::FtpHost,
        ProfileField::FtpUsername,
        ProfileField::FtpPassword,
        ProfileField::FtpTargetPath,
    ];

    /// Wire name of the field, as used in request bodies and status configs.
    pub fn name(self) -> &'static str {
        match self {
            ProfileField::SourceUrl => "source_url",
            ProfileField::FtpHost => "ftp_host",
            ProfileField::FtpUsername => "ftp_username",
            ProfileField::FtpPassword => "ftp_password",
            ProfileField::FtpTargetPath => "ftp_target_path",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::SourceUrl => "Source Feed HTTP(S) URL",
            ProfileField::FtpHost => "Target Feed FTP URL",
            ProfileField::FtpUsername => "FTP Username",
            ProfileField::FtpPassword => "FTP Password",
            ProfileField::FtpTargetPath => "Target File Name",
        }
    }

    pub fn hint(self) -> Option<&'static str> {
        match self {
            ProfileField::FtpHost => Some("(e.g.: feed.walde.ch)"),
            ProfileField::FtpTargetPath => Some("(e.g.: fgp.xml)"),
            _ => None,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ProfileField::SourceUrl => "Enter Feed URL",
            ProfileField::FtpHost => "Enter FTP URL",
            ProfileField::FtpUsername => "Enter Username",
            ProfileField::FtpPassword => "Enter Password",
            ProfileField::FtpTargetPath => "Enter File Name",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, ProfileField::FtpPassword)
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        match self {
            ProfileField::SourceUrl => 0,
            ProfileField::FtpHost => 1,
            ProfileField::FtpUsername => 2,
            ProfileField::FtpPassword => 3,
            ProfileField::FtpTargetPath => 4,
        }
    }
}

impl ConversionProfile {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::SourceUrl => &self.source_url,
            ProfileField::FtpHost => &self.ftp_host,
            ProfileField::FtpUsername => &self.ftp_username,
            ProfileField::FtpPassword => &self.ftp_password,
            ProfileField::FtpTargetPath => &self.ftp_target_path,
        }
    }

    /// Replaces one field, leaving the other four untouched.
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::SourceUrl => &mut self.source_url,
            ProfileField::FtpHost => &mut self.ftp_host,
            ProfileField::FtpUsername => &mut self.ftp_username,
            ProfileField::FtpPassword => &mut self.ftp_password,
            ProfileField::FtpTargetPath => &mut self.ftp_target_path,
        };
        *slot = value.into();
    }

    /// Overlays the reported keys; fields the patch does not mention keep
    /// their current value.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        for (field, value) in &patch.values {
            self.set(*field, value.clone());
        }
    }
}

/// Config keys reported by the server, in form order. Only keys that were
/// present with a scalar value are kept.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    values: Vec<(ProfileField, String)>,
}

impl ProfilePatch {
    /// Reads the known keys of an untyped config object. Scalars are
    /// stringified; null, missing and structured values are skipped.
    pub fn from_payload(value: &Value) -> Self {
        let values = ProfileField::ALL
            .into_iter()
            .filter_map(|field| {
                let text = match value.get(field.name())? {
                    Value::String(text) => text.clone(),
                    Value::Number(number) => number.to_string(),
                    Value::Bool(flag) => flag.to_string(),
                    _ => return None,
                };
                Some((field, text))
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.values
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for ProfilePatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (field, value) in &self.values {
            let shown = if field.is_secret() { "***" } else { value.as_str() };
            map.entry(&field.name(), &shown);
        }
        map.finish()
    }
}

impl fmt::Debug for ConversionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.ftp_password.is_empty() {
            ""
        } else {
            "***"
        };
        f.debug_struct("ConversionProfile")
            .field("source_url", &self.source_url)
            .field("ftp_host", &self.ftp_host)
            .field("ftp_username", &self.ftp_username)
            .field("ftp_password", &password)
            .field("ftp_target_path", &self.ftp_target_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_names_round_trip() {
        for field in ProfileField::ALL {
            assert_eq!(ProfileField::from_name(field.name()), Some(field));
        }
        assert_eq!(ProfileField::from_name("ftp_port"), None);
    }

    #[test]
    fn focus_cycles_in_form_order() {
        assert_eq!(ProfileField::FtpTargetPath.next(), ProfileField::SourceUrl);
        assert_eq!(ProfileField::SourceUrl.previous(), ProfileField::FtpTargetPath);
        assert_eq!(ProfileField::FtpHost.next(), ProfileField::FtpUsername);
        for (position, field) in ProfileField::ALL.into_iter().enumerate() {
            assert_eq!(field.index(), position);
            assert_eq!(field.next().previous(), field);
        }
    }

    #[test]
    fn patch_keeps_only_reported_scalar_keys() {
        let patch = ProfilePatch::from_payload(&json!({
            "ftp_host": "feed.walde.ch",
            "ftp_password": null,
            "ftp_target_path": 42,
            "ftp_username": ["x"],
            "extra": "ignored",
        }));
        assert_eq!(patch.get(ProfileField::FtpHost), Some("feed.walde.ch"));
        assert_eq!(patch.get(ProfileField::FtpTargetPath), Some("42"));
        assert_eq!(patch.get(ProfileField::SourceUrl), None);
        assert_eq!(patch.get(ProfileField::FtpPassword), None);
        assert_eq!(patch.get(ProfileField::FtpUsername), None);
    }

    #[test]
    fn apply_leaves_unreported_fields_alone() {
        let mut profile = ConversionProfile {
            source_url: "typed".to_string(),
            ftp_host: "old.host".to_string(),
            ..ConversionProfile::default()
        };
        profile.apply(&ProfilePatch::from_payload(&json!({ "ftp_host": "only.host" })));
        assert_eq!(profile.source_url, "typed");
        assert_eq!(profile.ftp_host, "only.host");
        assert_eq!(profile.ftp_password, "");
    }

    #[test]
    fn patch_debug_masks_password() {
        let patch = ProfilePatch::from_payload(&json!({ "ftp_password": "hunter2" }));
        let rendered = format!("{patch:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("ftp_password"));
    }

    #[test]
    fn debug_masks_password() {
        let mut profile = ConversionProfile::default();
        profile.set(ProfileField::FtpPassword, "hunter2");
        let rendered = format!("{profile:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn serializes_all_five_keys() {
        let body = serde_json::to_value(ConversionProfile::default()).unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 5);
        for field in ProfileField::ALL {
            assert_eq!(object[field.name()], json!(""));
        }
    }
}
