//! Editor configuration, as supplied by the host page.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// When selection changes trigger a format refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefreshPolicy {
    /// Only while the surface holds focus. Selection events are page-global,
    /// so this skips requeries caused by carets in other inputs.
    #[default]
    FocusedOnly,
    /// On every selection change, focused or not.
    Always,
}

/// Prop-like configuration for one editor instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Initial serialized content.
    pub value: String,
    /// Shown while the surface is empty.
    pub placeholder: String,
    /// Form field name the value is submitted under.
    pub name: Option<String>,
    /// Element id, for `<label for=..>` association.
    pub id: Option<String>,
    pub refresh_policy: RefreshPolicy,
    /// Cap on characters inserted by a single paste.
    pub max_paste_chars: Option<usize>,
}

impl EditorConfig {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        serde_json::from_str(json).map_err(|e| EditorError::Config(e.to_string()))
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_refresh_policy(mut self, policy: RefreshPolicy) -> Self {
        self.refresh_policy = policy;
        self
    }

    /// Field name for form submission: `name`, falling back to `id`.
    pub fn field_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_defaults_missing_fields() {
        let config = EditorConfig::from_json(r#"{ "value": "<p>hi</p>", "placeholder": "Write…" }"#).unwrap();
        assert_eq!(config.value, "<p>hi</p>");
        assert_eq!(config.placeholder, "Write…");
        assert_eq!(config.refresh_policy, RefreshPolicy::FocusedOnly);
        assert_eq!(config.max_paste_chars, None);
        assert!(config.name.is_none());
    }

    #[test]
    fn test_from_json_camel_case() {
        let config = EditorConfig::from_json(
            r#"{ "refreshPolicy": "always", "maxPasteChars": 100, "name": "description" }"#,
        )
        .unwrap();
        assert_eq!(config.refresh_policy, RefreshPolicy::Always);
        assert_eq!(config.max_paste_chars, Some(100));
        assert_eq!(config.field_name(), Some("description"));
    }

    #[test]
    fn test_from_json_invalid() {
        let err = EditorConfig::from_json(r#"{ "refreshPolicy": "sometimes" }"#).unwrap_err();
        assert!(matches!(err, EditorError::Config(_)));
    }

    #[test]
    fn test_field_name_falls_back_to_id() {
        let config = EditorConfig::default().with_id("body");
        assert_eq!(config.field_name(), Some("body"));
    }
}
