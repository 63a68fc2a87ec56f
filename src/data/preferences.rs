//! Per-topic subscription preferences.
//!
//! [`PanelPreferenceState`] is the only state the panel persists. The host
//! stores it as an opaque JSON value and hands it back verbatim on the next
//! mount, so loading is lenient: anything malformed degrades to defaults
//! instead of failing panel initialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::data::catalog::TopicCatalogEntry;

/// Key of the settings-tree root node and of the persisted topic mapping.
pub const SUBSCRIPTIONS_KEY: &str = "subscriptions";

/// User choices for a single topic.
///
/// Fields are optional so that an entry written by "subscribe all" (which sets
/// only `visible`) round-trips without growing a `preload` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preload: Option<bool>,
}

impl TopicPreference {
    /// Entry created by the "subscribe all" action: visible, no preload override.
    pub fn subscribed() -> Self {
        Self {
            visible: Some(true),
            preload: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(false)
    }

    pub fn preloads(&self) -> bool {
        self.preload.unwrap_or(false)
    }

    fn set(&mut self, field: PreferenceField, value: bool) {
        match field {
            PreferenceField::Visible => self.visible = Some(value),
            PreferenceField::Preload => self.preload = Some(value),
        }
    }
}

/// Editable field of a [`TopicPreference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceField {
    Visible,
    Preload,
}

impl PreferenceField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "visible" => Some(PreferenceField::Visible),
            "preload" => Some(PreferenceField::Preload),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PreferenceField::Visible => "visible",
            PreferenceField::Preload => "preload",
        }
    }
}

/// Reasons an edit is refused. A refused edit leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("edit path `{}` does not address subscriptions.<topic>.<field>", .0.join("."))]
    UnresolvedPath(Vec<String>),
    #[error("unknown preference field `{0}`")]
    UnknownField(String),
    #[error("expected a boolean at `{path}`, got {value}")]
    NotABoolean { path: String, value: Value },
}

/// Mapping from topic name to the user's preferences for it, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelPreferenceState {
    #[serde(default)]
    pub subscriptions: IndexMap<String, TopicPreference>,
}

/// Order matters: it is the order topics are subscribed and listed in.
impl PartialEq for PanelPreferenceState {
    fn eq(&self, other: &Self) -> bool {
        self.subscriptions.iter().eq(other.subscriptions.iter())
    }
}

impl Eq for PanelPreferenceState {}

impl PanelPreferenceState {
    /// Restore state handed back by the host.
    ///
    /// Missing or malformed input yields the empty default. Individual entries
    /// that are not objects are dropped and non-boolean fields fall back to
    /// their defaults; well-formed entries survive untouched.
    pub fn from_persisted(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        let Some(root) = value.as_object() else {
            log::warn!("persisted panel state is not an object, using defaults");
            return Self::default();
        };
        let entries = match root.get(SUBSCRIPTIONS_KEY) {
            None | Some(Value::Null) => return Self::default(),
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                log::warn!("persisted `{SUBSCRIPTIONS_KEY}` is not an object ({other}), using defaults");
                return Self::default();
            }
        };

        let mut subscriptions = IndexMap::with_capacity(entries.len());
        for (topic, entry) in entries {
            match entry {
                Value::Object(fields) => {
                    let pref = TopicPreference {
                        visible: persisted_flag(topic, fields, PreferenceField::Visible),
                        preload: persisted_flag(topic, fields, PreferenceField::Preload),
                    };
                    subscriptions.insert(topic.clone(), pref);
                }
                Value::Null => {}
                other => {
                    log::warn!("dropping malformed preference for `{topic}`: {other}");
                }
            }
        }
        Self { subscriptions }
    }

    /// Opaque JSON value handed to the host for persistence.
    pub fn to_persisted(&self) -> Value {
        let mut entries = Map::with_capacity(self.subscriptions.len());
        for (topic, pref) in &self.subscriptions {
            let mut fields = Map::new();
            if let Some(v) = pref.visible {
                fields.insert(PreferenceField::Visible.key().to_string(), Value::Bool(v));
            }
            if let Some(v) = pref.preload {
                fields.insert(PreferenceField::Preload.key().to_string(), Value::Bool(v));
            }
            entries.insert(topic.clone(), Value::Object(fields));
        }
        let mut root = Map::new();
        root.insert(SUBSCRIPTIONS_KEY.to_string(), Value::Object(entries));
        Value::Object(root)
    }

    /// One visible entry per catalog topic. Any previous preferences,
    /// preload choices included, are discarded.
    pub fn subscribe_all(catalog: &[TopicCatalogEntry]) -> Self {
        Self {
            subscriptions: catalog
                .iter()
                .map(|topic| (topic.name.clone(), TopicPreference::subscribed()))
                .collect(),
        }
    }

    pub fn get(&self, topic: &str) -> Option<&TopicPreference> {
        self.subscriptions.get(topic)
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Return a copy with `value` written at `path`.
    ///
    /// The only addressable locations are `subscriptions.<topic>.visible` and
    /// `subscriptions.<topic>.preload`, and the value must be a boolean. The
    /// entry is created on first edit; all other entries are carried over
    /// unchanged and keep their position.
    pub fn with_edit(&self, path: &[String], value: &Value) -> Result<Self, EditError> {
        let (topic, field_key) = match path {
            [root, topic, field] if root == SUBSCRIPTIONS_KEY => (topic, field),
            _ => return Err(EditError::UnresolvedPath(path.to_vec())),
        };
        let field = PreferenceField::from_key(field_key)
            .ok_or_else(|| EditError::UnknownField(field_key.clone()))?;
        let flag = value.as_bool().ok_or_else(|| EditError::NotABoolean {
            path: path.join("."),
            value: value.clone(),
        })?;

        let mut next = self.clone();
        next.subscriptions
            .entry(topic.clone())
            .or_default()
            .set(field, flag);
        Ok(next)
    }
}

fn persisted_flag(topic: &str, fields: &Map<String, Value>, field: PreferenceField) -> Option<bool> {
    match fields.get(field.key()) {
        None | Some(Value::Null) => None,
        Some(Value::Bool(v)) => Some(*v),
        Some(other) => {
            log::warn!("ignoring non-boolean `{}` for `{topic}`: {other}", field.key());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn malformed_fields_fall_back_to_defaults() {
        let raw = json!({
            "subscriptions": {
                "/a": { "visible": "yes", "preload": true },
                "/b": 17,
                "/c": null,
            }
        });
        let state = PanelPreferenceState::from_persisted(Some(&raw));
        assert_eq!(state.subscriptions.len(), 1);
        let a = state.get("/a").unwrap();
        assert_eq!(a.visible, None);
        assert_eq!(a.preload, Some(true));
    }

    #[test]
    fn non_object_root_is_default() {
        for raw in [json!(null), json!([1, 2]), json!({"subscriptions": "x"}), json!({})] {
            assert!(PanelPreferenceState::from_persisted(Some(&raw)).is_empty());
        }
        assert!(PanelPreferenceState::from_persisted(None).is_empty());
    }

    #[test]
    fn persisted_value_omits_unset_fields() {
        let state = PanelPreferenceState::subscribe_all(&[TopicCatalogEntry::new("/a", None)]);
        assert_eq!(
            state.to_persisted(),
            json!({"subscriptions": {"/a": {"visible": true}}})
        );
    }

    #[test]
    fn edit_rejects_unknown_field() {
        let state = PanelPreferenceState::default();
        let err = state
            .with_edit(&path(&["subscriptions", "/a", "colour"]), &json!(true))
            .unwrap_err();
        assert_eq!(err, EditError::UnknownField("colour".into()));
    }

    #[test]
    fn equality_is_order_sensitive() {
        let visible = json!(true);
        let zeta_first = PanelPreferenceState::default()
            .with_edit(&path(&["subscriptions", "/zeta", "visible"]), &visible)
            .and_then(|s| s.with_edit(&path(&["subscriptions", "/alpha", "visible"]), &visible))
            .unwrap();
        let alpha_first = PanelPreferenceState::default()
            .with_edit(&path(&["subscriptions", "/alpha", "visible"]), &visible)
            .and_then(|s| s.with_edit(&path(&["subscriptions", "/zeta", "visible"]), &visible))
            .unwrap();
        assert_ne!(zeta_first, alpha_first);
        assert_eq!(zeta_first, zeta_first.clone());
    }

    #[test]
    fn persisted_value_keeps_topic_order() {
        let visible = json!(true);
        let state = PanelPreferenceState::default()
            .with_edit(&path(&["subscriptions", "/zeta", "visible"]), &visible)
            .and_then(|s| s.with_edit(&path(&["subscriptions", "/alpha", "preload"]), &visible))
            .unwrap();
        let persisted = state.to_persisted();
        let keys: Vec<&String> = persisted["subscriptions"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["/zeta", "/alpha"]);

        let restored = PanelPreferenceState::from_persisted(Some(&persisted));
        let restored_keys: Vec<&str> = restored.subscriptions.keys().map(String::as_str).collect();
        assert_eq!(restored_keys, ["/zeta", "/alpha"]);
    }
}
