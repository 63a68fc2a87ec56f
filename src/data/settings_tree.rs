//! Declarative settings tree and the reconciler that keeps it in step with
//! the stored preferences.
//!
//! The tree is rebuilt from scratch on every pass: one child per catalog
//! topic under a single `subscriptions` root. Edits coming back from the host
//! are folded into a new [`PanelPreferenceState`] by [`apply_settings_action`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::catalog::TopicCatalogEntry;
use crate::data::preferences::{PanelPreferenceState, PreferenceField, SUBSCRIPTIONS_KEY};

pub const SUBSCRIBE_ALL_ACTION: &str = "subscribe-all";
pub const UNSUBSCRIBE_ALL_ACTION: &str = "unsubscribe-all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionState {
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldInput {
    Boolean,
}

/// An editable field shown under a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsTreeField {
    pub input: FieldInput,
    pub label: String,
    /// `None` renders as unset (treated as false by the editor).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<bool>,
}

/// A button attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsTreeNodeAction {
    pub id: String,
    pub label: String,
}

impl SettingsTreeNodeAction {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsTreeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Visibility toggle; `None` means the node has no toggle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    pub default_expansion_state: ExpansionState,
    pub enable_visibility_filter: bool,
    pub fields: IndexMap<String, SettingsTreeField>,
    pub actions: Vec<SettingsTreeNodeAction>,
    pub children: IndexMap<String, SettingsTreeNode>,
}

impl SettingsTreeNode {
    fn topic(name: &str, visible: bool, preload: Option<bool>) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(
            PreferenceField::Preload.key().to_string(),
            SettingsTreeField {
                input: FieldInput::Boolean,
                label: "Preload".to_string(),
                value: preload,
            },
        );
        Self {
            label: Some(name.to_string()),
            visible: Some(visible),
            default_expansion_state: ExpansionState::Collapsed,
            enable_visibility_filter: false,
            fields,
            actions: Vec::new(),
            children: IndexMap::new(),
        }
    }
}

/// Full tree handed to the host's settings editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsTree {
    pub nodes: IndexMap<String, SettingsTreeNode>,
    pub enable_filter: bool,
}

impl SettingsTree {
    /// The `subscriptions` root, if present.
    pub fn subscriptions(&self) -> Option<&SettingsTreeNode> {
        self.nodes.get(SUBSCRIPTIONS_KEY)
    }
}

/// Edit events sent back by the settings editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SettingsAction {
    /// Write `value` at `path` (e.g. `["subscriptions", "/imu", "preload"]`).
    Update { path: Vec<String>, value: Value },
    /// A node action button was pressed.
    Action {
        #[serde(rename = "actionId")]
        id: String,
    },
}

impl SettingsAction {
    pub fn update(path: &[&str], value: impl Into<Value>) -> Self {
        SettingsAction::Update {
            path: path.iter().map(|s| s.to_string()).collect(),
            value: value.into(),
        }
    }

    /// Toggle of a topic field as emitted by the editor.
    pub fn topic_field(topic: &str, field: PreferenceField, value: bool) -> Self {
        Self::update(&[SUBSCRIPTIONS_KEY, topic, field.key()], value)
    }

    pub fn action(id: &str) -> Self {
        SettingsAction::Action { id: id.to_string() }
    }
}

/// Result of folding one [`SettingsAction`] into the preferences.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// New preferences; statistics are unaffected.
    Updated(PanelPreferenceState),
    /// Preferences emptied. Live statistics must be cleared alongside.
    UnsubscribedAll,
    /// Nothing changes (rejected edit or unknown action id).
    Ignored,
}

/// Derive the settings tree from the stored preferences and the catalog.
///
/// Pure: the same inputs always produce an equal tree.
pub fn build_settings_tree(
    prefs: &PanelPreferenceState,
    catalog: &[TopicCatalogEntry],
) -> SettingsTree {
    let children = catalog
        .iter()
        .map(|topic| {
            let pref = prefs.get(&topic.name);
            let visible = pref.map(|p| p.is_visible()).unwrap_or(false);
            let preload = pref.and_then(|p| p.preload);
            (topic.name.clone(), SettingsTreeNode::topic(&topic.name, visible, preload))
        })
        .collect();

    let root = SettingsTreeNode {
        label: Some("Subscriptions".to_string()),
        visible: None,
        default_expansion_state: ExpansionState::Expanded,
        enable_visibility_filter: true,
        fields: IndexMap::new(),
        actions: vec![
            SettingsTreeNodeAction::new(SUBSCRIBE_ALL_ACTION, "Subscribe all"),
            SettingsTreeNodeAction::new(UNSUBSCRIBE_ALL_ACTION, "Unsubscribe all"),
        ],
        children,
    };

    let mut nodes = IndexMap::new();
    nodes.insert(SUBSCRIPTIONS_KEY.to_string(), root);
    SettingsTree {
        nodes,
        enable_filter: true,
    }
}

/// Fold a settings edit into the preferences.
pub fn apply_settings_action(
    prefs: &PanelPreferenceState,
    catalog: &[TopicCatalogEntry],
    action: &SettingsAction,
) -> ActionOutcome {
    match action {
        SettingsAction::Update { path, value } => match prefs.with_edit(path, value) {
            Ok(next) => ActionOutcome::Updated(next),
            Err(err) => {
                log::warn!("rejected settings edit: {err}");
                ActionOutcome::Ignored
            }
        },
        SettingsAction::Action { id } => match id.as_str() {
            SUBSCRIBE_ALL_ACTION => {
                ActionOutcome::Updated(PanelPreferenceState::subscribe_all(catalog))
            }
            UNSUBSCRIBE_ALL_ACTION => ActionOutcome::UnsubscribedAll,
            other => {
                log::debug!("ignoring unknown settings action `{other}`");
                ActionOutcome::Ignored
            }
        },
    }
}
