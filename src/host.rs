//! The surface a panel host exposes to the subscription panel.
//!
//! The host owns the data source. It restores and persists the panel's opaque
//! state, shows the settings tree, applies subscription requests, and drives
//! the panel with [`RenderState`]s. Every render must be acknowledged through
//! its [`RenderDone`] token before the host delivers the next one.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color_scheme::ColorScheme;
use crate::data::catalog::TopicCatalogEntry;
use crate::data::preferences::PanelPreferenceState;
use crate::data::projection::SubscriptionRequest;
use crate::data::settings_tree::SettingsTree;

/// Calls the panel makes into its host.
pub trait PanelHost {
    /// State saved by a previous session, if any. Read once at mount.
    fn initial_state(&self) -> Option<Value>;

    /// Persist the current preferences. Called after every reconciliation.
    fn save_state(&mut self, state: &PanelPreferenceState);

    /// Replace the settings tree shown by the host's editor.
    fn update_settings_tree(&mut self, tree: &SettingsTree);

    /// Replace the full set of subscriptions.
    fn subscribe(&mut self, subscriptions: &[SubscriptionRequest]);
}

/// A message delivered by the host. The panel only looks at its topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub topic: String,
}

impl MessageEvent {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }
}

/// Fields the host delivers with a render. `None` means "unchanged since the
/// last render".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    /// Full topic catalog (replaces the previous one wholesale).
    pub topics: Option<Vec<TopicCatalogEntry>>,
    /// Messages that arrived since the last render.
    pub current_frame: Option<Vec<MessageEvent>>,
    /// Current preloaded snapshot (replaces the previous one wholesale).
    pub all_frames: Option<Vec<MessageEvent>>,
    pub color_scheme: Option<ColorScheme>,
}

/// Acknowledgment for one render. Consumed by [`RenderDone::done`].
#[must_use = "the host delivers no further frames until the render is acknowledged"]
pub struct RenderDone(Box<dyn FnOnce()>);

impl RenderDone {
    pub fn new(on_done: impl FnOnce() + 'static) -> Self {
        Self(Box::new(on_done))
    }

    /// Token whose acknowledgment does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn done(self) {
        (self.0)()
    }
}

impl fmt::Debug for RenderDone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderDone")
    }
}
