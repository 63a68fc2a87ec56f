//! In-process [`PanelHost`] backing the native window.
//!
//! Keeps the topic catalog fed by a [`TopicSink`](crate::sink::TopicSink),
//! filters incoming messages down to the active subscriptions, and keeps a
//! bounded history of messages on preloading topics to serve as the
//! preloaded snapshot.

use std::cell::Cell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

use serde_json::Value;

use crate::color_scheme::ColorScheme;
use crate::config::PanelConfig;
use crate::data::catalog::TopicCatalogEntry;
use crate::data::preferences::PanelPreferenceState;
use crate::data::projection::SubscriptionRequest;
use crate::data::settings_tree::SettingsTree;
use crate::host::{MessageEvent, PanelHost, RenderDone, RenderState};
use crate::persistence::{load_state_from_path, save_state_to_path};
use crate::sink::HostCommand;

pub struct LocalHost {
    catalog: Vec<TopicCatalogEntry>,
    catalog_dirty: bool,
    subscriptions: Vec<SubscriptionRequest>,
    settings_tree: Option<SettingsTree>,
    state_path: Option<PathBuf>,
    initial_state: Option<Value>,
    last_saved: Option<PanelPreferenceState>,
    pending_frame: Vec<MessageEvent>,
    preload_history: VecDeque<MessageEvent>,
    preload_capacity: usize,
    preload_dirty: bool,
    color_scheme: ColorScheme,
    color_scheme_dirty: bool,
    awaiting_ack: Rc<Cell<bool>>,
}

impl LocalHost {
    pub fn new(cfg: &PanelConfig) -> Self {
        let initial_state = cfg.state_path.as_deref().and_then(|path| {
            match load_state_from_path(path) {
                Ok(state) => state,
                Err(err) => {
                    log::warn!("ignoring stored panel state: {err}");
                    None
                }
            }
        });
        Self {
            catalog: Vec::new(),
            catalog_dirty: true,
            subscriptions: Vec::new(),
            settings_tree: None,
            state_path: cfg.state_path.clone(),
            initial_state,
            last_saved: None,
            pending_frame: Vec::new(),
            preload_history: VecDeque::new(),
            preload_capacity: cfg.preload_capacity,
            preload_dirty: false,
            color_scheme: cfg.color_scheme,
            color_scheme_dirty: true,
            awaiting_ack: Rc::new(Cell::new(false)),
        }
    }

    /// Apply one producer command.
    pub fn ingest(&mut self, cmd: HostCommand) {
        match cmd {
            HostCommand::AdvertiseTopic { name, schema_name } => {
                match self.catalog.iter_mut().find(|t| t.name == name) {
                    Some(existing) if existing.schema_name == schema_name => return,
                    Some(existing) => existing.schema_name = schema_name,
                    None => {
                        log::debug!("topic advertised: {name}");
                        self.catalog.push(TopicCatalogEntry { name, schema_name });
                    }
                }
                self.catalog_dirty = true;
            }
            HostCommand::RemoveTopic { name } => {
                let before = self.catalog.len();
                self.catalog.retain(|t| t.name != name);
                if self.catalog.len() != before {
                    log::debug!("topic removed: {name}");
                    self.catalog_dirty = true;
                }
            }
            HostCommand::Messages { topic, count } => self.receive(&topic, count),
            HostCommand::SetColorScheme(scheme) => self.set_color_scheme(scheme),
        }
    }

    fn receive(&mut self, topic: &str, count: usize) {
        let Some(sub) = self.subscriptions.iter().find(|s| s.topic == topic) else {
            return;
        };
        let preload = sub.preload;
        self.pending_frame
            .extend(std::iter::repeat_with(|| MessageEvent::new(topic)).take(count));
        if preload && self.preload_capacity > 0 {
            // Anything beyond capacity would be evicted by this same batch.
            let kept = count.min(self.preload_capacity);
            let overflow = (self.preload_history.len() + kept).saturating_sub(self.preload_capacity);
            self.preload_history.drain(..overflow);
            self.preload_history
                .extend(std::iter::repeat_with(|| MessageEvent::new(topic)).take(kept));
            self.preload_dirty = true;
        }
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        if scheme != self.color_scheme {
            self.color_scheme = scheme;
            self.color_scheme_dirty = true;
        }
    }

    /// Next render to deliver, or `None` when nothing changed or the
    /// previous render has not been acknowledged yet.
    pub fn next_render(&mut self) -> Option<(RenderState, RenderDone)> {
        if self.awaiting_ack.get() {
            return None;
        }
        let mut state = RenderState::default();
        if std::mem::take(&mut self.catalog_dirty) {
            state.topics = Some(self.catalog.clone());
        }
        if !self.pending_frame.is_empty() {
            state.current_frame = Some(std::mem::take(&mut self.pending_frame));
        }
        if std::mem::take(&mut self.preload_dirty) {
            state.all_frames = Some(self.preload_history.iter().cloned().collect());
        }
        if std::mem::take(&mut self.color_scheme_dirty) {
            state.color_scheme = Some(self.color_scheme);
        }
        if state == RenderState::default() {
            return None;
        }

        self.awaiting_ack.set(true);
        let ack = Rc::clone(&self.awaiting_ack);
        Some((state, RenderDone::new(move || ack.set(false))))
    }

    pub fn catalog(&self) -> &[TopicCatalogEntry] {
        &self.catalog
    }

    /// Tree last declared by the panel.
    pub fn settings_tree(&self) -> Option<&SettingsTree> {
        self.settings_tree.as_ref()
    }

    pub fn subscriptions(&self) -> &[SubscriptionRequest] {
        &self.subscriptions
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }
}

impl PanelHost for LocalHost {
    fn initial_state(&self) -> Option<Value> {
        self.initial_state.clone()
    }

    fn save_state(&mut self, state: &PanelPreferenceState) {
        if self.last_saved.as_ref() == Some(state) {
            return;
        }
        if let Some(path) = &self.state_path {
            if let Err(err) = save_state_to_path(state, path) {
                log::warn!("failed to save panel state: {err}");
            }
        }
        self.last_saved = Some(state.clone());
    }

    fn update_settings_tree(&mut self, tree: &SettingsTree) {
        self.settings_tree = Some(tree.clone());
    }

    fn subscribe(&mut self, subscriptions: &[SubscriptionRequest]) {
        self.subscriptions = subscriptions.to_vec();
        let subs = &self.subscriptions;
        self.pending_frame
            .retain(|m| subs.iter().any(|s| s.topic == m.topic));
        let before = self.preload_history.len();
        self.preload_history
            .retain(|m| subs.iter().any(|s| s.topic == m.topic && s.preload));
        if self.preload_history.len() != before {
            self.preload_dirty = true;
        }
    }
}
