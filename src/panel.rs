//! The subscription panel: one state object tying preferences, subscriptions
//! and statistics together.
//!
//! All entry points are driven by the host on a single logical thread:
//! [`on_render`](SubscriptionPanel::on_render) for catalog and frame delivery,
//! [`handle_settings_action`](SubscriptionPanel::handle_settings_action) for
//! editor events, and [`tick`](SubscriptionPanel::tick) for the periodic
//! total refresh.
//!
//! ```text
//! catalog + edits ──► reconcile ──► save_state / update_settings_tree
//!                          │
//!                          └──► project ──► subscribe (only when changed)
//! frames ──► StatisticsAggregator ──► tick ──► total
//! ```

use std::time::{Duration, Instant};

use crate::color_scheme::ColorScheme;
use crate::data::catalog::{schema_name_of, TopicCatalogEntry};
use crate::data::preferences::PanelPreferenceState;
use crate::data::projection::{project_subscriptions, SubscriptionRequest};
use crate::data::settings_tree::{
    apply_settings_action, build_settings_tree, ActionOutcome, SettingsAction, SettingsTree,
};
use crate::data::stats::{StatisticsAggregator, TotalStats};
use crate::host::{PanelHost, RenderDone, RenderState};
use crate::timer::RepeatingTimer;

/// Placeholder shown for subscribed topics missing from the catalog.
pub const TOPIC_NOT_AVAILABLE: &str = "<topic not available>";

/// Default refresh period of the total message count.
pub const DEFAULT_STATS_INTERVAL: Duration = Duration::from_millis(500);

/// One line of the statistics table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRow {
    pub topic: String,
    pub schema_name: Option<String>,
    pub received: u64,
    pub preloaded: u64,
}

impl TopicRow {
    pub fn schema_label(&self) -> &str {
        self.schema_name.as_deref().unwrap_or(TOPIC_NOT_AVAILABLE)
    }
}

pub struct SubscriptionPanel<H: PanelHost> {
    host: H,
    preferences: PanelPreferenceState,
    topics: Vec<TopicCatalogEntry>,
    stats: StatisticsAggregator,
    color_scheme: Option<ColorScheme>,
    settings_tree: SettingsTree,
    subscriptions: Option<Vec<SubscriptionRequest>>,
    stats_timer: RepeatingTimer,
}

impl<H: PanelHost> SubscriptionPanel<H> {
    /// Mount the panel: restore preferences, start the stats timer and run
    /// the first reconciliation.
    pub fn mount(host: H, stats_interval: Duration) -> Self {
        Self::mount_at(host, stats_interval, Instant::now())
    }

    /// Like [`mount`](Self::mount) with an explicit start time for the timer.
    pub fn mount_at(host: H, stats_interval: Duration, now: Instant) -> Self {
        let preferences = PanelPreferenceState::from_persisted(host.initial_state().as_ref());
        log::info!(
            "mounting subscription panel with {} stored topic preferences",
            preferences.subscriptions.len()
        );
        let mut panel = Self {
            host,
            preferences,
            topics: Vec::new(),
            stats: StatisticsAggregator::new(),
            color_scheme: None,
            settings_tree: SettingsTree::default(),
            subscriptions: None,
            stats_timer: RepeatingTimer::start(stats_interval, now),
        };
        panel.reconcile();
        panel
    }

    /// Handle one render from the host. The frame is acknowledged before
    /// any catalog-driven reconciliation runs.
    pub fn on_render(&mut self, state: RenderState, done: RenderDone) {
        let RenderState {
            topics,
            current_frame,
            all_frames,
            color_scheme,
        } = state;

        let mut catalog_changed = false;
        if let Some(topics) = topics {
            if topics != self.topics {
                log::debug!("topic catalog changed: {} topics", topics.len());
                self.topics = topics;
                catalog_changed = true;
            }
        }
        if let Some(scheme) = color_scheme {
            self.color_scheme = Some(scheme);
        }
        if let Some(frame) = current_frame {
            self.stats.record_live(frame.iter().map(|m| m.topic.as_str()));
        }
        if let Some(snapshot) = all_frames {
            self.stats
                .replace_preloaded(snapshot.iter().map(|m| m.topic.as_str()));
        }
        done.done();

        if catalog_changed {
            self.reconcile();
        }
    }

    /// Apply an edit or bulk action from the settings editor.
    pub fn handle_settings_action(&mut self, action: SettingsAction) {
        match apply_settings_action(&self.preferences, &self.topics, &action) {
            ActionOutcome::Updated(next) => {
                self.preferences = next;
                self.reconcile();
            }
            ActionOutcome::UnsubscribedAll => {
                log::info!("unsubscribing from all topics");
                self.preferences = PanelPreferenceState::default();
                self.stats.reset_live();
                self.reconcile();
            }
            ActionOutcome::Ignored => {}
        }
    }

    /// Clear live counts. Preloaded counts are untouched.
    pub fn reset_stats(&mut self) {
        log::info!("resetting live message statistics");
        self.stats.reset_live();
    }

    /// Refresh the total if the stats interval elapsed. Returns `true` when it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.stats_timer.poll(now) {
            return false;
        }
        self.stats.refresh_total();
        true
    }

    /// Time until the next [`tick`](Self::tick) does work.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.stats_timer.time_until_due(now)
    }

    /// Cancel the stats timer. Idempotent; also runs on drop.
    pub fn teardown(&mut self) {
        if !self.stats_timer.is_cancelled() {
            log::debug!("cancelling stats timer");
            self.stats_timer.cancel();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.stats_timer.is_cancelled()
    }

    /// Push state and settings tree to the host, and resubscribe if the
    /// projected subscription list moved.
    pub fn reconcile(&mut self) {
        let tree = build_settings_tree(&self.preferences, &self.topics);
        self.host.save_state(&self.preferences);
        self.host.update_settings_tree(&tree);
        self.settings_tree = tree;

        let projected = project_subscriptions(&self.preferences, &self.topics);
        if self.subscriptions.as_ref() != Some(&projected) {
            log::info!(
                "subscribing to {} topics: [{}]",
                projected.len(),
                projected
                    .iter()
                    .map(|s| s.topic.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            self.host.subscribe(&projected);
            self.subscriptions = Some(projected);
        }
    }

    /// Rows for the statistics table, one per active subscription.
    pub fn table_rows(&self) -> Vec<TopicRow> {
        self.subscriptions()
            .iter()
            .map(|sub| TopicRow {
                topic: sub.topic.clone(),
                schema_name: schema_name_of(&self.topics, &sub.topic).map(str::to_string),
                received: self.stats.live().message_count(&sub.topic),
                preloaded: self.stats.preloaded().message_count(&sub.topic),
            })
            .collect()
    }

    pub fn preferences(&self) -> &PanelPreferenceState {
        &self.preferences
    }

    pub fn topics(&self) -> &[TopicCatalogEntry] {
        &self.topics
    }

    /// Last tree handed to the host.
    pub fn settings_tree(&self) -> &SettingsTree {
        &self.settings_tree
    }

    /// Last subscription list handed to the host.
    pub fn subscriptions(&self) -> &[SubscriptionRequest] {
        self.subscriptions.as_deref().unwrap_or(&[])
    }

    pub fn stats(&self) -> &StatisticsAggregator {
        &self.stats
    }

    /// Total as of the last timer tick.
    pub fn total(&self) -> TotalStats {
        self.stats.total()
    }

    pub fn color_scheme(&self) -> Option<ColorScheme> {
        self.color_scheme
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: PanelHost> Drop for SubscriptionPanel<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
