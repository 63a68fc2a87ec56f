//! Subscription panel crate root: re-exports and module wiring.
//!
//! The panel lets an operator pick which host topics to subscribe to (and
//! which to preload), and counts the messages that arrive on each of them.
//!
//! - `data`: preferences, catalog, settings tree reconciler, subscription
//!   projection and message statistics (pure state, no UI)
//! - `host`: the [`PanelHost`] trait a host implements, and what it delivers
//! - `panel`: [`SubscriptionPanel`], wiring the pieces together
//! - `timer`: cooperative repeating timer for the periodic total
//! - `panels`: egui renderers for the settings editor and statistics table
//! - `app`: native eframe host and [`run_subscription_panel`]
//! - `sink`: channel API for feeding topics and messages into the native host
//! - `config`, `persistence`, `color_scheme`: supporting types

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod host;
pub mod panel;
pub mod panels;
pub mod persistence;
pub mod sink;
pub mod timer;

// Public re-exports for a compact external API
pub use app::{run_subscription_panel, LocalHost, PanelApp};
pub use color_scheme::ColorScheme;
pub use config::PanelConfig;
pub use data::catalog::TopicCatalogEntry;
pub use data::preferences::{EditError, PanelPreferenceState, TopicPreference};
pub use data::projection::{project_subscriptions, SubscriptionRequest};
pub use data::settings_tree::{
    apply_settings_action, build_settings_tree, ActionOutcome, SettingsAction, SettingsTree,
};
pub use data::stats::{StatisticsAggregator, TopicStats, TotalStats};
pub use host::{MessageEvent, PanelHost, RenderDone, RenderState};
pub use panel::{SubscriptionPanel, TopicRow};
pub use sink::{channel_topics, HostCommand, Topic, TopicSink};
