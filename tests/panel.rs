use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use subscription_panel::data::preferences::PreferenceField;
use subscription_panel::data::settings_tree::{SUBSCRIBE_ALL_ACTION, UNSUBSCRIBE_ALL_ACTION};
use subscription_panel::{
    ColorScheme, MessageEvent, PanelHost, PanelPreferenceState, RenderDone, RenderState,
    SettingsAction, SettingsTree, SubscriptionPanel, SubscriptionRequest, TopicCatalogEntry,
};

const INTERVAL: Duration = Duration::from_millis(500);

#[derive(Default)]
struct RecordingHost {
    initial: Option<Value>,
    saved: Vec<PanelPreferenceState>,
    trees: Vec<SettingsTree>,
    subscribe_calls: Vec<Vec<SubscriptionRequest>>,
}

impl PanelHost for RecordingHost {
    fn initial_state(&self) -> Option<Value> {
        self.initial.clone()
    }
    fn save_state(&mut self, state: &PanelPreferenceState) {
        self.saved.push(state.clone());
    }
    fn update_settings_tree(&mut self, tree: &SettingsTree) {
        self.trees.push(tree.clone());
    }
    fn subscribe(&mut self, subscriptions: &[SubscriptionRequest]) {
        self.subscribe_calls.push(subscriptions.to_vec());
    }
}

fn catalog() -> Vec<TopicCatalogEntry> {
    vec![
        TopicCatalogEntry::new("/imu", Some("sensor_msgs/Imu")),
        TopicCatalogEntry::new("/tf", Some("tf2_msgs/TFMessage")),
    ]
}

fn frame(topics: &[&str]) -> Vec<MessageEvent> {
    topics.iter().map(|t| MessageEvent::new(*t)).collect()
}

fn acked() -> (RenderDone, Rc<Cell<bool>>) {
    let flag = Rc::new(Cell::new(false));
    let f = Rc::clone(&flag);
    (RenderDone::new(move || f.set(true)), flag)
}

fn mounted(initial: Option<Value>, t0: Instant) -> SubscriptionPanel<RecordingHost> {
    let host = RecordingHost {
        initial,
        ..Default::default()
    };
    let mut panel = SubscriptionPanel::mount_at(host, INTERVAL, t0);
    let (done, _) = acked();
    panel.on_render(
        RenderState {
            topics: Some(catalog()),
            ..Default::default()
        },
        done,
    );
    panel
}

#[test]
fn mount_restores_state_and_declares_settings() {
    let initial = json!({"subscriptions": {"/imu": {"visible": true, "preload": true}}});
    let host = RecordingHost {
        initial: Some(initial),
        ..Default::default()
    };
    let panel = SubscriptionPanel::mount_at(host, INTERVAL, Instant::now());

    assert!(panel.preferences().get("/imu").unwrap().preloads());
    let host = panel.host();
    assert_eq!(host.saved.len(), 1);
    assert_eq!(host.trees.len(), 1);
    assert_eq!(
        host.subscribe_calls,
        vec![vec![SubscriptionRequest {
            topic: "/imu".into(),
            preload: true,
            schema_name: None,
        }]]
    );
}

#[test]
fn malformed_initial_state_mounts_empty() {
    let panel = mounted(Some(json!("garbage")), Instant::now());
    assert!(panel.preferences().is_empty());
    assert!(panel.subscriptions().is_empty());
}

#[test]
fn catalog_update_reconciles_and_resolves_schema() {
    let initial = json!({"subscriptions": {"/imu": {"visible": true}}});
    let panel = mounted(Some(initial), Instant::now());

    let host = panel.host();
    let root = host.trees.last().unwrap().subscriptions().unwrap();
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children["/imu"].visible, Some(true));
    assert_eq!(
        host.subscribe_calls.last().unwrap()[0].schema_name.as_deref(),
        Some("sensor_msgs/Imu")
    );
}

#[test]
fn unchanged_inputs_do_not_resubscribe() {
    let mut panel = mounted(None, Instant::now());
    panel.handle_settings_action(SettingsAction::topic_field("/tf", PreferenceField::Visible, true));
    let calls = panel.host().subscribe_calls.len();
    let trees = panel.host().trees.len();

    panel.reconcile();
    panel.reconcile();
    assert_eq!(panel.host().subscribe_calls.len(), calls);
    let host = panel.host();
    assert_eq!(host.trees.len(), trees + 2);
    assert_eq!(host.trees[trees], host.trees[trees + 1]);

    // Same catalog delivered again is not a change.
    let (done, _) = acked();
    panel.on_render(
        RenderState {
            topics: Some(catalog()),
            ..Default::default()
        },
        done,
    );
    assert_eq!(panel.host().trees.len(), trees + 2);
}

#[test]
fn preload_toggle_resubscribes_with_flag() {
    let mut panel = mounted(None, Instant::now());
    panel.handle_settings_action(SettingsAction::topic_field("/imu", PreferenceField::Visible, true));
    panel.handle_settings_action(SettingsAction::topic_field("/imu", PreferenceField::Preload, true));

    let last = panel.host().subscribe_calls.last().unwrap();
    assert_eq!(last.len(), 1);
    assert!(last[0].preload);
    assert_eq!(panel.host().saved.last().unwrap(), panel.preferences());
}

#[test]
fn rejected_edit_changes_nothing() {
    let mut panel = mounted(None, Instant::now());
    let saved = panel.host().saved.len();
    panel.handle_settings_action(SettingsAction::update(&["bogus"], true));
    assert_eq!(panel.host().saved.len(), saved);
    assert!(panel.preferences().is_empty());
}

#[test]
fn frames_are_counted_and_acknowledged() {
    let mut panel = mounted(None, Instant::now());
    panel.handle_settings_action(SettingsAction::action(SUBSCRIBE_ALL_ACTION));

    let (done, flag) = acked();
    panel.on_render(
        RenderState {
            current_frame: Some(frame(&["/imu", "/imu", "/tf"])),
            all_frames: Some(frame(&["/tf", "/tf"])),
            color_scheme: Some(ColorScheme::Dark),
            ..Default::default()
        },
        done,
    );
    assert!(flag.get());
    assert_eq!(panel.color_scheme(), Some(ColorScheme::Dark));

    let rows = panel.table_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].topic.as_str(), rows[0].received, rows[0].preloaded), ("/imu", 2, 0));
    assert_eq!((rows[1].topic.as_str(), rows[1].received, rows[1].preloaded), ("/tf", 1, 2));
    assert_eq!(rows[0].schema_label(), "sensor_msgs/Imu");
}

#[test]
fn unsubscribe_all_clears_preferences_and_live_stats() {
    let mut panel = mounted(None, Instant::now());
    panel.handle_settings_action(SettingsAction::action(SUBSCRIBE_ALL_ACTION));
    let (done, _) = acked();
    panel.on_render(
        RenderState {
            current_frame: Some(frame(&["/imu"])),
            all_frames: Some(frame(&["/imu"])),
            ..Default::default()
        },
        done,
    );

    panel.handle_settings_action(SettingsAction::action(UNSUBSCRIBE_ALL_ACTION));
    assert!(panel.preferences().is_empty());
    assert!(panel.stats().live().is_empty());
    assert_eq!(panel.stats().preloaded().message_count("/imu"), 1);
    assert!(panel.host().subscribe_calls.last().unwrap().is_empty());
    assert!(panel.table_rows().is_empty());
}

#[test]
fn reset_keeps_preloaded_counts() {
    let mut panel = mounted(None, Instant::now());
    let (done, _) = acked();
    panel.on_render(
        RenderState {
            current_frame: Some(frame(&["/imu", "/imu"])),
            all_frames: Some(frame(&["/imu"])),
            ..Default::default()
        },
        done,
    );
    panel.reset_stats();
    assert_eq!(panel.stats().live().message_count("/imu"), 0);
    assert_eq!(panel.stats().preloaded().message_count("/imu"), 1);
}

#[test]
fn subscribed_topic_missing_from_catalog_shows_placeholder() {
    let initial = json!({"subscriptions": {"/gone": {"visible": true}}});
    let panel = mounted(Some(initial), Instant::now());
    let rows = panel.table_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].schema_label(), "<topic not available>");
    assert_eq!(rows[0].received, 0);
}

#[test]
fn total_refreshes_on_timer_only() {
    let t0 = Instant::now();
    let mut panel = mounted(None, t0);
    let (done, _) = acked();
    panel.on_render(
        RenderState {
            current_frame: Some(frame(&["/imu", "/tf", "/tf"])),
            ..Default::default()
        },
        done,
    );
    assert_eq!(panel.total().message_count, 0);
    assert!(!panel.tick(t0 + INTERVAL / 2));
    assert_eq!(panel.total().message_count, 0);
    assert!(panel.tick(t0 + INTERVAL));
    assert_eq!(panel.total().message_count, 3);
}

#[test]
fn teardown_cancels_timer() {
    let t0 = Instant::now();
    let mut panel = mounted(None, t0);
    assert_eq!(panel.next_tick_in(t0), Some(INTERVAL));
    panel.teardown();
    assert!(panel.is_torn_down());
    assert!(!panel.tick(t0 + INTERVAL * 3));
    assert_eq!(panel.next_tick_in(t0), None);
    panel.teardown();
}
