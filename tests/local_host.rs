use std::time::Duration;

use serde_json::json;
use subscription_panel::data::preferences::PreferenceField;
use subscription_panel::data::settings_tree::SUBSCRIBE_ALL_ACTION;
use subscription_panel::persistence::load_state_from_path;
use subscription_panel::{
    ColorScheme, HostCommand, LocalHost, PanelConfig, PanelHost, SettingsAction, SubscriptionPanel,
};

fn advertise(name: &str, schema: Option<&str>) -> HostCommand {
    HostCommand::AdvertiseTopic {
        name: name.into(),
        schema_name: schema.map(str::to_string),
    }
}

fn messages(topic: &str, count: usize) -> HostCommand {
    HostCommand::Messages {
        topic: topic.into(),
        count,
    }
}

/// Deliver whatever the host has pending.
fn pump(panel: &mut SubscriptionPanel<LocalHost>) {
    if let Some((state, done)) = panel.host_mut().next_render() {
        panel.on_render(state, done);
    }
}

fn panel_with(cfg: &PanelConfig) -> SubscriptionPanel<LocalHost> {
    let mut panel = SubscriptionPanel::mount(LocalHost::new(cfg), Duration::from_millis(500));
    panel.host_mut().ingest(advertise("/imu", Some("sensor_msgs/Imu")));
    panel.host_mut().ingest(advertise("/tf", None));
    pump(&mut panel);
    panel
}

#[test]
fn first_render_carries_catalog_and_scheme() {
    let cfg = PanelConfig::default().with_color_scheme(ColorScheme::Dark);
    let panel = panel_with(&cfg);
    assert_eq!(panel.topics().len(), 2);
    assert_eq!(panel.color_scheme(), Some(ColorScheme::Dark));
    let tree = panel.host().settings_tree().expect("tree declared");
    assert_eq!(tree.subscriptions().unwrap().children.len(), 2);
}

#[test]
fn only_subscribed_topics_are_delivered() {
    let mut panel = panel_with(&PanelConfig::default());
    panel.handle_settings_action(SettingsAction::topic_field("/imu", PreferenceField::Visible, true));

    panel.host_mut().ingest(messages("/imu", 4));
    panel.host_mut().ingest(messages("/tf", 7));
    pump(&mut panel);

    assert_eq!(panel.stats().live().message_count("/imu"), 4);
    assert_eq!(panel.stats().live().message_count("/tf"), 0);
    assert!(panel.stats().preloaded().is_empty());
}

#[test]
fn preload_history_is_bounded_and_follows_subscriptions() {
    let cfg = PanelConfig::default().with_preload_capacity(5);
    let mut panel = panel_with(&cfg);
    panel.handle_settings_action(SettingsAction::action(SUBSCRIBE_ALL_ACTION));
    panel.handle_settings_action(SettingsAction::topic_field("/tf", PreferenceField::Preload, true));

    panel.host_mut().ingest(messages("/tf", 3));
    pump(&mut panel);
    assert_eq!(panel.stats().preloaded().message_count("/tf"), 3);

    panel.host_mut().ingest(messages("/tf", 4));
    pump(&mut panel);
    assert_eq!(panel.stats().preloaded().message_count("/tf"), 5);
    assert_eq!(panel.stats().live().message_count("/tf"), 7);

    panel.handle_settings_action(SettingsAction::topic_field("/tf", PreferenceField::Preload, false));
    pump(&mut panel);
    assert!(panel.stats().preloaded().is_empty());
    assert_eq!(panel.stats().live().message_count("/tf"), 7);
}

#[test]
fn next_frame_waits_for_acknowledgment() {
    let mut panel = panel_with(&PanelConfig::default());
    panel.handle_settings_action(SettingsAction::action(SUBSCRIBE_ALL_ACTION));
    panel.host_mut().ingest(messages("/imu", 1));

    let (state, done) = panel.host_mut().next_render().expect("pending frame");
    panel.host_mut().ingest(messages("/imu", 1));
    assert!(panel.host_mut().next_render().is_none(), "unacknowledged frame blocks delivery");

    done.done();
    let (next, done) = panel.host_mut().next_render().expect("delivery resumes");
    assert_eq!(next.current_frame.map(|f| f.len()), Some(1));
    done.done();
    drop(state);
}

#[test]
fn removed_topic_keeps_preference_and_row() {
    let mut panel = panel_with(&PanelConfig::default());
    panel.handle_settings_action(SettingsAction::topic_field("/imu", PreferenceField::Visible, true));
    panel.host_mut().ingest(HostCommand::RemoveTopic { name: "/imu".into() });
    pump(&mut panel);

    assert!(panel.preferences().get("/imu").unwrap().is_visible());
    let rows = panel.table_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].schema_name, None);
    let tree = panel.host().settings_tree().unwrap();
    assert!(!tree.subscriptions().unwrap().children.contains_key("/imu"));
}

#[test]
fn preferences_persist_to_file_and_restore() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let cfg = PanelConfig::default().with_state_path(&path);

    {
        let mut panel = panel_with(&cfg);
        panel.handle_settings_action(SettingsAction::topic_field("/tf", PreferenceField::Visible, true));
    }
    assert_eq!(
        load_state_from_path(&path).unwrap(),
        Some(json!({"subscriptions": {"/tf": {"visible": true}}}))
    );

    let host = LocalHost::new(&cfg);
    assert!(host.initial_state().is_some());
    let panel = SubscriptionPanel::mount(host, Duration::from_millis(500));
    assert_eq!(panel.subscriptions().len(), 1);
    assert_eq!(panel.host().subscriptions()[0].topic, "/tf");
}

#[test]
fn unreadable_state_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    let panel = SubscriptionPanel::mount(
        LocalHost::new(&PanelConfig::default().with_state_path(&path)),
        Duration::from_millis(500),
    );
    assert!(panel.preferences().is_empty());
}

#[test]
fn restored_subscriptions_keep_edit_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let cfg = PanelConfig::default().with_state_path(&path);

    {
        let mut panel = panel_with(&cfg);
        panel.handle_settings_action(SettingsAction::topic_field("/tf", PreferenceField::Visible, true));
        panel.handle_settings_action(SettingsAction::topic_field("/imu", PreferenceField::Visible, true));
        let topics: Vec<_> = panel.host().subscriptions().iter().map(|s| s.topic.clone()).collect();
        assert_eq!(topics, ["/tf", "/imu"]);
    }

    let panel = SubscriptionPanel::mount(LocalHost::new(&cfg), Duration::from_millis(500));
    let topics: Vec<_> = panel.host().subscriptions().iter().map(|s| s.topic.clone()).collect();
    assert_eq!(topics, ["/tf", "/imu"]);
}

#[test]
fn oversized_batch_only_keeps_capacity_in_history() {
    let cfg = PanelConfig::default().with_preload_capacity(8);
    let mut panel = panel_with(&cfg);
    panel.handle_settings_action(SettingsAction::topic_field("/imu", PreferenceField::Visible, true));
    panel.handle_settings_action(SettingsAction::topic_field("/imu", PreferenceField::Preload, true));

    panel.host_mut().ingest(messages("/imu", 3));
    panel.host_mut().ingest(messages("/imu", 200_000));
    pump(&mut panel);

    assert_eq!(panel.stats().preloaded().message_count("/imu"), 8);
    assert_eq!(panel.stats().live().message_count("/imu"), 200_003);
}
