//! Demo: a handful of synthetic topics publishing at different rates.
//!
//! Run with `RUST_LOG=debug` to watch subscription changes. Preferences are
//! kept in `subscription_panel_state.json` in the working directory.

use std::sync::mpsc::SendError;
use std::thread;
use std::time::{Duration, Instant};

use subscription_panel::{channel_topics, run_subscription_panel, HostCommand, PanelConfig, TopicSink};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (sink, rx) = channel_topics();
    thread::spawn(move || {
        if produce(sink).is_err() {
            log::info!("panel closed, stopping producer");
        }
    });

    let cfg = PanelConfig::default().with_state_path("subscription_panel_state.json");
    run_subscription_panel(rx, cfg)
}

/// Publish on a 100 Hz loop until the host goes away.
fn produce(sink: TopicSink) -> Result<(), SendError<HostCommand>> {
    let camera = sink.advertise("/camera/front", Some("sensor_msgs/Image"))?;
    let imu = sink.advertise("/imu", Some("sensor_msgs/Imu"))?;
    let tf = sink.advertise("/tf", Some("tf2_msgs/TFMessage"))?;
    let diagnostics = sink.advertise("/diagnostics", None)?;

    let start = Instant::now();
    let mut odom = None;
    let mut tick: u64 = 0;
    loop {
        sink.publish(&imu)?;
        if tick % 2 == 0 {
            sink.publish_many(&tf, 3)?;
        }
        if tick % 10 == 0 {
            sink.publish(&camera)?;
        }
        if tick % 100 == 0 {
            sink.publish(&diagnostics)?;
        }

        // Odometry comes and goes every 20 s.
        let odom_online = (start.elapsed().as_secs() / 20) % 2 == 1;
        if !odom_online {
            if let Some(topic) = odom.take() {
                sink.remove(&topic)?;
            }
        } else if odom.is_none() {
            odom = Some(sink.advertise("/odom", Some("nav_msgs/Odometry"))?);
        } else if let Some(topic) = odom.as_ref().filter(|_| tick % 5 == 0) {
            sink.publish(topic)?;
        }

        tick += 1;
        thread::sleep(Duration::from_millis(10));
    }
}
