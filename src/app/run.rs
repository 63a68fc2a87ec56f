//! Top-level entry point for running the subscription panel as a native window.

use std::sync::mpsc::Receiver;

use eframe::egui;

use super::PanelApp;
use crate::config::PanelConfig;
use crate::sink::HostCommand;

/// Launch the panel in a native window fed by `rx`.
///
/// The panel is mounted on an in-process host before the window opens; its
/// preferences are restored from `cfg.state_path` when set. Blocks until the
/// window is closed.
pub fn run_subscription_panel(rx: Receiver<HostCommand>, mut cfg: PanelConfig) -> eframe::Result<()> {
    let app = PanelApp::new(rx, &cfg);

    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1000.0, 640.0));
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
