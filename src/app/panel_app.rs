//! Standalone application wrapper for the subscription panel.
//!
//! [`PanelApp`] owns a [`SubscriptionPanel`] mounted on a [`LocalHost`] and
//! implements [`eframe::App`]. Each frame it drains producer commands,
//! delivers a render to the panel, ticks the stats timer, draws the settings
//! editor and the statistics table, and finally applies whatever the user
//! clicked.

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use eframe::egui;
use egui_phosphor::regular as icons;

use super::local_host::LocalHost;
use crate::color_scheme::ColorScheme;
use crate::config::PanelConfig;
use crate::panel::SubscriptionPanel;
use crate::panels::{Panel, PanelData, SettingsPanel, StatsTablePanel};
use crate::sink::HostCommand;

pub struct PanelApp {
    panel: SubscriptionPanel<LocalHost>,
    rx: Receiver<HostCommand>,
    settings_panel: SettingsPanel,
    table_panel: StatsTablePanel,
    applied_scheme: Option<ColorScheme>,
}

impl PanelApp {
    pub fn new(rx: Receiver<HostCommand>, cfg: &PanelConfig) -> Self {
        let host = LocalHost::new(cfg);
        Self {
            panel: SubscriptionPanel::mount(host, cfg.stats_interval),
            rx,
            settings_panel: SettingsPanel::default(),
            table_panel: StatsTablePanel::default(),
            applied_scheme: None,
        }
    }

    pub fn panel(&self) -> &SubscriptionPanel<LocalHost> {
        &self.panel
    }

    /// Ingest pending producer commands and let the panel see them.
    pub fn update_data(&mut self, now: Instant) {
        while let Ok(cmd) = self.rx.try_recv() {
            self.panel.host_mut().ingest(cmd);
        }
        if let Some((state, done)) = self.panel.host_mut().next_render() {
            self.panel.on_render(state, done);
        }
        self.panel.tick(now);
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = self.settings_panel.title_and_icon();
            ui.toggle_value(&mut self.settings_panel.state_mut().visible, label);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let current = self.panel.host().color_scheme();
                let mut selected = current;
                egui::ComboBox::from_id_salt("color_scheme")
                    .selected_text(format!("{} {}", icons::PALETTE, selected.label()))
                    .show_ui(ui, |ui| {
                        for scheme in ColorScheme::all() {
                            ui.selectable_value(&mut selected, *scheme, scheme.label());
                        }
                    });
                if selected != current {
                    self.panel.host_mut().set_color_scheme(selected);
                }
            });
        });
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_data(Instant::now());

        let scheme = self.panel.color_scheme().unwrap_or_default();
        if self.applied_scheme != Some(scheme) {
            scheme.apply(ctx);
            self.applied_scheme = Some(scheme);
        }

        egui::TopBottomPanel::top("subscription_panel_top_bar").show(ctx, |ui| {
            self.top_bar(ui);
        });

        let rows = self.panel.table_rows();
        let mut data = PanelData {
            settings_tree: self.panel.host().settings_tree(),
            rows: &rows,
            total: self.panel.total(),
            live_since: self.panel.stats().live_since(),
            color_scheme: scheme,
            actions: Vec::new(),
            request_reset_stats: false,
        };

        if self.settings_panel.state().visible {
            egui::SidePanel::left("subscription_settings")
                .resizable(true)
                .default_width(300.0)
                .show(ctx, |ui| {
                    ui.heading(self.settings_panel.title_and_icon());
                    self.settings_panel.render_panel(ui, &mut data);
                });
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            self.table_panel.render_panel(ui, &mut data);
        });

        let PanelData {
            actions,
            request_reset_stats,
            ..
        } = data;
        for action in actions {
            self.panel.handle_settings_action(action);
        }
        if request_reset_stats {
            self.panel.reset_stats();
        }

        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
