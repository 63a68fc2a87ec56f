use chrono::{DateTime, Local};
use egui::Ui;

use crate::color_scheme::ColorScheme;
use crate::data::settings_tree::{SettingsAction, SettingsTree};
use crate::data::stats::TotalStats;
use crate::panel::TopicRow;

#[derive(Debug, Clone, Copy)]
pub struct PanelState {
    pub title: &'static str,
    pub icon: Option<&'static str>,
    pub visible: bool,
}

impl PanelState {
    pub fn new(title: &'static str, icon: &'static str) -> Self {
        Self {
            title,
            icon: Some(icon),
            visible: true,
        }
    }
}

/// View of the panel state handed to each renderer for one frame.
///
/// Renderers never mutate the panel directly; they queue settings actions and
/// requests which the app applies once drawing is done.
pub struct PanelData<'a> {
    pub settings_tree: Option<&'a SettingsTree>,
    pub rows: &'a [TopicRow],
    pub total: TotalStats,
    pub live_since: DateTime<Local>,
    pub color_scheme: ColorScheme,
    pub actions: Vec<SettingsAction>,
    pub request_reset_stats: bool,
}

pub trait Panel {
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    fn title(&self) -> &'static str {
        self.state().title
    }

    fn icon_only(&self) -> Option<&'static str> {
        self.state().icon
    }

    fn title_and_icon(&self) -> String {
        match self.icon_only() {
            Some(icon) => format!("{icon} {}", self.title()),
            None => self.title().to_string(),
        }
    }

    fn render_panel(&mut self, ui: &mut Ui, data: &mut PanelData<'_>);
}
