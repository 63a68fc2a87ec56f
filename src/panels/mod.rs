pub mod panel_trait;
pub mod settings_ui;
pub mod stats_table_ui;

pub use panel_trait::{Panel, PanelData, PanelState};
pub use settings_ui::SettingsPanel;
pub use stats_table_ui::StatsTablePanel;
