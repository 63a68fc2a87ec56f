//! Configuration for running the panel in its native window.

use std::path::PathBuf;
use std::time::Duration;

use crate::color_scheme::ColorScheme;
use crate::panel::DEFAULT_STATS_INTERVAL;

/// Default number of messages kept for the preloaded snapshot.
pub const DEFAULT_PRELOAD_CAPACITY: usize = 10_000;

/// Settings for [`run_subscription_panel`](crate::run_subscription_panel).
pub struct PanelConfig {
    /// Window title.
    pub title: String,
    /// Refresh period of the total message count.
    pub stats_interval: Duration,
    /// JSON file the preferences are restored from and saved to.
    /// `None` keeps them in memory only.
    pub state_path: Option<PathBuf>,
    /// Maximum number of messages retained for preloading.
    pub preload_capacity: usize,
    /// Initial color scheme until a producer sets another one.
    pub color_scheme: ColorScheme,
    /// Optional eframe window options.
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "Subscription Test Panel".to_string(),
            stats_interval: DEFAULT_STATS_INTERVAL,
            state_path: None,
            preload_capacity: DEFAULT_PRELOAD_CAPACITY,
            color_scheme: ColorScheme::default(),
            native_options: None,
        }
    }
}

impl PanelConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_stats_interval(mut self, interval: Duration) -> Self {
        self.stats_interval = interval;
        self
    }

    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = Some(path.into());
        self
    }

    pub fn with_preload_capacity(mut self, capacity: usize) -> Self {
        self.preload_capacity = capacity;
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    pub fn with_native_options(mut self, opts: eframe::NativeOptions) -> Self {
        self.native_options = Some(opts);
        self
    }
}
