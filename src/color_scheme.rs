//! Color scheme reported by the host.
//!
//! Purely cosmetic: it selects the egui visuals the panel is drawn with and
//! has no effect on subscriptions or statistics.

use eframe::egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

/// Visual theme requested by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// All schemes (useful for combo-box UIs).
    pub fn all() -> &'static [ColorScheme] {
        &[ColorScheme::Light, ColorScheme::Dark]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
        }
    }

    /// egui visuals for this scheme.
    pub fn visuals(&self) -> Visuals {
        match self {
            ColorScheme::Light => Visuals::light(),
            ColorScheme::Dark => Visuals::dark(),
        }
    }

    /// Color used for the "<topic not available>" placeholder.
    pub fn muted_text(&self) -> Color32 {
        match self {
            ColorScheme::Light => Color32::from_gray(120),
            ColorScheme::Dark => Color32::from_gray(150),
        }
    }

    /// Apply this scheme's visuals to an egui context.
    pub fn apply(&self, ctx: &Context) {
        ctx.set_visuals(self.visuals());
    }
}
