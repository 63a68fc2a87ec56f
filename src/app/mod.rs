//! Native window host for the subscription panel.
//!
//! | Sub-module      | Responsibility |
//! | --------------- | -------------- |
//! | [`local_host`]  | In-process [`PanelHost`](crate::host::PanelHost): catalog, message filtering, preload history, persistence |
//! | [`panel_app`]   | [`PanelApp`] (eframe) driving the panel and drawing its UI |
//! | [`run`]         | [`run_subscription_panel()`] entry point |

pub mod local_host;
mod panel_app;
mod run;

pub use local_host::LocalHost;
pub use panel_app::PanelApp;
pub use run::run_subscription_panel;
