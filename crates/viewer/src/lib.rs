//! `stockview-viewer` — composition root for the read-only stock viewer.
//!
//! Stands in for the presentation layer: renders dashboard views as
//! structured log lines.

pub mod app;
pub mod config;
pub mod dashboard;

pub use app::{Pipeline, log_view, run};
pub use config::ViewerConfig;
pub use dashboard::{AlertRow, Dashboard, DashboardView};
