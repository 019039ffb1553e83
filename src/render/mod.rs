//! Presentation: SVG charts, text reports and the HTML dashboard.
//!
//! All renderers are pure functions returning `String`.

pub mod chart;
pub mod dashboard;
pub mod format;
pub mod report;

pub use dashboard::{DashboardView, render_dashboard};
pub use report::{participation_report, rewards_report};
