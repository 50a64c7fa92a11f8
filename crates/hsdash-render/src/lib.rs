//! # hsdash-render
//!
//! Rendering backends for hsdash session data.
//!
//! This crate provides:
//! - SVG bar chart of hours per subject
//! - SVG donut chart of time share per subject
//! - SVG day timeline (date x time-of-day "candlestick" view) with a
//!   full-range context strip
//! - SVG reading-level trend line
//! - HTML curricula and reading-list tables
//! - Standalone HTML dashboard page assembly
//!
//! ## Example
//!
//! ```rust,ignore
//! use hsdash_core::Renderer;
//! use hsdash_render::{BarChart, DashboardPage};
//!
//! let svg = BarChart::new().render(&session_set)?;
//!
//! let page = DashboardPage::new();
//! let html = page.render_all(&[session_set])?;
//! std::fs::write("dashboard.html", html)?;
//! ```

pub mod bar;
pub mod donut;
pub mod level;
pub mod page;
pub mod tables;
pub mod timeline;

pub use bar::BarChart;
pub use donut::DonutChart;
pub use level::ReadingLevelChart;
pub use page::DashboardPage;
pub use timeline::{DayTimeline, RangeStrip};

/// Default pixel height for the dashboard's chart row widgets.
pub const COLUMN_HEIGHT: u32 = 350;

/// Shared color theme for the SVG widgets.
#[derive(Clone, Debug)]
pub struct ChartTheme {
    pub background_color: String,
    pub grid_color: String,
    pub text_color: String,
    pub axis_color: String,
    pub font_family: String,
    pub font_size: u32,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".into(),
            grid_color: "#ecf0f1".into(),
            text_color: "#2c3e50".into(),
            axis_color: "#b0b7bd".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

/// Escape text for embedding in HTML/SVG markup.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
