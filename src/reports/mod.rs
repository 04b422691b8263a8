//! Reports module for the finance tracker
//!
//! Aggregation of transactions into monthly reports, plus text and chart
//! renderers for them.

pub mod chart;
pub mod monthly;
pub mod text;

pub use chart::{render_chart, render_chart_with, ChartLegend, ChartOptions, LegendEntry};
pub use monthly::{monthly_overview, summarize, summarize_month, MonthlyReport};
pub use text::{render_overview, render_text, render_text_with_symbol};
