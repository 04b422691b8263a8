//! PNG chart of a report's category breakdown
//!
//! Draws a pie or bar chart with a column of colour swatches on the right.
//! The image carries no text; callers print the returned legend instead.
//! A chart covers either every category or the expense categories only.

use std::f64::consts::TAU;
use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat, Rgb, RgbImage};
use tracing::info;

use crate::config::{ChartKind, ChartScope, Settings};
use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;

use super::monthly::MonthlyReport;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);
const MARGIN: u32 = 20;
const LEGEND_WIDTH: u32 = 120;
const SWATCH: u32 = 18;
const SWATCH_STEP: u32 = 28;
const MIN_WIDTH: u32 = 240;
const MIN_HEIGHT: u32 = 120;

const PALETTE: [(&str, [u8; 3]); 10] = [
    ("blue", [31, 119, 180]),
    ("orange", [255, 127, 14]),
    ("green", [44, 160, 44]),
    ("red", [214, 39, 40]),
    ("purple", [148, 103, 189]),
    ("brown", [140, 86, 75]),
    ("pink", [227, 119, 194]),
    ("gray", [127, 127, 127]),
    ("olive", [188, 189, 34]),
    ("cyan", [23, 190, 207]),
];

/// Chart shape, size and category scope
///
/// The default charts the whole breakdown; settings default to expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub kind: ChartKind,
    pub scope: ChartScope,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            kind: ChartKind::Pie,
            scope: ChartScope::All,
            width: 800,
            height: 480,
        }
    }
}

impl ChartOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            kind: settings.chart_kind,
            scope: settings.chart_scope,
            width: settings.chart_width,
            height: settings.chart_height,
        }
    }
}

/// One category as drawn in the chart
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub category: String,
    /// Name of the colour used for this category
    pub color: &'static str,
    pub amount: Money,
    pub percentage: f64,
}

/// Where the chart was written and what each colour means
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLegend {
    pub path: PathBuf,
    pub entries: Vec<LegendEntry>,
}

/// Render a pie chart of every category at the default size
pub fn render_chart<P: AsRef<Path>>(report: &MonthlyReport, path: P) -> FinanceResult<ChartLegend> {
    render_chart_with(report, path, &ChartOptions::default())
}

/// Render the report's category breakdown to a PNG file
///
/// Fails with a render error when no category has a nonzero amount, and
/// with an I/O error when the file cannot be written.
pub fn render_chart_with<P: AsRef<Path>>(
    report: &MonthlyReport,
    path: P,
    options: &ChartOptions,
) -> FinanceResult<ChartLegend> {
    let path = path.as_ref();

    let rows = match options.scope {
        ChartScope::All => report.sorted_breakdown(),
        ChartScope::Expenses => report.sorted_expense_breakdown(),
    };
    if rows.is_empty() {
        let what = match options.scope {
            ChartScope::All => "categories",
            ChartScope::Expenses => "expense categories",
        };
        return Err(FinanceError::Render(format!(
            "No {} with nonzero amounts to chart",
            what
        )));
    }
    if options.width < MIN_WIDTH || options.height < MIN_HEIGHT {
        return Err(FinanceError::Render(format!(
            "Chart size {}x{} is too small (minimum {}x{})",
            options.width, options.height, MIN_WIDTH, MIN_HEIGHT
        )));
    }

    let total: f64 = rows.iter().map(|(_, amount)| amount.as_f64()).sum();
    let entries: Vec<LegendEntry> = rows
        .iter()
        .enumerate()
        .map(|(i, (category, amount))| LegendEntry {
            category: category.to_string(),
            color: PALETTE[i % PALETTE.len()].0,
            amount: *amount,
            percentage: amount.as_f64() / total * 100.0,
        })
        .collect();

    let mut img = RgbImage::from_pixel(options.width, options.height, BACKGROUND);
    let values: Vec<f64> = rows.iter().map(|(_, amount)| amount.as_f64()).collect();

    match options.kind {
        ChartKind::Pie => draw_pie(&mut img, &values),
        ChartKind::Bar => draw_bars(&mut img, &values),
    }
    draw_legend(&mut img, values.len());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(io) => {
                FinanceError::Io(format!("Failed to write {}: {}", path.display(), io))
            }
            other => FinanceError::Render(other.to_string()),
        })?;

    info!(path = %path.display(), categories = entries.len(), "chart written");

    Ok(ChartLegend {
        path: path.to_path_buf(),
        entries,
    })
}

fn color(index: usize) -> Rgb<u8> {
    Rgb(PALETTE[index % PALETTE.len()].1)
}

/// Width available to the plot once the legend column is reserved
fn plot_width(img: &RgbImage) -> u32 {
    img.width() - LEGEND_WIDTH
}

fn draw_pie(img: &mut RgbImage, values: &[f64]) {
    let total: f64 = values.iter().sum();
    let mut cumulative = Vec::with_capacity(values.len());
    let mut running = 0.0;
    for value in values {
        running += value / total;
        cumulative.push(running);
    }

    let diameter = plot_width(img).min(img.height()) - 2 * MARGIN;
    let radius = diameter as f64 / 2.0;
    let cx = MARGIN as f64 + radius;
    let cy = img.height() as f64 / 2.0;

    for y in 0..img.height() {
        for x in 0..plot_width(img) {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if dx * dx + dy * dy > radius * radius {
                continue;
            }

            // Clockwise from twelve o'clock
            let mut angle = dx.atan2(-dy);
            if angle < 0.0 {
                angle += TAU;
            }
            let fraction = angle / TAU;
            let slice = cumulative
                .iter()
                .position(|&edge| fraction < edge)
                .unwrap_or(values.len() - 1);

            img.put_pixel(x, y, color(slice));
        }
    }
}

fn draw_bars(img: &mut RgbImage, values: &[f64]) {
    let max = values.iter().cloned().fold(0.0_f64, f64::max);
    let left = MARGIN;
    let right = plot_width(img) - MARGIN;
    let top = MARGIN;
    let bottom = img.height() - MARGIN;
    let inner_height = (bottom - top) as f64;

    let slot = (right - left) / values.len() as u32;
    let bar_width = (slot * 7 / 10).max(1);
    let gap = slot.saturating_sub(bar_width) / 2;

    for (i, value) in values.iter().enumerate() {
        let height = (value / max * inner_height).round() as u32;
        let x0 = left + i as u32 * slot + gap;
        for x in x0..(x0 + bar_width).min(right) {
            for y in (bottom - height)..bottom {
                img.put_pixel(x, y, color(i));
            }
        }
    }

    for x in left..right {
        img.put_pixel(x, bottom, AXIS);
    }
}

fn draw_legend(img: &mut RgbImage, count: usize) {
    let x0 = plot_width(img) + MARGIN;
    for i in 0..count {
        let y0 = MARGIN + i as u32 * SWATCH_STEP;
        if y0 + SWATCH > img.height() {
            break;
        }
        for y in y0..y0 + SWATCH {
            for x in x0..(x0 + SWATCH).min(img.width()) {
                img.put_pixel(x, y, color(i));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Month, NewTransaction};
    use crate::reports::monthly::{summarize, summarize_month};
    use crate::storage::TransactionStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn report() -> MonthlyReport {
        let mut store = TransactionStore::new();
        store
            .add(NewTransaction::income(
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                "Salary",
                Money::from_units(1000),
            ))
            .unwrap();
        store
            .add(NewTransaction::expense(
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                "Groceries",
                Money::from_units(200),
            ))
            .unwrap();
        summarize_month(&store, Month::new(2024, 1).unwrap())
    }

    #[test]
    fn test_pie_chart_written() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chart.png");

        let legend = render_chart(&report(), &path).unwrap();
        assert_eq!(legend.path, path);
        assert_eq!(legend.entries.len(), 2);
        assert_eq!(legend.entries[0].category, "Salary");
        assert_eq!(legend.entries[0].color, "blue");
        assert!((legend.entries[1].percentage - 16.666).abs() < 0.01);

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (800, 480));
        // Largest slice starts at twelve o'clock, just right of the top
        let cx = MARGIN + (480 - 2 * MARGIN) / 2;
        assert_eq!(*img.get_pixel(cx + 5, MARGIN + 10), color(0));
    }

    #[test]
    fn test_bar_chart_written() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("bars.png");
        let options = ChartOptions {
            kind: ChartKind::Bar,
            scope: ChartScope::All,
            width: 400,
            height: 300,
        };

        render_chart_with(&report(), &path, &options).unwrap();
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (400, 300));
        // Tallest bar reaches the top margin
        let slot = (400 - LEGEND_WIDTH - 2 * MARGIN) / 2;
        let x = MARGIN + (slot - slot * 7 / 10) / 2 + 1;
        assert_eq!(*img.get_pixel(x, MARGIN + 1), color(0));
    }

    #[test]
    fn test_expense_scope_leaves_out_income() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.png");
        let options = ChartOptions::from_settings(&Settings::default());
        assert_eq!(options.scope, ChartScope::Expenses);

        let legend = render_chart_with(&report(), &path, &options).unwrap();
        assert_eq!(legend.entries.len(), 1);
        assert_eq!(legend.entries[0].category, "Groceries");
        assert!((legend.entries[0].percentage - 100.0).abs() < 1e-9);
        assert!(path.exists());
    }

    #[test]
    fn test_expense_scope_without_expenses_is_render_error() {
        let mut store = TransactionStore::new();
        store
            .add(NewTransaction::income(
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                "Salary",
                Money::from_units(1000),
            ))
            .unwrap();
        let options = ChartOptions {
            scope: ChartScope::Expenses,
            ..ChartOptions::default()
        };

        let temp_dir = TempDir::new().unwrap();
        let err = render_chart_with(&summarize(store.all()), temp_dir.path().join("x.png"), &options)
            .unwrap_err();
        assert!(err.is_render());
        assert!(err.to_string().contains("expense categories"));
    }

    #[test]
    fn test_empty_breakdown_is_render_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.png");

        let err = render_chart(&summarize(std::iter::empty::<&crate::models::Transaction>()), &path)
            .unwrap_err();
        assert!(err.is_render());
        assert!(!path.exists());
    }

    #[test]
    fn test_all_zero_breakdown_is_render_error() {
        let mut store = TransactionStore::new();
        store
            .add(NewTransaction::expense(
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                "Nothing",
                Money::zero(),
            ))
            .unwrap();

        let temp_dir = TempDir::new().unwrap();
        let err = render_chart(&summarize(store.all()), temp_dir.path().join("zero.png"))
            .unwrap_err();
        assert!(err.is_render());
    }

    #[test]
    fn test_too_small_is_render_error() {
        let temp_dir = TempDir::new().unwrap();
        let options = ChartOptions {
            kind: ChartKind::Pie,
            scope: ChartScope::All,
            width: 10,
            height: 10,
        };
        let err = render_chart_with(&report(), temp_dir.path().join("tiny.png"), &options)
            .unwrap_err();
        assert!(err.is_render());
    }
}
