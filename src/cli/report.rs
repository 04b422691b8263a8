//! CLI commands for reports and charts

use std::path::PathBuf;

use crate::config::ChartScope;
use crate::display::format_chart_legend;
use crate::error::FinanceResult;
use crate::models::Month;
use crate::reports::{
    monthly_overview, render_chart_with, render_overview, render_text_with_symbol,
    summarize_month, ChartOptions,
};

use super::Context;

/// Print the text report for a month (default: the current one)
pub fn handle_report_command(ctx: &Context, month: Option<Month>) -> FinanceResult<()> {
    let month = month.unwrap_or_else(Month::current);
    let report = summarize_month(&ctx.store, month);

    print!(
        "{}",
        render_text_with_symbol(&report, &ctx.settings.currency_symbol)
    );
    Ok(())
}

/// Print income, expenses and balance for every month on record
pub fn handle_overview_command(ctx: &Context) -> FinanceResult<()> {
    let reports = monthly_overview(&ctx.store);
    print!(
        "{}",
        render_overview(&reports, &ctx.settings.currency_symbol)
    );
    Ok(())
}

/// Draw the category breakdown of a month to a PNG file
///
/// `all_categories` includes income categories regardless of the settings.
pub fn handle_chart_command(
    ctx: &Context,
    month: Option<Month>,
    output: Option<PathBuf>,
    all_categories: bool,
) -> FinanceResult<()> {
    let month = month.unwrap_or_else(Month::current);
    let output = output.unwrap_or_else(|| ctx.settings.chart_file.clone());

    let mut options = ChartOptions::from_settings(&ctx.settings);
    if all_categories {
        options.scope = ChartScope::All;
    }

    let report = summarize_month(&ctx.store, month);
    let legend = render_chart_with(&report, output, &options)?;

    print!(
        "{}",
        format_chart_legend(&legend, &ctx.settings.currency_symbol)
    );
    Ok(())
}
