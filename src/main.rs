use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_tracker::cli::{
    handle_add_command, handle_chart_command, handle_export_command, handle_import_command,
    handle_list_command, handle_overview_command, handle_report_command, Context, ExportFormat,
};
use finance_tracker::config::FinancePaths;
use finance_tracker::logging::init_tracing;
use finance_tracker::models::{Month, TransactionType};
use finance_tracker::shell::Shell;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Terminal personal finance tracker",
    long_about = "Record income and expenses, review monthly reports, chart where \
                  the money goes and export the ledger to CSV, JSON or YAML. \
                  Run without a subcommand for the interactive menu."
)]
struct Cli {
    /// Base directory for settings and the ledger
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu
    Shell,

    /// Record a transaction
    Add {
        /// income or expense
        kind: TransactionType,
        /// Amount, e.g. 12.50
        amount: String,
        /// Category label
        category: String,
        /// Transaction date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List transactions
    #[command(alias = "ls")]
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Show the report for a month
    Report {
        /// Month to report on (YYYY-MM, default current)
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Show income, expenses and balance for every month
    Overview,

    /// Chart a month's expense (or full) category breakdown as PNG
    Chart {
        /// Month to chart (YYYY-MM, default current)
        #[arg(short, long)]
        month: Option<Month>,
        /// Output file (default from settings)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include income categories, not just expenses
        #[arg(long)]
        all_categories: bool,
    },

    /// Export the ledger to a file
    Export {
        /// Output file path
        output: PathBuf,
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Import transactions from a CSV, JSON or YAML export
    Import {
        /// Path to the export file
        file: PathBuf,
        /// File format (default: from the extension)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths, settings and the ledger
    let paths = match cli.data_dir {
        Some(dir) => FinancePaths::with_base_dir(dir),
        None => FinancePaths::new()?,
    };
    let mut ctx = Context::load(paths)?;

    match cli.command {
        None | Some(Commands::Shell) => {
            let stdin = io::stdin();
            let mut shell = Shell::new(
                stdin.lock(),
                io::stdout(),
                ctx.store,
                ctx.settings,
                ctx.paths,
            );
            shell.run()?;
        }
        Some(Commands::Add {
            kind,
            amount,
            category,
            date,
            note,
        }) => {
            handle_add_command(&mut ctx, kind, &amount, &category, date.as_deref(), note)?;
        }
        Some(Commands::List { month }) => handle_list_command(&ctx, month)?,
        Some(Commands::Report { month }) => handle_report_command(&ctx, month)?,
        Some(Commands::Overview) => handle_overview_command(&ctx)?,
        Some(Commands::Chart {
            month,
            output,
            all_categories,
        }) => handle_chart_command(&ctx, month, output, all_categories)?,
        Some(Commands::Export {
            output,
            format,
            pretty,
        }) => handle_export_command(&ctx, &output, format, pretty)?,
        Some(Commands::Import { file, format }) => {
            handle_import_command(&mut ctx, &file, format)?
        }
        Some(Commands::Config) => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", ctx.paths.base_dir().display());
            println!("Settings file:    {}", ctx.paths.settings_file().display());
            println!("Ledger file:      {}", ctx.paths.ledger_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", ctx.settings.currency_symbol);
            println!("  Export file:     {}", ctx.settings.export_file.display());
            println!("  Chart file:      {}", ctx.settings.chart_file.display());
            println!("  Chart kind:      {:?}", ctx.settings.chart_kind);
            println!("  Chart scope:     {:?}", ctx.settings.chart_scope);
            println!(
                "  Chart size:      {}x{}",
                ctx.settings.chart_width, ctx.settings.chart_height
            );
            println!("  Autosave:        {}", ctx.settings.autosave);
            println!("  Transactions:    {}", ctx.store.len());
        }
    }

    Ok(())
}
