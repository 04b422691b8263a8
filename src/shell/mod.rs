//! Interactive menu shell
//!
//! A single-threaded loop: print the menu, read one choice, run it, repeat.
//! Errors from an action are printed and the loop carries on. Input and
//! output are generic so sessions can be scripted.

pub mod prompt;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::{FinancePaths, Settings};
use crate::display::{format_chart_legend, format_transaction_list, format_transaction_short};
use crate::error::FinanceResult;
use crate::export::export_csv;
use crate::models::{parse_date, Money, Month, NewTransaction, TransactionType};
use crate::reports::{
    monthly_overview, render_chart_with, render_overview, render_text_with_symbol,
    summarize_month, ChartOptions,
};
use crate::storage::TransactionStore;

use prompt::{confirm, prompt_string, prompt_with_default};

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddIncome,
    AddExpense,
    List,
    Report,
    Overview,
    Chart,
    Export,
    Save,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 9] = [
        Self::AddIncome,
        Self::AddExpense,
        Self::List,
        Self::Report,
        Self::Overview,
        Self::Chart,
        Self::Export,
        Self::Save,
        Self::Exit,
    ];

    /// Parse a menu answer: its number, or a word for exit
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" => Some(Self::AddIncome),
            "2" => Some(Self::AddExpense),
            "3" => Some(Self::List),
            "4" => Some(Self::Report),
            "5" => Some(Self::Overview),
            "6" => Some(Self::Chart),
            "7" => Some(Self::Export),
            "8" => Some(Self::Save),
            "9" | "q" | "quit" | "exit" => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).map_or(0, |i| i + 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AddIncome => "Add income",
            Self::AddExpense => "Add expense",
            Self::List => "List transactions",
            Self::Report => "Monthly report",
            Self::Overview => "All-months overview",
            Self::Chart => "Chart category breakdown",
            Self::Export => "Export CSV",
            Self::Save => "Save",
            Self::Exit => "Exit",
        }
    }
}

/// Interactive session over a transaction store
pub struct Shell<R, W> {
    input: R,
    output: W,
    store: TransactionStore,
    settings: Settings,
    paths: FinancePaths,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        input: R,
        output: W,
        store: TransactionStore,
        settings: Settings,
        paths: FinancePaths,
    ) -> Self {
        Self {
            input,
            output,
            store,
            settings,
            paths,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Fix the date used for `today` defaults
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    /// Run until the user exits or input ends
    ///
    /// Only a failed save on exit is returned as an error.
    pub fn run(&mut self) -> FinanceResult<()> {
        writeln!(self.output, "Personal Finance Tracker")?;

        loop {
            self.print_menu()?;

            let Some(answer) = prompt_string(&mut self.input, &mut self.output, "Choose an option: ")?
            else {
                writeln!(self.output)?;
                break;
            };

            let Some(choice) = MenuChoice::parse(&answer) else {
                writeln!(
                    self.output,
                    "Invalid choice '{}'. Enter a number from 1 to 9.",
                    answer
                )?;
                continue;
            };

            if choice == MenuChoice::Exit {
                break;
            }

            debug!(?choice, "menu selection");
            if let Err(e) = self.dispatch(choice) {
                warn!(error = %e, ?choice, "action failed");
                writeln!(self.output, "Error: {}", e)?;
            }
        }

        self.finish()
    }

    fn print_menu(&mut self) -> FinanceResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Menu ---")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> FinanceResult<()> {
        match choice {
            MenuChoice::AddIncome => self.add(TransactionType::Income),
            MenuChoice::AddExpense => self.add(TransactionType::Expense),
            MenuChoice::List => self.list(),
            MenuChoice::Report => self.report(),
            MenuChoice::Overview => self.overview(),
            MenuChoice::Chart => self.chart(),
            MenuChoice::Export => self.export(),
            MenuChoice::Save => self.save(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn ask(&mut self, prompt: &str) -> FinanceResult<Option<String>> {
        prompt_string(&mut self.input, &mut self.output, prompt)
    }

    fn ask_default(&mut self, label: &str, default: &str) -> FinanceResult<Option<String>> {
        prompt_with_default(&mut self.input, &mut self.output, label, default)
    }

    fn ask_month(&mut self) -> FinanceResult<Option<Month>> {
        let default = Month::of(self.today).to_string();
        match self.ask_default("Month (YYYY-MM)", &default)? {
            Some(answer) => Ok(Some(Month::parse(&answer)?)),
            None => Ok(None),
        }
    }

    fn add(&mut self, kind: TransactionType) -> FinanceResult<()> {
        let today = self.today.format("%Y-%m-%d").to_string();
        let Some(date) = self.ask_default("Date (YYYY-MM-DD)", &today)? else {
            return Ok(());
        };
        let date = parse_date(&date, self.today)?;

        let Some(category) = self.ask("Category: ")? else {
            return Ok(());
        };

        let Some(amount) = self.ask("Amount: ")? else {
            return Ok(());
        };
        let amount = Money::parse(&amount)?;

        let Some(note) = self.ask("Note (optional): ")? else {
            return Ok(());
        };

        let mut input = NewTransaction::new(date, kind, category, amount);
        if !note.is_empty() {
            input = input.with_note(note);
        }

        let added = self.store.add(input)?;
        let line = format_transaction_short(added, &self.settings.currency_symbol);
        writeln!(self.output, "Added {}", line)?;

        if self.settings.autosave {
            self.save()?;
        }
        Ok(())
    }

    fn list(&mut self) -> FinanceResult<()> {
        let Some(answer) = self.ask_default("Month (YYYY-MM or 'all')", "all")? else {
            return Ok(());
        };

        let symbol = self.settings.currency_symbol.clone();
        let table = if answer.eq_ignore_ascii_case("all") {
            format_transaction_list(self.store.all(), &symbol)
        } else {
            let month = Month::parse(&answer)?;
            format_transaction_list(self.store.for_month(month), &symbol)
        };

        write!(self.output, "{}", table)?;
        Ok(())
    }

    fn report(&mut self) -> FinanceResult<()> {
        let Some(month) = self.ask_month()? else {
            return Ok(());
        };

        let report = summarize_month(&self.store, month);
        let text = render_text_with_symbol(&report, &self.settings.currency_symbol);
        write!(self.output, "{}", text)?;
        Ok(())
    }

    fn overview(&mut self) -> FinanceResult<()> {
        let reports = monthly_overview(&self.store);
        let text = render_overview(&reports, &self.settings.currency_symbol);
        write!(self.output, "{}", text)?;
        Ok(())
    }

    fn chart(&mut self) -> FinanceResult<()> {
        let Some(month) = self.ask_month()? else {
            return Ok(());
        };
        let default = self.settings.chart_file.display().to_string();
        let Some(path) = self.ask_default("Output file", &default)? else {
            return Ok(());
        };

        let report = summarize_month(&self.store, month);
        let options = ChartOptions::from_settings(&self.settings);
        let legend = render_chart_with(&report, PathBuf::from(path), &options)?;

        let text = format_chart_legend(&legend, &self.settings.currency_symbol);
        write!(self.output, "{}", text)?;
        Ok(())
    }

    fn export(&mut self) -> FinanceResult<()> {
        let default = self.settings.export_file.display().to_string();
        let Some(path) = self.ask_default("Output file", &default)? else {
            return Ok(());
        };

        let count = export_csv(self.store.all(), &path)?;
        writeln!(self.output, "Exported {} transactions to {}", count, path)?;
        Ok(())
    }

    fn save(&mut self) -> FinanceResult<()> {
        let path = self.paths.ledger_file();
        self.store.save(&path)?;
        writeln!(
            self.output,
            "Saved {} transactions to {}",
            self.store.len(),
            path.display()
        )?;
        Ok(())
    }

    /// Offer to save unsaved transactions, then say goodbye
    ///
    /// End of input at the question takes the default (save).
    fn finish(&mut self) -> FinanceResult<()> {
        if self.store.is_dirty() {
            let save = if self.settings.autosave {
                true
            } else {
                confirm(
                    &mut self.input,
                    &mut self.output,
                    "Save unsaved transactions before exiting?",
                    true,
                )?
                .unwrap_or(true)
            };

            if save {
                if let Err(e) = self.save() {
                    writeln!(self.output, "Error: {}", e)?;
                    return Err(e);
                }
            } else {
                writeln!(self.output, "Discarded unsaved transactions.")?;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    fn settings_in(temp_dir: &TempDir) -> Settings {
        Settings {
            export_file: temp_dir.path().join("out.csv"),
            chart_file: temp_dir.path().join("chart.png"),
            ..Settings::default()
        }
    }

    fn run_script(temp_dir: &TempDir, settings: Settings, script: &str) -> (String, TransactionStore) {
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = TransactionStore::load(paths.ledger_file()).unwrap();

        let mut output = Vec::new();
        let store = {
            let mut shell = Shell::new(Cursor::new(script.to_string()), &mut output, store, settings, paths)
                .with_today(today());
            shell.run().unwrap();
            shell.store().clone()
        };

        (String::from_utf8(output).unwrap(), store)
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AddIncome));
        assert_eq!(MenuChoice::parse(" 7 "), Some(MenuChoice::Export));
        assert_eq!(MenuChoice::parse("Quit"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("10"), None);
        assert_eq!(MenuChoice::Save.number(), 8);
    }

    #[test]
    fn test_add_and_report_session() {
        let temp_dir = TempDir::new().unwrap();
        let script = "1\n2024-01-05\nSalary\n1000\n\n\
                      2\n\nGroceries\n200\nweekly shop\n\
                      4\n\n\
                      9\nno\n";

        let (output, store) = run_script(&temp_dir, settings_in(&temp_dir), script);

        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[1].date, today());
        assert_eq!(store.all()[1].note.as_deref(), Some("weekly shop"));

        assert!(output.contains("Added #1 2024-01-05 Income Salary $1000.00"));
        assert!(output.contains("Monthly Report: 2024-01"));
        assert!(output.contains("$800.00"));
        assert!(output.contains("Discarded unsaved transactions."));
        assert!(output.trim_end().ends_with("Goodbye!"));

        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(!paths.ledger_file().exists());
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let temp_dir = TempDir::new().unwrap();
        let script = "2\n\nFood\n-5\n\n\
                      2\nyesterday\n\
                      6\n\n\n\
                      42\n\
                      3\n\n\
                      q\n";

        let (output, store) = run_script(&temp_dir, settings_in(&temp_dir), script);

        assert!(store.is_empty());
        assert!(output.contains("Error: Validation error: Amount must not be negative"));
        assert!(output.contains("Error: Validation error: Invalid date 'yesterday'"));
        assert!(output.contains("Error: Render error:"));
        assert!(output.contains("Invalid choice '42'"));
        assert!(output.contains("No transactions recorded."));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_end_of_input_saves_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let script = "1\n2024-01-05\nSalary\n1000\n\n";

        let (output, _) = run_script(&temp_dir, settings_in(&temp_dir), script);
        assert!(output.contains("Saved 1 transactions"));

        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let reloaded = TransactionStore::load(paths.ledger_file()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.next_id().value(), 2);
    }

    #[test]
    fn test_autosave_after_each_add() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            autosave: true,
            ..settings_in(&temp_dir)
        };
        let script = "2\n2024-01-10\nRent\n700\n\nexit\n";

        let (output, store) = run_script(&temp_dir, settings, script);

        assert!(!store.is_dirty());
        assert!(!output.contains("Save unsaved transactions"));
        assert!(output.contains("Saved 1 transactions"));
    }

    #[test]
    fn test_export_and_chart_use_configured_paths() {
        let temp_dir = TempDir::new().unwrap();
        let script = "1\n2024-01-05\nSalary\n1000\n\n\
                      2\n2024-01-10\nGroceries\n200\n\n\
                      7\n\n\
                      6\n2024-01\n\n\
                      9\n\n";

        let (output, _) = run_script(&temp_dir, settings_in(&temp_dir), script);

        assert!(output.contains("Exported 2 transactions"));
        assert!(output.contains("Chart saved to"));
        assert!(output.contains("Salary"));
        assert!(temp_dir.path().join("out.csv").exists());
        assert!(temp_dir.path().join("chart.png").exists());
    }
}
