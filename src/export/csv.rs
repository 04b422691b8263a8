//! CSV export and re-import of transactions
//!
//! Columns are fixed: `id,date,type,category,amount,note`. Dates are
//! `YYYY-MM-DD`, the type is lowercase, amounts carry two decimals and an
//! empty note column means no note.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, NewTransaction, Transaction, TransactionId, TransactionType};

/// Header row written at the top of every export
pub const CSV_HEADER: [&str; 6] = ["id", "date", "type", "category", "amount", "note"];

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    id: u64,
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransactionType,
    category: String,
    amount: String,
    note: Option<String>,
}

impl From<&Transaction> for CsvRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.value(),
            date: txn.date,
            kind: txn.kind,
            category: txn.category.clone(),
            amount: txn.amount.to_decimal_string(),
            note: txn.note.clone(),
        }
    }
}

fn write_error(err: csv::Error) -> FinanceError {
    if err.is_io_error() {
        FinanceError::Io(err.to_string())
    } else {
        FinanceError::Export(err.to_string())
    }
}

/// Export transactions to a CSV file, returning the number of rows written
///
/// The file is created (or truncated) here and closed before returning,
/// whether or not the write succeeds.
pub fn export_csv<'a, I, P>(transactions: I, path: P) -> FinanceResult<usize>
where
    I: IntoIterator<Item = &'a Transaction>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| FinanceError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

    let count = write_csv(transactions, BufWriter::new(file))?;

    info!(path = %path.display(), count, "exported transactions to CSV");
    Ok(count)
}

/// Write the CSV form of `transactions` to any writer
pub fn write_csv<'a, I, W>(transactions: I, writer: W) -> FinanceResult<usize>
where
    I: IntoIterator<Item = &'a Transaction>,
    W: Write,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(CSV_HEADER).map_err(write_error)?;

    let mut count = 0;
    for txn in transactions {
        wtr.serialize(CsvRow::from(txn)).map_err(write_error)?;
        count += 1;
    }

    wtr.flush()?;
    Ok(count)
}

/// Parse transactions from CSV produced by [`write_csv`]
///
/// Ids are kept as written. Any malformed row is a validation error naming
/// its line.
pub fn read_csv<R: Read>(reader: R) -> FinanceResult<Vec<Transaction>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.iter().map(str::trim).ne(CSV_HEADER.iter().copied()) {
        return Err(FinanceError::Validation(format!(
            "Unexpected CSV header '{}', expected '{}'",
            headers.iter().collect::<Vec<_>>().join(","),
            CSV_HEADER.join(",")
        )));
    }

    let mut transactions = Vec::new();
    let mut record = csv::StringRecord::new();
    while rdr.read_record(&mut record)? {
        // Quoted fields may span lines, so count from where the record starts
        let line = record.position().map_or(0, |p| p.line());
        let row: CsvRow = record
            .deserialize(Some(&headers))
            .map_err(|e| FinanceError::Validation(format!("CSV line {}: {}", line, e)))?;

        let amount = Money::parse(&row.amount)
            .map_err(|e| FinanceError::Validation(format!("CSV line {}: {}", line, e)))?;

        let mut input = NewTransaction::new(row.date, row.kind, row.category, amount);
        input.note = row.note;
        let input = input
            .validate()
            .map_err(|e| FinanceError::Validation(format!("CSV line {}: {}", line, e)))?;

        transactions.push(Transaction::from_input(TransactionId::new(row.id), input));
    }

    Ok(transactions)
}

/// Read a CSV export from disk
pub fn read_csv_file<P: AsRef<Path>>(path: P) -> FinanceResult<Vec<Transaction>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| FinanceError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    read_csv(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::TransactionStore;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_store() -> TransactionStore {
        let mut store = TransactionStore::new();
        store
            .add(NewTransaction::income(date(2024, 1, 5), "Salary", Money::from_units(1000)))
            .unwrap();
        store
            .add(
                NewTransaction::expense(date(2024, 1, 10), "Groceries", Money::from_cents(20050))
                    .with_note("milk, eggs \"organic\""),
            )
            .unwrap();
        store
            .add(NewTransaction::expense(date(2024, 2, 1), "Rent, flat", Money::from_units(700)))
            .unwrap();
        store
    }

    #[test]
    fn test_write_csv_layout() {
        let store = sample_store();
        let mut output = Vec::new();
        let count = write_csv(store.all(), &mut output).unwrap();
        assert_eq!(count, 3);

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,date,type,category,amount,note");
        assert_eq!(lines[1], "1,2024-01-05,income,Salary,1000.00,");
        assert_eq!(
            lines[2],
            "2,2024-01-10,expense,Groceries,200.50,\"milk, eggs \"\"organic\"\"\""
        );
        assert_eq!(lines[3], "3,2024-02-01,expense,\"Rent, flat\",700.00,");
    }

    #[test]
    fn test_empty_export_still_has_header() {
        let mut output = Vec::new();
        write_csv(std::iter::empty::<&Transaction>(), &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "id,date,type,category,amount,note\n");
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        let store = sample_store();

        let count = export_csv(store.all(), &path).unwrap();
        assert_eq!(count, store.len());

        let parsed = read_csv_file(&path).unwrap();
        assert_eq!(parsed.as_slice(), store.all());
    }

    #[test]
    fn test_export_to_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no-such-dir").join("out.csv");

        let err = export_csv(sample_store().all(), &path).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_read_rejects_negative_amount() {
        let data = "id,date,type,category,amount,note\n1,2024-01-05,expense,Food,-5.00,\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_error_line_counts_multiline_notes() {
        let data = "id,date,type,category,amount,note\n\
                    1,2024-01-05,income,Salary,1000.00,\"paid\nlate\"\n\
                    2,2024-01-06,expense,Food,oops,\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("CSV line 4"), "{}", err);

        let bad_type = "id,date,type,category,amount,note\n\
                        1,2024-01-05,income,Salary,1000.00,\"a\nb\nc\"\n\
                        2,2024-01-06,transfer,Food,5.00,\n";
        let err = read_csv(bad_type.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("CSV line 5"), "{}", err);

        let ok = "id,date,type,category,amount,note\n\
                  1,2024-01-05,income,Salary,1000.00,\"paid\nlate\"\n";
        let rows = read_csv(ok.as_bytes()).unwrap();
        assert_eq!(rows[0].note.as_deref(), Some("paid\nlate"));
    }

    #[test]
    fn test_read_rejects_bad_type_and_header() {
        let bad_type = "id,date,type,category,amount,note\n1,2024-01-05,transfer,Food,5.00,\n";
        assert!(read_csv(bad_type.as_bytes()).unwrap_err().is_validation());

        let bad_header = "date,amount\n2024-01-05,5.00\n";
        assert!(read_csv(bad_header.as_bytes()).unwrap_err().is_validation());
    }
}
