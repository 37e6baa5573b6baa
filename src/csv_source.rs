//! CSV fixture loader for offline testing
//!
//! Expected header (any order, any subset):
//! `timestamp,type,amount,currency,counterparty,description,category,balance_after`
//!
//! Rows come back as JSON objects shaped like ledger transactions, so the
//! same normalization path serves both sources.

use csv::ReaderBuilder;
use serde_json::{Map, Number, Value};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::Result;

const NUMERIC_COLUMNS: &[&str] = &["amount", "balance_after"];

/// Load rows from a CSV file on disk.
pub fn load_transactions(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let rows = read_transactions(file)?;

    info!(path = %path.display(), count = rows.len(), "Loaded transactions from CSV");
    Ok(rows)
}

/// Parse rows from any reader. Cells past the header width are dropped.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Value>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        let mut row = Map::new();

        for (column, cell) in headers.iter().zip(record.iter()) {
            row.insert(column.to_string(), cell_value(column, cell));
        }

        rows.push(Value::Object(row));
    }

    Ok(rows)
}

fn cell_value(column: &str, cell: &str) -> Value {
    if NUMERIC_COLUMNS.contains(&column) {
        if let Some(n) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }
    Value::String(cell.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::{normalize, TransactionKind};
    use std::io::Write;

    const FIXTURE: &str = "\
timestamp,type,amount,currency,counterparty,description,category,balance_after
2025-01-01T09:00:00Z,receive,2500.00,USD,@employer,Salary,,2600.00
2025-01-02T12:30:00Z,send,14.50,USD,@cafe,Lunch,food,2585.50
2025-01-03T18:00:00Z,send,n/a,USD,@shop,Broken amount,shopping,
";

    #[test]
    fn test_read_transactions_types_numeric_columns() {
        let rows = read_transactions(FIXTURE.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["amount"], 2500.0);
        assert_eq!(rows[1]["category"], "food");
        assert_eq!(rows[1]["balance_after"], 2585.5);
        assert_eq!(rows[2]["amount"], "n/a");
        assert_eq!(rows[2]["balance_after"], "");
    }

    #[test]
    fn test_rows_normalize_into_records() {
        let records = normalize(&read_transactions(FIXTURE.as_bytes()).unwrap());

        assert_eq!(records[0].kind, TransactionKind::Receive);
        assert_eq!(records[1].amount, 14.5);
        assert_eq!(records[2].amount, 0.0);
        assert_eq!(records[2].valid_balance(), None);
    }

    #[test]
    fn test_extra_cells_are_ignored() {
        let csv = "type,amount\nsend,3.0,unexpected\n";
        let rows = read_transactions(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_load_transactions_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let rows = load_transactions(file.path()).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_transactions("/definitely/not/here.csv").is_err());
    }
}
