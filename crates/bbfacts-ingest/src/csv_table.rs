use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::debug;

use bbfacts_model::{FIRST_DATA_ROW, RawRow};

/// One data record together with its position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    /// CSV display row number (the header is row 1).
    pub row: usize,
    pub cells: Vec<String>,
}

/// A loaded CSV file: the first record is the header.
///
/// Blank records are dropped but still count towards row numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    /// CSV display row number of a data record (the header is row 1).
    pub fn display_row(index: usize) -> usize {
        index + FIRST_DATA_ROW
    }

    /// Build keyed rows for every data row.
    pub fn raw_rows(&self) -> impl Iterator<Item = RawRow> + '_ {
        self.rows
            .iter()
            .map(|row| RawRow::new(row.row, &self.headers, &row.cells))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let table = collect_table(reader)
        .with_context(|| format!("read records: {}", path.display()))?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded csv table"
    );
    Ok(table)
}

/// Read a table from any reader (used for in-memory input).
pub fn read_csv_table_from_reader<R: Read>(input: R) -> Result<CsvTable> {
    let reader = ReaderBuilder::new().has_headers(false).from_reader(input);
    collect_table(reader)
}

fn collect_table<R: Read>(mut reader: csv::Reader<R>) -> Result<CsvTable> {
    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .context("read header")?
            .iter()
            .map(normalize_header)
            .collect(),
        None => return Ok(CsvTable::default()),
    };
    let mut rows = Vec::new();
    for (index, record) in records.enumerate() {
        let record = record.context("read record")?;
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        rows.push(CsvRow {
            row: CsvTable::display_row(index),
            cells,
        });
    }
    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_whitespace_from_headers() {
        let table = read_csv_table_from_reader("\u{feff}company_name , fcc_id\nAcme,123\n".as_bytes())
            .unwrap();
        assert_eq!(table.headers, vec!["company_name", "fcc_id"]);
        assert_eq!(table.rows[0].cells, vec!["Acme", "123"]);
    }

    #[test]
    fn skips_blank_rows() {
        let table = read_csv_table_from_reader("a,b\n1,2\n,\n3,4\n".as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn blank_rows_keep_later_row_numbers() {
        let table = read_csv_table_from_reader("a,b\n1,2\n,\n3,4\n".as_bytes()).unwrap();
        let rows: Vec<usize> = table.raw_rows().map(|raw| raw.row).collect();
        assert_eq!(rows, vec![2, 4]);
    }

    #[test]
    fn ragged_rows_are_errors() {
        let result = read_csv_table_from_reader("a,b\n1,2,3\n".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn raw_rows_use_display_row_numbers() {
        let table = read_csv_table_from_reader("a,b\n1,2\n3,4\n".as_bytes()).unwrap();
        let rows: Vec<RawRow> = table.raw_rows().collect();
        assert_eq!(rows[0].row, 2);
        assert_eq!(rows[1].row, 3);
        assert_eq!(rows[1].get("b"), Some("4"));
    }

    #[test]
    fn empty_input_is_empty_table() {
        let table = read_csv_table_from_reader("".as_bytes()).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }
}
