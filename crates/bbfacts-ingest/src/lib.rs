pub mod csv_table;

pub use csv_table::{CsvRow, CsvTable, read_csv_table, read_csv_table_from_reader};
