//! One-shot loaders turning spreadsheet files into validated wide tables.

mod csv;
mod xlsx;

pub use csv::{read_csv, CsvOptions};
pub use xlsx::{read_xlsx, XlsxReadOptions};
