use std::path::Path;

use anyhow::Context;
use log::info;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data_structs::{PlateSchema, WideTable, WideTableBuilder};

/// Options for reading a delimited text export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    separator: u8,
    has_header: bool,
    skip_rows: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            has_header: true,
            skip_rows: 0,
        }
    }
}

impl CsvOptions {
    pub fn with_separator(
        mut self,
        separator: u8,
    ) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_has_header(
        mut self,
        has_header: bool,
    ) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_skip_rows(
        mut self,
        skip_rows: usize,
    ) -> Self {
        self.skip_rows = skip_rows;
        self
    }
}

/// Reads a delimited export into a validated wide table.
///
/// The file is parsed against the schema's column types, so a non-numeric
/// cell in a value column or a row of the wrong width fails the load; the
/// resulting frame then passes the same validation as every other source.
pub fn read_csv(
    path: impl AsRef<Path>,
    schema: &PlateSchema,
    options: &CsvOptions,
) -> anyhow::Result<WideTable> {
    let path = path.as_ref();
    let read_options = CsvReadOptions::default()
        .with_has_header(options.has_header)
        .with_skip_rows(options.skip_rows)
        .with_schema(Some(SchemaRef::from(schema.polars_schema())))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(options.separator)
                .with_try_parse_dates(false),
        );
    let data = read_options
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    info!(
        "loaded {} rows x {} columns from '{}'",
        data.height(),
        data.width(),
        path.display()
    );
    WideTableBuilder::default().build(data, schema.clone())
}
