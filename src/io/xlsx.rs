use std::path::Path;

use anyhow::{bail, Context};
use calamine::{open_workbook_auto, Data, Reader};
use itertools::Itertools;
use log::info;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data_structs::{PlateSchema, WideTable, WideTableBuilder};

/// Options selecting the worksheet and the rectangular cell region to read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XlsxReadOptions {
    sheet: Option<String>,
    skip_rows: usize,
    skip_cols: usize,
}

impl XlsxReadOptions {
    /// Selects a worksheet by name. Defaults to the first worksheet.
    pub fn with_sheet(
        mut self,
        sheet: impl Into<String>,
    ) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Sets the number of rows above the header row.
    pub fn with_skip_rows(
        mut self,
        skip_rows: usize,
    ) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    /// Sets the number of columns left of the table.
    pub fn with_skip_cols(
        mut self,
        skip_cols: usize,
    ) -> Self {
        self.skip_cols = skip_cols;
        self
    }
}

/// Reads a rectangular worksheet region into a validated wide table.
///
/// The header row must match the schema's column list in count, order and
/// names; every cell of a value column must be numeric. Any violation
/// aborts the load with an error naming the expectation and what was found.
pub fn read_xlsx(
    path: impl AsRef<Path>,
    schema: &PlateSchema,
    options: &XlsxReadOptions,
) -> anyhow::Result<WideTable> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).with_context(|| {
        format!("failed to open workbook '{}'", path.display())
    })?;
    let sheet = match &options.sheet {
        Some(name) => name.clone(),
        None => {
            workbook
                .sheet_names()
                .first()
                .cloned()
                .context("workbook has no worksheets")?
        },
    };
    let range = workbook.worksheet_range(&sheet).with_context(|| {
        format!(
            "worksheet '{}' not found in '{}'",
            sheet,
            path.display()
        )
    })?;

    let mut rows = range.rows().skip(options.skip_rows);
    let header_row = rows.next().with_context(|| {
        format!("worksheet '{}' has no header row", sheet)
    })?;
    let mut header = header_row
        .iter()
        .skip(options.skip_cols)
        .map(cell_to_string)
        .collect_vec();
    // calamine pads the used range with trailing empty cells
    while header.last().is_some_and(String::is_empty) {
        header.pop();
    }
    let expected = schema.col_names();
    if header.iter().map(String::as_str).collect_vec() != expected {
        bail!(
            "header mismatch in worksheet '{}': expected [{}], found [{}]",
            sheet,
            expected.iter().join(", "),
            header.iter().join(", ")
        )
    }

    let data_rows = rows
        .filter(|row| {
            !row.iter()
                .skip(options.skip_cols)
                .all(|c| matches!(c, Data::Empty))
        })
        .collect_vec();

    let n_keys = schema.key_cols().len();
    let mut columns = Vec::with_capacity(schema.width());
    for (offset, name) in schema.key_cols().iter().enumerate() {
        let col_idx = options.skip_cols + offset;
        let cells = data_rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let text = row
                    .get(col_idx)
                    .map(cell_to_string)
                    .unwrap_or_default();
                if text.is_empty() {
                    bail!(
                        "column '{}', data row {}: empty metadata cell",
                        name,
                        row_idx + 1
                    )
                }
                Ok(text)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        columns.push(Series::new(name.as_str().into(), cells));
    }
    for (offset, name) in schema.value_cols().iter().enumerate() {
        let col_idx = options.skip_cols + n_keys + offset;
        let cells = data_rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                numeric_cell(row.get(col_idx).unwrap_or(&Data::Empty))
                    .with_context(|| {
                        format!("column '{}', data row {}", name, row_idx + 1)
                    })
            })
            .collect::<anyhow::Result<Vec<f64>>>()?;
        columns.push(Series::new(name.as_str().into(), cells));
    }

    let data = DataFrame::from_iter(columns);
    info!(
        "loaded {} rows x {} columns from '{}' ({})",
        data.height(),
        data.width(),
        path.display(),
        sheet
    );
    WideTableBuilder::default().build(data, schema.clone())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR({e:?})"),
    }
}

fn numeric_cell(cell: &Data) -> anyhow::Result<f64> {
    match cell {
        Data::Float(v) => Ok(*v),
        Data::Int(v) => Ok(*v as f64),
        other => bail!("expected a numeric cell, found {:?}", other),
    }
}
