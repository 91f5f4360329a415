use anyhow::{bail, Context};
use itertools::Itertools;
use polars::prelude::*;

/// Tidy long table: one row per single observation.
///
/// Carries the names of its group-key columns and of the value column so
/// the aggregation and plotting stages need no positional knowledge.
#[derive(Debug, Clone, PartialEq)]
pub struct LongTable {
    data: DataFrame,
    key_cols: Vec<String>,
    value_col: String,
}

impl LongTable {
    pub(crate) fn new_unchecked(
        data: DataFrame,
        key_cols: Vec<String>,
        value_col: String,
    ) -> Self {
        LongTable {
            data,
            key_cols,
            value_col,
        }
    }

    /// Wraps an existing long-format frame, validating the named columns.
    pub fn from_dataframe(
        data: DataFrame,
        key_cols: Vec<String>,
        value_col: String,
    ) -> anyhow::Result<Self> {
        for key in &key_cols {
            if data.column(key).is_err() {
                bail!("group key column '{}' not found in long table", key)
            }
        }
        let dtype = data.column(&value_col)?.dtype().clone();
        if !dtype.is_numeric() {
            bail!(
                "value column '{}' holds {} cells, expected numeric \
                 observations",
                value_col,
                dtype
            )
        }
        let data = data
            .lazy()
            .with_column(
                col(value_col.as_str()).cast(DataType::Float64),
            )
            .collect()?;
        Ok(Self::new_unchecked(data, key_cols, value_col))
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Number of observations.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn key_cols(&self) -> &[String] {
        &self.key_cols
    }

    pub fn value_col(&self) -> &str {
        &self.value_col
    }

    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// All observation values, in frame order.
    pub fn values(&self) -> anyhow::Result<Vec<f64>> {
        Ok(self
            .data
            .column(&self.value_col)?
            .f64()?
            .into_no_null_iter()
            .collect_vec())
    }

    /// Splits a packed key column (e.g. `drug_24h`) into two key columns
    /// on the first occurrence of `separator`.
    ///
    /// Reshaping tags observations with the originating column name
    /// verbatim; this is the explicit follow-up step for layouts that pack
    /// two keys into that name. Errors when a cell has no separator.
    pub fn split_label(
        &self,
        column: &str,
        separator: &str,
        into: (&str, &str),
    ) -> anyhow::Result<LongTable> {
        let labels = self
            .data
            .column(column)
            .with_context(|| {
                format!("label column '{}' not found in long table", column)
            })?
            .str()?;

        let mut left = Vec::with_capacity(labels.len());
        let mut right = Vec::with_capacity(labels.len());
        for (idx, label) in labels.into_iter().enumerate() {
            let label = label.with_context(|| {
                format!("column '{}' row {} is empty", column, idx)
            })?;
            let (l, r) = label.split_once(separator).with_context(|| {
                format!(
                    "label '{}' in column '{}' has no '{}' separator",
                    label, column, separator
                )
            })?;
            left.push(l.to_string());
            right.push(r.to_string());
        }

        let mut data = self.data.clone();
        data.drop_in_place(column)?;
        data.with_column(Series::new(into.0.into(), left))?;
        data.with_column(Series::new(into.1.into(), right))?;

        let mut key_cols = self.key_cols.clone();
        key_cols.retain(|k| k != column);
        key_cols.push(into.0.to_string());
        key_cols.push(into.1.to_string());

        Ok(LongTable::new_unchecked(
            data,
            key_cols,
            self.value_col.clone(),
        ))
    }

    /// Observation values grouped by the distinct values of one key column,
    /// sorted by key for deterministic output.
    pub fn partition(
        &self,
        key: &str,
    ) -> anyhow::Result<Vec<(String, Vec<f64>)>> {
        if !self.key_cols.iter().any(|k| k == key) {
            bail!("'{}' is not a group key column of this table", key)
        }
        let sorted = self
            .data
            .sort([key], SortMultipleOptions::default())?;
        let parts = sorted.partition_by_stable([key], true)?;
        parts
            .into_iter()
            .map(|df| {
                let label = df
                    .column(key)?
                    .str()?
                    .get(0)
                    .unwrap_or_default()
                    .to_string();
                let values = df
                    .column(&self.value_col)?
                    .f64()?
                    .into_no_null_iter()
                    .collect_vec();
                Ok((label, values))
            })
            .collect()
    }
}
