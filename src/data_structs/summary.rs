use anyhow::{bail, Context};
use itertools::Itertools;
use polars::prelude::*;

/// Per-group summary statistics produced by
/// [`summarize`](crate::tools::summarize).
///
/// One row per distinct group-key tuple: the key columns, the group mean,
/// the sample standard deviation and the observation count. A group with a
/// single observation carries a NaN standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    data: DataFrame,
    key_cols: Vec<String>,
    mean_col: String,
    sd_col: String,
    count_col: String,
}

impl SummaryTable {
    pub(crate) fn new_unchecked(
        data: DataFrame,
        key_cols: Vec<String>,
        mean_col: String,
        sd_col: String,
        count_col: String,
    ) -> Self {
        SummaryTable {
            data,
            key_cols,
            mean_col,
            sd_col,
            count_col,
        }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Number of groups.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn key_cols(&self) -> &[String] {
        &self.key_cols
    }

    pub fn mean_col(&self) -> &str {
        &self.mean_col
    }

    pub fn sd_col(&self) -> &str {
        &self.sd_col
    }

    pub fn count_col(&self) -> &str {
        &self.count_col
    }

    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Group means, in frame order.
    pub fn means(&self) -> anyhow::Result<Vec<f64>> {
        Ok(self
            .data
            .column(&self.mean_col)?
            .f64()?
            .into_no_null_iter()
            .collect_vec())
    }

    /// Group sample standard deviations, NaN where undefined.
    pub fn sds(&self) -> anyhow::Result<Vec<f64>> {
        Ok(self
            .data
            .column(&self.sd_col)?
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect_vec())
    }

    /// Group observation counts, in frame order.
    pub fn counts(&self) -> anyhow::Result<Vec<u32>> {
        Ok(self
            .data
            .column(&self.count_col)?
            .u32()?
            .into_no_null_iter()
            .collect_vec())
    }

    /// Values of one group-key column, in frame order.
    pub fn labels(
        &self,
        key: &str,
    ) -> anyhow::Result<Vec<String>> {
        if !self.key_cols.iter().any(|k| k == key) {
            bail!("'{}' is not a group key column of this summary", key)
        }
        Ok(self
            .data
            .column(key)?
            .str()
            .with_context(|| {
                format!("group key column '{}' is not a string column", key)
            })?
            .into_no_null_iter()
            .map(str::to_string)
            .collect_vec())
    }

    /// Splits the summary by the distinct values of one key column,
    /// preserving row order inside each part.
    pub fn partition(
        &self,
        key: &str,
    ) -> anyhow::Result<Vec<(String, SummaryTable)>> {
        if !self.key_cols.iter().any(|k| k == key) {
            bail!("'{}' is not a group key column of this summary", key)
        }
        let parts = self.data.partition_by_stable([key], true)?;
        parts
            .into_iter()
            .map(|df| {
                let label = df
                    .column(key)?
                    .str()?
                    .get(0)
                    .unwrap_or_default()
                    .to_string();
                let part = SummaryTable::new_unchecked(
                    df,
                    self.key_cols.clone(),
                    self.mean_col.clone(),
                    self.sd_col.clone(),
                    self.count_col.clone(),
                );
                Ok((label, part))
            })
            .collect()
    }
}
