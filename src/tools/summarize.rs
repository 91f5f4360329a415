use anyhow::bail;
use itertools::Itertools;
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data_structs::{
    LongTable,
    SummaryTable,
    COUNT_NAME,
    MEAN_NAME,
    SD_NAME,
    VALUE_NAME,
};

/// Group keys and output column names for the aggregation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeSpec {
    key_cols: Vec<String>,
    value_col: String,
    mean_name: String,
    sd_name: String,
    count_name: String,
}

impl SummarizeSpec {
    /// Groups by the given key columns over the default value column.
    pub fn new<K, S>(key_cols: K) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>, {
        Self {
            key_cols: key_cols.into_iter().map_into().collect_vec(),
            value_col: VALUE_NAME.to_string(),
            mean_name: MEAN_NAME.to_string(),
            sd_name: SD_NAME.to_string(),
            count_name: COUNT_NAME.to_string(),
        }
    }

    /// Groups by every key column the long table carries.
    pub fn for_long(long: &LongTable) -> Self {
        Self::new(long.key_cols().to_vec())
            .with_value_col(long.value_col())
    }

    pub fn with_value_col(
        mut self,
        value_col: impl Into<String>,
    ) -> Self {
        self.value_col = value_col.into();
        self
    }

    pub fn with_mean_name(
        mut self,
        mean_name: impl Into<String>,
    ) -> Self {
        self.mean_name = mean_name.into();
        self
    }

    pub fn with_sd_name(
        mut self,
        sd_name: impl Into<String>,
    ) -> Self {
        self.sd_name = sd_name.into();
        self
    }

    pub fn with_count_name(
        mut self,
        count_name: impl Into<String>,
    ) -> Self {
        self.count_name = count_name.into();
        self
    }

    pub fn key_cols(&self) -> &[String] {
        &self.key_cols
    }
}

/// Groups observations by the distinct key tuple and computes the mean and
/// the sample standard deviation of the value column per group.
///
/// The output holds exactly one row per distinct key tuple, sorted by the
/// key columns. The standard deviation uses the n - 1 denominator; a group
/// with a single observation keeps its mean and carries a NaN standard
/// deviation so that rendering can decide how to display it.
pub fn summarize(
    long: &LongTable,
    spec: &SummarizeSpec,
) -> anyhow::Result<SummaryTable> {
    if spec.key_cols.is_empty() {
        bail!("summarize needs at least one group key column")
    }
    for key in &spec.key_cols {
        if long.data().column(key).is_err() {
            bail!("group key column '{}' not found in long table", key)
        }
    }
    if long.data().column(&spec.value_col).is_err() {
        bail!("value column '{}' not found in long table", spec.value_col)
    }
    if [&spec.mean_name, &spec.sd_name, &spec.count_name]
        .iter()
        .any(|name| spec.key_cols.contains(*name))
    {
        bail!("statistic column names collide with the group key columns")
    }

    let keys = spec
        .key_cols
        .iter()
        .map(|k| col(k.as_str()))
        .collect_vec();
    let value = col(spec.value_col.as_str());
    let data = long
        .data()
        .clone()
        .lazy()
        .group_by(keys)
        .agg([
            value.clone().mean().alias(spec.mean_name.as_str()),
            // a lone observation leaves the n - 1 denominator empty
            value
                .clone()
                .std(1)
                .fill_null(lit(f64::NAN))
                .alias(spec.sd_name.as_str()),
            value.count().alias(spec.count_name.as_str()),
        ])
        .sort(
            spec.key_cols
                .iter()
                .map(|k| PlSmallStr::from(k.as_str()))
                .collect_vec(),
            SortMultipleOptions::default(),
        )
        .collect()?;
    debug!(
        "summarized {} observations into {} groups",
        long.height(),
        data.height()
    );

    Ok(SummaryTable::new_unchecked(
        data,
        spec.key_cols.clone(),
        spec.mean_name.clone(),
        spec.sd_name.clone(),
        spec.count_name.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use polars::df;

    use super::*;

    fn long_from(df: DataFrame) -> LongTable {
        LongTable::new_unchecked(
            df,
            vec!["condition".to_string()],
            "value".to_string(),
        )
    }

    #[test]
    fn test_one_row_per_distinct_key() -> anyhow::Result<()> {
        let long = long_from(df!(
            "condition" => ["a", "b", "a", "c", "b", "a"],
            "value" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        )?);
        let summary = summarize(&long, &SummarizeSpec::new(["condition"]))?;
        assert_eq!(summary.height(), 3);
        assert_eq!(summary.labels("condition")?, vec!["a", "b", "c"]);
        assert_eq!(summary.counts()?, vec![3, 2, 1]);
        Ok(())
    }

    #[test]
    fn test_pair_statistics() -> anyhow::Result<()> {
        let long = long_from(df!(
            "condition" => ["a", "a"],
            "value" => [2.0, 4.0]
        )?);
        let summary = summarize(&long, &SummarizeSpec::new(["condition"]))?;
        assert_approx_eq!(summary.means()?[0], 3.0);
        assert_approx_eq!(summary.sds()?[0], 2f64.sqrt());
        Ok(())
    }

    #[test]
    fn test_five_point_statistics() -> anyhow::Result<()> {
        let long = long_from(df!(
            "condition" => ["a"; 5],
            "value" => [1.0, 2.0, 3.0, 4.0, 5.0]
        )?);
        let summary = summarize(&long, &SummarizeSpec::new(["condition"]))?;
        assert_approx_eq!(summary.means()?[0], 3.0);
        assert_approx_eq!(summary.sds()?[0], 2.5f64.sqrt());
        Ok(())
    }

    #[test]
    fn test_single_observation_group_keeps_mean() -> anyhow::Result<()> {
        let long = long_from(df!(
            "condition" => ["lone", "pair", "pair"],
            "value" => [7.0, 1.0, 3.0]
        )?);
        let summary = summarize(&long, &SummarizeSpec::new(["condition"]))?;

        assert_eq!(summary.labels("condition")?, vec!["lone", "pair"]);
        assert_approx_eq!(summary.means()?[0], 7.0);
        assert!(summary.sds()?[0].is_nan());
        assert_approx_eq!(summary.sds()?[1], 2f64.sqrt());
        Ok(())
    }

    #[test]
    fn test_two_key_grouping() -> anyhow::Result<()> {
        let df = df!(
            "treatment" => ["ctrl", "ctrl", "drug", "drug", "ctrl"],
            "timepoint" => ["0h", "0h", "0h", "24h", "24h"],
            "value" => [1.0, 3.0, 5.0, 7.0, 9.0]
        )?;
        let long = LongTable::new_unchecked(
            df,
            vec!["treatment".to_string(), "timepoint".to_string()],
            "value".to_string(),
        );
        let summary = summarize(
            &long,
            &SummarizeSpec::new(["treatment", "timepoint"]),
        )?;

        assert_eq!(summary.height(), 4);
        assert_eq!(summary.labels("treatment")?, vec![
            "ctrl", "ctrl", "drug", "drug"
        ]);
        assert_eq!(summary.labels("timepoint")?, vec![
            "0h", "24h", "0h", "24h"
        ]);
        assert_approx_eq!(summary.means()?[0], 2.0);
        assert_eq!(summary.counts()?, vec![2, 1, 1, 1]);
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_rejected() -> anyhow::Result<()> {
        let long = long_from(df!(
            "condition" => ["a"],
            "value" => [1.0]
        )?);
        let result = summarize(&long, &SummarizeSpec::new(["treatment"]));
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_custom_statistic_names() -> anyhow::Result<()> {
        let long = long_from(df!(
            "condition" => ["a", "a"],
            "value" => [1.0, 2.0]
        )?);
        let spec = SummarizeSpec::new(["condition"])
            .with_mean_name("avg")
            .with_sd_name("spread")
            .with_count_name("replicates");
        let summary = summarize(&long, &spec)?;
        assert_eq!(summary.mean_col(), "avg");
        assert!(summary.data().column("spread").is_ok());
        assert_eq!(summary.counts()?, vec![2]);
        Ok(())
    }
}
