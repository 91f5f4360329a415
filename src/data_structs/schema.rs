use anyhow::bail;
use itertools::Itertools;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::schema_from_arrays;

/// Default name of the condition-label column produced by reshaping.
pub const LABEL_NAME: &str = "condition";
/// Default name of the observation column produced by reshaping.
pub const VALUE_NAME: &str = "value";
/// Name of the per-group mean column in summary tables.
pub const MEAN_NAME: &str = "mean";
/// Name of the per-group sample standard deviation column in summary tables.
pub const SD_NAME: &str = "sd";
/// Name of the per-group observation count column in summary tables.
pub const COUNT_NAME: &str = "n";

/// Expected wide layout of one loaded dataset.
///
/// Key columns hold replicate metadata (strings); value columns hold the
/// measurements of one condition each (floats). Loaders validate the file
/// against this schema and fail fast on a mismatch, so no downstream stage
/// ever guesses column positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateSchema {
    key_cols: Vec<String>,
    value_cols: Vec<String>,
}

impl PlateSchema {
    /// Creates a schema with metadata key columns followed by value columns.
    pub fn try_new<K, V, S, T>(
        key_cols: K,
        value_cols: V,
    ) -> anyhow::Result<Self>
    where
        K: IntoIterator<Item = S>,
        V: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>, {
        let key_cols = key_cols.into_iter().map_into().collect_vec();
        let value_cols = value_cols.into_iter().map_into().collect_vec();

        if value_cols.is_empty() {
            bail!("a plate schema needs at least one value column")
        }
        if key_cols
            .iter()
            .chain(value_cols.iter())
            .any(String::is_empty)
        {
            bail!("column names must not be empty")
        }
        if !key_cols
            .iter()
            .chain(value_cols.iter())
            .all_unique()
        {
            bail!(
                "duplicate column name in schema: [{}]",
                key_cols
                    .iter()
                    .chain(value_cols.iter())
                    .join(", ")
            )
        }

        Ok(Self {
            key_cols,
            value_cols,
        })
    }

    /// Schema of a dataset with no metadata columns, only measured
    /// conditions.
    pub fn conditions<V, T>(value_cols: V) -> anyhow::Result<Self>
    where
        V: IntoIterator<Item = T>,
        T: Into<String>, {
        Self::try_new(Vec::<String>::new(), value_cols)
    }

    /// Metadata column names.
    pub fn key_cols(&self) -> &[String] {
        &self.key_cols
    }

    /// Measurement column names, one per condition.
    pub fn value_cols(&self) -> &[String] {
        &self.value_cols
    }

    /// All column names in file order: keys first, then values.
    pub fn col_names(&self) -> Vec<&str> {
        self.key_cols
            .iter()
            .chain(self.value_cols.iter())
            .map(String::as_str)
            .collect_vec()
    }

    /// Total number of columns.
    pub fn width(&self) -> usize {
        self.key_cols.len() + self.value_cols.len()
    }

    /// Creates a Polars schema for this layout.
    pub fn polars_schema(&self) -> Schema {
        let names = self.col_names();
        let dtypes = self
            .key_cols
            .iter()
            .map(|_| DataType::String)
            .chain(self.value_cols.iter().map(|_| DataType::Float64))
            .collect_vec();
        schema_from_arrays(&names, &dtypes)
    }

    /// Whether `name` is one of the schema's columns.
    pub fn has_column(
        &self,
        name: &str,
    ) -> bool {
        self.key_cols
            .iter()
            .chain(self.value_cols.iter())
            .any(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_orders_keys_before_values() -> anyhow::Result<()> {
        let schema =
            PlateSchema::try_new(["replicate"], ["control", "treated"])?;
        assert_eq!(schema.col_names(), vec![
            "replicate", "control", "treated"
        ]);
        assert_eq!(schema.width(), 3);
        Ok(())
    }

    #[test]
    fn test_schema_rejects_duplicates() {
        let result = PlateSchema::try_new(["condition"], ["condition"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_rejects_empty_value_list() {
        let result = PlateSchema::conditions(Vec::<String>::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_polars_schema_dtypes() -> anyhow::Result<()> {
        let schema = PlateSchema::try_new(["plate"], ["a", "b"])?;
        let pl_schema = schema.polars_schema();
        assert_eq!(pl_schema.get("plate"), Some(&DataType::String));
        assert_eq!(pl_schema.get("a"), Some(&DataType::Float64));
        assert_eq!(pl_schema.get("b"), Some(&DataType::Float64));
        Ok(())
    }
}
