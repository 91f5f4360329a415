use anyhow::bail;
use itertools::Itertools;
use polars::prelude::*;

use super::schema::PlateSchema;

/// A validated wide table: one row per replicate, one column per condition.
///
/// Constructed through [`WideTableBuilder`] or the loaders in [`crate::io`],
/// never from a raw frame, so the schema invariants (column order, numeric
/// value columns, no empty cells) hold everywhere downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    data: DataFrame,
    schema: PlateSchema,
}

impl WideTable {
    pub(crate) fn new_unchecked(
        data: DataFrame,
        schema: PlateSchema,
    ) -> Self {
        WideTable { data, schema }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn schema(&self) -> &PlateSchema {
        &self.schema
    }

    /// Number of replicate rows.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Measurements of a single condition column.
    pub fn values(
        &self,
        column: &str,
    ) -> anyhow::Result<Vec<f64>> {
        if !self
            .schema
            .value_cols()
            .iter()
            .any(|c| c == column)
        {
            bail!("'{}' is not a value column of this table", column)
        }
        Ok(self
            .data
            .column(column)?
            .f64()?
            .into_no_null_iter()
            .collect_vec())
    }
}

/// Builder for constructing and validating wide tables.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WideTableBuilder {
    check_dtypes: bool,
    check_nulls: bool,
    rechunk: bool,
}

impl Default for WideTableBuilder {
    fn default() -> Self {
        Self::all_checks()
    }
}

impl WideTableBuilder {
    /// Creates a builder with all data validation checks enabled.
    pub fn all_checks() -> Self {
        Self {
            check_dtypes: true,
            check_nulls: true,
            rechunk: true,
        }
    }

    /// Creates a builder with all validation checks disabled.
    pub fn no_checks() -> Self {
        Self {
            check_dtypes: false,
            check_nulls: false,
            rechunk: false,
        }
    }

    /// Sets whether value columns must already hold a numeric type.
    pub fn with_check_dtypes(
        mut self,
        check_dtypes: bool,
    ) -> Self {
        self.check_dtypes = check_dtypes;
        self
    }

    /// Sets whether to reject empty cells.
    pub fn with_check_nulls(
        mut self,
        check_nulls: bool,
    ) -> Self {
        self.check_nulls = check_nulls;
        self
    }

    /// Sets whether to rechunk the data for memory efficiency.
    pub fn with_rechunk(
        mut self,
        rechunk: bool,
    ) -> Self {
        self.rechunk = rechunk;
        self
    }

    /// Builds a wide table from the provided DataFrame.
    pub fn build(
        &self,
        data: DataFrame,
        schema: PlateSchema,
    ) -> anyhow::Result<WideTable> {
        check_column_names(&data, &schema)?;
        if self.check_dtypes {
            check_value_dtypes(&data, &schema)?;
        }
        let mut data = cast_to_schema(data, &schema)?;
        if self.check_nulls {
            check_has_nulls(&data, &schema)?;
        }
        if self.rechunk {
            data.rechunk_mut();
        }
        Ok(WideTable::new_unchecked(data, schema))
    }
}

/// Validates that the frame's columns match the schema in name and order.
fn check_column_names(
    df: &DataFrame,
    schema: &PlateSchema,
) -> anyhow::Result<()> {
    let found = df
        .get_column_names()
        .iter()
        .map(|n| n.as_str())
        .collect_vec();
    let expected = schema.col_names();
    if found != expected {
        bail!(
            "column mismatch: expected [{}], found [{}]",
            expected.iter().join(", "),
            found.iter().join(", ")
        )
    }
    Ok(())
}

fn check_value_dtypes(
    df: &DataFrame,
    schema: &PlateSchema,
) -> anyhow::Result<()> {
    for name in schema.value_cols() {
        let dtype = df.column(name)?.dtype();
        if !dtype.is_numeric() {
            bail!(
                "column '{}' holds {} cells, expected numeric measurements",
                name,
                dtype
            )
        }
    }
    Ok(())
}

/// Casts keys to strings and values to floats.
fn cast_to_schema(
    df: DataFrame,
    schema: &PlateSchema,
) -> anyhow::Result<DataFrame> {
    let exprs = schema
        .key_cols()
        .iter()
        .map(|k| col(k.as_str()).cast(DataType::String))
        .chain(
            schema
                .value_cols()
                .iter()
                .map(|v| col(v.as_str()).cast(DataType::Float64)),
        )
        .collect_vec();
    Ok(df.lazy().select(exprs).collect()?)
}

/// Validates that no schema column contains empty cells.
fn check_has_nulls(
    df: &DataFrame,
    schema: &PlateSchema,
) -> anyhow::Result<()> {
    for name in schema.col_names() {
        let nulls = df.column(name)?.null_count();
        if nulls > 0 {
            bail!("column '{}' contains {} empty cells", name, nulls)
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    fn test_schema() -> PlateSchema {
        PlateSchema::try_new(["replicate"], ["control", "treated"]).unwrap()
    }

    fn test_df() -> DataFrame {
        df!(
            "replicate" => ["r1", "r2", "r3"],
            "control" => [1.0, 2.0, 3.0],
            "treated" => [4.0, 5.0, 6.0]
        )
        .unwrap()
    }

    #[test]
    fn test_build_accepts_matching_frame() -> anyhow::Result<()> {
        let wide = WideTableBuilder::default().build(test_df(), test_schema())?;
        assert_eq!(wide.height(), 3);
        assert_eq!(wide.values("control")?, vec![1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_build_casts_integer_measurements() -> anyhow::Result<()> {
        let df = df!(
            "replicate" => ["r1", "r2"],
            "control" => [1i64, 2],
            "treated" => [3i64, 4]
        )?;
        let wide = WideTableBuilder::default().build(df, test_schema())?;
        assert_eq!(
            wide.data().column("control")?.dtype(),
            &DataType::Float64
        );
        Ok(())
    }

    #[test]
    fn test_build_rejects_reordered_columns() {
        let df = df!(
            "control" => [1.0, 2.0],
            "replicate" => ["r1", "r2"],
            "treated" => [3.0, 4.0]
        )
        .unwrap();
        let result = WideTableBuilder::default().build(df, test_schema());
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_missing_column() {
        let df = df!(
            "replicate" => ["r1", "r2"],
            "control" => [1.0, 2.0]
        )
        .unwrap();
        let result = WideTableBuilder::default().build(df, test_schema());
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_text_measurements() {
        let df = df!(
            "replicate" => ["r1", "r2"],
            "control" => ["high", "low"],
            "treated" => [3.0, 4.0]
        )
        .unwrap();
        let result = WideTableBuilder::default().build(df, test_schema());
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_empty_cells() {
        let df = df!(
            "replicate" => ["r1", "r2"],
            "control" => [Some(1.0), None],
            "treated" => [3.0, 4.0]
        )
        .unwrap();
        let result = WideTableBuilder::default().build(df, test_schema());
        assert!(result.is_err());
    }

    #[test]
    fn test_no_checks_ignores_empty_cells() {
        let df = df!(
            "replicate" => ["r1", "r2"],
            "control" => [Some(1.0), None],
            "treated" => [3.0, 4.0]
        )
        .unwrap();
        let result = WideTableBuilder::no_checks().build(df, test_schema());
        assert!(result.is_ok());
    }

    #[test]
    fn test_values_rejects_key_column() -> anyhow::Result<()> {
        let wide = WideTableBuilder::default().build(test_df(), test_schema())?;
        assert!(wide.values("replicate").is_err());
        Ok(())
    }
}
