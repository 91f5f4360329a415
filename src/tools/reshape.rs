use anyhow::bail;
use itertools::Itertools;
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data_structs::{
    LongTable,
    PlateSchema,
    WideTable,
    LABEL_NAME,
    VALUE_NAME,
};

/// Which wide columns to unpivot and what to call the outputs.
///
/// Key columns are carried through unchanged; every cell of a value column
/// becomes one observation row tagged with the originating column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReshapeSpec {
    key_cols: Vec<String>,
    value_cols: Vec<String>,
    label_name: String,
    value_name: String,
}

impl ReshapeSpec {
    pub fn new<K, V, S, T>(
        key_cols: K,
        value_cols: V,
    ) -> Self
    where
        K: IntoIterator<Item = S>,
        V: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>, {
        Self {
            key_cols: key_cols.into_iter().map_into().collect_vec(),
            value_cols: value_cols.into_iter().map_into().collect_vec(),
            label_name: LABEL_NAME.to_string(),
            value_name: VALUE_NAME.to_string(),
        }
    }

    /// Unpivots every value column of `schema`, carrying its key columns.
    pub fn from_schema(schema: &PlateSchema) -> Self {
        Self::new(schema.key_cols().to_vec(), schema.value_cols().to_vec())
    }

    /// Sets the name of the condition-label output column.
    pub fn with_label_name(
        mut self,
        label_name: impl Into<String>,
    ) -> Self {
        self.label_name = label_name.into();
        self
    }

    /// Sets the name of the observation output column.
    pub fn with_value_name(
        mut self,
        value_name: impl Into<String>,
    ) -> Self {
        self.value_name = value_name.into();
        self
    }

    pub fn label_name(&self) -> &str {
        &self.label_name
    }

    pub fn value_name(&self) -> &str {
        &self.value_name
    }
}

/// Unpivots a wide table into one row per observation.
///
/// The long table has wide-height × value-column-count rows. Row order is
/// unspecified; only grouping correctness matters downstream. No parsing of
/// column names happens here; packed labels are split afterwards with
/// [`LongTable::split_label`].
pub fn to_long(
    wide: &WideTable,
    spec: &ReshapeSpec,
) -> anyhow::Result<LongTable> {
    if spec.value_cols.is_empty() {
        bail!("reshape needs at least one value column")
    }
    for name in &spec.value_cols {
        if !wide.schema().value_cols().contains(name) {
            bail!("'{}' is not a value column of the wide table", name)
        }
    }
    for name in &spec.key_cols {
        if !wide.schema().key_cols().contains(name) {
            bail!("'{}' is not a key column of the wide table", name)
        }
    }
    if spec.key_cols.iter().any(|k| *k == spec.label_name)
        || spec.key_cols.iter().any(|k| *k == spec.value_name)
        || spec.label_name == spec.value_name
    {
        bail!(
            "output columns '{}'/'{}' collide with the carried key columns",
            spec.label_name,
            spec.value_name
        )
    }

    let frames = spec
        .value_cols
        .iter()
        .map(|name| {
            let mut exprs = spec
                .key_cols
                .iter()
                .map(|k| col(k.as_str()))
                .collect_vec();
            exprs.push(
                lit(name.as_str()).alias(spec.label_name.as_str()),
            );
            exprs.push(
                col(name.as_str()).alias(spec.value_name.as_str()),
            );
            wide.data().clone().lazy().select(exprs)
        })
        .collect_vec();
    let data = concat(frames, UnionArgs::default())?.collect()?;
    debug!(
        "reshaped {} x {} wide columns into {} observations",
        wide.height(),
        spec.value_cols.len(),
        data.height()
    );

    let mut key_cols = spec.key_cols.clone();
    key_cols.push(spec.label_name.clone());
    Ok(LongTable::new_unchecked(
        data,
        key_cols,
        spec.value_name.clone(),
    ))
}
