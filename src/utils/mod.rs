//! Shared helpers: scalar statistics and Polars schema plumbing.

use itertools::Itertools;
use log::warn;
use polars::prelude::*;

mod stats;
pub use stats::*;

/// Creates a schema from separate arrays of names and data types.
pub(crate) fn schema_from_arrays(
    names: &[&str],
    dtypes: &[DataType],
) -> Schema {
    if names.len() != dtypes.len() {
        warn!(
            "Mismatch between names and dtypes array lengths: {} vs {}",
            names.len(),
            dtypes.len()
        );
    }
    Schema::from_iter(names.iter().cloned().map_into().zip(dtypes.iter().cloned()))
}
