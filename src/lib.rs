//! # platetidy
//!
//! `platetidy` is a small library for the data handling behind biology
//! coursework: it loads plate-reader assay spreadsheets, reshapes the wide
//! per-condition layout into a tidy long table, computes grouped summary
//! statistics, and renders bar, line and box charts.
//!
//! One pipeline, run once per dataset: a loader reads a rectangular
//! worksheet region into a validated [`data_structs::WideTable`]; the
//! reshaper unpivots it into one row per observation; the aggregator groups
//! those rows by one or more key columns and computes the mean and sample
//! standard deviation per group; the chart builders turn the result into
//! `plotly` figures. Every stage hands an immutable table to the next;
//! nothing is persisted and nothing runs concurrently.
//!
//! ## Structure
//!
//! * [`data_structs`]: the expected wide layout
//!   ([`data_structs::PlateSchema`]) and the validated wide, long and
//!   summary frames.
//! * [`io`]: one-shot XLSX (`calamine`) and CSV (`polars`) loaders that
//!   fail fast on a schema mismatch.
//! * [`tools`]: the reshape and summarize stages and the
//!   [`tools::TidyPipeline`] tying them together.
//! * [`plots`]: bar, line and box chart builders (feature `plots`, enabled
//!   by default).
//! * [`utils`]: scalar statistics helpers.
//!
//! ## Usage
//!
//! ```no_run
//! use platetidy::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let schema = PlateSchema::conditions(["control", "drug_a", "drug_b"])?;
//!     let wide = read_xlsx("growth.xlsx", &schema, &XlsxReadOptions::default())?;
//!
//!     let (long, summary) = TidyPipeline::per_condition(&schema).run(&wide)?;
//!
//!     bar_chart(&summary, LABEL_NAME)?.write_html("growth_bars.html");
//!     box_chart(&long, LABEL_NAME)?.write_html("growth_boxes.html");
//!     Ok(())
//! }
//! ```
//!
//! Time-course worksheets pack treatment and timepoint into the column
//! names (`drug_24h`); [`tools::TidyPipeline::time_course`] splits them
//! into separate key columns and groups by both.

pub mod data_structs;
pub mod io;
#[cfg(feature = "plots")]
pub mod plots;
pub mod prelude;
pub mod tools;
pub mod utils;
