//! The tidy → summarize pipeline stages and their configuration.

mod pipeline;
mod reshape;
mod summarize;

pub use pipeline::{LabelSplit, TidyPipeline};
pub use reshape::{to_long, ReshapeSpec};
pub use summarize::{summarize, SummarizeSpec};
