use log::debug;
use serde::{Deserialize, Serialize};

use super::reshape::{to_long, ReshapeSpec};
use super::summarize::{summarize, SummarizeSpec};
use crate::data_structs::{LongTable, PlateSchema, SummaryTable, WideTable};

/// Label post-processing between reshape and summarize: split a packed key
/// column (e.g. `drug_24h`) into two key columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSplit {
    pub column: String,
    pub separator: String,
    pub left: String,
    pub right: String,
}

/// The reshape → group-by → mean/sd pipeline, parameterized by its key
/// columns.
///
/// The course worksheets repeat one script per dataset with only the column
/// lists and grouping keys changed; this type is that shared shape. Build
/// one per dataset, run it once, hand the summary to a chart builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TidyPipeline {
    reshape: ReshapeSpec,
    label_split: Option<LabelSplit>,
    summarize: SummarizeSpec,
}

impl TidyPipeline {
    pub fn new(
        reshape: ReshapeSpec,
        summarize: SummarizeSpec,
    ) -> Self {
        Self {
            reshape,
            label_split: None,
            summarize,
        }
    }

    /// Per-condition layout: every value column is one condition, groups
    /// are the condition labels themselves.
    pub fn per_condition(schema: &PlateSchema) -> Self {
        let reshape = ReshapeSpec::from_schema(schema);
        let summarize =
            SummarizeSpec::new([reshape.label_name().to_string()])
                .with_value_col(reshape.value_name());
        Self::new(reshape, summarize)
    }

    /// Time-course layout: value columns pack treatment and timepoint into
    /// their names; split them after reshaping and group by both keys.
    pub fn time_course(
        schema: &PlateSchema,
        separator: impl Into<String>,
        treatment: impl Into<String>,
        timepoint: impl Into<String>,
    ) -> Self {
        let reshape = ReshapeSpec::from_schema(schema);
        let treatment = treatment.into();
        let timepoint = timepoint.into();
        let label_split = LabelSplit {
            column: reshape.label_name().to_string(),
            separator: separator.into(),
            left: treatment.clone(),
            right: timepoint.clone(),
        };
        let summarize = SummarizeSpec::new([treatment, timepoint])
            .with_value_col(reshape.value_name());
        Self::new(reshape, summarize).with_label_split(label_split)
    }

    pub fn with_reshape(
        mut self,
        reshape: ReshapeSpec,
    ) -> Self {
        self.reshape = reshape;
        self
    }

    pub fn with_label_split(
        mut self,
        label_split: LabelSplit,
    ) -> Self {
        self.label_split = Some(label_split);
        self
    }

    pub fn with_summarize(
        mut self,
        summarize: SummarizeSpec,
    ) -> Self {
        self.summarize = summarize;
        self
    }

    /// Runs the pipeline over one loaded dataset.
    ///
    /// Returns the intermediate long table alongside the summary so box
    /// plots can draw the ungrouped observations.
    pub fn run(
        &self,
        wide: &WideTable,
    ) -> anyhow::Result<(LongTable, SummaryTable)> {
        let mut long = to_long(wide, &self.reshape)?;
        if let Some(split) = &self.label_split {
            debug!(
                "splitting '{}' on '{}' into '{}'/'{}'",
                split.column, split.separator, split.left, split.right
            );
            long = long.split_label(
                &split.column,
                &split.separator,
                (&split.left, &split.right),
            )?;
        }
        let summary = summarize(&long, &self.summarize)?;
        Ok((long, summary))
    }
}
