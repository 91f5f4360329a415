pub use crate::data_structs::{
    LongTable,
    PlateSchema,
    SummaryTable,
    WideTable,
    WideTableBuilder,
    COUNT_NAME,
    LABEL_NAME,
    MEAN_NAME,
    SD_NAME,
    VALUE_NAME,
};
pub use crate::io::{read_csv, read_xlsx, CsvOptions, XlsxReadOptions};
#[cfg(feature = "plots")]
pub use crate::plots::{
    bar_chart,
    box_chart,
    grouped_bar_chart,
    line_chart,
};
pub use crate::tools::{
    summarize,
    to_long,
    LabelSplit,
    ReshapeSpec,
    SummarizeSpec,
    TidyPipeline,
};
pub use crate::utils::{sample_mean, sample_std};
