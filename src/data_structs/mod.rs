//! Core table types: the expected wide layout and the validated wide, long
//! and summary frames flowing through the pipeline.

mod long;
mod schema;
mod summary;
mod wide;

pub use long::LongTable;
pub use schema::{
    PlateSchema,
    COUNT_NAME,
    LABEL_NAME,
    MEAN_NAME,
    SD_NAME,
    VALUE_NAME,
};
pub use summary::SummaryTable;
pub use wide::{WideTable, WideTableBuilder};
