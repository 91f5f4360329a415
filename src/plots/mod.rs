//! Chart builders over summary and long tables.
//!
//! Thin wrappers around `plotly`: given consistent columns they draw
//! consistent marks. Colors, fonts and ordering are presentation concerns
//! left to the caller; `Plot::write_html` produces the static artifact.

mod bar;
mod boxplot;
mod line;

pub use bar::{bar_chart, grouped_bar_chart};
pub use boxplot::box_chart;
pub use line::line_chart;

use plotly::common::{ErrorData, ErrorType, Title};
use plotly::layout::Axis;
use plotly::Layout;

/// Symmetric y error bars from per-group standard deviations.
///
/// NaN entries serialize as null and draw no bar, so single-observation
/// groups plot without a spread mark.
fn error_bars(sds: Vec<f64>) -> ErrorData {
    ErrorData::new(ErrorType::Data).array(sds).visible(true)
}

fn has_error_bars(sds: &[f64]) -> bool {
    sds.iter().any(|s| !s.is_nan())
}

fn axis_layout(
    x_title: &str,
    y_title: &str,
) -> Layout {
    Layout::new()
        .x_axis(Axis::new().title(Title::with_text(x_title)))
        .y_axis(Axis::new().title(Title::with_text(y_title)))
}
