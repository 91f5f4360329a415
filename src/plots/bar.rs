use plotly::layout::BarMode;
use plotly::{Bar, Plot};

use super::{axis_layout, error_bars, has_error_bars};
use crate::data_structs::SummaryTable;

/// Bar chart of group means with sd error bars, one bar per group.
pub fn bar_chart(
    summary: &SummaryTable,
    x_key: &str,
) -> anyhow::Result<Plot> {
    let x = summary.labels(x_key)?;
    let y = summary.means()?;
    let sds = summary.sds()?;

    let mut trace = Bar::new(x, y);
    if has_error_bars(&sds) {
        trace = trace.error_y(error_bars(sds));
    }

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(axis_layout(x_key, summary.mean_col()));
    Ok(plot)
}

/// Grouped bar chart: bars clustered over `x_key`, one colored trace per
/// distinct `series_key` value.
pub fn grouped_bar_chart(
    summary: &SummaryTable,
    x_key: &str,
    series_key: &str,
) -> anyhow::Result<Plot> {
    let mut plot = Plot::new();
    for (label, part) in summary.partition(series_key)? {
        let x = part.labels(x_key)?;
        let y = part.means()?;
        let sds = part.sds()?;

        let mut trace = Bar::new(x, y).name(label.as_str());
        if has_error_bars(&sds) {
            trace = trace.error_y(error_bars(sds));
        }
        plot.add_trace(trace);
    }
    plot.set_layout(
        axis_layout(x_key, summary.mean_col()).bar_mode(BarMode::Group),
    );
    Ok(plot)
}
