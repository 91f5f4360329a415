use plotly::common::Mode;
use plotly::{Plot, Scatter};

use super::{axis_layout, error_bars, has_error_bars};
use crate::data_structs::SummaryTable;

/// Time-course line chart: one line per `series_key` value over the
/// `x_key` categories, group means as points and sd error bars.
pub fn line_chart(
    summary: &SummaryTable,
    x_key: &str,
    series_key: &str,
) -> anyhow::Result<Plot> {
    let mut plot = Plot::new();
    for (label, part) in summary.partition(series_key)? {
        let x = part.labels(x_key)?;
        let y = part.means()?;
        let sds = part.sds()?;

        let mut trace = Scatter::new(x, y)
            .name(label.as_str())
            .mode(Mode::Lines);
        if has_error_bars(&sds) {
            trace = trace.error_y(error_bars(sds));
        }
        plot.add_trace(trace);
    }
    plot.set_layout(axis_layout(x_key, summary.mean_col()));
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use polars::df;
    use polars::prelude::*;

    use super::*;

    #[test]
    fn test_line_chart_has_one_line_per_treatment() -> anyhow::Result<()> {
        let data = df!(
            "treatment" => ["ctrl", "ctrl", "drug", "drug"],
            "timepoint" => ["0h", "24h", "0h", "24h"],
            "mean" => [1.0, 2.0, 3.0, 4.0],
            "sd" => [0.1, 0.2, 0.3, f64::NAN],
            "n" => [3u32, 3, 3, 1]
        )?;
        let summary = SummaryTable::new_unchecked(
            data,
            vec!["treatment".to_string(), "timepoint".to_string()],
            "mean".to_string(),
            "sd".to_string(),
            "n".to_string(),
        );

        let plot = line_chart(&summary, "timepoint", "treatment")?;
        let json = plot.to_json();
        assert_eq!(json.matches("\"mode\":\"lines\"").count(), 2);
        assert!(json.contains("\"name\":\"ctrl\""));
        assert!(json.contains("\"name\":\"drug\""));
        Ok(())
    }
}
