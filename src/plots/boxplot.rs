use plotly::{BoxPlot, Plot};

use super::axis_layout;
use crate::data_structs::LongTable;

/// Box plot of the ungrouped observations, one box per distinct value of
/// one key column.
///
/// Draws from the long table rather than the summary so quartiles and
/// whiskers come from the raw replicates.
pub fn box_chart(
    long: &LongTable,
    key: &str,
) -> anyhow::Result<Plot> {
    let mut plot = Plot::new();
    for (label, values) in long.partition(key)? {
        let x = vec![label.clone(); values.len()];
        plot.add_trace(BoxPlot::new_xy(x, values).name(label.as_str()));
    }
    plot.set_layout(axis_layout(key, long.value_col()));
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use polars::df;
    use polars::prelude::*;

    use super::*;

    #[test]
    fn test_box_chart_has_one_box_per_condition() -> anyhow::Result<()> {
        let data = df!(
            "condition" => ["a", "a", "a", "b", "b", "b"],
            "value" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        )?;
        let long = LongTable::new_unchecked(
            data,
            vec!["condition".to_string()],
            "value".to_string(),
        );

        let plot = box_chart(&long, "condition")?;
        let json = plot.to_json();
        assert_eq!(json.matches("\"type\":\"box\"").count(), 2);
        assert!(json.contains("\"name\":\"a\""));
        assert!(json.contains("\"name\":\"b\""));
        Ok(())
    }
}
