use log::warn;
use num::ToPrimitive;
use statrs::statistics::Statistics;

/// Arithmetic mean of a sample.
///
/// NaN when the sample is empty.
pub fn sample_mean<V>(values: &[V]) -> f64
where
    V: ToPrimitive, {
    if values.is_empty() {
        warn!("cannot compute a mean over an empty sample");
        return f64::NAN;
    }
    values
        .iter()
        .map(|v| v.to_f64().unwrap_or(f64::NAN))
        .mean()
}

/// Sample standard deviation with Bessel's correction (n - 1 denominator).
///
/// NaN when fewer than two observations are present; a single measurement
/// carries no spread information.
pub fn sample_std<V>(values: &[V]) -> f64
where
    V: ToPrimitive, {
    if values.len() < 2 {
        return f64::NAN;
    }
    values
        .iter()
        .map(|v| v.to_f64().unwrap_or(f64::NAN))
        .std_dev()
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_mean_and_std_of_pair() {
        let values = vec![2.0, 4.0];
        assert_approx_eq!(sample_mean(&values), 3.0);
        assert_approx_eq!(sample_std(&values), 2f64.sqrt());
    }

    #[test]
    fn test_std_uses_bessel_correction() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_approx_eq!(sample_mean(&values), 3.0);
        assert_approx_eq!(sample_std(&values), 2.5f64.sqrt());
        assert_approx_eq!(sample_std(&values), 1.5811, 1e-4);
    }

    #[test]
    fn test_single_observation_has_no_spread() {
        let values = vec![42.0];
        assert_approx_eq!(sample_mean(&values), 42.0);
        assert!(sample_std(&values).is_nan());
    }

    #[test]
    fn test_empty_sample_is_nan() {
        let values: Vec<f64> = vec![];
        assert!(sample_mean(&values).is_nan());
        assert!(sample_std(&values).is_nan());
    }

    #[test]
    fn test_integer_samples_convert() {
        let values = vec![1u32, 2, 3];
        assert_approx_eq!(sample_mean(&values), 2.0);
        assert_approx_eq!(sample_std(&values), 1.0);
    }
}
