use crate::stats::MetricStats;

/// Population-relative z-score of `value`.
///
/// Missing values, missing statistics and a zero or non-finite deviation all
/// yield `0.0`: without information the candidate counts as average.
pub fn z_score(value: Option<f64>, stats: Option<&MetricStats>) -> f64 {
    let (Some(value), Some(stats)) = (value.filter(|value| value.is_finite()), stats) else {
        return 0.0;
    };

    if !stats.standard_deviation.is_finite() || stats.standard_deviation == 0.0 {
        return 0.0;
    }

    (value - stats.mean) / stats.standard_deviation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_stats;

    #[test]
    fn zero_spread_and_missing_values_are_neutral() {
        let stats = compute_stats([5.0, 5.0, 5.0]);
        assert_eq!(z_score(Some(5.0), Some(&stats)), 0.0);
        assert_eq!(z_score(Some(99.0), Some(&stats)), 0.0);
        assert_eq!(z_score(None, Some(&stats)), 0.0);

        let spread = MetricStats::new(10.0, 2.0);
        assert_eq!(z_score(Some(f64::NAN), Some(&spread)), 0.0);
        assert_eq!(z_score(Some(12.0), None), 0.0);
        assert_eq!(
            z_score(Some(12.0), Some(&MetricStats::new(10.0, f64::NAN))),
            0.0
        );
    }

    #[test]
    fn standardizes_against_mean_and_deviation() {
        let stats = MetricStats::new(10.0, 2.0);
        assert_eq!(z_score(Some(14.0), Some(&stats)), 2.0);
        assert_eq!(z_score(Some(9.0), Some(&stats)), -0.5);
    }
}
