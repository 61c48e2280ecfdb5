//! Population statistics used as the reference frame for z-scores.

use crate::candidate::Candidate;
use crate::registry::MetricKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean and sample standard deviation of one metric across a population.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricStats {
    pub mean: f64,
    pub standard_deviation: f64,
}

impl MetricStats {
    pub const fn new(mean: f64, standard_deviation: f64) -> Self {
        Self {
            mean,
            standard_deviation,
        }
    }
}

/// Per-metric statistics computed once per ranking request and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PopulationStats {
    by_metric: BTreeMap<MetricKey, MetricStats>,
}

impl PopulationStats {
    pub fn get(&self, key: MetricKey) -> Option<&MetricStats> {
        self.by_metric.get(&key)
    }

    pub fn insert(&mut self, key: MetricKey, stats: MetricStats) {
        self.by_metric.insert(key, stats);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MetricKey, &MetricStats)> {
        self.by_metric.iter()
    }

    pub fn len(&self) -> usize {
        self.by_metric.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_metric.is_empty()
    }
}

impl FromIterator<(MetricKey, MetricStats)> for PopulationStats {
    fn from_iter<T: IntoIterator<Item = (MetricKey, MetricStats)>>(iter: T) -> Self {
        Self {
            by_metric: iter.into_iter().collect(),
        }
    }
}

/// Mean and sample (n - 1) standard deviation over the finite values.
///
/// No finite values yield `{0, 0}`; a single value yields `{value, 0}`.
pub fn compute_stats<I>(values: I) -> MetricStats
where
    I: IntoIterator,
    I::Item: Into<Option<f64>>,
{
    let clean: Vec<f64> = values
        .into_iter()
        .filter_map(|value| -> Option<f64> { value.into() })
        .filter(|value| value.is_finite())
        .collect();

    if clean.is_empty() {
        return MetricStats::default();
    }

    let count = clean.len() as f64;
    let mean = clean.iter().sum::<f64>() / count;
    if clean.len() == 1 {
        return MetricStats::new(mean, 0.0);
    }

    let variance = clean
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (count - 1.0);

    MetricStats::new(mean, variance.sqrt())
}

/// Statistics for each requested metric, each computed only from the
/// candidates holding a valid value for that metric.
pub fn compute_stats_by_metric<'a, K>(candidates: &[Candidate], metric_keys: K) -> PopulationStats
where
    K: IntoIterator<Item = &'a MetricKey>,
{
    let stats: PopulationStats = metric_keys
        .into_iter()
        .map(|key| {
            let values = candidates.iter().map(|candidate| candidate.raw(*key));
            (*key, compute_stats(values))
        })
        .collect();

    tracing::debug!(
        candidates = candidates.len(),
        metrics = stats.len(),
        "computed population statistics"
    );

    stats
}
