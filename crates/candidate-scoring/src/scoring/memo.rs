use crate::candidate::Candidate;
use crate::normalize::z_score;
use crate::registry::MetricKey;
use crate::stats::PopulationStats;
use std::collections::BTreeMap;

/// Per-call cache of z-scores for one candidate. Lives only for the duration of
/// a single `compute_candidate_score` call.
pub(crate) struct ZScoreMemo<'a> {
    candidate: &'a Candidate,
    stats: &'a PopulationStats,
    pub(crate) z: BTreeMap<MetricKey, f64>,
    pub(crate) z_inverted: BTreeMap<MetricKey, f64>,
    /// Insertion-ordered, no duplicates.
    pub(crate) missing: Vec<MetricKey>,
}

impl<'a> ZScoreMemo<'a> {
    pub(crate) fn new(candidate: &'a Candidate, stats: &'a PopulationStats) -> Self {
        Self {
            candidate,
            stats,
            z: BTreeMap::new(),
            z_inverted: BTreeMap::new(),
            missing: Vec::new(),
        }
    }

    pub(crate) fn z(&mut self, key: MetricKey) -> f64 {
        if let Some(value) = self.z.get(&key) {
            return *value;
        }

        let value = match self.candidate.raw(key) {
            Some(raw) => z_score(Some(raw), self.stats.get(key)),
            None => {
                if !self.missing.contains(&key) {
                    self.missing.push(key);
                }
                0.0
            }
        };

        self.z.insert(key, value);
        value
    }

    /// Sign-flipped z-score for metrics where a lower raw value is better.
    pub(crate) fn z_inverted(&mut self, key: MetricKey) -> f64 {
        if let Some(value) = self.z_inverted.get(&key) {
            return *value;
        }

        let value = -self.z(key);
        self.z_inverted.insert(key, value);
        value
    }
}
