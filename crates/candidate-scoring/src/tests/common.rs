use crate::candidate::Candidate;
use crate::registry::MetricKey;
use crate::stats::{MetricStats, PopulationStats};

/// Wide statistics that keep composite scores of nearby candidates within the
/// practical-equality threshold.
pub(super) fn flat_stats() -> PopulationStats {
    [
        (MetricKey::AutoeffTotal, MetricStats::new(100.0, 100.0)),
        (MetricKey::NpoqRisk, MetricStats::new(30.0, 100.0)),
        (MetricKey::BidrTotal, MetricStats::new(50.0, 100.0)),
    ]
    .into_iter()
    .collect()
}

pub(super) fn subscale_stats() -> PopulationStats {
    [
        (MetricKey::AutoeffTotal, MetricStats::new(90.0, 10.0)),
        (MetricKey::NpoqRisk, MetricStats::new(20.0, 5.0)),
        (MetricKey::BidrTotal, MetricStats::new(50.0, 10.0)),
        (MetricKey::AutoeffEmotionalMaturity, MetricStats::new(18.0, 4.0)),
        (MetricKey::AutoeffBusinessGoals, MetricStats::new(18.0, 4.0)),
        (MetricKey::AutoeffRelationalFluency, MetricStats::new(18.0, 4.0)),
        (MetricKey::AutoeffAnalyticalConsistency, MetricStats::new(18.0, 4.0)),
        (MetricKey::BidrSelfDeception, MetricStats::new(28.0, 4.0)),
        (MetricKey::BidrImpressionManagement, MetricStats::new(28.0, 4.0)),
    ]
    .into_iter()
    .collect()
}

pub(super) fn scored(
    name: &str,
    autoeff: f64,
    npoq: f64,
    bidr: f64,
    analytical: f64,
) -> Candidate {
    Candidate::new(name)
        .with_score(MetricKey::AutoeffTotal, autoeff)
        .with_score(MetricKey::NpoqRisk, npoq)
        .with_score(MetricKey::BidrTotal, bidr)
        .with_score(MetricKey::AutoeffAnalyticalConsistency, analytical)
}

/// Candidate whose sub-scale z-scores against [`subscale_stats`] are
/// `emotional, business, relational, analytical` (each step of 1.0 is 4 raw points).
pub(super) fn profiled(name: &str, subscale_z: [f64; 4]) -> Candidate {
    let [emotional, business, relational, analytical] = subscale_z.map(|z| 18.0 + 4.0 * z);
    Candidate::new(name)
        .with_score(MetricKey::AutoeffTotal, 90.0)
        .with_score(MetricKey::NpoqRisk, 20.0)
        .with_score(MetricKey::BidrTotal, 50.0)
        .with_score(MetricKey::AutoeffEmotionalMaturity, emotional)
        .with_score(MetricKey::AutoeffBusinessGoals, business)
        .with_score(MetricKey::AutoeffRelationalFluency, relational)
        .with_score(MetricKey::AutoeffAnalyticalConsistency, analytical)
        .with_score(MetricKey::BidrSelfDeception, 28.0)
        .with_score(MetricKey::BidrImpressionManagement, 28.0)
}

pub(super) fn names<'a>(ranked: &[crate::ranking::RankedCandidate<'a>]) -> Vec<&'a str> {
    ranked
        .iter()
        .map(|entry| entry.candidate.name.as_str())
        .collect()
}
