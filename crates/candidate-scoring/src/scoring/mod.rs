//! Weighted composite scoring of a single candidate.

mod memo;

use crate::candidate::Candidate;
use crate::registry::{MetricKey, WeightingMode, EFFICACY_SUBSCALES};
use crate::stats::PopulationStats;
use memo::ZScoreMemo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The three top-level terms of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Efficacy,
    Risk,
    Credibility,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Efficacy,
        ComponentKind::Risk,
        ComponentKind::Credibility,
    ];

    /// Metric feeding this component.
    pub fn metric(&self) -> MetricKey {
        match self {
            ComponentKind::Efficacy => MetricKey::AutoeffTotal,
            ComponentKind::Risk => MetricKey::NpoqRisk,
            ComponentKind::Credibility => MetricKey::BidrTotal,
        }
    }

    pub fn is_inverted(&self) -> bool {
        !matches!(self, ComponentKind::Efficacy)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Efficacy => "AUTOEFF_TOT",
            ComponentKind::Risk => "low NPOQ-R",
            ComponentKind::Credibility => "low BIDR",
        }
    }
}

/// Weighted contribution of each component to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub efficacy: f64,
    pub risk: f64,
    pub credibility: f64,
}

impl ScoreComponents {
    pub fn get(&self, kind: ComponentKind) -> f64 {
        match kind {
            ComponentKind::Efficacy => self.efficacy,
            ComponentKind::Risk => self.risk,
            ComponentKind::Credibility => self.credibility,
        }
    }

    pub fn total(&self) -> f64 {
        self.efficacy + self.risk + self.credibility
    }
}

/// Scoring output for one candidate under one weighting mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: f64,
    pub mode: WeightingMode,
    pub mode_label: String,
    pub components: ScoreComponents,
    /// Non-inverted z-score of every metric the scorer touched.
    pub z: BTreeMap<MetricKey, f64>,
    /// Sign-flipped z-scores of the inverted metrics used by the composite.
    pub z_inverted: BTreeMap<MetricKey, f64>,
    pub sub_dimension_average_z: f64,
    pub missing_metrics: Vec<MetricKey>,
}

impl ScoringResult {
    /// Raw z-score, `0.0` for metrics the scorer did not touch.
    pub fn z(&self, key: MetricKey) -> f64 {
        self.z.get(&key).copied().unwrap_or(0.0)
    }

    /// Inverted z-score, always the negation of the raw z-score.
    pub fn z_inverted(&self, key: MetricKey) -> f64 {
        self.z_inverted
            .get(&key)
            .copied()
            .unwrap_or_else(|| -self.z(key))
    }

    /// Z-score a component is driven by, signed so that positive is favourable.
    pub fn component_z(&self, kind: ComponentKind) -> f64 {
        if kind.is_inverted() {
            self.z_inverted(kind.metric())
        } else {
            self.z(kind.metric())
        }
    }

    pub fn is_missing(&self, key: MetricKey) -> bool {
        self.missing_metrics.contains(&key)
    }
}

/// Scores `candidate` against the population statistics under `mode`.
///
/// Missing or non-finite raw values contribute `0.0` and are listed in
/// `missing_metrics`; this path never fails.
pub fn compute_candidate_score(
    candidate: &Candidate,
    stats: &PopulationStats,
    mode: impl Into<WeightingMode>,
) -> ScoringResult {
    let mode = mode.into();
    let definition = mode.definition();
    let weights = definition.weights;
    let mut memo = ZScoreMemo::new(candidate, stats);

    let efficacy_z = memo.z(MetricKey::AutoeffTotal);
    let risk_inverted = memo.z_inverted(MetricKey::NpoqRisk);
    let credibility_inverted = memo.z_inverted(MetricKey::BidrTotal);

    for key in EFFICACY_SUBSCALES {
        memo.z(key);
    }
    memo.z(MetricKey::BidrSelfDeception);
    memo.z(MetricKey::BidrImpressionManagement);

    let sub_dimension_average_z = EFFICACY_SUBSCALES
        .iter()
        .map(|key| memo.z.get(key).copied().unwrap_or(0.0))
        .sum::<f64>()
        / EFFICACY_SUBSCALES.len() as f64;

    let components = ScoreComponents {
        efficacy: weights.efficacy * efficacy_z,
        risk: weights.risk * risk_inverted,
        credibility: weights.credibility * credibility_inverted,
    };
    let score = components.efficacy + components.risk + components.credibility;

    tracing::trace!(
        candidate = candidate.display_name(),
        mode = mode.name(),
        score,
        missing = memo.missing.len(),
        "scored candidate"
    );

    ScoringResult {
        score,
        mode,
        mode_label: definition.label.to_string(),
        components,
        z: memo.z,
        z_inverted: memo.z_inverted,
        sub_dimension_average_z,
        missing_metrics: memo.missing,
    }
}
