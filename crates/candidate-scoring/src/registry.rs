//! Static metric and weighting-mode definitions.
//!
//! The metric set is closed: adding a metric means adding a `MetricKey`
//! variant, and every `match` below has to account for it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a psychometric scale collected for every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "AUTOEFF_TOT")]
    AutoeffTotal,
    #[serde(rename = "AUTOEFF_MAT_EMO")]
    AutoeffEmotionalMaturity,
    #[serde(rename = "AUTOEFF_FIN_AZI")]
    AutoeffBusinessGoals,
    #[serde(rename = "AUTOEFF_FLU_REL")]
    AutoeffRelationalFluency,
    #[serde(rename = "AUTOEFF_ANA_CON")]
    AutoeffAnalyticalConsistency,
    #[serde(rename = "NPOQ-R")]
    NpoqRisk,
    #[serde(rename = "BIDR6_TOT")]
    BidrTotal,
    #[serde(rename = "BIDR_SDE")]
    BidrSelfDeception,
    #[serde(rename = "BIDR_IM")]
    BidrImpressionManagement,
}

/// The four efficacy sub-scales averaged into the sub-dimension index.
pub const EFFICACY_SUBSCALES: [MetricKey; 4] = [
    MetricKey::AutoeffEmotionalMaturity,
    MetricKey::AutoeffBusinessGoals,
    MetricKey::AutoeffRelationalFluency,
    MetricKey::AutoeffAnalyticalConsistency,
];

impl MetricKey {
    pub const ALL: [MetricKey; 9] = [
        MetricKey::AutoeffTotal,
        MetricKey::AutoeffEmotionalMaturity,
        MetricKey::AutoeffBusinessGoals,
        MetricKey::AutoeffRelationalFluency,
        MetricKey::AutoeffAnalyticalConsistency,
        MetricKey::NpoqRisk,
        MetricKey::BidrTotal,
        MetricKey::BidrSelfDeception,
        MetricKey::BidrImpressionManagement,
    ];

    /// External key used in rosters, reports and warning ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::AutoeffTotal => "AUTOEFF_TOT",
            MetricKey::AutoeffEmotionalMaturity => "AUTOEFF_MAT_EMO",
            MetricKey::AutoeffBusinessGoals => "AUTOEFF_FIN_AZI",
            MetricKey::AutoeffRelationalFluency => "AUTOEFF_FLU_REL",
            MetricKey::AutoeffAnalyticalConsistency => "AUTOEFF_ANA_CON",
            MetricKey::NpoqRisk => "NPOQ-R",
            MetricKey::BidrTotal => "BIDR6_TOT",
            MetricKey::BidrSelfDeception => "BIDR_SDE",
            MetricKey::BidrImpressionManagement => "BIDR_IM",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw.trim())
    }

    pub fn definition(&self) -> MetricDefinition {
        let range = match self {
            MetricKey::AutoeffTotal => MetricRange::new(24.0, 120.0),
            MetricKey::AutoeffEmotionalMaturity
            | MetricKey::AutoeffBusinessGoals
            | MetricKey::AutoeffRelationalFluency
            | MetricKey::AutoeffAnalyticalConsistency => MetricRange::new(6.0, 30.0),
            MetricKey::NpoqRisk => MetricRange::new(0.0, 60.0),
            MetricKey::BidrTotal => MetricRange::new(0.0, 120.0),
            MetricKey::BidrSelfDeception | MetricKey::BidrImpressionManagement => {
                MetricRange::new(8.0, 48.0)
            }
        };

        MetricDefinition {
            key: *self,
            range,
            inverted: self.is_inverted(),
            sub_dimension: self.is_efficacy_subscale(),
        }
    }

    /// Lower raw values are better for the risk and social-desirability scales.
    pub fn is_inverted(&self) -> bool {
        matches!(
            self,
            MetricKey::NpoqRisk
                | MetricKey::BidrTotal
                | MetricKey::BidrSelfDeception
                | MetricKey::BidrImpressionManagement
        )
    }

    pub fn is_efficacy_subscale(&self) -> bool {
        EFFICACY_SUBSCALES.contains(self)
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive plausible range for a raw metric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDefinition {
    pub key: MetricKey,
    pub range: MetricRange,
    pub inverted: bool,
    pub sub_dimension: bool,
}

pub type RangeTable = BTreeMap<MetricKey, MetricRange>;

/// Default plausible range for every metric in the registry.
pub fn default_ranges() -> RangeTable {
    MetricKey::ALL
        .into_iter()
        .map(|key| (key, key.definition().range))
        .collect()
}

/// Named weighting profile applied by the composite scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingMode {
    #[default]
    Balanced,
    Performance,
    Credibility,
}

impl WeightingMode {
    pub const ALL: [WeightingMode; 3] = [
        WeightingMode::Balanced,
        WeightingMode::Performance,
        WeightingMode::Credibility,
    ];

    /// Resolves a caller-supplied mode name. Unknown names fall back to `Balanced`.
    pub fn resolve(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "performance" | "performance-only" => Self::Performance,
            "credibility" | "credibility-first" => Self::Credibility,
            "balanced" => Self::Balanced,
            other => {
                tracing::debug!(mode = other, "unknown weighting mode, using balanced");
                Self::Balanced
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeightingMode::Balanced => "balanced",
            WeightingMode::Performance => "performance",
            WeightingMode::Credibility => "credibility",
        }
    }

    pub fn definition(&self) -> ModeDefinition {
        match self {
            WeightingMode::Balanced => ModeDefinition {
                label: "Balanced",
                weights: ModeWeights {
                    efficacy: 0.55,
                    risk: 0.25,
                    credibility: 0.20,
                },
            },
            WeightingMode::Performance => ModeDefinition {
                label: "Performance-only",
                weights: ModeWeights {
                    efficacy: 1.0,
                    risk: 0.0,
                    credibility: 0.0,
                },
            },
            WeightingMode::Credibility => ModeDefinition {
                label: "Credibility-first",
                weights: ModeWeights {
                    efficacy: 0.45,
                    risk: 0.20,
                    credibility: 0.35,
                },
            },
        }
    }
}

impl From<&str> for WeightingMode {
    fn from(value: &str) -> Self {
        Self::resolve(value)
    }
}

impl fmt::Display for WeightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeDefinition {
    pub label: &'static str,
    pub weights: ModeWeights,
}

/// Weights for the three composite components. They need not sum to one;
/// only the relative order of the resulting scores is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeWeights {
    /// Primary efficacy aggregate (`AUTOEFF_TOT`).
    pub efficacy: f64,
    /// Inverted risk index (`NPOQ-R`).
    pub risk: f64,
    /// Inverted social-desirability total (`BIDR6_TOT`).
    pub credibility: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_keys_round_trip_through_lookup() {
        for key in MetricKey::ALL {
            assert_eq!(MetricKey::from_key(key.as_str()), Some(key));
        }
        assert_eq!(MetricKey::from_key("NPOQ_R"), None);
    }

    #[test]
    fn inverted_and_subscale_flags_match_registry() {
        let inverted: Vec<_> = MetricKey::ALL
            .into_iter()
            .filter(MetricKey::is_inverted)
            .collect();
        assert_eq!(
            inverted,
            vec![
                MetricKey::NpoqRisk,
                MetricKey::BidrTotal,
                MetricKey::BidrSelfDeception,
                MetricKey::BidrImpressionManagement,
            ]
        );
        assert!(MetricKey::AutoeffAnalyticalConsistency.definition().sub_dimension);
        assert!(!MetricKey::AutoeffTotal.definition().sub_dimension);
    }

    #[test]
    fn default_ranges_cover_every_metric() {
        let ranges = default_ranges();
        assert_eq!(ranges.len(), MetricKey::ALL.len());
        assert_eq!(ranges[&MetricKey::NpoqRisk], MetricRange::new(0.0, 60.0));
        assert_eq!(ranges[&MetricKey::AutoeffTotal], MetricRange::new(24.0, 120.0));
    }

    #[test]
    fn unknown_mode_falls_back_to_balanced() {
        assert_eq!(WeightingMode::resolve("aggressive"), WeightingMode::Balanced);
        assert_eq!(WeightingMode::resolve(""), WeightingMode::Balanced);
        assert_eq!(
            WeightingMode::resolve(" Credibility-First "),
            WeightingMode::Credibility
        );
        assert_eq!(WeightingMode::from("performance"), WeightingMode::Performance);
    }

    #[test]
    fn shipped_modes_carry_expected_weights() {
        let balanced = WeightingMode::Balanced.definition().weights;
        assert_eq!(
            (balanced.efficacy, balanced.risk, balanced.credibility),
            (0.55, 0.25, 0.20)
        );
        let performance = WeightingMode::Performance.definition();
        assert_eq!(performance.label, "Performance-only");
        assert_eq!(performance.weights.risk, 0.0);
        assert_eq!(WeightingMode::Credibility.definition().weights.credibility, 0.35);
    }

    #[test]
    fn metric_keys_serialize_with_external_names() {
        let json = serde_json::to_string(&MetricKey::NpoqRisk).expect("serializes");
        assert_eq!(json, "\"NPOQ-R\"");
        let key: MetricKey = serde_json::from_str("\"BIDR6_TOT\"").expect("deserializes");
        assert_eq!(key, MetricKey::BidrTotal);
    }
}
