//! Normalized multi-factor scoring, ranking and explanation for assessment
//! candidates.
//!
//! Every function here is pure: statistics are computed once per ranking
//! request, then shared read-only by the per-candidate scoring calls. Missing
//! data, degenerate populations and unknown mode names degrade to neutral
//! values instead of errors.

pub mod candidate;
pub mod explain;
pub mod normalize;
pub mod ranking;
pub mod registry;
pub mod scoring;
pub mod stats;
pub mod validation;

#[cfg(test)]
mod tests;

pub use candidate::Candidate;
pub use explain::{explain_candidate, format_signed, ExplainOptions, Explanation};
pub use normalize::z_score;
pub use ranking::{compare_names, compare_ranked, rank_candidates, RankedCandidate, PRACTICAL_EQUALITY_THRESHOLD};
pub use registry::{
    default_ranges, MetricDefinition, MetricKey, MetricRange, ModeDefinition, ModeWeights,
    RangeTable, WeightingMode, EFFICACY_SUBSCALES,
};
pub use scoring::{compute_candidate_score, ComponentKind, ScoreComponents, ScoringResult};
pub use stats::{compute_stats, compute_stats_by_metric, MetricStats, PopulationStats};
pub use validation::{validate_ranges, RangeWarning};
