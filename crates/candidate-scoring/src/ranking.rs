//! Population ranking with a deterministic tie-break cascade.

use crate::candidate::Candidate;
use crate::registry::{MetricKey, WeightingMode};
use crate::scoring::{compute_candidate_score, ScoringResult};
use crate::stats::PopulationStats;
use serde::Serialize;
use std::cmp::Ordering;

/// Composite scores closer than this are treated as equal.
pub const PRACTICAL_EQUALITY_THRESHOLD: f64 = 0.05;

/// A candidate paired with its scoring result, in ranked order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate<'a> {
    pub candidate: &'a Candidate,
    pub scoring: ScoringResult,
}

/// Scores every candidate and orders them best first.
///
/// Ordering: composite score (differences below
/// [`PRACTICAL_EQUALITY_THRESHOLD`] tie), then lower `BIDR6_TOT`, then lower
/// `NPOQ-R`, then higher `AUTOEFF_ANA_CON`, then name. Exact ties keep input
/// order.
pub fn rank_candidates<'a>(
    candidates: &'a [Candidate],
    stats: &PopulationStats,
    mode: impl Into<WeightingMode>,
) -> Vec<RankedCandidate<'a>> {
    let mode = mode.into();
    let mut ranked: Vec<RankedCandidate<'a>> = candidates
        .iter()
        .map(|candidate| RankedCandidate {
            candidate,
            scoring: compute_candidate_score(candidate, stats, mode),
        })
        .collect();

    stable_insertion_sort(&mut ranked, compare_ranked);

    tracing::debug!(
        candidates = ranked.len(),
        mode = mode.name(),
        leader = ranked.first().map(|entry| entry.candidate.display_name()),
        "ranked candidates"
    );

    ranked
}

/// Comparator behind [`rank_candidates`]; `Less` means `left` ranks higher.
pub fn compare_ranked(left: &RankedCandidate<'_>, right: &RankedCandidate<'_>) -> Ordering {
    let diff = right.scoring.score - left.scoring.score;
    if diff.abs() >= PRACTICAL_EQUALITY_THRESHOLD {
        return if diff > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    let (left, right) = (left.candidate, right.candidate);

    lower_is_better(left, right, MetricKey::BidrTotal)
        .then_with(|| lower_is_better(left, right, MetricKey::NpoqRisk))
        .then_with(|| {
            higher_is_better(left, right, MetricKey::AutoeffAnalyticalConsistency)
        })
        .then_with(|| compare_names(&left.name, &right.name))
}

fn lower_is_better(left: &Candidate, right: &Candidate, key: MetricKey) -> Ordering {
    let left = left.raw(key).unwrap_or(f64::INFINITY);
    let right = right.raw(key).unwrap_or(f64::INFINITY);
    left.partial_cmp(&right).unwrap_or(Ordering::Equal)
}

/// Locale-style name order: letters compared case-insensitively first, then
/// lowercase before uppercase at the first differing position, then raw
/// code points.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    let folded = |name: &str| name.chars().flat_map(char::to_lowercase).collect::<String>();

    folded(left)
        .cmp(&folded(right))
        .then_with(|| {
            left.chars()
                .zip(right.chars())
                .map(|(l, r)| l.is_uppercase().cmp(&r.is_uppercase()))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| left.cmp(right))
}

fn higher_is_better(left: &Candidate, right: &Candidate, key: MetricKey) -> Ordering {
    let left = left.raw(key).unwrap_or(f64::NEG_INFINITY);
    let right = right.raw(key).unwrap_or(f64::NEG_INFINITY);
    right.partial_cmp(&left).unwrap_or(Ordering::Equal)
}

// The equality threshold makes the comparator intransitive, which the std
// sorts are allowed to reject, so ordering is done by hand. Rosters are small.
fn stable_insertion_sort<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
