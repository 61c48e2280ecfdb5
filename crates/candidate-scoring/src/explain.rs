//! Narrative summary of what drives a candidate's position.

use crate::candidate::Candidate;
use crate::registry::{MetricKey, WeightingMode, EFFICACY_SUBSCALES};
use crate::scoring::{compute_candidate_score, ComponentKind, ScoringResult};
use crate::stats::PopulationStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sub-scale z-score at or above which a sub-scale counts as a strength.
pub const STRENGTH_THRESHOLD: f64 = 0.5;
/// Inverted z-score at or below which a warning is raised; also the sub-scale
/// z-score at or below which an area needs follow-up.
pub const WARNING_THRESHOLD: f64 = -0.5;

const MAX_STRENGTHS: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExplainOptions<'a> {
    /// Reuses an existing scoring result instead of rescoring the candidate.
    pub scoring: Option<&'a ScoringResult>,
    /// Display labels; metrics without an entry use their external key.
    pub labels: Option<&'a BTreeMap<MetricKey, String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub driver: ComponentKind,
    pub driver_text: String,
    pub strengths_text: String,
    pub warnings_text: String,
    pub top_strengths: Vec<MetricKey>,
    pub areas_to_probe: Vec<MetricKey>,
    pub sub_dimension_average_z: f64,
    pub missing_metrics: Vec<MetricKey>,
}

/// Formats a z-score with two decimals and an explicit `+` for non-negative values.
pub fn format_signed(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }
    // -0.0 prints as "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    if value >= 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

pub fn explain_candidate(
    candidate: &Candidate,
    stats: &PopulationStats,
    mode: impl Into<WeightingMode>,
    options: ExplainOptions<'_>,
) -> Explanation {
    let computed;
    let scoring = match options.scoring {
        Some(scoring) => scoring,
        None => {
            computed = compute_candidate_score(candidate, stats, mode);
            &computed
        }
    };
    let label_for = |key: MetricKey| -> String {
        options
            .labels
            .and_then(|labels| labels.get(&key))
            .cloned()
            .unwrap_or_else(|| key.as_str().to_string())
    };

    let driver = dominant_component(scoring);
    let driver_text = format!(
        "Driver: {} ({})",
        driver.label(),
        format_signed(scoring.component_z(driver))
    );

    let mut strengths: Vec<MetricKey> = EFFICACY_SUBSCALES
        .into_iter()
        .filter(|key| scoring.z(*key) >= STRENGTH_THRESHOLD)
        .collect();
    strengths.sort_by(|left, right| scoring.z(*right).total_cmp(&scoring.z(*left)));
    strengths.truncate(MAX_STRENGTHS);

    let strengths_text = if strengths.is_empty() {
        "Strengths: no AUTOEFF sub-scale >= +0.5".to_string()
    } else {
        let listed: Vec<String> = strengths
            .iter()
            .map(|key| format!("{} ({})", label_for(*key), format_signed(scoring.z(*key))))
            .collect();
        format!("Strengths: {}", listed.join(", "))
    };

    let mut warnings = Vec::new();
    if scoring.z_inverted(MetricKey::BidrTotal) <= WARNING_THRESHOLD {
        warnings.push("Credibility: high BIDR".to_string());
    }
    if scoring.z_inverted(MetricKey::BidrImpressionManagement) <= WARNING_THRESHOLD {
        warnings.push("Credibility: high BIDR_IM".to_string());
    }
    if scoring.z_inverted(MetricKey::NpoqRisk) <= WARNING_THRESHOLD {
        warnings.push("Risk: high NPOQ-R".to_string());
    }
    if !scoring.missing_metrics.is_empty() {
        let listed: Vec<String> = scoring
            .missing_metrics
            .iter()
            .map(|key| label_for(*key))
            .collect();
        warnings.push(format!("Missing data: {}", listed.join(", ")));
    }

    let warnings_text = if warnings.is_empty() {
        "Warnings: none relevant".to_string()
    } else {
        warnings.join("; ")
    };

    let mut areas_to_probe: Vec<MetricKey> = EFFICACY_SUBSCALES
        .into_iter()
        .filter(|key| scoring.z(*key) <= WARNING_THRESHOLD)
        .collect();
    areas_to_probe.sort_by(|left, right| scoring.z(*left).total_cmp(&scoring.z(*right)));

    Explanation {
        driver,
        driver_text,
        strengths_text,
        warnings_text,
        top_strengths: strengths,
        areas_to_probe,
        sub_dimension_average_z: scoring.sub_dimension_average_z,
        missing_metrics: scoring.missing_metrics.clone(),
    }
}

/// Component with the largest absolute weighted contribution; earlier
/// components win ties.
fn dominant_component(scoring: &ScoringResult) -> ComponentKind {
    let mut driver = ComponentKind::Efficacy;
    for kind in ComponentKind::ALL {
        if scoring.components.get(kind).abs() > scoring.components.get(driver).abs() {
            driver = kind;
        }
    }
    driver
}
