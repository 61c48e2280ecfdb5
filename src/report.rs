use candidate_scoring::{
    compute_stats_by_metric, explain_candidate, format_signed, rank_candidates, validate_ranges,
    Candidate, ExplainOptions, Explanation, MetricKey, RangeWarning, ScoreComponents,
    WeightingMode,
};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy)]
pub(crate) struct ReportOptions {
    pub(crate) mode: WeightingMode,
    pub(crate) explain: bool,
    pub(crate) range_check: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankingReport {
    pub(crate) generated_at: DateTime<Local>,
    pub(crate) mode: WeightingMode,
    pub(crate) mode_label: &'static str,
    pub(crate) entries: Vec<RankingEntry>,
    pub(crate) range_warnings: Vec<RangeWarning>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankingEntry {
    pub(crate) rank: usize,
    pub(crate) name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) index: Option<u32>,
    pub(crate) score: f64,
    pub(crate) components: ScoreComponents,
    pub(crate) sub_dimension_average_z: f64,
    pub(crate) missing_metrics: Vec<MetricKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) explanation: Option<Explanation>,
}

/// Computes statistics over the whole roster, ranks it and optionally explains
/// and range-checks every candidate.
pub(crate) fn build_ranking_report(
    candidates: &[Candidate],
    options: ReportOptions,
    generated_at: DateTime<Local>,
) -> RankingReport {
    let stats = compute_stats_by_metric(candidates, &MetricKey::ALL);
    let ranked = rank_candidates(candidates, &stats, options.mode);

    let entries = ranked
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let explanation = options.explain.then(|| {
                explain_candidate(
                    entry.candidate,
                    &stats,
                    options.mode,
                    ExplainOptions {
                        scoring: Some(&entry.scoring),
                        labels: None,
                    },
                )
            });

            RankingEntry {
                rank: position + 1,
                name: entry.candidate.display_name().to_string(),
                index: entry.candidate.index,
                score: entry.scoring.score,
                components: entry.scoring.components,
                sub_dimension_average_z: entry.scoring.sub_dimension_average_z,
                missing_metrics: entry.scoring.missing_metrics.clone(),
                explanation,
            }
        })
        .collect::<Vec<_>>();

    let range_warnings = if options.range_check {
        range_warnings(candidates)
    } else {
        Vec::new()
    };

    info!(
        mode = options.mode.name(),
        candidates = entries.len(),
        range_warnings = range_warnings.len(),
        "ranking report ready"
    );

    RankingReport {
        generated_at,
        mode: options.mode,
        mode_label: options.mode.definition().label,
        entries,
        range_warnings,
    }
}

pub(crate) fn range_warnings(candidates: &[Candidate]) -> Vec<RangeWarning> {
    let warnings = validate_ranges(candidates, None);
    for warning in &warnings {
        warn!(id = %warning.id, "{}", warning.message);
    }
    warnings
}

pub(crate) fn render_text(report: &RankingReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Candidate ranking ({}), {} candidate(s)",
        report.mode_label,
        report.entries.len()
    );

    for entry in &report.entries {
        let _ = writeln!(
            out,
            "{:>3}. {} | score {} | AUTOEFF {} | NPOQ-R {} | BIDR {} | sub-scale avg z {}",
            entry.rank,
            entry.name,
            format_signed(entry.score),
            format_signed(entry.components.efficacy),
            format_signed(entry.components.risk),
            format_signed(entry.components.credibility),
            format_signed(entry.sub_dimension_average_z),
        );

        if let Some(explanation) = &entry.explanation {
            let _ = writeln!(out, "     {}", explanation.driver_text);
            let _ = writeln!(out, "     {}", explanation.strengths_text);
            let _ = writeln!(out, "     {}", explanation.warnings_text);
            if !explanation.areas_to_probe.is_empty() {
                let areas: Vec<&str> = explanation
                    .areas_to_probe
                    .iter()
                    .map(MetricKey::as_str)
                    .collect();
                let _ = writeln!(out, "     Areas to probe: {}", areas.join(", "));
            }
        } else if !entry.missing_metrics.is_empty() {
            let missing: Vec<&str> = entry.missing_metrics.iter().map(MetricKey::as_str).collect();
            let _ = writeln!(out, "     Missing data: {}", missing.join(", "));
        }
    }

    out.push_str(&render_range_warnings(&report.range_warnings));
    out
}

pub(crate) fn render_range_warnings(warnings: &[RangeWarning]) -> String {
    let mut out = String::new();
    if warnings.is_empty() {
        return out;
    }

    let _ = writeln!(out, "Data quality warnings:");
    for warning in warnings {
        let _ = writeln!(out, "  - [{}] {}", warning.id, warning.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::sample_roster;

    fn options(explain: bool) -> ReportOptions {
        ReportOptions {
            mode: WeightingMode::Balanced,
            explain,
            range_check: true,
        }
    }

    #[test]
    fn sample_report_ranks_every_candidate_once() {
        let roster = sample_roster();
        let report = build_ranking_report(&roster, options(false), Local::now());

        assert_eq!(report.entries.len(), roster.len());
        let ranks: Vec<_> = report.entries.iter().map(|entry| entry.rank).collect();
        assert_eq!(ranks, (1..=roster.len()).collect::<Vec<_>>());
        assert_eq!(report.entries[0].name, "Giulia Bianchi");
        assert!(report.entries.iter().all(|entry| entry.explanation.is_none()));
        assert_eq!(report.range_warnings.len(), 1);
    }

    #[test]
    fn text_rendering_includes_explanations_and_warnings() {
        let roster = sample_roster();
        let report = build_ranking_report(&roster, options(true), Local::now());

        let text = render_text(&report);

        assert!(text.starts_with("Candidate ranking (Balanced), 6 candidate(s)"));
        assert!(text.contains("  1. Giulia Bianchi | score +"));
        assert!(text.contains("Driver: "));
        assert!(text.contains("Missing data: NPOQ-R, AUTOEFF_FIN_AZI"));
        assert!(text.contains("Data quality warnings:"));
        assert!(text.contains("[3-NPOQ-R] Out of range: NPOQ-R=65 (0-60) for Sara Conti"));
    }

    #[test]
    fn json_report_serializes_mode_and_entries() {
        let roster = sample_roster();
        let mut opts = options(true);
        opts.mode = WeightingMode::Performance;
        opts.range_check = false;
        let report = build_ranking_report(&roster, opts, Local::now());

        let value = serde_json::to_value(&report).expect("report serializes");

        assert_eq!(value["mode"], "performance");
        assert_eq!(value["mode_label"], "Performance-only");
        assert_eq!(value["entries"].as_array().map(Vec::len), Some(6));
        assert!(value["entries"][0]["explanation"]["driver_text"].is_string());
        assert_eq!(value["range_warnings"].as_array().map(Vec::len), Some(0));
    }
}
