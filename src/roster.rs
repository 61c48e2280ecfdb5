//! Candidate roster loading for the command line.

use candidate_scoring::{Candidate, MetricKey};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("roster contains no candidates")]
    Empty,
}

pub(crate) fn load_from_path(path: &Path) -> Result<Vec<Candidate>, RosterError> {
    let file = std::fs::File::open(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let candidates = load_from_reader(file)?;
    tracing::info!(path = %path.display(), candidates = candidates.len(), "loaded roster");
    Ok(candidates)
}

/// Roster row as written on disk. Score cells may hold any JSON value.
#[derive(Debug, Deserialize)]
struct RosterEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    index: Option<u32>,
    #[serde(default)]
    scores: BTreeMap<MetricKey, Value>,
}

impl RosterEntry {
    fn into_candidate(self, position: usize) -> Candidate {
        Candidate {
            name: self.name,
            index: self.index.or(Some(position as u32 + 1)),
            // non-numeric cells ("n/a", "", true) are missing data, not errors
            scores: self
                .scores
                .into_iter()
                .map(|(key, value)| (key, value.as_f64()))
                .collect(),
        }
    }
}

/// Parses a JSON array of candidates. Entries without an index get their
/// one-based roster position so that warnings stay traceable.
pub(crate) fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Candidate>, RosterError> {
    let entries: Vec<RosterEntry> = serde_json::from_reader(reader)?;
    if entries.is_empty() {
        return Err(RosterError::Empty);
    }

    let candidates: Vec<Candidate> = entries
        .into_iter()
        .enumerate()
        .map(|(position, entry)| entry.into_candidate(position))
        .collect();

    let unreadable = candidates
        .iter()
        .flat_map(|candidate| candidate.scores.values())
        .filter(|value| value.is_none())
        .count();
    if unreadable > 0 {
        tracing::debug!(cells = unreadable, "roster has empty or non-numeric score cells");
    }

    Ok(candidates)
}

/// Built-in roster used by the `demo` command.
pub(crate) fn sample_roster() -> Vec<Candidate> {
    let rows: [(&str, [Option<f64>; 9]); 6] = [
        (
            "Giulia Bianchi",
            [Some(104.0), Some(27.0), Some(25.0), Some(24.0), Some(28.0), Some(12.0), Some(38.0), Some(20.0), Some(18.0)],
        ),
        (
            "Marco Rossi",
            [Some(88.0), Some(20.0), Some(22.0), Some(21.0), Some(25.0), Some(24.0), Some(61.0), Some(30.0), Some(34.0)],
        ),
        (
            "Sara Conti",
            [Some(71.0), Some(14.0), Some(16.0), Some(19.0), Some(22.0), Some(65.0), Some(70.0), Some(36.0), Some(40.0)],
        ),
        (
            "Luca Ferri",
            [Some(95.0), Some(23.0), None, Some(23.0), Some(24.0), None, Some(44.0), Some(24.0), Some(22.0)],
        ),
        (
            "Elena Greco",
            [Some(97.0), Some(25.0), Some(21.0), Some(26.0), Some(20.0), Some(18.0), Some(52.0), Some(26.0), Some(27.0)],
        ),
        (
            "Paolo Russo",
            [Some(96.0), Some(22.0), Some(24.0), Some(22.0), Some(23.0), Some(19.0), Some(51.0), Some(27.0), Some(26.0)],
        ),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(position, (name, values))| Candidate {
            name: name.to_string(),
            index: Some(position as u32 + 1),
            scores: MetricKey::ALL
                .into_iter()
                .zip(values)
                .filter(|(_, value)| value.is_some())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use candidate_scoring::{compute_candidate_score, compute_stats_by_metric, WeightingMode};
    use std::io::Cursor;

    #[test]
    fn assigns_positions_to_unindexed_candidates() {
        let json = r#"[
            { "name": "A", "scores": { "AUTOEFF_TOT": 90 } },
            { "name": "B", "index": 10, "scores": {} },
            { "name": "C" }
        ]"#;

        let candidates = load_from_reader(Cursor::new(json)).expect("roster loads");

        let indexes: Vec<_> = candidates.iter().map(|candidate| candidate.index).collect();
        assert_eq!(indexes, vec![Some(1), Some(10), Some(3)]);
    }

    #[test]
    fn rejects_unknown_metric_keys() {
        let json = r#"[{ "name": "A", "scores": { "IQ": 130 } }]"#;
        let err = load_from_reader(Cursor::new(json)).expect_err("unknown key rejected");
        assert!(matches!(err, RosterError::Json(_)));
    }

    #[test]
    fn non_numeric_cells_load_as_missing_data() {
        let json = r#"[
            { "name": "A", "scores": { "AUTOEFF_TOT": 90, "NPOQ-R": "n/a", "BIDR6_TOT": null } },
            { "name": "B", "scores": { "AUTOEFF_TOT": 70, "NPOQ-R": 40, "BIDR6_TOT": 55 } }
        ]"#;

        let candidates = load_from_reader(Cursor::new(json)).expect("bad cells do not fail the roster");

        let first = &candidates[0];
        assert_eq!(first.raw(MetricKey::AutoeffTotal), Some(90.0));
        assert_eq!(first.raw(MetricKey::NpoqRisk), None);
        assert_eq!(first.raw(MetricKey::BidrTotal), None);

        let stats = compute_stats_by_metric(&candidates, &MetricKey::ALL);
        let scored = compute_candidate_score(first, &stats, WeightingMode::Balanced);
        assert!(scored.missing_metrics.contains(&MetricKey::NpoqRisk));
        assert!(scored.missing_metrics.contains(&MetricKey::BidrTotal));
        assert!(!scored.missing_metrics.contains(&MetricKey::AutoeffTotal));
    }

    #[test]
    fn rejects_empty_roster() {
        let err = load_from_reader(Cursor::new("[]")).expect_err("empty roster rejected");
        assert!(matches!(err, RosterError::Empty));
    }

    #[test]
    fn sample_roster_leaves_gaps_missing() {
        let roster = sample_roster();
        let luca = roster
            .iter()
            .find(|candidate| candidate.name.starts_with("Luca"))
            .expect("sample includes a candidate with gaps");
        assert_eq!(luca.raw(MetricKey::NpoqRisk), None);
        assert!(!luca.scores.contains_key(&MetricKey::NpoqRisk));
        assert_eq!(roster.len(), 6);
    }
}
