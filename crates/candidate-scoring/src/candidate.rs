use crate::registry::MetricKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Assessment candidate as supplied by the caller. Raw scores are never mutated
/// by the scoring engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// `None` and non-finite entries are legal and count as missing data.
    #[serde(default)]
    pub scores: BTreeMap<MetricKey, Option<f64>>,
}

impl Candidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_score(mut self, key: MetricKey, value: f64) -> Self {
        self.scores.insert(key, Some(value));
        self
    }

    /// Raw value for `key`, or `None` when absent or not a finite number.
    pub fn raw(&self, key: MetricKey) -> Option<f64> {
        self.scores
            .get(&key)
            .copied()
            .flatten()
            .filter(|value| value.is_finite())
    }

    /// Identifier used in data-quality reports. An index of zero counts as unset.
    pub fn reference(&self) -> String {
        match (self.index.filter(|index| *index != 0), self.name.is_empty()) {
            (Some(index), _) => index.to_string(),
            (None, false) => self.name.clone(),
            (None, true) => "candidate".to_string(),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "candidate"
        } else {
            &self.name
        }
    }
}
