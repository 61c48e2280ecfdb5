use crate::candidate::Candidate;
use crate::registry::{default_ranges, RangeTable};
use serde::{Deserialize, Serialize};

/// Data-quality warning for a raw value outside its plausible range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeWarning {
    pub id: String,
    pub message: String,
}

/// Flags present, finite raw values outside their metric's range. Missing
/// values are never reported here. `None` checks against [`default_ranges`].
pub fn validate_ranges(candidates: &[Candidate], ranges: Option<&RangeTable>) -> Vec<RangeWarning> {
    let defaults;
    let ranges = match ranges {
        Some(ranges) => ranges,
        None => {
            defaults = default_ranges();
            &defaults
        }
    };

    let mut warnings = Vec::new();
    for candidate in candidates {
        for (key, range) in ranges {
            let Some(value) = candidate.raw(*key) else {
                continue;
            };
            if range.contains(value) {
                continue;
            }

            warnings.push(RangeWarning {
                id: format!("{}-{}", candidate.reference(), key),
                message: format!(
                    "Out of range: {}={} ({}-{}) for {}",
                    key,
                    value,
                    range.min,
                    range.max,
                    candidate.display_name()
                ),
            });
        }
    }

    tracing::debug!(
        candidates = candidates.len(),
        warnings = warnings.len(),
        "validated raw score ranges"
    );

    warnings
}
