//! Versioned scoring thresholds.

use serde::{Deserialize, Serialize};

/// Which scoring heuristics to apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringVersion {
    /// The only scorer shipped so far.
    #[default]
    V1,
}

impl std::fmt::Display for ScoringVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
        }
    }
}

/// Thresholds used by the scorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoringRules {
    /// Version these rules implement.
    pub version: ScoringVersion,
    /// Minimum trimmed length for a field to count as answered.
    pub min_chars: usize,
    /// Whether the join field also runs [`detect_join_error`](crate::detect_join_error).
    pub check_join: bool,
}

impl ScoringRules {
    /// First-generation scorer.
    pub const V1: Self = Self {
        version: ScoringVersion::V1,
        min_chars: 2,
        check_join: true,
    };

    /// Rules for a version.
    pub const fn for_version(version: ScoringVersion) -> Self {
        match version {
            ScoringVersion::V1 => Self::V1,
        }
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::V1
    }
}
