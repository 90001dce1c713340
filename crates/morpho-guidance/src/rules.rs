//! Versioned evidence thresholds.
//!
//! Older and newer heuristics share one code path; a [`GuidanceRules`]
//! value selects which thresholds and vocabularies apply.

use serde::{Deserialize, Serialize};

/// Which set of evidence heuristics to apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuidanceVersion {
    /// Legacy heuristics: meaning keywords, shorter join threshold.
    V1,
    /// Current heuristics.
    #[default]
    V2,
}

impl std::fmt::Display for GuidanceVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
        }
    }
}

/// Thresholds and vocabularies used by the validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuidanceRules {
    /// Version these rules implement.
    pub version: GuidanceVersion,
    /// Minimum trimmed length of a meaning explanation.
    pub meaning_min_chars: usize,
    /// Phrases that satisfy the meaning field regardless of length.
    pub meaning_keywords: &'static [&'static str],
    /// Markers that show two parts being combined.
    pub combination_markers: &'static [&'static str],
    /// Minimum trimmed length of a join explanation.
    pub join_min_chars: usize,
    /// Join vocabulary; at least one term must appear.
    pub join_vocabulary: &'static [&'static str],
    /// Minimum trimmed length of family evidence.
    pub family_min_chars: usize,
    /// Minimum trimmed length of a matrix word sum.
    pub word_sum_min_chars: usize,
}

impl GuidanceRules {
    /// Legacy heuristics.
    pub const V1: Self = Self {
        version: GuidanceVersion::V1,
        meaning_min_chars: 8,
        meaning_keywords: &["ongoing", "process", "in the process", "doing", "happening"],
        combination_markers: &["+", "→", "->", "plus"],
        join_min_chars: 8,
        join_vocabulary: &[
            "join",
            "change",
            "no change",
            "stays the same",
            "drop",
            "remove",
            "double",
        ],
        family_min_chars: 3,
        word_sum_min_chars: 8,
    };

    /// Current heuristics.
    pub const V2: Self = Self {
        version: GuidanceVersion::V2,
        meaning_min_chars: 8,
        meaning_keywords: &[],
        combination_markers: &["+", "→", "->", "plus", "="],
        join_min_chars: 10,
        join_vocabulary: &[
            "join",
            "change",
            "changed",
            "no change",
            "stays the same",
            "drop",
            "remove",
            "double",
            "compare",
            "letters",
        ],
        family_min_chars: 3,
        word_sum_min_chars: 8,
    };

    /// Rules for a version.
    pub const fn for_version(version: GuidanceVersion) -> Self {
        match version {
            GuidanceVersion::V1 => Self::V1,
            GuidanceVersion::V2 => Self::V2,
        }
    }
}

impl Default for GuidanceRules {
    fn default() -> Self {
        Self::V2
    }
}
