//! Engine results.
//!
//! - [`SupportStatus`]: evidence validator output ("supported / not yet
//!   supported", never right/wrong)
//! - [`ScoreSummary`]: legacy mastery scorer output

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An evidentiary dimension that may still lack support.
///
/// Ordered so that prompts are always emitted meaning, structure, join, family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    /// What the affix adds to the meaning.
    Meaning,
    /// How the word is built from base and affix.
    Structure,
    /// What happens to the spelling at the join.
    Join,
    /// Related words in the family.
    Family,
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meaning => write!(f, "meaning"),
            Self::Structure => write!(f, "structure"),
            Self::Join => write!(f, "join"),
            Self::Family => write!(f, "family"),
        }
    }
}

/// Evidence validator output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportStatus {
    /// `true` iff `focus` is empty.
    pub supported: bool,
    /// Dimensions still missing evidence.
    pub focus: BTreeSet<FocusArea>,
    /// Ordered scaffold prompts.
    pub prompts: Vec<String>,
}

impl SupportStatus {
    /// Whether the given dimension still needs evidence.
    pub fn needs(&self, area: FocusArea) -> bool {
        self.focus.contains(&area)
    }
}

/// Error tag produced by the mastery scorer and consumed by the router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTag {
    /// Meaning explanation missing or too short.
    MeaningError,
    /// Structure explanation missing or too short.
    StructureError,
    /// Family evidence missing or too short.
    FamilyError,
    /// Join explanation missing, too short, or making a mistaken claim.
    JoinError,
    /// Grapheme/language confusion (reserved for authored routes).
    GraphemeLanguageError,
}

impl ErrorTag {
    /// Wire name, e.g. `join_error`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MeaningError => "meaning_error",
            Self::StructureError => "structure_error",
            Self::FamilyError => "family_error",
            Self::JoinError => "join_error",
            Self::GraphemeLanguageError => "grapheme_language_error",
        }
    }

    /// All tags in declaration order.
    pub const ALL: [Self; 5] = [
        Self::MeaningError,
        Self::StructureError,
        Self::FamilyError,
        Self::JoinError,
        Self::GraphemeLanguageError,
    ];
}

impl fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == needle)
            .ok_or_else(|| format!("unknown error tag: {s}"))
    }
}

/// Mastery scorer output.
///
/// `error_tags` keeps the order the tags were produced in; the router checks
/// them in that order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// `true` iff `error_tags` is empty.
    pub mastered: bool,
    /// Tags in production order, without duplicates.
    pub error_tags: Vec<ErrorTag>,
}

impl ScoreSummary {
    /// Build a summary from produced tags, dropping repeats.
    pub fn from_tags(tags: impl IntoIterator<Item = ErrorTag>) -> Self {
        let mut error_tags: Vec<ErrorTag> = Vec::new();
        for tag in tags {
            if !error_tags.contains(&tag) {
                error_tags.push(tag);
            }
        }
        Self {
            mastered: error_tags.is_empty(),
            error_tags,
        }
    }

    /// Whether the summary carries the given tag.
    pub fn has(&self, tag: ErrorTag) -> bool {
        self.error_tags.contains(&tag)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
