//! Join convention reference table.

use serde::{Deserialize, Serialize};

/// Kind of spelling change at the base/suffix boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinConventionKind {
    /// Base and suffix concatenate unchanged.
    None,
    /// Final consonant doubles before a vowel suffix.
    Double,
    /// Final `e` is replaced before a vowel suffix.
    Replace,
    /// Final `y` changes to `i`.
    Change,
    /// Reserved; never produced by the resolver.
    Toggle,
}

impl JoinConventionKind {
    /// Reference entry for this kind.
    pub fn convention(self) -> &'static JoinConvention {
        let idx = match self {
            Self::None => 0,
            Self::Double => 1,
            Self::Replace => 2,
            Self::Change => 3,
            Self::Toggle => 4,
        };
        &JOIN_CONVENTIONS[idx]
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        self.convention().label
    }
}

impl std::fmt::Display for JoinConventionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Double => write!(f, "Double"),
            Self::Replace => write!(f, "Replace"),
            Self::Change => write!(f, "Change"),
            Self::Toggle => write!(f, "Toggle"),
        }
    }
}

/// Static description of a join convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct JoinConvention {
    /// Which convention.
    #[serde(rename = "type")]
    pub kind: JoinConventionKind,
    /// Short label.
    pub label: &'static str,
    /// Learner-facing explanation.
    pub explanation: &'static str,
}

/// All conventions in declaration order.
pub const JOIN_CONVENTIONS: [JoinConvention; 5] = [
    JoinConvention {
        kind: JoinConventionKind::None,
        label: "No Change",
        explanation: "Add the vowel suffix directly to the base. The spelling of the base remains stable.",
    },
    JoinConvention {
        kind: JoinConventionKind::Double,
        label: "Doubling",
        explanation: "When a base ends in a single vowel followed by a single consonant, the final consonant doubles before adding a vowel suffix.",
    },
    JoinConvention {
        kind: JoinConventionKind::Replace,
        label: "Final <e> Replacement",
        explanation: "When a base ends in final <e>, the <e> is replaced before adding a vowel suffix.",
    },
    JoinConvention {
        kind: JoinConventionKind::Change,
        label: "<y> to <i>",
        explanation: "When a base ends in consonant + <y>, the <y> changes to <i> before certain suffixes.",
    },
    JoinConvention {
        kind: JoinConventionKind::Toggle,
        label: "Toggle",
        explanation: "Some joins toggle depending on suffix type or stress pattern.",
    },
];
