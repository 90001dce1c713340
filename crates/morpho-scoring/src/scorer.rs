//! Mastery scorer.

use morpho_core::response::{FAMILY, JOIN, MEANING, STRUCTURE};
use morpho_core::text::has_min_chars;
use morpho_core::{ErrorTag, ResponseMap, ScoreSummary, Task};
use tracing::debug;

use crate::join_check::detect_join_error;
use crate::rules::ScoringRules;

/// Score responses with the default rules ([`ScoringRules::V1`]).
pub fn score(task: &Task, responses: &ResponseMap) -> ScoreSummary {
    score_with(&ScoringRules::default(), task, responses)
}

/// Score responses with the given rules.
///
/// Tags are emitted in the order meaning, structure, family, join, and only
/// for fields the task requires.
pub fn score_with(rules: &ScoringRules, task: &Task, responses: &ResponseMap) -> ScoreSummary {
    let answered = |field: &str| has_min_chars(responses.get(field), rules.min_chars);
    let mut tags = Vec::new();

    for (field, tag) in [
        (MEANING, ErrorTag::MeaningError),
        (STRUCTURE, ErrorTag::StructureError),
        (FAMILY, ErrorTag::FamilyError),
    ] {
        if task.requires_field(field) && !answered(field) {
            tags.push(tag);
        }
    }

    if task.requires_field(JOIN)
        && (!answered(JOIN) || (rules.check_join && detect_join_error(task, responses)))
    {
        tags.push(ErrorTag::JoinError);
    }

    let summary = ScoreSummary::from_tags(tags);
    debug!(
        task_id = %task.id,
        version = %rules.version,
        mastered = summary.mastered,
        error_tags = ?summary.error_tags,
        "responses scored"
    );
    summary
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
