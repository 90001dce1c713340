//! Next-task selection.

use morpho_core::{ErrorTag, ScoreSummary, SupportStatus, Task, TaskId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::table::RouteTable;

/// What the router needs to know about the finished task.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSignal {
    /// Whether the task counts as mastered.
    pub mastered: bool,
    /// Error tags, highest priority first.
    #[serde(default)]
    pub error_tags: Vec<ErrorTag>,
}

impl RouteSignal {
    /// Signal sent once the validator reports full support.
    pub fn supported() -> Self {
        Self {
            mastered: true,
            error_tags: Vec::new(),
        }
    }
}

impl From<&ScoreSummary> for RouteSignal {
    fn from(summary: &ScoreSummary) -> Self {
        Self {
            mastered: summary.mastered,
            error_tags: summary.error_tags.clone(),
        }
    }
}

impl From<&SupportStatus> for RouteSignal {
    fn from(status: &SupportStatus) -> Self {
        Self {
            mastered: status.supported,
            error_tags: Vec::new(),
        }
    }
}

/// Pick the next task id, or `None` at the end of the sequence.
///
/// Error rules take priority over mastery rules. Tags are tried in signal
/// order; for each tag the first matching rule in table order wins.
pub fn next_task_id(table: &RouteTable, task: &Task, signal: &RouteSignal) -> Option<TaskId> {
    let rules = || table.rules_for(&task.task_type);

    let by_error = signal.error_tags.iter().find_map(|tag| {
        rules()
            .find(|rule| rule.if_error_tag == Some(*tag))
            .map(|rule| (rule, Some(*tag)))
    });
    let chosen = by_error.or_else(|| {
        rules()
            .find(|rule| rule.if_mastered == Some(signal.mastered))
            .map(|rule| (rule, None))
    });

    match chosen {
        Some((rule, tag)) => {
            debug!(
                from = %task.id,
                task_type = %task.task_type,
                to = %rule.to_task_id,
                error_tag = tag.map(ErrorTag::as_str),
                mastered = signal.mastered,
                "route matched"
            );
            Some(rule.to_task_id.clone())
        }
        None => {
            debug!(
                from = %task.id,
                task_type = %task.task_type,
                mastered = signal.mastered,
                "end of routes"
            );
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
