//! Learner session state machine.
//!
//! A [`LabSession`] owns everything that changes while a learner works:
//! the current task, the response map, the matrix selection and the
//! mediator panel. The engines are called as pure functions on each
//! transition; none of them sees or keeps this state.
//!
//! ```text
//!   Active ──check──▶ Active (mediator updated)
//!   Active ──advance, supported, route found──▶ Active (next task, reset)
//!   Active ──advance, supported, no route────▶ Finished
//!   Active ──advance, not supported──────────▶ Active (guardrail)
//! ```

use chrono::{DateTime, Utc};
use morpho_core::response::{MATRIX_PROOF_WORD, MATRIX_WORD_SUM};
use morpho_core::{ResponseMap, ScoreSummary, SessionId, SupportStatus, Task, TaskId};
use morpho_guidance::{GuidanceRules, MatrixGrid, evaluate_with};
use morpho_routing::{RouteSignal, next_task_id};
use morpho_scoring::{ScoringRules, score_with};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::content::Content;

/// Mediator title shown before any check.
pub const TITLE_IDLE: &str = "Mediator";
/// Mediator title once the evidence is supported.
pub const TITLE_SUPPORTED: &str = "Supported";
/// Mediator title while evidence is missing.
pub const TITLE_NOT_SUPPORTED: &str = "Not yet supported";

const STATUS_SUPPORTED: &str = "Your explanation is supported by evidence. You can continue.";
const STATUS_REVISE: &str = "Revise using the prompts above, then check again.";
const STATUS_BLOCKED: &str = "Before continuing: revise until your explanation is supported.";
const STATUS_END: &str = "End of routes.";

/// Errors from session transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The session reached the end of its routes.
    #[error("session is finished")]
    Finished,
    /// A matrix action on a task that is not a matrix task.
    #[error("task {task_id} has no matrix")]
    NotMatrix {
        /// Current task.
        task_id: String,
    },
    /// The word is not a cell of the current matrix.
    #[error("<{word}> is not in the matrix")]
    NotInMatrix {
        /// Requested word.
        word: String,
    },
    /// The proof word must be one of the selected words.
    #[error("<{word}> is not selected")]
    NotSelected {
        /// Requested word.
        word: String,
    },
    /// A route points at a task the catalog does not hold.
    #[error("route leads to unknown task {task_id}")]
    UnknownTask {
        /// Route target.
        task_id: String,
    },
}

/// Whether the learner can still work.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Working on a task.
    Active,
    /// No route left from the last task.
    Finished,
}

/// The feedback panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Mediator {
    /// Headline.
    pub title: String,
    /// Scaffold prompts from the last check.
    pub prompts: Vec<String>,
    /// One-line status.
    pub status: String,
}

impl Default for Mediator {
    fn default() -> Self {
        Self {
            title: TITLE_IDLE.to_owned(),
            prompts: Vec::new(),
            status: String::new(),
        }
    }
}

/// Outcome of [`LabSession::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next task.
    Moved {
        /// Task just completed.
        from: TaskId,
        /// New current task.
        to: TaskId,
    },
    /// Evidence is not supported yet; nothing changed but the mediator.
    Blocked,
    /// No route from the current task; the session is finished.
    Finished,
}

/// One learner's pass through the content.
#[derive(Debug)]
pub struct LabSession {
    id: SessionId,
    started_at: DateTime<Utc>,
    content: Content,
    guidance: GuidanceRules,
    scoring: ScoringRules,
    task: Task,
    state: SessionState,
    responses: ResponseMap,
    mediator: Mediator,
    can_continue: bool,
    completed: Vec<TaskId>,
}

impl LabSession {
    /// Start a session on the task `start`.
    pub fn new(
        content: Content,
        start: &str,
        guidance: GuidanceRules,
        scoring: ScoringRules,
    ) -> anyhow::Result<Self> {
        let task = content.task(start)?.clone();
        let id = SessionId::new();
        info!(session_id = %id, task_id = %task.id, guidance = %guidance.version, "session started");
        Ok(Self {
            id,
            started_at: Utc::now(),
            content,
            guidance,
            scoring,
            task,
            state: SessionState::Active,
            responses: ResponseMap::new(),
            mediator: Mediator::default(),
            can_continue: false,
            completed: Vec::new(),
        })
    }

    /// Session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// When the session started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current task id.
    pub fn task_id(&self) -> &TaskId {
        &self.task.id
    }

    /// Current task.
    pub fn task(&self) -> &Task {
        &self.task
    }

    /// Content the session routes through.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Responses entered so far.
    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    /// Feedback panel.
    pub fn mediator(&self) -> &Mediator {
        &self.mediator
    }

    /// Whether the last check reported full support.
    pub fn can_continue(&self) -> bool {
        self.can_continue
    }

    /// Tasks completed, in order.
    pub fn completed(&self) -> &[TaskId] {
        &self.completed
    }

    /// Matrix for the current task.
    pub fn grid(&self) -> Option<MatrixGrid> {
        let task = self.task();
        task.is_matrix().then(|| MatrixGrid::from_task(task))
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Write a free-text field.
    pub fn set_response(&mut self, field: &str, text: &str) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.responses.set(field, text);
        self.can_continue = false;
        Ok(())
    }

    /// Select or unselect a matrix word.
    ///
    /// The first selection becomes the proof word. Unselecting the proof
    /// word moves it to the first remaining selection and clears the word sum.
    pub fn toggle_word(&mut self, word: &str) -> Result<(), SessionError> {
        self.ensure_active()?;
        let word = word.trim();
        let grid = self.grid().ok_or_else(|| SessionError::NotMatrix {
            task_id: self.task.id.to_string(),
        })?;
        if !grid.contains(word) {
            return Err(SessionError::NotInMatrix {
                word: word.to_owned(),
            });
        }

        let mut selected = self.responses.selected_words();
        match selected.iter().position(|w| w == word) {
            Some(pos) => {
                let _ = selected.remove(pos);
            }
            None => selected.push(word.to_owned()),
        }
        self.responses.set_selected_words(&selected);

        let proof = self.responses.proof_word().to_owned();
        let first = selected.first().cloned().unwrap_or_default();
        if proof.is_empty() {
            self.responses.set(MATRIX_PROOF_WORD, first);
        } else if !selected.contains(&proof) {
            self.responses.set(MATRIX_PROOF_WORD, first);
            self.responses.set(MATRIX_WORD_SUM, "");
        }
        self.can_continue = false;
        Ok(())
    }

    /// Pick which selected word to prove. Clears the word sum.
    pub fn choose_proof_word(&mut self, word: &str) -> Result<(), SessionError> {
        self.ensure_active()?;
        let word = word.trim();
        if !self.responses.selected_words().iter().any(|w| w == word) {
            return Err(SessionError::NotSelected {
                word: word.to_owned(),
            });
        }
        self.responses.set(MATRIX_PROOF_WORD, word);
        self.responses.set(MATRIX_WORD_SUM, "");
        self.can_continue = false;
        Ok(())
    }

    /// Run the evidence validator and update the mediator.
    pub fn check(&mut self) -> SupportStatus {
        let status = evaluate_with(&self.guidance, &self.task, &self.responses);
        self.can_continue = status.supported;
        self.mediator = if status.supported {
            Mediator {
                title: TITLE_SUPPORTED.to_owned(),
                prompts: status.prompts.clone(),
                status: STATUS_SUPPORTED.to_owned(),
            }
        } else {
            Mediator {
                title: TITLE_NOT_SUPPORTED.to_owned(),
                prompts: status.prompts.clone(),
                status: STATUS_REVISE.to_owned(),
            }
        };
        info!(
            session_id = %self.id,
            task_id = %self.task.id,
            supported = status.supported,
            "evidence checked"
        );
        status
    }

    /// Move on if the evidence is supported.
    ///
    /// Re-validates first and never routes unsupported work. Routing uses
    /// the supported signal (`mastered`, no error tags). A route to a task
    /// missing from the catalog is an error and leaves the session as it was.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        self.ensure_active()?;
        let status = evaluate_with(&self.guidance, &self.task, &self.responses);
        if !status.supported {
            self.can_continue = false;
            self.mediator = Mediator {
                title: TITLE_NOT_SUPPORTED.to_owned(),
                prompts: status.prompts,
                status: STATUS_BLOCKED.to_owned(),
            };
            info!(session_id = %self.id, task_id = %self.task.id, "advance blocked");
            return Ok(Advance::Blocked);
        }

        let signal = RouteSignal::from(&status);
        let next = match next_task_id(&self.content.routes, &self.task, &signal) {
            Some(id) => Some(self.content.catalog.get(&id).cloned().map_err(|_| {
                SessionError::UnknownTask {
                    task_id: id.to_string(),
                }
            })?),
            None => None,
        };
        let from = self.task.id.clone();
        self.completed.push(from.clone());
        match next {
            Some(task) => {
                let to = task.id.clone();
                self.task = task;
                self.responses.clear();
                self.mediator = Mediator::default();
                self.can_continue = false;
                info!(session_id = %self.id, %from, %to, "advanced");
                Ok(Advance::Moved { from, to })
            }
            None => {
                self.state = SessionState::Finished;
                self.can_continue = false;
                self.mediator.status = STATUS_END.to_owned();
                info!(
                    session_id = %self.id,
                    %from,
                    completed = self.completed.len(),
                    "session finished"
                );
                Ok(Advance::Finished)
            }
        }
    }

    /// Legacy score of the current responses; informational only.
    pub fn score(&self) -> ScoreSummary {
        score_with(&self.scoring, &self.task, &self.responses)
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Active => Ok(()),
            SessionState::Finished => Err(SessionError::Finished),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
