//! Task model.
//!
//! A [`Task`] is authored externally (see `data/tasks.json`) and is never
//! mutated by the engines. Optional collections default to empty so that
//! downstream checks degrade to "not applicable" rather than failing.
//!
//! Task records use `snake_case` keys:
//!
//! ```json
//! {
//!   "id": "t1_jump_ing_join",
//!   "task_type": "join_explain",
//!   "targets": { "base": "jump", "suffixes": ["ing"], "words": ["jumping"] },
//!   "response": { "mode": "fields", "fields": [{ "id": "join", "label": "Join" }] },
//!   "context": { "sentence": "The child is jumping.", "target_word": "jumping" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::ids::TaskId;

/// One authored learning task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task id.
    pub id: TaskId,
    /// Category used only for routing lookups.
    pub task_type: String,
    /// Morphemes the task is about.
    pub targets: Targets,
    /// What the learner must produce.
    pub response: ResponseSpec,
    /// Sentence context shown to the learner.
    #[serde(default)]
    pub context: TaskContext,
    /// Display prompts for the driving surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<TaskPrompts>,
}

impl Task {
    /// Whether the task requires a free-text field with the given id.
    pub fn requires_field(&self, field_id: &str) -> bool {
        self.response.fields.iter().any(|f| f.id == field_id)
    }

    /// Whether the learner answers through the matrix builder.
    pub fn is_matrix(&self) -> bool {
        self.response.mode == ResponseMode::MatrixBuilder
    }

    /// First configured non-empty suffix, trimmed.
    pub fn primary_suffix(&self) -> Option<&str> {
        first_non_empty(&self.targets.suffixes)
    }

    /// First pre-listed valid word, trimmed.
    pub fn primary_word(&self) -> Option<&str> {
        first_non_empty(&self.targets.words)
    }

    /// All configured non-empty affixes, prefixes first.
    pub fn affixes(&self) -> impl Iterator<Item = &str> {
        self.targets
            .prefixes
            .iter()
            .chain(self.targets.suffixes.iter())
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
    }
}

fn first_non_empty(values: &[String]) -> Option<&str> {
    values.iter().map(|v| v.trim()).find(|v| !v.is_empty())
}

/// Morphemes targeted by a task.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    /// The base morpheme.
    pub base: String,
    /// Prefixes available to combine with the base.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefixes: Vec<String>,
    /// Suffixes available to combine with the base. The first is primary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suffixes: Vec<String>,
    /// Pre-listed valid combinations. The first is the target word.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<String>,
    /// Related words in the same family (metadata only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family_relatives: Vec<String>,
    /// Bases that look alike but differ in meaning (metadata only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub twin_bases: Vec<String>,
}

/// How the learner responds to a task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// One free-text answer per required field.
    #[default]
    #[serde(alias = "text", alias = "free_text")]
    Fields,
    /// Select words from a base x affix grid and prove one with a word sum.
    #[serde(alias = "matrix")]
    MatrixBuilder,
}

impl std::fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fields => write!(f, "fields"),
            Self::MatrixBuilder => write!(f, "matrix_builder"),
        }
    }
}

/// Required response shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// Response mode.
    #[serde(default)]
    pub mode: ResponseMode,
    /// Required free-text fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSpec>,
}

/// A required free-text field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field id (`meaning`, `structure`, `join`, `family`, ...).
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
}

/// Sentence context for a task.
///
/// Accepts either `sentences` (list) or `sentence` (single) on input;
/// always serializes as `sentences`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTaskContext")]
pub struct TaskContext {
    /// Context sentences.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sentences: Vec<String>,
    /// The word the task centres on.
    pub target_word: String,
    /// Common meaning of the target word in this sentence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gloss: Option<String>,
    /// Audio reference for the rendering layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

#[derive(Deserialize)]
struct RawTaskContext {
    #[serde(default)]
    sentences: Vec<String>,
    #[serde(default)]
    sentence: Option<String>,
    #[serde(default)]
    target_word: String,
    #[serde(default)]
    gloss: Option<String>,
    #[serde(default)]
    audio: Option<String>,
}

impl From<RawTaskContext> for TaskContext {
    fn from(raw: RawTaskContext) -> Self {
        let mut sentences = raw.sentences;
        if let Some(sentence) = raw.sentence {
            sentences.insert(0, sentence);
        }
        Self {
            sentences,
            target_word: raw.target_word,
            gloss: raw.gloss,
            audio: raw.audio,
        }
    }
}

/// Display prompts consumed by the driving surface.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPrompts {
    /// Lead-in text.
    #[serde(default)]
    pub stem: String,
    /// Numbered questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<PromptQuestion>,
    /// Optional supports (sentence frames, hints).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supports: Vec<PromptSupport>,
}

/// A question shown with the task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptQuestion {
    /// Question id.
    pub id: String,
    /// Question text.
    pub text: String,
}

/// A support shown with the task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSupport {
    /// Support kind, e.g. `sentence_frame`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Support content.
    pub content: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
