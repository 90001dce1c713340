//! Scaffold prompt text.
//!
//! Prompts name the object of attention (the base, the suffix, the join)
//! and ask for evidence. They never state the built word's structure or
//! which convention applies.

use morpho_core::Task;

/// Values a prompt may mention, drawn from the task.
#[derive(Clone, Debug)]
pub struct PromptContext<'a> {
    /// Base morpheme.
    pub base: &'a str,
    /// Primary suffix, if configured.
    pub suffix: Option<&'a str>,
    /// The built word: first listed word, else the context target word.
    pub word: Option<&'a str>,
    /// Context sentences, non-blank.
    pub sentences: Vec<&'a str>,
}

impl<'a> PromptContext<'a> {
    /// Collect prompt values from a task.
    pub fn from_task(task: &'a Task) -> Self {
        let target = task.context.target_word.trim();
        let word = task
            .primary_word()
            .or_else(|| (!target.is_empty()).then_some(target));
        Self {
            base: task.targets.base.trim(),
            suffix: task.primary_suffix(),
            word,
            sentences: task
                .context
                .sentences
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// Nudge to reread the context sentence; `None` without a sentence.
pub fn reread_sentence(ctx: &PromptContext<'_>) -> Option<String> {
    if ctx.sentences.is_empty() {
        return None;
    }
    let sentence = ctx.sentences.join(" ");
    Some(match ctx.word {
        Some(word) => format!("Reread the sentence: \"{sentence}\" How is <{word}> used here?"),
        None => format!("Reread the sentence: \"{sentence}\" What is happening in it?"),
    })
}

/// Meaning scaffold.
pub fn meaning(ctx: &PromptContext<'_>) -> String {
    match (ctx.suffix, ctx.word) {
        (Some(suffix), _) => format!(
            "Meaning first: what does <-{suffix}> add to the meaning in this word? Say it in a phrase of your own."
        ),
        (None, Some(word)) => format!(
            "Meaning first: what does <{word}> mean in this sentence? Say it in a phrase of your own."
        ),
        (None, None) => {
            "Meaning first: what does this word mean in the sentence? Say it in a phrase of your own."
                .to_owned()
        }
    }
}

/// Structure scaffold.
pub fn structure(ctx: &PromptContext<'_>) -> String {
    match ctx.suffix {
        Some(suffix) => format!(
            "Structure: show how <{}> and <-{suffix}> combine, using + and an arrow.",
            ctx.base
        ),
        None => format!(
            "Structure: show how <{}> combines with its affix, using + and an arrow.",
            ctx.base
        ),
    }
}

/// Join scaffolds: a comparison prompt and an evidence prompt.
pub fn join(ctx: &PromptContext<'_>) -> [String; 2] {
    let built = ctx
        .word
        .map_or_else(|| "the built word".to_owned(), |w| format!("the built word <{w}>"));
    [
        format!(
            "Check the join: compare the base spelling <{}> with {built}. What stayed the same? What changed, if anything? State it clearly.",
            ctx.base
        ),
        "Evidence prompt: point to the exact letters at the join that support your claim."
            .to_owned(),
    ]
}

/// Family scaffold.
pub fn family(ctx: &PromptContext<'_>) -> String {
    format!(
        "Word family evidence: name one related word that helps you keep the base <{}> in mind.",
        ctx.base
    )
}

/// Matrix: nothing selected yet.
pub fn matrix_select(ctx: &PromptContext<'_>) -> String {
    format!(
        "Family evidence: select at least one word from the matrix built on <{}>.",
        ctx.base
    )
}

/// Matrix: no proof word, or one that is not among the selection.
pub fn matrix_proof_word() -> String {
    "Proof word: choose one of your selected words to prove.".to_owned()
}

/// Matrix: the word sum does not yet show the structure.
pub fn matrix_word_sum(ctx: &PromptContext<'_>, proof_word: &str) -> String {
    let proof = if proof_word.is_empty() {
        "your proof word".to_owned()
    } else {
        format!("<{proof_word}>")
    };
    format!(
        "Word sum: write a sum for {proof} that shows the whole word, the base <{}>, the affix you used, and a + or =.",
        ctx.base
    )
}

/// Matrix: the proof word involves a spelling change at the join.
pub fn matrix_join(ctx: &PromptContext<'_>, proof_word: &str) -> String {
    format!(
        "Check the join in <{proof_word}>: compare it letter by letter with <{}>. What changed, if anything?",
        ctx.base
    )
}

/// Closing prompt once everything is supported.
pub fn transfer() -> String {
    "Supported. Now: can you use the same reasoning on a new word?".to_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
