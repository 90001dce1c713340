//! Matrix builder: the base x affix grid and the proof checks.
//!
//! Grid cells are plain concatenations of prefix + base + suffix. Join
//! conventions are not applied here; the proof step is where the learner
//! shows what happens at the join.

use morpho_core::text::{has_min_chars, includes_any, normalize};
use morpho_core::{ResponseMap, Task};
use morpho_join::{AffixInference, JoinConventionKind, infer_affixes};
use serde::Serialize;

use crate::rules::GuidanceRules;

/// One cell of the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    /// Row prefix (`""` for the bare row).
    pub prefix: String,
    /// Column suffix (`""` for the bare column).
    pub suffix: String,
    /// Concatenated word.
    pub word: String,
}

/// Base x affix grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatrixGrid {
    /// Base morpheme.
    pub base: String,
    /// Row prefixes; a single `""` when none are configured.
    pub prefixes: Vec<String>,
    /// Column suffixes; a single `""` when none are configured.
    pub suffixes: Vec<String>,
}

impl MatrixGrid {
    /// Build a grid. Affixes are trimmed, deduplicated, and blanks dropped.
    pub fn build<P: AsRef<str>, S: AsRef<str>>(base: &str, prefixes: &[P], suffixes: &[S]) -> Self {
        Self {
            base: base.trim().to_owned(),
            prefixes: axis(prefixes),
            suffixes: axis(suffixes),
        }
    }

    /// Grid for a task's targets.
    pub fn from_task(task: &Task) -> Self {
        Self::build(
            &task.targets.base,
            &task.targets.prefixes,
            &task.targets.suffixes,
        )
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> Vec<MatrixCell> {
        self.prefixes
            .iter()
            .flat_map(|prefix| {
                self.suffixes.iter().map(move |suffix| MatrixCell {
                    prefix: prefix.clone(),
                    suffix: suffix.clone(),
                    word: format!("{prefix}{}{suffix}", self.base),
                })
            })
            .collect()
    }

    /// Words in row-major order.
    pub fn words(&self) -> Vec<String> {
        self.cells().into_iter().map(|c| c.word).collect()
    }

    /// Whether the grid produces `word`.
    pub fn contains(&self, word: &str) -> bool {
        self.cells().iter().any(|c| c.word == word)
    }
}

fn axis<A: AsRef<str>>(affixes: &[A]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for affix in affixes {
        let affix = affix.as_ref().trim();
        if !affix.is_empty() && !out.iter().any(|a| a == affix) {
            out.push(affix.to_owned());
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Outcome of checking a matrix proof.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatrixProofCheck {
    /// No word has been selected.
    pub missing_selection: bool,
    /// The proof word is empty or not among the selected words.
    pub invalid_proof_word: bool,
    /// The word sum does not show the required structure.
    pub incomplete_word_sum: bool,
    /// Affixes recovered from the proof word, when unambiguous.
    pub inference: Option<AffixInference>,
}

impl MatrixProofCheck {
    /// Whether every sub-condition holds.
    pub fn is_complete(&self) -> bool {
        !self.missing_selection && !self.invalid_proof_word && !self.incomplete_word_sum
    }

    /// Whether the proof word involves a spelling change at the join.
    pub fn proof_changes_at_join(&self) -> bool {
        self.inference
            .as_ref()
            .is_some_and(|i| i.convention != JoinConventionKind::None)
    }
}

/// Check the matrix proof responses of a task.
///
/// 1. at least one word is selected
/// 2. the proof word is one of the selected words
/// 3. the word sum is long enough and contains a combination marker, the
///    proof word, and besides the proof word the base and (when any are
///    configured) an affix
///
/// An empty selection short-circuits: the remaining checks are not run.
pub fn check_matrix_proof(
    rules: &GuidanceRules,
    task: &Task,
    responses: &ResponseMap,
) -> MatrixProofCheck {
    let selected = responses.selected_words();
    if selected.is_empty() {
        return MatrixProofCheck {
            missing_selection: true,
            ..MatrixProofCheck::default()
        };
    }

    let proof = normalize(responses.proof_word());
    let invalid_proof_word = proof.is_empty() || !selected.iter().any(|w| normalize(w) == proof);

    let sum_raw = responses.word_sum();
    let sum = normalize(sum_raw);
    let base = normalize(&task.targets.base);
    let affixes: Vec<String> = task.affixes().map(normalize).collect();

    // base and affix must be written out, not just read off the proof word
    let parts = if proof.is_empty() {
        sum.clone()
    } else {
        sum.replacen(proof.as_str(), " ", 1)
    };
    let shows_affix = affixes.is_empty() || affixes.iter().any(|a| parts.contains(a.as_str()));
    let incomplete_word_sum = !(has_min_chars(sum_raw, rules.word_sum_min_chars)
        && includes_any(&sum, rules.combination_markers)
        && !proof.is_empty()
        && sum.contains(proof.as_str())
        && parts.contains(base.as_str())
        && shows_affix);

    let inference = if proof.is_empty() {
        None
    } else {
        infer_affixes(
            &proof,
            &base,
            &task.targets.prefixes,
            &task.targets.suffixes,
        )
    };

    MatrixProofCheck {
        missing_selection: false,
        invalid_proof_word,
        incomplete_word_sum,
        inference,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::response::{MATRIX_PROOF_WORD, MATRIX_WORD_SUM};

    fn make_task() -> Task {
        serde_json::from_value(serde_json::json!({
            "id": "t5_matrix_make",
            "task_type": "matrix_proof",
            "targets": { "base": "make", "prefixes": ["re"], "suffixes": ["ing", "er", "s"] },
            "response": { "mode": "matrix_builder" }
        }))
        .unwrap()
    }

    fn responses(selected: &[&str], proof: &str, sum: &str) -> ResponseMap {
        let mut r = ResponseMap::new()
            .with(MATRIX_PROOF_WORD, proof)
            .with(MATRIX_WORD_SUM, sum);
        r.set_selected_words(selected);
        r
    }

    // ── grid ───────────────────────────────────────────────────────────

    #[test]
    fn grid_concatenates_without_joins() {
        let grid = MatrixGrid::from_task(&make_task());
        assert_eq!(grid.prefixes, vec!["re"]);
        assert_eq!(grid.words(), vec!["remakeing", "remakeer", "remakes"]);
        assert!(grid.contains("remakes"));
        assert!(!grid.contains("making"));
    }

    #[test]
    fn empty_axes_become_a_single_blank() {
        let grid = MatrixGrid::build("jump", &[" ", ""], &["ing", " ing ", "ed"]);
        assert_eq!(grid.prefixes, vec![""]);
        assert_eq!(grid.suffixes, vec!["ing", "ed"]);
        assert_eq!(grid.words(), vec!["jumping", "jumped"]);

        let bare = MatrixGrid::build::<&str, &str>("run", &[], &[]);
        assert_eq!(bare.words(), vec!["run"]);
    }

    // ── proof checks ───────────────────────────────────────────────────

    #[test]
    fn empty_selection_short_circuits() {
        let check = check_matrix_proof(&GuidanceRules::V2, &make_task(), &responses(&[], "", ""));
        assert!(check.missing_selection);
        assert!(!check.invalid_proof_word);
        assert!(!check.incomplete_word_sum);
        assert!(!check.is_complete());
    }

    #[test]
    fn complete_proof() {
        let r = responses(&["remakes", "making"], "making", "making = make + ing");
        let check = check_matrix_proof(&GuidanceRules::V2, &make_task(), &r);
        assert!(check.is_complete(), "{check:?}");
        assert!(check.proof_changes_at_join());
    }

    #[test]
    fn proof_word_must_be_selected() {
        let r = responses(&["remakes"], "making", "making = make + ing");
        let check = check_matrix_proof(&GuidanceRules::V2, &make_task(), &r);
        assert!(check.invalid_proof_word);
        assert!(!check.incomplete_word_sum);
    }

    #[test]
    fn word_sum_needs_each_part() {
        let task = make_task();
        let cases = [
            "making + ing",          // no base
            "make + ing is a word",  // no proof word
            "making make ing",       // no marker
            "mak=ing",               // too short, no base
        ];
        for sum in cases {
            let r = responses(&["making"], "making", sum);
            let check = check_matrix_proof(&GuidanceRules::V2, &task, &r);
            assert!(check.incomplete_word_sum, "should be incomplete: {sum}");
        }
    }

    #[test]
    fn base_inside_proof_word_does_not_count() {
        let r = responses(&["remakes"], "remakes", "remakes = re + s");
        assert!(check_matrix_proof(&GuidanceRules::V2, &make_task(), &r).incomplete_word_sum);
        let r = responses(&["remakes"], "remakes", "remakes = re + make + s");
        assert!(check_matrix_proof(&GuidanceRules::V2, &make_task(), &r).is_complete());
    }

    #[test]
    fn word_sum_without_any_affix() {
        let r = responses(&["make"], "make", "make = make");
        let check = check_matrix_proof(&GuidanceRules::V2, &make_task(), &r);
        assert!(!check.invalid_proof_word);
        assert!(check.incomplete_word_sum);
        assert_eq!(check.inference, None);
    }

    #[test]
    fn equals_marker_is_v2_only() {
        let r = responses(&["making"], "making", "making = make, ing");
        assert!(!check_matrix_proof(&GuidanceRules::V2, &make_task(), &r).incomplete_word_sum);
        assert!(check_matrix_proof(&GuidanceRules::V1, &make_task(), &r).incomplete_word_sum);
    }

    #[test]
    fn no_configured_affixes_is_not_applicable() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "id": "bare",
            "task_type": "matrix_proof",
            "targets": { "base": "run" },
            "response": { "mode": "matrix_builder" }
        }))
        .unwrap();
        let r = responses(&["run"], "run", "run = run + nothing");
        assert!(check_matrix_proof(&GuidanceRules::V2, &task, &r).is_complete());
    }
}
