//! Evidence validator.
//!
//! Each required field is checked independently and the results are
//! unioned into a [`SupportStatus`]. Matrix-builder tasks are additionally
//! checked with [`check_matrix_proof`]. The function keeps no state between
//! calls; identical inputs always produce identical output.

use std::collections::BTreeSet;

use morpho_core::response::{FAMILY, JOIN, MEANING, STRUCTURE};
use morpho_core::text::{has_min_chars, includes_any, normalize};
use morpho_core::{FocusArea, ResponseMap, SupportStatus, Task};
use tracing::debug;

use crate::matrix::check_matrix_proof;
use crate::prompts::{self, PromptContext};
use crate::rules::GuidanceRules;

/// Evaluate responses with the current rules ([`GuidanceRules::V2`]).
pub fn evaluate(task: &Task, responses: &ResponseMap) -> SupportStatus {
    evaluate_with(&GuidanceRules::default(), task, responses)
}

/// Evaluate responses with the given rules.
pub fn evaluate_with(rules: &GuidanceRules, task: &Task, responses: &ResponseMap) -> SupportStatus {
    let ctx = PromptContext::from_task(task);
    let mut focus: BTreeSet<FocusArea> = BTreeSet::new();
    let mut out: Vec<String> = Vec::new();

    if let Some(nudge) = prompts::reread_sentence(&ctx) {
        out.push(nudge);
    }

    // Free-text fields, in fixed dimension order
    if needs_meaning(rules, task, responses) {
        let _ = focus.insert(FocusArea::Meaning);
        out.push(prompts::meaning(&ctx));
    }
    if needs_structure(rules, task, responses) {
        let _ = focus.insert(FocusArea::Structure);
        out.push(prompts::structure(&ctx));
    }
    if needs_join(rules, task, responses) {
        let _ = focus.insert(FocusArea::Join);
        out.extend(prompts::join(&ctx));
    }
    if needs_family(rules, task, responses) {
        let _ = focus.insert(FocusArea::Family);
        out.push(prompts::family(&ctx));
    }

    if task.is_matrix() {
        let check = check_matrix_proof(rules, task, responses);
        let proof = responses.proof_word();
        if check.missing_selection {
            let _ = focus.insert(FocusArea::Family);
            out.push(prompts::matrix_select(&ctx));
        }
        if check.invalid_proof_word {
            let _ = focus.insert(FocusArea::Structure);
            out.push(prompts::matrix_proof_word());
        }
        if check.incomplete_word_sum {
            let _ = focus.insert(FocusArea::Structure);
            out.push(prompts::matrix_word_sum(&ctx, proof));
            if check.proof_changes_at_join() {
                out.push(prompts::matrix_join(&ctx, proof));
            }
        }
    }

    let supported = focus.is_empty();
    if supported {
        out.push(prompts::transfer());
    }

    debug!(
        task_id = %task.id,
        version = %rules.version,
        supported,
        focus = ?focus,
        prompt_count = out.len(),
        "evidence evaluated"
    );

    SupportStatus {
        supported,
        focus,
        prompts: out,
    }
}

fn needs_meaning(rules: &GuidanceRules, task: &Task, r: &ResponseMap) -> bool {
    if !task.requires_field(MEANING) {
        return false;
    }
    let text = r.get(MEANING);
    let keyword = includes_any(&normalize(text), rules.meaning_keywords);
    !(keyword || has_min_chars(text, rules.meaning_min_chars))
}

fn needs_structure(rules: &GuidanceRules, task: &Task, r: &ResponseMap) -> bool {
    if !task.requires_field(STRUCTURE) {
        return false;
    }
    let text = normalize(r.get(STRUCTURE));
    let base = normalize(&task.targets.base);
    let suffix = task.primary_suffix().map(normalize);
    let shows_suffix = suffix.is_none_or(|s| text.contains(s.as_str()));
    !(text.contains(base.as_str())
        && shows_suffix
        && includes_any(&text, rules.combination_markers))
}

fn needs_join(rules: &GuidanceRules, task: &Task, r: &ResponseMap) -> bool {
    if !task.requires_field(JOIN) {
        return false;
    }
    let text = r.get(JOIN);
    !(has_min_chars(text, rules.join_min_chars)
        && includes_any(&normalize(text), rules.join_vocabulary))
}

fn needs_family(rules: &GuidanceRules, task: &Task, r: &ResponseMap) -> bool {
    if !task.requires_field(FAMILY) {
        return false;
    }
    !has_min_chars(r.get(FAMILY), rules.family_min_chars)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use morpho_core::logging::capture_logs;
    use morpho_join::{AffixInference, JoinConventionKind};
    use morpho_core::response::{MATRIX_PROOF_WORD, MATRIX_WORD_SUM};

    fn jump_task(fields: &[&str]) -> Task {
        let fields: Vec<serde_json::Value> = fields
            .iter()
            .map(|id| serde_json::json!({ "id": id, "label": id }))
            .collect();
        serde_json::from_value(serde_json::json!({
            "id": "t1_jump_ing_join",
            "task_type": "join_explain",
            "targets": { "base": "jump", "suffixes": ["ing"], "words": ["jumping"] },
            "response": { "mode": "fields", "fields": fields },
            "context": { "sentence": "The child is jumping over the puddle.", "target_word": "jumping" }
        }))
        .unwrap()
    }

    fn matrix_task() -> Task {
        serde_json::from_value(serde_json::json!({
            "id": "t7_matrix_run",
            "task_type": "matrix_proof",
            "targets": { "base": "run", "suffixes": ["ing", "s", "er"] },
            "response": { "mode": "matrix_builder" }
        }))
        .unwrap()
    }

    fn all_fields() -> Task {
        jump_task(&[MEANING, STRUCTURE, JOIN, FAMILY])
    }

    fn good_responses() -> ResponseMap {
        ResponseMap::new()
            .with(MEANING, "in the process of jumping right now")
            .with(STRUCTURE, "jump + ing → jumping")
            .with(JOIN, "no change: the base stays the same at the join")
            .with(FAMILY, "jumped")
    }

    // ── support ────────────────────────────────────────────────────────

    #[test]
    fn empty_responses_flag_every_required_field() {
        let status = evaluate(&all_fields(), &ResponseMap::new());
        assert!(!status.supported);
        let focus: Vec<FocusArea> = status.focus.iter().copied().collect();
        assert_eq!(
            focus,
            vec![FocusArea::Meaning, FocusArea::Structure, FocusArea::Join, FocusArea::Family]
        );
    }

    #[test]
    fn full_evidence_is_supported_with_transfer_prompt() {
        let status = evaluate(&all_fields(), &good_responses());
        assert!(status.supported, "{status:?}");
        assert!(status.focus.is_empty());
        assert_eq!(status.prompts.len(), 2);
        assert!(status.prompts[0].starts_with("Reread the sentence"));
        assert_eq!(status.prompts[1], prompts::transfer());
    }

    #[test]
    fn fields_not_required_are_not_checked() {
        let status = evaluate(&jump_task(&[JOIN]), &ResponseMap::new().with(
            JOIN,
            "compare the letters: nothing changed",
        ));
        assert!(status.supported);
    }

    #[test]
    fn unknown_field_ids_are_ignored() {
        let status = evaluate(&jump_task(&["notes"]), &ResponseMap::new());
        assert!(status.supported);
    }

    // ── meaning ────────────────────────────────────────────────────────

    #[test]
    fn meaning_length_threshold() {
        let task = jump_task(&[MEANING]);
        let short = ResponseMap::new().with(MEANING, "  doing  ");
        assert!(evaluate(&task, &short).needs(FocusArea::Meaning));
        let enough = ResponseMap::new().with(MEANING, "  ongoing!  ");
        assert!(!evaluate(&task, &enough).needs(FocusArea::Meaning));
    }

    #[test]
    fn v1_accepts_meaning_keyword() {
        let task = jump_task(&[MEANING]);
        let r = ResponseMap::new().with(MEANING, "doing");
        assert!(!evaluate_with(&GuidanceRules::V1, &task, &r).needs(FocusArea::Meaning));
        assert!(evaluate_with(&GuidanceRules::V2, &task, &r).needs(FocusArea::Meaning));
    }

    // ── structure ──────────────────────────────────────────────────────

    #[test]
    fn structure_needs_base_suffix_and_marker() {
        let task = jump_task(&[STRUCTURE]);
        for text in ["jump + ing", "JUMP → ING", "jump -> ing", "jump plus ing", "jumping = jump ing"] {
            let r = ResponseMap::new().with(STRUCTURE, text);
            assert!(!evaluate(&task, &r).needs(FocusArea::Structure), "{text}");
        }
        for text in ["jump ing", "jump + ed", "run + ing", ""] {
            let r = ResponseMap::new().with(STRUCTURE, text);
            assert!(evaluate(&task, &r).needs(FocusArea::Structure), "{text}");
        }
    }

    #[test]
    fn structure_accepts_incorrect_but_structured_answer() {
        let task = jump_task(&[STRUCTURE]);
        let r = ResponseMap::new().with(STRUCTURE, "jump + ing → jumpping");
        assert!(!evaluate(&task, &r).needs(FocusArea::Structure));
    }

    #[test]
    fn structure_without_configured_suffix() {
        let mut task = jump_task(&[STRUCTURE]);
        task.targets.suffixes.clear();
        let r = ResponseMap::new().with(STRUCTURE, "jump + something");
        assert!(!evaluate(&task, &r).needs(FocusArea::Structure));
    }

    // ── join ───────────────────────────────────────────────────────────

    #[test]
    fn join_needs_length_and_vocabulary() {
        let task = jump_task(&[JOIN]);
        let cases = [
            ("no change", true),                          // 9 chars, too short for v2
            ("it is spelled jumping", true),              // no join vocabulary
            ("no change at the join", false),
            ("I compared the letters", false),
        ];
        for (text, flagged) in cases {
            let r = ResponseMap::new().with(JOIN, text);
            assert_eq!(evaluate(&task, &r).needs(FocusArea::Join), flagged, "{text}");
        }
    }

    #[test]
    fn join_prompts_compare_without_answer() {
        let status = evaluate(&jump_task(&[JOIN]), &ResponseMap::new());
        let joined = status.prompts.join("\n");
        assert!(joined.contains("compare the base spelling <jump> with the built word <jumping>"));
        assert!(joined.contains("Evidence prompt"));
        assert!(!joined.contains("no change"));
    }

    // ── family ─────────────────────────────────────────────────────────

    #[test]
    fn family_length_threshold() {
        let task = jump_task(&[FAMILY]);
        assert!(evaluate(&task, &ResponseMap::new().with(FAMILY, " ju ")).needs(FocusArea::Family));
        assert!(!evaluate(&task, &ResponseMap::new().with(FAMILY, "jumps")).needs(FocusArea::Family));
    }

    // ── prompts ────────────────────────────────────────────────────────

    #[test]
    fn reread_nudge_is_always_first_when_sentence_exists() {
        let unsupported = evaluate(&all_fields(), &ResponseMap::new());
        assert!(unsupported.prompts[0].starts_with("Reread the sentence"));
        let supported = evaluate(&all_fields(), &good_responses());
        assert!(supported.prompts[0].starts_with("Reread the sentence"));
    }

    #[test]
    fn no_nudge_without_sentence() {
        let status = evaluate(&matrix_task(), &ResponseMap::new());
        assert!(!status.prompts.iter().any(|p| p.starts_with("Reread")));
    }

    #[test]
    fn unsupported_has_no_transfer_prompt() {
        let status = evaluate(&all_fields(), &ResponseMap::new());
        assert!(!status.prompts.contains(&prompts::transfer()));
    }

    // ── matrix ─────────────────────────────────────────────────────────

    #[test]
    fn matrix_empty_selection_is_family() {
        let status = evaluate(&matrix_task(), &ResponseMap::new());
        assert!(!status.supported);
        assert!(status.needs(FocusArea::Family));
        assert!(!status.needs(FocusArea::Structure));
    }

    #[test]
    fn matrix_word_sum_without_marker_is_structure() {
        let mut r = ResponseMap::new()
            .with(MATRIX_PROOF_WORD, "running")
            .with(MATRIX_WORD_SUM, "running is run and ing");
        r.set_selected_words(&["running"]);
        let status = evaluate(&matrix_task(), &r);
        assert!(!status.supported);
        assert!(status.needs(FocusArea::Structure));
        assert!(!status.needs(FocusArea::Family));
        assert!(status.prompts.iter().any(|p| p.starts_with("Word sum: write a sum for <running>")));
        assert!(status.prompts.iter().any(|p| p.starts_with("Check the join in <running>")));

        r.set(MATRIX_WORD_SUM, "running = run + n + ing");
        assert!(evaluate(&matrix_task(), &r).supported);
    }

    #[test]
    fn matrix_sum_lacking_base_flags_structure() {
        let mut r = ResponseMap::new()
            .with(MATRIX_PROOF_WORD, "runs")
            .with(MATRIX_WORD_SUM, "runs = ing + s");
        r.set_selected_words(&["runs"]);
        let status = evaluate(&matrix_task(), &r);
        assert!(!status.supported);
        assert!(status.needs(FocusArea::Structure));
    }

    #[test]
    fn matrix_inference_drives_join_prompt() {
        let mut r = ResponseMap::new().with(MATRIX_PROOF_WORD, "running");
        r.set_selected_words(&["running"]);
        let check = check_matrix_proof(&GuidanceRules::V2, &matrix_task(), &r);
        assert_matches!(
            check.inference,
            Some(AffixInference { prefix: None, convention: JoinConventionKind::Double, .. })
        );
        assert!(check.incomplete_word_sum);
    }

    #[test]
    fn matrix_complete_proof_is_supported() {
        let mut r = ResponseMap::new()
            .with(MATRIX_PROOF_WORD, "runs")
            .with(MATRIX_WORD_SUM, "runs = run + s");
        r.set_selected_words(&["runs", "running"]);
        let status = evaluate(&matrix_task(), &r);
        assert!(status.supported);
        assert_eq!(status.prompts, vec![prompts::transfer()]);
    }

    #[test]
    fn matrix_proof_word_outside_selection() {
        let mut r = ResponseMap::new()
            .with(MATRIX_PROOF_WORD, "runner")
            .with(MATRIX_WORD_SUM, "runner = run + er");
        r.set_selected_words(&["runs"]);
        let status = evaluate(&matrix_task(), &r);
        assert!(status.needs(FocusArea::Structure));
        assert!(status.prompts.contains(&prompts::matrix_proof_word()));
    }

    // ── purity ─────────────────────────────────────────────────────────

    #[test]
    fn repeated_calls_are_identical() {
        let task = all_fields();
        let r = ResponseMap::new().with(STRUCTURE, "jump + ing");
        assert_eq!(evaluate(&task, &r), evaluate(&task, &r));
    }

    #[test]
    fn logs_decision_at_debug() {
        let (logs, _guard) = capture_logs();
        let _ = evaluate(&all_fields(), &ResponseMap::new());
        let events = logs.events_for_target("morpho_guidance");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].field("supported"), Some("false"));
        assert_eq!(events[0].field("task_id"), Some("t1_jump_ing_join"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_panics_and_is_idempotent(
                meaning in "\\PC{0,40}",
                structure in "\\PC{0,40}",
                join in "\\PC{0,40}",
                family in "\\PC{0,10}",
            ) {
                let task = all_fields();
                let r = ResponseMap::new()
                    .with(MEANING, meaning)
                    .with(STRUCTURE, structure)
                    .with(JOIN, join)
                    .with(FAMILY, family);
                let a = evaluate(&task, &r);
                let b = evaluate(&task, &r);
                prop_assert_eq!(a.supported, a.focus.is_empty());
                prop_assert_eq!(a, b);
            }

            #[test]
            fn removing_a_structure_part_reflags(drop in 0usize..3) {
                let task = jump_task(&[STRUCTURE]);
                let parts = ["jump", "+", "ing"];
                let text: Vec<&str> = parts
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != drop)
                    .map(|(_, p)| *p)
                    .collect();
                let full = ResponseMap::new().with(STRUCTURE, parts.join(" "));
                let partial = ResponseMap::new().with(STRUCTURE, text.join(" "));
                prop_assert!(!evaluate(&task, &full).needs(FocusArea::Structure));
                prop_assert!(evaluate(&task, &partial).needs(FocusArea::Structure));
            }
        }
    }
}
