//! Narrow join-error heuristic.
//!
//! Catches two mistaken claims and nothing else:
//!
//! - the base ends in `e`, the target word drops it before `-ing`, and the
//!   learner says the `e` is kept (or writes the undropped spelling)
//! - the target word is plain `base + ing`, and the learner claims a
//!   drop, a doubling or a change
//!
//! Every other shape is reported as no detectable error.

use morpho_core::response::JOIN;
use morpho_core::{ResponseMap, Task};
use tracing::trace;

/// Whether the join explanation makes one of the detectable mistaken claims.
pub fn detect_join_error(task: &Task, responses: &ResponseMap) -> bool {
    let text = responses.get(JOIN).to_lowercase();
    let base = task.targets.base.trim().to_lowercase();
    let target = task.primary_word().unwrap_or_default().to_lowercase();

    let (flagged, reason) = classify(&text, &base, &target);
    trace!(task_id = %task.id, flagged, reason, "join heuristic");
    flagged
}

fn classify(text: &str, base: &str, target: &str) -> (bool, &'static str) {
    if !target.is_empty() && text.contains(target) {
        return (false, "mentions target word");
    }

    let drops_e = base
        .strip_suffix('e')
        .is_some_and(|stem| !target.is_empty() && target == format!("{stem}ing"));

    if drops_e {
        let mentions_e = text.contains('e');
        let claims_keep = ((text.contains("keep") || text.contains("stays")) && mentions_e)
            || text.contains("no change")
            || text.contains("stays the same");
        if claims_keep {
            return (true, "claims final e is kept");
        }
        if (text.contains("drop") || text.contains("remove")) && mentions_e {
            return (false, "describes dropping final e");
        }
        if text.contains(&format!("{base}ing")) {
            return (true, "writes undropped spelling");
        }
    }

    let plain_join = !base.ends_with('e') && !target.is_empty() && target == format!("{base}ing");
    if plain_join {
        let without_no_change = text.replace("no change", "");
        let claims_change = ["drop", "remove", "double", "change"]
            .iter()
            .any(|claim| without_no_change.contains(claim));
        return if claims_change {
            (true, "claims a change at a plain join")
        } else {
            (false, "plain join described")
        };
    }

    (false, "no detectable claim")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn task(base: &str, word: &str) -> Task {
        serde_json::from_value(serde_json::json!({
            "id": format!("t_{base}"),
            "task_type": "join_explain",
            "targets": { "base": base, "suffixes": ["ing"], "words": [word] },
            "response": { "mode": "fields", "fields": [{ "id": "join", "label": "Join" }] }
        }))
        .unwrap()
    }

    fn join(text: &str) -> ResponseMap {
        ResponseMap::new().with(JOIN, text)
    }

    // ── final e ────────────────────────────────────────────────────────

    #[test]
    fn keeping_e_is_an_error() {
        let make = task("make", "making");
        for text in [
            "you keep the e",
            "the <e> stays",
            "no change at the join",
            "the base stays the same",
        ] {
            assert!(detect_join_error(&make, &join(text)), "{text}");
        }
    }

    #[test]
    fn dropping_e_is_fine() {
        let make = task("make", "making");
        for text in ["drop the e before ing", "remove final <e>", "I removed the 'e'"] {
            assert!(!detect_join_error(&make, &join(text)), "{text}");
        }
    }

    #[test]
    fn undropped_spelling_is_an_error() {
        assert!(detect_join_error(&task("make", "making"), &join("it becomes makeing")));
    }

    #[test]
    fn mentioning_target_word_short_circuits() {
        let make = task("make", "making");
        assert!(!detect_join_error(&make, &join("keep the e? no: making")));
    }

    #[test]
    fn keep_or_stays_with_any_e_is_a_keep_claim() {
        // the letter e anywhere counts, including the one in "keep"
        let make = task("make", "making");
        for text in ["keep going", "keep everything", "I keep it the same", "the base stays"] {
            assert!(detect_join_error(&make, &join(text)), "{text}");
        }
    }

    #[test]
    fn stays_without_any_e_is_not_a_keep_claim() {
        assert!(!detect_join_error(&task("make", "making"), &join("it stays")));
    }

    // ── plain join ─────────────────────────────────────────────────────

    #[test]
    fn claiming_a_change_on_plain_join_is_an_error() {
        let jump = task("jump", "jumping");
        for text in ["double the p", "drop something", "the p changes", "remove a letter"] {
            assert!(detect_join_error(&jump, &join(text)), "{text}");
        }
    }

    #[test]
    fn no_change_on_plain_join_is_fine() {
        let jump = task("jump", "jumping");
        for text in ["no change at the join", "the base stays the same", ""] {
            assert!(!detect_join_error(&jump, &join(text)), "{text}");
        }
    }

    // ── other shapes ───────────────────────────────────────────────────

    #[test]
    fn other_conventions_are_not_judged() {
        assert!(!detect_join_error(&task("run", "running"), &join("no change")));
        assert!(!detect_join_error(&task("try", "tried"), &join("keep the y")));
    }

    #[test]
    fn missing_target_word_is_not_judged() {
        let mut t = task("make", "making");
        t.targets.words.clear();
        assert!(!detect_join_error(&t, &join("keep the e")));
    }
}
