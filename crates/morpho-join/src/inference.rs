//! Best-effort affix inference.
//!
//! Given a built word, a base, and the configured prefixes and suffixes,
//! recover which affixes produced the word. Longest match wins. The stem left
//! after removing the affixes must equal the base as the resolver would spell
//! it before that suffix. Ambiguous or irreconcilable words yield `None`;
//! this is scaffolding for prompts, never grading.

use serde::Serialize;
use tracing::trace;

use crate::conventions::JoinConventionKind;
use crate::resolver::resolve_join;

/// Affixes recovered from a built word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AffixInference {
    /// Matched prefix, if any.
    pub prefix: Option<String>,
    /// Matched suffix, if any.
    pub suffix: Option<String>,
    /// Convention at the base/suffix join.
    pub convention: JoinConventionKind,
}

/// Infer which of the configured affixes built `word` from `base`.
///
/// Returns `None` when no affix can be identified, when the remaining stem
/// does not reconcile with the base, or when two readings of the same total
/// affix length both reconcile.
pub fn infer_affixes<P, S>(
    word: &str,
    base: &str,
    prefixes: &[P],
    suffixes: &[S],
) -> Option<AffixInference>
where
    P: AsRef<str>,
    S: AsRef<str>,
{
    let word = word.trim().to_lowercase();
    let base = base.trim().to_lowercase();
    if word.is_empty() || base.is_empty() {
        return None;
    }

    let prefix_candidates = candidates(prefixes, |p| word.starts_with(p));
    let suffix_candidates = candidates(suffixes, |s| word.ends_with(s));

    let mut best: Option<(usize, AffixInference)> = None;
    let mut ambiguous = false;

    for prefix in &prefix_candidates {
        for suffix in &suffix_candidates {
            if prefix.is_empty() && suffix.is_empty() {
                continue;
            }
            let affix_len = prefix.len() + suffix.len();
            if affix_len > word.len() {
                continue;
            }
            let middle = &word[prefix.len()..word.len() - suffix.len()];
            let join = resolve_join(&base, suffix);
            if join.stem != middle {
                continue;
            }

            let reading = AffixInference {
                prefix: (!prefix.is_empty()).then(|| prefix.clone()),
                suffix: (!suffix.is_empty()).then(|| suffix.clone()),
                convention: join.convention,
            };
            let best_len = best.as_ref().map(|(len, _)| *len);
            match best_len {
                Some(len) if len > affix_len => {}
                Some(len) if len == affix_len => {
                    if best.as_ref().is_some_and(|(_, current)| *current != reading) {
                        ambiguous = true;
                    }
                }
                _ => {
                    best = Some((affix_len, reading));
                    ambiguous = false;
                }
            }
        }
    }

    if ambiguous {
        trace!(%word, %base, "affix inference ambiguous");
        return None;
    }
    best.map(|(_, reading)| reading)
}

/// Normalized, deduplicated affixes matching `matches`, plus the empty affix.
fn candidates<A: AsRef<str>>(affixes: &[A], matches: impl Fn(&str) -> bool) -> Vec<String> {
    let mut out = vec![String::new()];
    for affix in affixes {
        let affix = affix.as_ref().trim().to_lowercase();
        if !affix.is_empty() && matches(&affix) && !out.contains(&affix) {
            out.push(affix);
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const NONE: [&str; 0] = [];

    #[test]
    fn plain_suffix() {
        let r = infer_affixes("jumping", "jump", &NONE, &["ing", "ed", "s"]).unwrap();
        assert_eq!(r.prefix, None);
        assert_eq!(r.suffix.as_deref(), Some("ing"));
        assert_eq!(r.convention, JoinConventionKind::None);
    }

    #[test]
    fn suffix_through_a_join_change() {
        let r = infer_affixes("making", "make", &NONE, &["ing", "er"]).unwrap();
        assert_eq!(r.suffix.as_deref(), Some("ing"));
        assert_eq!(r.convention, JoinConventionKind::Replace);

        let r = infer_affixes("Running", "run", &NONE, &["ing"]).unwrap();
        assert_eq!(r.convention, JoinConventionKind::Double);

        let r = infer_affixes("tried", "try", &NONE, &["ed", "ing"]).unwrap();
        assert_eq!(r.convention, JoinConventionKind::Change);
    }

    #[test]
    fn prefix_and_suffix() {
        let r = infer_affixes("remaking", "make", &["re", "un"], &["ing"]).unwrap();
        assert_eq!(r.prefix.as_deref(), Some("re"));
        assert_eq!(r.suffix.as_deref(), Some("ing"));
    }

    #[test]
    fn longest_suffix_wins() {
        // "es" and "s" both end "boxes"; only the longer reading reconciles
        let r = infer_affixes("boxes", "box", &NONE, &["s", "es"]).unwrap();
        assert_eq!(r.suffix.as_deref(), Some("es"));
    }

    #[test]
    fn unreconciled_stem_is_no_inference() {
        assert_eq!(infer_affixes("jumped", "run", &NONE, &["ed"]), None);
        // plain concatenation does not reconcile when the join changes the base
        assert_eq!(infer_affixes("makeing", "make", &NONE, &["ing"]), None);
    }

    #[test]
    fn bare_base_is_no_inference() {
        assert_eq!(infer_affixes("jump", "jump", &NONE, &["ing"]), None);
        assert_eq!(infer_affixes("", "jump", &NONE, &["ing"]), None);
    }

    #[test]
    fn equal_length_readings_are_ambiguous() {
        // "a" + "aa" and "aa" + "a" both spell "aaa"
        let r = infer_affixes("aaa", "aa", &["a"], &["a"]);
        assert_matches!(r, None);

        // a single reading is still inferred
        let r = infer_affixes("xax", "ax", &["x"], &["x"]).unwrap();
        assert_eq!(r.prefix.as_deref(), Some("x"));
        assert_eq!(r.suffix, None);
    }
}
