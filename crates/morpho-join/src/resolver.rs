//! Suffix-join resolver.
//!
//! Applies the first matching convention, in this order:
//!
//! 1. **Replace**: base ends in `e`, suffix starts with a vowel -> drop the `e`
//! 2. **Change**: base ends in consonant + `y`, suffix does not start with
//!    `i` -> `y` becomes `i`
//! 3. **Double**: base ends consonant-vowel-consonant (final not `w`, `x`,
//!    `y`), suffix starts with a vowel -> double the final consonant
//! 4. **None**: concatenate unchanged
//!
//! The order matters: a base such as `free` satisfies more than one shape.
//! Inputs are trimmed and case-folded. Prefixes never take part in the join
//! logic; they are only prepended to the built word.

use serde::Serialize;
use tracing::trace;

use crate::conventions::JoinConventionKind;

/// Result of resolving a base + suffix join.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JoinResolution {
    /// Base spelling as it appears before the suffix.
    pub stem: String,
    /// Full word: prefix + stem + suffix.
    pub word: String,
    /// Convention that fired.
    pub convention: JoinConventionKind,
    /// Short description of what happened at the join.
    pub note: &'static str,
}

/// Whether `c` is one of `a, e, i, o, u`.
pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(c: char) -> bool {
    c.is_alphabetic() && !is_vowel(c)
}

/// Resolve the join of `base` and `suffix`.
pub fn resolve_join(base: &str, suffix: &str) -> JoinResolution {
    resolve_join_with_prefix("", base, suffix)
}

/// Resolve the join of `base` and `suffix`, then prepend `prefix`.
pub fn resolve_join_with_prefix(prefix: &str, base: &str, suffix: &str) -> JoinResolution {
    let prefix = prefix.trim().to_lowercase();
    let base = base.trim().to_lowercase();
    let suffix = suffix.trim().to_lowercase();

    let (stem, convention, note) = join_stem(&base, &suffix);
    let word = format!("{prefix}{stem}{suffix}");

    trace!(%base, %suffix, %convention, %word, "join resolved");

    JoinResolution {
        stem,
        word,
        convention,
        note,
    }
}

fn join_stem(base: &str, suffix: &str) -> (String, JoinConventionKind, &'static str) {
    let Some(first) = suffix.chars().next() else {
        return (base.to_owned(), JoinConventionKind::None, "no suffix");
    };
    let suffix_starts_with_vowel = is_vowel(first);
    let chars: Vec<char> = base.chars().collect();
    let n = chars.len();

    if n >= 1 && chars[n - 1] == 'e' && suffix_starts_with_vowel {
        let stem: String = chars[..n - 1].iter().collect();
        return (
            stem,
            JoinConventionKind::Replace,
            "drop final e before a vowel suffix",
        );
    }

    if n >= 2 && chars[n - 1] == 'y' && is_consonant(chars[n - 2]) && first != 'i' {
        let mut stem: String = chars[..n - 1].iter().collect();
        stem.push('i');
        return (
            stem,
            JoinConventionKind::Change,
            "change final y to i before this suffix",
        );
    }

    if n >= 3 && suffix_starts_with_vowel {
        let (c1, v, c2) = (chars[n - 3], chars[n - 2], chars[n - 1]);
        if is_consonant(c1) && is_vowel(v) && is_consonant(c2) && !matches!(c2, 'w' | 'x' | 'y') {
            let mut stem = base.to_owned();
            stem.push(c2);
            return (
                stem,
                JoinConventionKind::Double,
                "double final consonant before a vowel suffix",
            );
        }
    }

    (base.to_owned(), JoinConventionKind::None, "no change at the join")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
