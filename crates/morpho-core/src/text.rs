//! Text helpers shared by the engines.
//!
//! All evidence checks work on case-folded, trimmed text and count lengths
//! in characters rather than bytes, so arbitrary unicode input is safe.

/// Trim and lowercase a response value.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Number of characters in the normalized value.
pub fn char_len(value: &str) -> usize {
    normalize(value).chars().count()
}

/// Whether the normalized value has at least `min` characters.
pub fn has_min_chars(value: &str, min: usize) -> bool {
    char_len(value) >= min
}

/// Whether `haystack` contains any of `needles`.
///
/// Both sides are compared as given; callers normalize first.
pub fn includes_any<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_ref()))
}

/// Truncate a string to at most `max_chars` characters for log output.
pub fn truncate_str(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Jump + ING \n"), "jump + ing");
    }

    #[test]
    fn char_len_counts_characters() {
        assert_eq!(char_len(" run → running "), 13);
        assert_eq!(char_len(""), 0);
        assert_eq!(char_len("   "), 0);
    }

    #[test]
    fn has_min_chars_boundary() {
        assert!(has_min_chars("abcdefgh", 8));
        assert!(!has_min_chars("abcdefg", 8));
        assert!(!has_min_chars("  abc  ", 4));
    }

    #[test]
    fn includes_any_matches_substrings() {
        assert!(includes_any("jump -> jumping", &["+", "->"]));
        assert!(!includes_any("jumping", &["+", "->"]));
        assert!(!includes_any::<&str>("anything", &[]));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_str("héllo", 2), "hé");
        assert_eq!(truncate_str("abc", 10), "abc");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn helpers_never_panic(s in "\\PC*", n in 0usize..64) {
                let _ = normalize(&s);
                let _ = has_min_chars(&s, n);
                prop_assert!(truncate_str(&s, n).chars().count() <= n);
            }
        }
    }
}
