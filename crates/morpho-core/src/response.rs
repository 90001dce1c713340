//! Learner responses.
//!
//! A [`ResponseMap`] holds raw learner text keyed by field id. It is created
//! empty at the start of a task attempt, written only by the input surface,
//! and discarded when the learner advances.
//!
//! Matrix-builder tasks use three fixed keys ([`MATRIX_SELECTED`],
//! [`MATRIX_PROOF_WORD`], [`MATRIX_WORD_SUM`]). The selection is stored as a
//! comma- or newline-separated list of words.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field id for the meaning explanation.
pub const MEANING: &str = "meaning";
/// Field id for the structure (word sum) explanation.
pub const STRUCTURE: &str = "structure";
/// Field id for the join explanation.
pub const JOIN: &str = "join";
/// Field id for the word-family evidence.
pub const FAMILY: &str = "family";

/// Matrix key: selected words.
pub const MATRIX_SELECTED: &str = "matrix_selected";
/// Matrix key: the selected word being proved.
pub const MATRIX_PROOF_WORD: &str = "matrix_proof_word";
/// Matrix key: the learner's word sum.
pub const MATRIX_WORD_SUM: &str = "matrix_word_sum";

/// Raw learner text keyed by response-field id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseMap(BTreeMap<String, String>);

impl ResponseMap {
    /// Create an empty response map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text entered for a field, or `""` when absent.
    pub fn get(&self, field_id: &str) -> &str {
        self.0.get(field_id).map_or("", String::as_str)
    }

    /// Whether a field has any entry (possibly blank).
    pub fn contains(&self, field_id: &str) -> bool {
        self.0.contains_key(field_id)
    }

    /// Set the text for a field, replacing any previous value.
    pub fn set(&mut self, field_id: impl Into<String>, text: impl Into<String>) {
        let _ = self.0.insert(field_id.into(), text.into());
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, field_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(field_id, text);
        self
    }

    /// Remove a field.
    pub fn remove(&mut self, field_id: &str) -> Option<String> {
        self.0.remove(field_id)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Whether no field has been written.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field_id, text)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Selected matrix words: split on commas/newlines, trimmed, deduplicated
    /// in first-seen order.
    pub fn selected_words(&self) -> Vec<String> {
        let mut words: Vec<String> = Vec::new();
        for word in self
            .get(MATRIX_SELECTED)
            .split([',', '\n'])
            .map(str::trim)
            .filter(|w| !w.is_empty())
        {
            if !words.iter().any(|w| w == word) {
                words.push(word.to_owned());
            }
        }
        words
    }

    /// Store the matrix selection.
    pub fn set_selected_words<S: AsRef<str>>(&mut self, words: &[S]) {
        let joined = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ");
        self.set(MATRIX_SELECTED, joined);
    }

    /// The matrix proof word, trimmed.
    pub fn proof_word(&self) -> &str {
        self.get(MATRIX_PROOF_WORD).trim()
    }

    /// The matrix word sum, untrimmed.
    pub fn word_sum(&self) -> &str {
        self.get(MATRIX_WORD_SUM)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResponseMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
