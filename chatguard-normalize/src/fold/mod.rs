// chatguard-normalize/src/fold/mod.rs
//! Per-character folding: leetspeak, case, diacritics, confusable scripts.
//!
//! The fold is deliberately contractive. A raw character produces at most one
//! clean character, so a raw span is never shorter than the clean text it
//! folds to. Transliterations that would expand (ligatures, CJK syllables)
//! are truncated to their first ASCII alphanumeric character.

use deunicode::deunicode_char;

use crate::tables::leet_fold;

/// Folds one raw character into its clean-text form.
///
/// Returns `None` for characters that carry no matchable content
/// (punctuation, whitespace, symbols, control characters); those are dropped
/// from the clean text entirely.
pub fn fold_char(c: char) -> Option<char> {
    if let Some(folded) = leet_fold(c) {
        return Some(folded);
    }
    if c.is_ascii_alphanumeric() {
        return Some(c.to_ascii_lowercase());
    }
    if c.is_ascii() {
        // Remaining ASCII is punctuation, whitespace or control.
        return None;
    }
    let mapped = deunicode_char(c)?;
    mapped
        .chars()
        .next()
        .filter(|m| m.is_ascii_alphanumeric())
        .map(|m| m.to_ascii_lowercase())
}
