// File: chatguard-core/src/validators.rs
//! Validation helpers that sit between raw automaton matches and the final
//! decision: charset pre-validation, backmap lookups, and raw-text word
//! boundary checks. These reduce false positives the same way programmatic
//! validation does for pattern matches elsewhere.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters a raw message may contain to be eligible for filtering at all:
/// letters, combining marks, numbers, punctuation, symbols, and spaces.
/// Control and format characters are rejected.
static ALLOWED_CHARACTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{M}\p{N}\p{P}\p{S}\p{Zs}]*$")
        .expect("allowed-character class must compile")
});

/// Pre-check a host may run before invoking the pipeline.
///
/// The pipeline itself is total and does not require this gate; it is
/// provided so callers can reject messages containing control or format
/// characters up front, and documents the charset the core assumes.
pub fn validate_characters(raw: &str) -> bool {
    ALLOWED_CHARACTERS.is_match(raw)
}

/// Projects an inclusive clean-text span onto raw-text offsets.
///
/// The mapping is treated as an opaque lookup table: every access is
/// bounds-checked and an out-of-range index yields `None`, never a panic.
pub fn backmap_span(original_indices: &[usize], start: usize, end: usize) -> Option<(usize, usize)> {
    let orig_start = original_indices.get(start).copied()?;
    let orig_end = original_indices.get(end).copied()?;
    Some((orig_start, orig_end))
}

/// Whether the raw span `[start, end]` stands alone as a word.
///
/// True when the raw character immediately before the span is absent or not
/// alphanumeric AND the raw character immediately after it is absent or not
/// alphanumeric. "class" must not trigger a match on "ass".
pub fn is_standalone_word(raw_chars: &[char], start: usize, end: usize) -> bool {
    let clear_before = start == 0 || raw_chars.get(start - 1).map_or(true, |c| !c.is_alphanumeric());
    let clear_after = raw_chars.get(end + 1).map_or(true, |c| !c.is_alphanumeric());
    clear_before && clear_after
}
