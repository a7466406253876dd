// chatguard-normalize/src/mapping/mod.rs
//! Builds the clean text and the clean-to-raw offset backmap.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::fold::fold_char;

/// The normalized form of a raw message, paired with its backmap.
///
/// `original_indices[i]` is the raw-text character offset that clean-text
/// character `i` was folded from. The vector always has exactly one entry per
/// clean character. Offsets are character offsets, not byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub clean: String,
    pub original_indices: Vec<usize>,
}

impl NormalizedText {
    pub fn is_empty(&self) -> bool {
        self.clean.is_empty()
    }
}

/// Normalizes a raw message into matchable clean text.
///
/// Deterministic and total: any input string, including the empty string,
/// produces a well-formed `NormalizedText`. Characters that fold to nothing
/// (punctuation, whitespace, symbols) are dropped, which is why the backmap
/// is not contiguous; several raw characters folding to the same clean
/// character is why it is not injective.
pub fn normalize(raw: &str) -> NormalizedText {
    let mut clean = String::with_capacity(raw.len());
    let mut original_indices = Vec::with_capacity(raw.len());

    for (index, ch) in raw.chars().enumerate() {
        if let Some(folded) = fold_char(ch) {
            clean.push(folded);
            original_indices.push(index);
        }
    }

    NormalizedText {
        clean,
        original_indices,
    }
}
