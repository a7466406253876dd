// chatguard-core/src/filter_match.rs
//! Provides core data structures and utility functions for reporting filter
//! decisions and for logging matched chat content without leaking it.

use serde::{Deserialize, Serialize};
use log::debug;
use std::collections::BTreeSet;

use lazy_static::lazy_static;
use sha2::{Digest, Sha256};
use hex;

lazy_static! {
    /// A static boolean that is initialized once to determine if raw chat
    /// content is allowed in debug logs.
    static ref CHAT_DEBUG_ALLOWED: bool = {
        std::env::var("CHATGUARD_ALLOW_DEBUG_CHAT")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Reason string reported when a write-command term forces a block.
pub const REASON_WRITE_COMMAND: &str = "WriteCommand";

/// Reason string reported when evasion-density scoring forces a block.
pub const REASON_EVASION: &str = "Evasion";

/// Builds the reason string for an ordinary term match.
pub fn filter_reason(word: &str) -> String {
    format!("Filter ({})", word)
}

/// A single occurrence of a forbidden term in the clean text.
///
/// `start` and `end` are inclusive character offsets into the clean text,
/// not the raw message. Overlapping occurrences are all reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMatch {
    pub word: String,
    pub start: usize,
    pub end: usize,
}

/// The aggregated decision for one chat message.
///
/// `text` is the original message when `blocked` is true and the censored
/// rewrite otherwise; it is never partially modified on a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterResult {
    pub blocked: bool,
    pub text: String,
    pub reason: Option<String>,
    pub primary_word: Option<String>,
    pub detected_words: BTreeSet<String>,
    pub is_evasion: bool,
}

impl FilterResult {
    /// The result for a message with nothing to report: not blocked,
    /// text unchanged.
    pub fn clean(text: &str) -> Self {
        Self {
            blocked: false,
            text: text.to_string(),
            ..Self::default()
        }
    }
}

pub fn redact_chat(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[FILTERED]".to_string()
    } else {
        format!("[FILTERED: {} chars]", s.len())
    }
}

fn get_loggable_content(chat_content: &str) -> String {
    if *CHAT_DEBUG_ALLOWED {
        chat_content.to_string()
    } else {
        redact_chat(chat_content)
    }
}

/// Stable digest of a message for log correlation without storing content.
///
/// Lower-cases and whitespace-normalizes before hashing so trivially
/// reformatted repeats of the same message collapse to one digest.
pub fn message_digest(message: &str) -> String {
    let normalized = message
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn log_word_match_debug(module_path: &str, category: &str, word: &str, message: &str) {
    debug!(
        "{} Matched term '{}' from category '{}' in message '{}' (digest {})",
        module_path,
        word,
        category,
        get_loggable_content(message),
        &message_digest(message)[..8]
    );
}

pub fn log_block_debug(module_path: &str, reason: &str, message: &str) {
    debug!(
        "{} Blocking message ({}): '{}' (digest {})",
        module_path,
        reason,
        get_loggable_content(message),
        &message_digest(message)[..8]
    );
}
