// chatguard-core/src/lib.rs
//! # Chatguard Core Library
//!
//! `chatguard-core` provides the fundamental, host-independent logic for
//! real-time chat filtering. It decides, for a single line of untrusted chat
//! text, whether it contains a forbidden term despite obfuscation
//! (leetspeak, diacritics, inserted punctuation, confusable scripts), and
//! either blocks the message outright or returns a partially censored
//! version.
//!
//! The library is designed to be pure and stateless, focusing solely on the
//! classification and rewriting of one input line per call, without concerns
//! for I/O, punishment policy, or host-specific delivery of results.
//!
//! ## Modules
//!
//! * `config`: Defines `WordCategory` lists, `WordFilterMode`, and `EngineOptions`.
//! * `matchers`: Contains the Aho-Corasick automaton and the category compiler.
//! * `validators`: Charset pre-validation, backmap lookups, and word-boundary checks.
//! * `filter_match`: Defines `WordMatch` and `FilterResult` and privacy-safe log helpers.
//! * `engine`: Defines the `FilterEngine` trait, enabling a modular design.
//! * `engines`: Contains concrete implementations of the `FilterEngine` trait.
//! * `replacement`: The non-overlapping censorship buffer.
//! * `headless`: Convenience wrapper for one-shot classification.
//!
//! ## Public API
//!
//! **Configuration & Word Lists**
//!
//! * [`FilterConfig`]: Manages collections of `WordCategory` lists, including loading and merging.
//! * [`WordCategory`]: One named term list with a filter mode.
//! * [`merge_categories`]: Merges default and host-defined configurations.
//! * [`FilterConfig::load_from_file`]: Loads word lists from a YAML file.
//! * [`FilterConfig::load_default_categories`]: Loads the built-in starter lists.
//!
//! **Filter Engine**
//!
//! * [`FilterEngine`]: A trait for pluggable filtering pipelines.
//! * [`WordFilterEngine`]: The concrete word-list implementation.
//!
//! **Reporting**
//!
//! * [`FilterResult`]: The aggregated decision for one message.
//! * [`WordMatch`]: A single occurrence of a forbidden term in clean text.
//!
//! ## Usage Example
//!
//! ```rust
//! use chatguard_core::{
//!     headless_filter_string, EngineOptions, FilterConfig, WordCategory, WordFilterMode,
//! };
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Define a word category (hosts usually load these from config).
//!     let config = FilterConfig {
//!         categories: vec![WordCategory {
//!             name: "chat".to_string(),
//!             mode: WordFilterMode::Normal,
//!             words: vec!["noob".to_string()],
//!             enabled: None,
//!         }],
//!     };
//!
//!     // 2. Classify a message in a single, one-shot call.
//!     let result = headless_filter_string(config, EngineOptions::default(), "you are a noob")?;
//!
//!     assert!(!result.blocked);
//!     assert_eq!(result.text, "you are a ***");
//!     assert_eq!(result.reason.as_deref(), Some("Filter (noob)"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The per-message filtering path is total: every input string, including
//! the empty string, yields a `FilterResult`. Fallible operations exist only
//! at the configuration and compilation boundary and use `anyhow::Error`,
//! with specific types like `ChatFilterError` for programmatic handling.
//!
//! ## Design Principles
//!
//! * **Pluggable Architecture:** The `FilterEngine` trait allows the host's
//!   plumbing to stay decoupled from the pipeline implementation.
//! * **Stateless:** No state is retained across calls; every call is
//!   side-effect-free and retryable.
//! * **Shared Immutable Automatons:** Compiled filter sets are immutable and
//!   reference-counted; reloads swap a handle instead of mutating in place.
//! * **Testable:** Logic is easily unit-testable in isolation.
//!
//! ---
//! License: MIT OR APACHE 2.0

// All modules must be declared before they can be used.
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod filter_match;
pub mod headless;
pub mod matchers;
pub mod replacement;
pub mod validators;

// Correctly re-exporting modules and types from their canonical locations.
// This ensures the public API is clean and well-defined.

/// Re-exports the public configuration types and functions for managing word lists.
pub use config::{
    format_mask,
    merge_categories,
    validate_categories,
    EngineOptions,
    FilterConfig,
    WordCategory,
    WordFilterMode,
    MAX_TERM_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ChatFilterError;

/// Re-exports types related to the core filter engine trait.
pub use engine::FilterEngine;

/// Re-exports the concrete `WordFilterEngine` implementation.
pub use engines::word_engine::WordFilterEngine;

/// Re-exports types for match reporting and privacy-safe chat logging.
pub use filter_match::{
    filter_reason, message_digest, redact_chat, FilterResult, WordMatch, REASON_EVASION,
    REASON_WRITE_COMMAND,
};

/// Re-exports the censorship buffer for hosts that rewrite text themselves.
pub use replacement::ReplacementContext;

/// Re-exports the one-shot convenience entry point.
pub use headless::headless_filter_string;

// Re-export key types from the matchers module for advanced usage.
pub use matchers::automaton::AhoCorasickEngine;
pub use matchers::compiler::{compile_filters, get_or_compile_filters, CompiledFilters, WordFilter};
