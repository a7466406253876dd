// chatguard-core/src/engine.rs
//! Defines the core FilterEngine trait and related contracts.
//!
//! The `FilterEngine` trait provides the seam between the filtering pipeline
//! and whatever host invokes it per chat message (event handlers, command
//! plumbing, test harnesses). This module defines the contract that all such
//! engines must adhere to, ensuring a consistent and interchangeable core
//! API for `chatguard`.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use std::sync::Arc;

// Publicly exposed types from other modules
use crate::config::{EngineOptions, FilterConfig};
use crate::filter_match::{FilterResult, WordMatch};
use crate::matchers::compiler::CompiledFilters;

/// A trait that defines the core functionality of a chat filter engine.
///
/// This trait decouples the high-level host logic from the specific
/// implementation of the filtering pipeline. Filtering itself is total:
/// every input string produces a `FilterResult`, so the per-message methods
/// are infallible by contract.
pub trait FilterEngine: Send + Sync {
    /// Classifies one raw chat message and, when appropriate, rewrites it.
    ///
    /// Returns the full decision: whether the message is blocked, the text
    /// to deliver (original on a block, censored otherwise), the primary
    /// reason and word, the set of detected words, and the evasion flag.
    /// Evasion checking follows the engine's options.
    ///
    /// # Arguments
    /// * `raw_text` - The untrusted chat line exactly as the host received it.
    fn filter(&self, raw_text: &str) -> FilterResult;

    /// Same as [`FilterEngine::filter`], with the evasion-density escalation
    /// toggled per call rather than taken from the engine's options.
    fn filter_with_evasion_check(&self, raw_text: &str, check_evasion: bool) -> FilterResult;

    /// Finds all mode-validated matches without rewriting the message.
    ///
    /// Used by hosts for staff notification or statistics. The returned
    /// matches are sorted by clean-text start position; the message itself
    /// is not modified.
    fn analyze(&self, raw_text: &str) -> Vec<WordMatch>;

    /// Rebuilds the compiled filter set from a new configuration and
    /// atomically swaps it in.
    ///
    /// Calls already in flight keep the snapshot they started with; there is
    /// never a moment where a partially-built filter set is observable.
    fn reload(&self, config: FilterConfig) -> Result<()>;

    /// Returns the currently published compiled filter set.
    ///
    /// This is used by external components, such as a statistics command, to
    /// inspect the active categories without recompiling them.
    fn compiled_filters(&self) -> Arc<CompiledFilters>;

    /// Returns a reference to the engine's options.
    fn options(&self) -> &EngineOptions;
}
