// chatguard-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using the filter engine in one-shot mode.
//! Provides a helper for classifying a single message without managing an
//! engine instance, for hosts that filter rarely or from scripts and tests.

use anyhow::Result;
use crate::config::{EngineOptions, FilterConfig};
use crate::engine::FilterEngine;
use crate::engines::word_engine::WordFilterEngine;
use crate::filter_match::FilterResult;

/// Fully classifies a single chat message, building a fresh engine from the
/// provided configuration.
///
/// This function is the primary entry point for non-resident (one-shot) use.
/// Hosts that filter every incoming message should build a
/// `WordFilterEngine` once and reuse it; compilation is cached, but the
/// engine handles reloads and snapshotting for you.
///
/// # Arguments
///
/// * `config` - The merged FilterConfig (defaults + optional host overrides).
/// * `options` - EngineOptions (mask, evasion tolerance, etc).
/// * `message` - The raw chat line to classify.
pub fn headless_filter_string(
    config: FilterConfig,
    options: EngineOptions,
    message: &str,
) -> Result<FilterResult> {
    let engine = WordFilterEngine::with_options(config, options)?;
    Ok(engine.filter(message))
}
