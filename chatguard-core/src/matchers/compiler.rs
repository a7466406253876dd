//! compiler.rs - Manages the compilation and caching of word filters.
//!
//! This module provides a thread-safe, cached mechanism to convert a
//! `FilterConfig` into `CompiledFilters`, which are optimized for efficient
//! matching. It uses a global, shared cache to avoid redundant compilation
//! when several engines are built from the same word lists.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::debug;
use lazy_static::lazy_static;
use std::sync::{Arc, RwLock};
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

use chatguard_normalize::NormalizedText;

use crate::config::{FilterConfig, WordFilterMode};
use crate::errors::ChatFilterError;
use crate::filter_match::WordMatch;
use crate::matchers::automaton::AhoCorasickEngine;
use crate::validators;

/// Represents a single compiled word category.
///
/// This struct holds a compiled automaton along with the category's mode and
/// name, ready for efficient application to normalized chat text.
#[derive(Debug)]
pub struct WordFilter {
    /// The compiled multi-pattern automaton for this category's terms.
    pub automaton: AhoCorasickEngine,
    /// How matches from this category are validated and acted upon.
    pub mode: WordFilterMode,
    /// The unique name of the word category.
    pub category: String,
}

impl WordFilter {
    /// Runs the automaton over the clean text and applies mode-specific
    /// validation.
    ///
    /// `Strong` and `WriteCommand` lists are curated to be unambiguous, so
    /// their raw automaton matches pass through unfiltered. `Normal` matches
    /// must backmap onto a raw span with no alphanumeric neighbor on either
    /// side; a match whose backmap indices are out of range is dropped
    /// silently.
    pub fn find_matches(&self, normalized: &NormalizedText, raw_chars: &[char]) -> Vec<WordMatch> {
        let mut matches = self.automaton.find_matches(&normalized.clean);
        if self.mode.requires_boundary_check() {
            matches.retain(|m| {
                match validators::backmap_span(&normalized.original_indices, m.start, m.end) {
                    Some((orig_start, orig_end)) => {
                        validators::is_standalone_word(raw_chars, orig_start, orig_end)
                    }
                    None => false,
                }
            });
        }
        matches
    }
}

/// Represents the full set of compiled categories for one configuration.
#[derive(Debug)]
pub struct CompiledFilters {
    /// The compiled per-category filters, in configuration order.
    pub filters: Vec<WordFilter>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled filter sets.
    /// The key is a hash of the `FilterConfig`.
    static ref COMPILED_FILTERS_CACHE: RwLock<HashMap<u64, Arc<CompiledFilters>>> =
        RwLock::new(HashMap::new());
}

/// Hashes the `FilterConfig` to create a stable, unique key for the cache.
///
/// To ensure determinism, the categories are sorted by name before hashing.
fn hash_config(config: &FilterConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    let mut categories_to_hash = config.categories.clone();

    // Sort categories to ensure a deterministic hash key.
    categories_to_hash.sort_by(|a, b| a.name.cmp(&b.name));

    categories_to_hash.hash(&mut hasher);
    hasher.finish()
}

/// Compiles a `FilterConfig` into `CompiledFilters` for efficient matching.
/// This is the low-level function that performs the actual automaton builds.
pub fn compile_filters(config: &FilterConfig) -> Result<CompiledFilters, ChatFilterError> {
    debug!("Starting compilation of {} word categories.", config.categories.len());

    let mut seen_names = HashSet::new();
    let mut filters = Vec::new();

    for category in &config.categories {
        if category.name.is_empty() {
            return Err(ChatFilterError::EmptyCategoryName);
        }
        if !seen_names.insert(category.name.clone()) {
            return Err(ChatFilterError::DuplicateCategory(category.name.clone()));
        }
        if let Some(false) = category.enabled {
            debug!("Skipping disabled category '{}'.", category.name);
            continue;
        }
        if category.words.is_empty() {
            debug!("Category '{}' has no terms; it will never match.", category.name);
        }

        let automaton = AhoCorasickEngine::from_words(&category.words);
        debug!(
            "Category '{}' compiled with {} distinct terms.",
            category.name,
            automaton.pattern_count()
        );
        filters.push(WordFilter {
            automaton,
            mode: category.mode,
            category: category.name.clone(),
        });
    }

    debug!("Finished compiling categories. Total compiled: {}.", filters.len());
    Ok(CompiledFilters { filters })
}

/// Gets a `CompiledFilters` instance from the cache or compiles it if absent.
///
/// This is the public entry point for retrieving compiled filters. It returns
/// an `Arc` to a `CompiledFilters` instance, allowing for cheap sharing.
pub fn get_or_compile_filters(config: &FilterConfig) -> Result<Arc<CompiledFilters>> {
    let cache_key = hash_config(config);

    // Attempt to acquire a read lock first.
    {
        let cache = COMPILED_FILTERS_CACHE.read().unwrap();
        if let Some(filters) = cache.get(&cache_key) {
            debug!("Serving compiled filters from cache for key: {}", &cache_key);
            return Ok(Arc::clone(filters));
        }
    } // Read lock is released here.

    // Not in cache, so we compile.
    debug!("Compiled filters not found in cache. Compiling now.");
    let compiled = compile_filters(config)?;
    let compiled_arc = Arc::new(compiled);

    // Acquire a write lock to insert the new filter set.
    COMPILED_FILTERS_CACHE
        .write()
        .unwrap()
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached filters for key: {}", &cache_key);
    Ok(compiled_arc)
}
