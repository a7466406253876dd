// chatguard-core/src/engines/word_engine.rs
//! A `FilterEngine` implementation that matches compiled word lists against
//! normalized chat text and aggregates the per-category results into one
//! decision.
//! License: MIT OR APACHE 2.0

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};
use anyhow::{Context, Result};
use log::{debug, warn};

use chatguard_normalize::normalize;

use crate::config::{format_mask, EngineOptions, FilterConfig, WordFilterMode};
use crate::engine::FilterEngine;
use crate::filter_match::{
    filter_reason, log_block_debug, log_word_match_debug, FilterResult, WordMatch,
    REASON_EVASION, REASON_WRITE_COMMAND,
};
use crate::matchers::compiler::{get_or_compile_filters, CompiledFilters};
use crate::replacement::ReplacementContext;
use crate::validators;

#[derive(Debug)]
pub struct WordFilterEngine {
    compiled_filters: RwLock<Arc<CompiledFilters>>,
    options: EngineOptions,
}

impl WordFilterEngine {
    pub fn new(config: FilterConfig) -> Result<Self> {
        Self::with_options(config, EngineOptions::default())
    }

    pub fn with_options(config: FilterConfig, options: EngineOptions) -> Result<Self> {
        let compiled_filters = get_or_compile_filters(&config)
            .context("Failed to compile word filters for WordFilterEngine")?;

        Ok(Self {
            compiled_filters: RwLock::new(compiled_filters),
            options,
        })
    }

    /// Clones the currently published filter set; the caller then proceeds
    /// lock-free on its own snapshot.
    fn snapshot(&self) -> Arc<CompiledFilters> {
        Arc::clone(&self.compiled_filters.read().unwrap())
    }

    /// The mask text for one category, rendering the configured template if
    /// one is set. A template failure falls back to the plain mask rather
    /// than aborting the pass.
    fn mask_for(&self, category: &str) -> String {
        match &self.options.mask_format {
            Some(fmt) => match format_mask(fmt, category) {
                Ok(mask) => mask,
                Err(e) => {
                    warn!("Mask template failed for category '{}': {}", category, e);
                    self.options.mask.clone()
                }
            },
            None => self.options.mask.clone(),
        }
    }

    /// The full aggregation pass for one message.
    ///
    /// Precedence: write-command categories short-circuit everything; strong
    /// and normal matches are merged, sorted by clean start, and walked in
    /// order, censoring as it goes unless evasion-density scoring escalates
    /// to a full block.
    fn evaluate(&self, raw_text: &str, check_evasion: bool) -> FilterResult {
        if raw_text.is_empty() {
            return FilterResult::clean(raw_text);
        }

        let compiled = self.snapshot();
        let normalized = normalize(raw_text);
        let raw_chars: Vec<char> = raw_text.chars().collect();

        // Write-command categories bypass all other lists.
        for filter in compiled
            .filters
            .iter()
            .filter(|f| f.mode == WordFilterMode::WriteCommand)
        {
            if let Some(m) = filter.find_matches(&normalized, &raw_chars).into_iter().next() {
                log_block_debug(module_path!(), REASON_WRITE_COMMAND, raw_text);
                let mut detected_words = BTreeSet::new();
                detected_words.insert(m.word.clone());
                return FilterResult {
                    blocked: true,
                    text: raw_text.to_string(),
                    reason: Some(REASON_WRITE_COMMAND.to_string()),
                    primary_word: Some(m.word),
                    detected_words,
                    is_evasion: true,
                };
            }
        }

        let mut merged: Vec<(usize, WordMatch)> = Vec::new();
        for (index, filter) in compiled.filters.iter().enumerate() {
            if filter.mode == WordFilterMode::WriteCommand {
                continue;
            }
            merged.extend(
                filter
                    .find_matches(&normalized, &raw_chars)
                    .into_iter()
                    .map(|m| (index, m)),
            );
        }

        if merged.is_empty() {
            return FilterResult::clean(raw_text);
        }

        // Stable sort: the earliest match wins ties for the primary reason.
        merged.sort_by_key(|(_, m)| m.start);

        let mut context = ReplacementContext::new(&raw_chars);
        let mut detected_words = BTreeSet::new();
        let mut reason: Option<String> = None;
        let mut primary_word: Option<String> = None;

        for (filter_index, m) in &merged {
            let filter = &compiled.filters[*filter_index];
            detected_words.insert(m.word.clone());
            if reason.is_none() {
                reason = Some(filter_reason(&m.word));
                primary_word = Some(m.word.clone());
            }
            log_word_match_debug(module_path!(), &filter.category, &m.word, raw_text);

            let Some((orig_start, orig_end)) =
                validators::backmap_span(&normalized.original_indices, m.start, m.end)
            else {
                continue;
            };

            let raw_len = orig_end.saturating_sub(orig_start) + 1;
            let clean_len = m.word.chars().count();
            let noise = raw_len.saturating_sub(clean_len);
            let density = noise as f64 / raw_len as f64;

            if check_evasion && density > self.options.evasion_tolerance {
                debug!(
                    "Evasion density {:.3} over span [{}, {}] exceeds tolerance {:.3}",
                    density, orig_start, orig_end, self.options.evasion_tolerance
                );
                log_block_debug(module_path!(), REASON_EVASION, raw_text);
                return FilterResult {
                    blocked: true,
                    text: raw_text.to_string(),
                    reason: Some(REASON_EVASION.to_string()),
                    primary_word,
                    detected_words,
                    is_evasion: true,
                };
            }

            let mask = self.mask_for(&filter.category);
            context.censor(orig_start, orig_end, &mask);
        }

        FilterResult {
            blocked: false,
            text: context.into_string(),
            reason,
            primary_word,
            detected_words,
            is_evasion: false,
        }
    }
}

impl FilterEngine for WordFilterEngine {
    fn filter(&self, raw_text: &str) -> FilterResult {
        self.evaluate(raw_text, self.options.check_evasion)
    }

    fn filter_with_evasion_check(&self, raw_text: &str, check_evasion: bool) -> FilterResult {
        self.evaluate(raw_text, check_evasion)
    }

    fn analyze(&self, raw_text: &str) -> Vec<WordMatch> {
        let compiled = self.snapshot();
        let normalized = normalize(raw_text);
        let raw_chars: Vec<char> = raw_text.chars().collect();

        let mut matches: Vec<WordMatch> = compiled
            .filters
            .iter()
            .flat_map(|f| f.find_matches(&normalized, &raw_chars))
            .collect();
        matches.sort_by_key(|m| m.start);
        matches
    }

    fn reload(&self, config: FilterConfig) -> Result<()> {
        let compiled = get_or_compile_filters(&config)
            .context("Failed to compile word filters during reload")?;
        *self.compiled_filters.write().unwrap() = compiled;
        debug!("Reloaded word filters; new set published.");
        Ok(())
    }

    fn compiled_filters(&self) -> Arc<CompiledFilters> {
        self.snapshot()
    }

    fn options(&self) -> &EngineOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WordCategory;

    fn config_with(name: &str, mode: WordFilterMode, words: &[&str]) -> FilterConfig {
        FilterConfig {
            categories: vec![WordCategory {
                name: name.to_string(),
                mode,
                words: words.iter().map(|w| w.to_string()).collect(),
                enabled: None,
            }],
        }
    }

    #[test]
    fn test_clean_message_passes_through() {
        let engine = WordFilterEngine::new(config_with("chat", WordFilterMode::Normal, &["noob"]))
            .unwrap();
        let result = engine.filter("hello there friend");
        assert!(!result.blocked);
        assert_eq!(result.text, "hello there friend");
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_plain_match_is_censored_not_blocked() {
        let engine = WordFilterEngine::new(config_with("chat", WordFilterMode::Normal, &["noob"]))
            .unwrap();
        let result = engine.filter("you are a noob");
        assert!(!result.blocked);
        assert_eq!(result.text, "you are a ***");
        assert_eq!(result.reason.as_deref(), Some("Filter (noob)"));
        assert_eq!(result.primary_word.as_deref(), Some("noob"));
        assert!(result.detected_words.contains("noob"));
        assert!(!result.is_evasion);
    }

    #[test]
    fn test_evasion_density_escalates_to_block() {
        let engine = WordFilterEngine::new(config_with("chat", WordFilterMode::Normal, &["vaca"]))
            .unwrap();
        let result = engine.filter("v.a.c.a");
        assert!(result.blocked);
        assert_eq!(result.reason.as_deref(), Some("Evasion"));
        assert!(result.is_evasion);
        // Blocked results carry the original text untouched.
        assert_eq!(result.text, "v.a.c.a");
    }

    #[test]
    fn test_evasion_check_can_be_toggled_per_call() {
        let engine = WordFilterEngine::new(config_with("chat", WordFilterMode::Normal, &["vaca"]))
            .unwrap();
        let result = engine.filter_with_evasion_check("v.a.c.a", false);
        assert!(!result.blocked);
        assert_eq!(result.text, "***");
    }

    #[test]
    fn test_mask_format_uses_category_name() {
        let options = EngineOptions {
            mask_format: Some("[{category}]".to_string()),
            ..EngineOptions::default()
        };
        let engine = WordFilterEngine::with_options(
            config_with("chat", WordFilterMode::Normal, &["noob"]),
            options,
        )
        .unwrap();
        let result = engine.filter("noob");
        assert_eq!(result.text, "[chat]");
    }

    #[test]
    fn test_analyze_reports_without_rewriting() {
        let engine = WordFilterEngine::new(config_with("chat", WordFilterMode::Normal, &["noob"]))
            .unwrap();
        let matches = engine.analyze("noob and noob again");
        assert_eq!(matches.len(), 2);
        assert!(matches[0].start < matches[1].start);
    }
}
