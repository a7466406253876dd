//! Configuration management for `chatguard-core`.
//!
//! This module defines the core data structures for word categories and
//! engine options. It handles serialization/deserialization of YAML
//! configurations and provides utilities for loading, merging, and
//! validating them.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use log::{debug, info, warn};
use tinytemplate::TinyTemplate;

use crate::errors::ChatFilterError;

/// Maximum allowed character length for a single forbidden term.
pub const MAX_TERM_LENGTH: usize = 500;

/// How a category's matches are validated and acted upon.
///
/// The three variants are a closed set; boundary checking and block
/// precedence are pure functions of the variant, never dynamic dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordFilterMode {
    /// Zero-tolerance list. No boundary check; any match forces a full block.
    Strong,
    /// Default list. Matches are boundary-validated and censored rather than
    /// blocked, unless evasion-density scoring escalates.
    Normal,
    /// Highest precedence. Any match forces an immediate full block,
    /// bypassing every other category.
    WriteCommand,
}

impl WordFilterMode {
    /// Whether raw-text word boundaries must surround a match for it to count.
    pub fn requires_boundary_check(&self) -> bool {
        matches!(self, WordFilterMode::Normal)
    }

    /// Whether a single match from this list blocks the message outright.
    pub fn blocks_on_first_match(&self) -> bool {
        matches!(self, WordFilterMode::Strong | WordFilterMode::WriteCommand)
    }
}

impl Default for WordFilterMode {
    fn default() -> Self {
        WordFilterMode::Normal
    }
}

/// One named list of forbidden terms sharing a filter mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct WordCategory {
    /// Unique identifier for the category (e.g., "slurs", "write_commands").
    pub name: String,
    /// How matches from this list are validated and acted upon.
    pub mode: WordFilterMode,
    /// The forbidden terms. Deduplicated and case-folded at compile time.
    pub words: Vec<String>,
    /// Explicit override for enabling/disabling the category.
    pub enabled: Option<bool>,
}

impl Default for WordCategory {
    fn default() -> Self {
        Self {
            name: String::new(),
            mode: WordFilterMode::default(),
            words: Vec::new(),
            enabled: None,
        }
    }
}

/// Represents the top-level word-list configuration structure for Chatguard.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct FilterConfig {
    /// The word categories compiled into automatons at engine build time.
    pub categories: Vec<WordCategory>,
}

impl FilterConfig {
    /// Loads word categories from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom word lists from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: FilterConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_categories(&config.categories)?;
        info!(
            "Loaded {} word categories from file {}.",
            config.categories.len(),
            path.display()
        );

        Ok(config)
    }

    /// Loads the default word categories from the embedded configuration.
    pub fn load_default_categories() -> Result<Self> {
        debug!("Loading default word lists from embedded string...");
        let default_yaml = include_str!("../config/default_words.yaml");
        let config: FilterConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default word lists")?;

        debug!("Loaded {} default categories.", config.categories.len());
        Ok(config)
    }

    /// Filters active categories based on enable/disable lists from the host.
    pub fn set_active_categories(&mut self, enable: &[String], disable: &[String]) {
        let enable_set: HashSet<&str> = enable.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable.iter().map(String::as_str).collect();

        let all_names: HashSet<&str> = self.categories.iter().map(|c| c.name.as_str()).collect();

        for name in enable_set.difference(&all_names) {
            warn!("Category '{}' in `enable` list does not exist.", name);
        }

        for name in disable_set.difference(&all_names) {
            warn!("Category '{}' in `disable` list does not exist.", name);
        }

        let mut disabled = 0usize;
        for category in &mut self.categories {
            let name = category.name.as_str();
            if disable_set.contains(name) {
                category.enabled = Some(false);
                disabled += 1;
            } else if enable_set.contains(name) {
                category.enabled = Some(true);
            }
        }

        debug!(
            "Category activation applied: {} of {} categories disabled.",
            disabled,
            self.categories.len()
        );
    }
}

/// Merges user-defined word categories with defaults.
///
/// A user category with the same name as a default one keeps the user's mode
/// and enabled flag but unions the two word lists, so host operators can
/// extend a shipped list without restating it.
pub fn merge_categories(
    default_config: FilterConfig,
    user_config: Option<FilterConfig>,
) -> FilterConfig {
    debug!(
        "merge_categories called. Initial default category count: {}",
        default_config.categories.len()
    );

    let mut order: Vec<String> = default_config
        .categories
        .iter()
        .map(|c| c.name.clone())
        .collect();
    let mut merged: HashMap<String, WordCategory> = default_config
        .categories
        .into_iter()
        .map(|c| (c.name.clone(), c))
        .collect();

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user categories.", user_cfg.categories.len());
        for user_category in user_cfg.categories {
            match merged.get_mut(&user_category.name) {
                Some(existing) => {
                    existing.mode = user_category.mode;
                    existing.enabled = user_category.enabled;
                    for word in user_category.words {
                        if !existing.words.contains(&word) {
                            existing.words.push(word);
                        }
                    }
                }
                None => {
                    order.push(user_category.name.clone());
                    merged.insert(user_category.name.clone(), user_category);
                }
            }
        }
    }

    let final_categories: Vec<WordCategory> = order
        .into_iter()
        .filter_map(|name| merged.remove(&name))
        .collect();
    debug!("Final total categories after merge: {}", final_categories.len());

    FilterConfig {
        categories: final_categories,
    }
}

/// Validates category integrity (names, duplicates).
pub fn validate_categories(categories: &[WordCategory]) -> Result<()> {
    let mut names = HashSet::new();
    let mut errors = Vec::new();

    for category in categories {
        if category.name.is_empty() {
            errors.push("A category has an empty `name` field.".to_string());
        } else if !names.insert(category.name.clone()) {
            errors.push(format!("Duplicate category name found: '{}'.", category.name));
        }

        for word in &category.words {
            if word.chars().count() > MAX_TERM_LENGTH {
                errors.push(format!(
                    "Category '{}': term length ({}) exceeds maximum allowed ({}).",
                    category.name,
                    word.chars().count(),
                    MAX_TERM_LENGTH
                ));
            }
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Category validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

/// Behavioral knobs for a filter engine, separate from the word lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Whether evasion-density scoring may escalate a censor to a block.
    pub check_evasion: bool,
    /// Noise fraction above which a match counts as deliberate evasion.
    pub evasion_tolerance: f64,
    /// Text substituted over a censored raw span.
    pub mask: String,
    /// Optional template for the mask; `{category}` is available.
    pub mask_format: Option<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            check_evasion: true,
            evasion_tolerance: 0.05,
            mask: "***".to_string(),
            mask_format: None,
        }
    }
}

/// Renders a mask template for one category.
pub fn format_mask(mask_fmt: &str, category: &str) -> Result<String, ChatFilterError> {
    let mut tt = TinyTemplate::new();
    tt.add_template("m", mask_fmt)
        .map_err(|e| ChatFilterError::MaskTemplateError(mask_fmt.to_string(), e.to_string()))?;
    let ctx = serde_json::json!({ "category": category });
    tt.render("m", &ctx)
        .map_err(|e| ChatFilterError::MaskTemplateError(mask_fmt.to_string(), e.to_string()))
}
