// chatguard-core/tests/config_integration_tests.rs
use anyhow::Result;
use tempfile::NamedTempFile;
use std::io::Write;

// Import the specific types and functions needed from the main crate's config module
use chatguard_core::config::{
    merge_categories, validate_categories, FilterConfig, WordCategory, WordFilterMode,
};
use chatguard_core::matchers::compiler::compile_filters;

#[test]
fn test_load_default_categories() {
    let config = FilterConfig::load_default_categories().unwrap();
    assert!(!config.categories.is_empty());
    assert!(config.categories.iter().any(|c| c.name == "chat"));

    let chat = config.categories.iter().find(|c| c.name == "chat").unwrap();
    assert_eq!(chat.mode, WordFilterMode::Normal);
    assert!(!chat.words.is_empty());

    let write_commands = config
        .categories
        .iter()
        .find(|c| c.name == "write_commands")
        .unwrap();
    assert_eq!(write_commands.mode, WordFilterMode::WriteCommand);
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
categories:
  - name: custom
    mode: strong
    words:
      - vaca
      - noob
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = FilterConfig::load_from_file(file.path())?;
    assert_eq!(config.categories.len(), 1);
    assert_eq!(config.categories[0].name, "custom");
    assert_eq!(config.categories[0].mode, WordFilterMode::Strong);
    assert_eq!(config.categories[0].words, vec!["vaca", "noob"]);
    // Unset fields take their defaults.
    assert_eq!(config.categories[0].enabled, None);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_duplicates() -> Result<()> {
    let yaml_content = r#"
categories:
  - name: twice
    mode: normal
    words: [a]
  - name: twice
    mode: strong
    words: [b]
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    assert!(FilterConfig::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_merge_prefers_user_mode_and_unions_words() {
    let default_config = FilterConfig {
        categories: vec![WordCategory {
            name: "chat".to_string(),
            mode: WordFilterMode::Normal,
            words: vec!["noob".to_string()],
            enabled: None,
        }],
    };
    let user_config = FilterConfig {
        categories: vec![
            WordCategory {
                name: "chat".to_string(),
                mode: WordFilterMode::Strong,
                words: vec!["scrub".to_string()],
                enabled: None,
            },
            WordCategory {
                name: "extra".to_string(),
                mode: WordFilterMode::Normal,
                words: vec!["spam".to_string()],
                enabled: None,
            },
        ],
    };

    let merged = merge_categories(default_config, Some(user_config));
    assert_eq!(merged.categories.len(), 2);

    let chat = merged.categories.iter().find(|c| c.name == "chat").unwrap();
    assert_eq!(chat.mode, WordFilterMode::Strong);
    assert_eq!(chat.words, vec!["noob", "scrub"]);

    assert!(merged.categories.iter().any(|c| c.name == "extra"));
}

#[test]
fn test_merge_without_user_config_is_identity() {
    let default_config = FilterConfig::load_default_categories().unwrap();
    let merged = merge_categories(default_config.clone(), None);
    assert_eq!(merged, default_config);
}

#[test]
fn test_set_active_categories_disables_by_name() {
    let mut config = FilterConfig {
        categories: vec![
            WordCategory {
                name: "chat".to_string(),
                mode: WordFilterMode::Normal,
                words: vec!["noob".to_string()],
                enabled: None,
            },
            WordCategory {
                name: "severe".to_string(),
                mode: WordFilterMode::Strong,
                words: vec!["badword".to_string()],
                enabled: None,
            },
        ],
    };

    config.set_active_categories(&[], &["severe".to_string()]);
    let compiled = compile_filters(&config).unwrap();
    assert_eq!(compiled.filters.len(), 1);
    assert_eq!(compiled.filters[0].category, "chat");
}

#[test]
fn test_default_categories_compile_and_filter() -> Result<()> {
    use chatguard_core::{headless_filter_string, EngineOptions};

    let config = FilterConfig::load_default_categories()?;
    let result = headless_filter_string(config, EngineOptions::default(), "what a noob")?;
    assert!(!result.blocked);
    assert_eq!(result.text, "what a ***");
    assert_eq!(result.reason.as_deref(), Some("Filter (noob)"));
    Ok(())
}

#[test]
fn test_validate_categories_flags_empty_name() {
    let categories = vec![WordCategory::default()];
    assert!(validate_categories(&categories).is_err());
}

#[test]
fn test_filter_result_serializes() -> Result<()> {
    use chatguard_core::{headless_filter_string, EngineOptions};

    let config = FilterConfig {
        categories: vec![WordCategory {
            name: "chat".to_string(),
            mode: WordFilterMode::Normal,
            words: vec!["noob".to_string()],
            enabled: None,
        }],
    };
    let result = headless_filter_string(config, EngineOptions::default(), "hi noob")?;

    let json = serde_json::to_string(&result)?;
    let back: chatguard_core::FilterResult = serde_json::from_str(&json)?;
    assert_eq!(result, back);
    Ok(())
}
