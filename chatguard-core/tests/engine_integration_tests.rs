// chatguard-core/tests/engine_integration_tests.rs
use std::sync::Arc;

use chatguard_core::{
    EngineOptions, FilterConfig, FilterEngine, WordCategory, WordFilterMode, WordFilterEngine,
};

fn category(name: &str, mode: WordFilterMode, words: &[&str]) -> WordCategory {
    WordCategory {
        name: name.to_string(),
        mode,
        words: words.iter().map(|w| w.to_string()).collect(),
        enabled: None,
    }
}

fn engine_with(categories: Vec<WordCategory>) -> WordFilterEngine {
    WordFilterEngine::new(FilterConfig { categories }).unwrap()
}

#[test_log::test]
fn test_boundary_rule_normal_mode() {
    let engine = engine_with(vec![category("chat", WordFilterMode::Normal, &["ass"])]);

    let embedded = engine.filter("classroom");
    assert!(!embedded.blocked);
    assert_eq!(embedded.text, "classroom");
    assert!(embedded.reason.is_none());
    assert!(embedded.detected_words.is_empty());

    let standalone = engine.filter("go ass now");
    assert!(!standalone.blocked);
    assert_eq!(standalone.text, "go *** now");
    assert_eq!(standalone.reason.as_deref(), Some("Filter (ass)"));
}

#[test_log::test]
fn test_strong_mode_matches_inside_words() {
    let engine = engine_with(vec![category("severe", WordFilterMode::Strong, &["ass"])]);
    let result = engine.filter("classroom");
    assert!(!result.blocked);
    assert_eq!(result.text, "cl***room");
    assert_eq!(result.primary_word.as_deref(), Some("ass"));
}

#[test_log::test]
fn test_evasion_density_escalates() {
    let engine = engine_with(vec![category("chat", WordFilterMode::Normal, &["vaca"])]);

    // One noise character over a five-character raw span: density 0.2.
    let evading = engine.filter("v.aca");
    assert!(evading.blocked);
    assert!(evading.is_evasion);
    assert_eq!(evading.reason.as_deref(), Some("Evasion"));
    assert_eq!(evading.text, "v.aca");

    // Exact span: density 0, censored instead of blocked.
    let plain = engine.filter("vaca");
    assert!(!plain.blocked);
    assert!(!plain.is_evasion);
    assert_eq!(plain.text, "***");
}

#[test_log::test]
fn test_leetspeak_without_padding_is_censored_not_blocked() {
    let engine = engine_with(vec![category("chat", WordFilterMode::Normal, &["vaca"])]);
    // Substituted characters fold in place, so the raw span stays the same
    // length as the term and the density rule does not fire.
    let result = engine.filter("v4c4");
    assert!(!result.blocked);
    assert_eq!(result.text, "***");
}

#[test_log::test]
fn test_diacritics_and_confusables_fold() {
    let engine = engine_with(vec![category("chat", WordFilterMode::Normal, &["vaca"])]);

    assert_eq!(engine.filter("VACA").text, "***");
    assert_eq!(engine.filter("våcá").text, "***");
    // 'а' below is Cyrillic.
    assert_eq!(engine.filter("vаca").text, "***");
}

#[test_log::test]
fn test_evasion_tolerance_is_configurable() {
    let options = EngineOptions {
        evasion_tolerance: 0.5,
        ..EngineOptions::default()
    };
    let engine = WordFilterEngine::with_options(
        FilterConfig {
            categories: vec![category("chat", WordFilterMode::Normal, &["vaca"])],
        },
        options,
    )
    .unwrap();

    // Density 0.2 stays under the raised tolerance and is censored.
    let result = engine.filter("v.aca");
    assert!(!result.blocked);
    assert_eq!(result.text, "***");
}

#[test_log::test]
fn test_write_command_precedence() {
    let engine = engine_with(vec![
        category("severe", WordFilterMode::Strong, &["badword"]),
        category("write_commands", WordFilterMode::WriteCommand, &["opme"]),
    ]);

    let result = engine.filter("badword opme please");
    assert!(result.blocked);
    assert!(result.is_evasion);
    assert_eq!(result.reason.as_deref(), Some("WriteCommand"));
    assert_eq!(result.primary_word.as_deref(), Some("opme"));
    // The strong match is not reported alongside the write-command term.
    assert_eq!(result.detected_words.len(), 1);
    assert!(result.detected_words.contains("opme"));
    assert_eq!(result.text, "badword opme please");
}

#[test_log::test]
fn test_overlapping_matches_censor_once() {
    let engine = engine_with(vec![category("severe", WordFilterMode::Strong, &["abc", "abcd"])]);
    let result = engine.filter("abcd");
    assert!(!result.blocked);
    // Both terms are reported, but the overlapping region is replaced once.
    assert_eq!(result.text, "***d");
    assert_eq!(result.detected_words.len(), 2);
    assert_eq!(result.primary_word.as_deref(), Some("abc"));
}

#[test_log::test]
fn test_determinism_across_calls_and_engines() {
    let categories = vec![
        category("chat", WordFilterMode::Normal, &["noob", "vaca"]),
        category("severe", WordFilterMode::Strong, &["badword"]),
    ];
    let first_engine = engine_with(categories.clone());
    let second_engine = engine_with(categories);

    for message in ["you noob", "v.a.c.a", "clean text", "BADWORD!"] {
        let a = first_engine.filter(message);
        let b = first_engine.filter(message);
        let c = second_engine.filter(message);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }
}

#[test_log::test]
fn test_totality_on_degenerate_inputs() {
    let engine = engine_with(vec![category("chat", WordFilterMode::Normal, &["noob"])]);

    for message in ["", "   ", "....!!??", "\u{7}\u{0}", "😀🎉", "2 + 2 = 4"] {
        let result = engine.filter(message);
        assert!(!result.blocked, "input {:?} must not block", message);
        assert!(result.reason.is_none());
    }
}

#[test_log::test]
fn test_empty_configuration_never_matches() {
    let engine = engine_with(Vec::new());
    let result = engine.filter("anything goes here");
    assert!(!result.blocked);
    assert_eq!(result.text, "anything goes here");

    let empty_list = engine_with(vec![category("chat", WordFilterMode::Normal, &[])]);
    assert!(!empty_list.filter("anything goes here").blocked);
}

#[test_log::test]
fn test_reload_swaps_atomically() {
    let engine = engine_with(vec![category("chat", WordFilterMode::Normal, &["noob"])]);
    let before = engine.compiled_filters();

    assert_eq!(engine.filter("noob").text, "***");

    engine
        .reload(FilterConfig {
            categories: vec![category("chat", WordFilterMode::Normal, &["spam"])],
        })
        .unwrap();

    // The old snapshot is unchanged; the engine now serves the new set.
    assert!(!Arc::ptr_eq(&before, &engine.compiled_filters()));
    assert_eq!(engine.filter("noob").text, "noob");
    assert_eq!(engine.filter("spam").text, "***");
}

#[test_log::test]
fn test_detected_words_accumulate_in_order() {
    let engine = engine_with(vec![category("chat", WordFilterMode::Normal, &["pig", "rat"])]);
    let result = engine.filter("you pig and rat pal");
    assert!(!result.blocked);
    assert_eq!(result.text, "you *** and *** pal");
    assert_eq!(result.primary_word.as_deref(), Some("pig"));
    assert_eq!(result.reason.as_deref(), Some("Filter (pig)"));
    let detected: Vec<&str> = result.detected_words.iter().map(String::as_str).collect();
    assert_eq!(detected, vec!["pig", "rat"]);
}
