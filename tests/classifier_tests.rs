//! Classifier Tests
//!
//! End-to-end tests for the tiered mode classification pipeline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use test_case::test_case;

use prism::classifier::{AiTier, ClassificationSource, ModeClassifier};
use prism::preset::audio_params_for;
use prism::provider::{MockBehavior, MockClassificationProvider, ProviderClassification};
use prism::{sanitize_input, AudioParams, Mode};

fn ai_answer(mode: Mode, reverb: f32, filter: f32) -> ProviderClassification {
    ProviderClassification {
        target_mode: mode,
        audio_params: AudioParams::new(reverb, filter),
    }
}

fn classifier_with(
    behavior: MockBehavior<ProviderClassification>,
    timeout: Duration,
) -> (ModeClassifier, Arc<MockClassificationProvider>) {
    let provider = Arc::new(MockClassificationProvider::new(behavior));
    let classifier = ModeClassifier::new(AiTier::Available {
        provider: provider.clone(),
        timeout,
    });
    (classifier, provider)
}

// === Keyword Tier ===

#[test_case("code", Mode::Lab ; "code")]
#[test_case("Hire", Mode::Architect ; "hire capitalized")]
#[test_case("poetry", Mode::Author ; "poetry")]
#[test_case("  github  ", Mode::Lab ; "padded github")]
#[tokio::test]
async fn test_single_word_never_calls_provider(input: &str, expected: Mode) {
    let (classifier, provider) = classifier_with(
        MockBehavior::Respond(ai_answer(Mode::Author, 0.9, 900.0)),
        Duration::from_secs(1),
    );

    let result = classifier.classify(input).await;

    assert_eq!(result.mode, expected);
    assert_eq!(result.source, ClassificationSource::Keyword);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_single_word_without_match_defaults() {
    let (classifier, provider) = classifier_with(
        MockBehavior::Respond(ai_answer(Mode::Lab, 0.3, 400.0)),
        Duration::from_secs(1),
    );

    let result = classifier.classify("xyzabc").await;

    assert_eq!(result.mode, Mode::Architect);
    assert_eq!(result.audio_params, AudioParams::new(0.1, 1800.0));
    assert_eq!(provider.calls(), 0);
}

#[test_case("" ; "empty")]
#[test_case("   " ; "spaces")]
#[test_case("<>[]{}" ; "only stripped characters")]
#[tokio::test]
async fn test_empty_input_defaults_without_provider(input: &str) {
    let (classifier, provider) = classifier_with(
        MockBehavior::Respond(ai_answer(Mode::Lab, 0.3, 400.0)),
        Duration::from_secs(1),
    );

    let result = classifier.classify(input).await;

    assert_eq!(result.mode, Mode::Architect);
    assert_eq!(result.confidence, Some(0.7));
    assert!(result.reasoning.unwrap().contains("Keyword-based"));
    assert_eq!(result.source, ClassificationSource::EmptyInput);
    assert_eq!(provider.calls(), 0);
}

// === AI Tier ===

#[tokio::test]
async fn test_multi_word_uses_ai_output_verbatim() {
    let (classifier, provider) = classifier_with(
        MockBehavior::Respond(ai_answer(Mode::Author, 0.65, 1150.0)),
        Duration::from_secs(1),
    );

    let result = classifier.classify("I want to hire you").await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(result.mode, Mode::Author);
    assert_eq!(result.audio_params, AudioParams::new(0.65, 1150.0));
    assert_eq!(result.source, ClassificationSource::Ai);
}

#[tokio::test]
async fn test_ai_timeout_falls_back_within_bound() {
    let (classifier, provider) = classifier_with(
        MockBehavior::Hang(Duration::from_secs(30), ai_answer(Mode::Lab, 0.3, 400.0)),
        Duration::from_millis(50),
    );

    let start = Instant::now();
    let result = classifier.classify("I want to hire you").await;

    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(provider.calls(), 1);
    assert_eq!(result.mode, Mode::Architect);
    assert_eq!(result.source, ClassificationSource::Keyword);
}

#[tokio::test]
async fn test_ai_network_error_falls_back() {
    let (classifier, _) = classifier_with(MockBehavior::FailNetwork, Duration::from_secs(1));

    let result = classifier.classify("show me some code please").await;

    assert_eq!(result.mode, Mode::Lab);
    assert_eq!(result.audio_params, AudioParams::new(0.3, 400.0));
}

#[tokio::test]
async fn test_ai_schema_error_falls_back_to_default() {
    let (classifier, _) = classifier_with(MockBehavior::FailSchema, Duration::from_secs(1));

    let result = classifier.classify("nothing relevant here").await;

    assert_eq!(result.mode, Mode::Architect);
    assert_eq!(result.source, ClassificationSource::Default);
}

// === No AI Configured ===

#[tokio::test]
async fn test_hire_scenario_without_ai() {
    let classifier = ModeClassifier::keyword_only();

    let result = classifier.classify("I want to hire you").await;

    assert_eq!(result.mode, Mode::Architect);
    assert_eq!(result.audio_params, AudioParams::new(0.1, 1800.0));
    assert_eq!(result.source, ClassificationSource::Keyword);
    assert!(result.reasoning.unwrap().contains("'hire'"));
}

#[tokio::test]
async fn test_code_scenario() {
    let result = ModeClassifier::keyword_only().classify("code").await;

    assert_eq!(result.mode, Mode::Lab);
    assert_eq!(result.audio_params, AudioParams::new(0.3, 400.0));
}

#[tokio::test]
async fn test_unmatched_multi_word_defaults_without_ai() {
    let result = ModeClassifier::keyword_only()
        .classify("tell me something lovely")
        .await;

    assert_eq!(result.mode, Mode::Architect);
    assert_eq!(result.source, ClassificationSource::Default);
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let classifier = ModeClassifier::keyword_only();
    let inputs = ["I want to hire you", "code", "", "xyzabc", "read my essays"];

    for input in inputs {
        let first = classifier.classify(input).await;
        for _ in 0..5 {
            let again = classifier.classify(input).await;
            assert_eq!(again, first);
            assert_eq!(
                serde_json::to_string(&again).unwrap(),
                serde_json::to_string(&first).unwrap()
            );
        }
    }
}

#[tokio::test]
async fn test_every_result_is_a_true_mode_with_its_preset() {
    let classifier = ModeClassifier::keyword_only();
    let inputs = [
        "",
        "lab",
        "landing",
        "{}",
        "writing code for business",
        "🦀🦀🦀",
        "a very long sentence with no keywords whatsoever in it at all",
    ];

    for input in inputs {
        let result = classifier.classify(input).await;
        assert!(Mode::ALL.contains(&result.mode));
        assert_eq!(result.audio_params, audio_params_for(result.mode));
    }
}

// === Sanitization ===

#[test]
fn test_sanitize_script_tag() {
    let clean = sanitize_input("<script>alert(1)</script>\ntest", 500);

    for c in ['<', '>', '{', '}', '[', ']', '\n'] {
        assert!(!clean.contains(c), "found {:?} in {:?}", c, clean);
    }
    assert!(clean.contains("alert(1)"));
    assert!(clean.ends_with(" test"));
    assert!(clean.chars().count() <= 500);
}

#[tokio::test]
async fn test_long_input_is_truncated_not_rejected() {
    let long = format!("{} hire", "x".repeat(600));
    let result = ModeClassifier::keyword_only().classify(&long).await;

    // "hire" falls beyond the 500-char routing limit
    assert_eq!(result.source, ClassificationSource::Default);
}
