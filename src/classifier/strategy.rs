//! Classification strategies and the ordered chain that tries them
//!
//! Each strategy either answers or passes. The chain returns the first
//! answer, so tier order is data rather than nested error handling.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::prompt;
use super::result::ClassificationResult;
use crate::error::PrismError;
use crate::keywords::KeywordTable;
use crate::provider::{ClassificationProvider, ClassificationRequest};
use crate::sanitize::NormalizedInput;

/// One tier of the classifier
#[async_trait]
pub trait ClassificationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` means "no answer, try the next tier"
    async fn attempt(&self, input: &NormalizedInput) -> Option<ClassificationResult>;
}

fn keyword_result(table: &KeywordTable, input: &NormalizedInput) -> ClassificationResult {
    match table.lookup(&input.lower) {
        Some(hit) => ClassificationResult::from_keyword(hit.mode, hit.keyword),
        None => ClassificationResult::default_mode(),
    }
}

/// Answers empty input with the default mode
pub struct EmptyInputStrategy;

#[async_trait]
impl ClassificationStrategy for EmptyInputStrategy {
    fn name(&self) -> &'static str {
        "empty-input"
    }

    async fn attempt(&self, input: &NormalizedInput) -> Option<ClassificationResult> {
        input.is_empty().then(ClassificationResult::empty_input)
    }
}

/// Answers single-word input from the keyword table, never touching the network
pub struct SingleWordStrategy {
    table: &'static KeywordTable,
}

impl SingleWordStrategy {
    pub fn new(table: &'static KeywordTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl ClassificationStrategy for SingleWordStrategy {
    fn name(&self) -> &'static str {
        "single-word"
    }

    async fn attempt(&self, input: &NormalizedInput) -> Option<ClassificationResult> {
        input
            .is_single_word()
            .then(|| keyword_result(self.table, input))
    }
}

/// Asks the AI provider about multi-word input, bounded by a timeout
pub struct AiStrategy {
    provider: Arc<dyn ClassificationProvider>,
    timeout: Duration,
    system_prompt: String,
}

impl AiStrategy {
    pub fn new(
        provider: Arc<dyn ClassificationProvider>,
        timeout: Duration,
        table: &KeywordTable,
    ) -> Self {
        Self {
            provider,
            timeout,
            system_prompt: prompt::system_prompt(table),
        }
    }

    fn request(&self, input: &NormalizedInput) -> ClassificationRequest {
        ClassificationRequest {
            system_prompt: self.system_prompt.clone(),
            user_prompt: prompt::user_prompt(input),
            schema: prompt::classification_schema(),
            temperature: prompt::CLASSIFICATION_TEMPERATURE,
        }
    }
}

#[async_trait]
impl ClassificationStrategy for AiStrategy {
    fn name(&self) -> &'static str {
        "ai"
    }

    async fn attempt(&self, input: &NormalizedInput) -> Option<ClassificationResult> {
        if input.word_count < 2 {
            return None;
        }

        let request = self.request(input);
        let outcome = match tokio::time::timeout(self.timeout, self.provider.classify(&request)).await
        {
            Ok(result) => result,
            Err(_) => Err(PrismError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        };

        match outcome {
            Ok(output) => {
                debug!(
                    "{} classified input as {}",
                    self.provider.name(),
                    output.target_mode
                );
                Some(ClassificationResult::from_ai(output))
            }
            Err(e) => {
                warn!(
                    "AI classification via {} failed ({}): {}; using keyword fallback",
                    self.provider.name(),
                    e.error_code(),
                    e
                );
                None
            }
        }
    }
}

/// Keyword lookup over the full input; always answers
pub struct KeywordFallbackStrategy {
    table: &'static KeywordTable,
}

impl KeywordFallbackStrategy {
    pub fn new(table: &'static KeywordTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl ClassificationStrategy for KeywordFallbackStrategy {
    fn name(&self) -> &'static str {
        "keyword-fallback"
    }

    async fn attempt(&self, input: &NormalizedInput) -> Option<ClassificationResult> {
        Some(keyword_result(self.table, input))
    }
}

/// Ordered list of strategies; first definite answer wins
#[derive(Default)]
pub struct StrategyChain {
    strategies: Vec<Box<dyn ClassificationStrategy>>,
}

impl StrategyChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, strategy: impl ClassificationStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Names in the order they are tried
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub async fn resolve(&self, input: &NormalizedInput) -> Option<ClassificationResult> {
        for strategy in &self.strategies {
            if let Some(result) = strategy.attempt(input).await {
                debug!("Strategy '{}' answered: {}", strategy.name(), result.mode);
                return Some(result);
            }
            debug!("Strategy '{}' passed", strategy.name());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassificationSource;
    use crate::mode::Mode;

    #[tokio::test]
    async fn test_empty_strategy_only_answers_empty() {
        assert!(EmptyInputStrategy
            .attempt(&NormalizedInput::new("hello"))
            .await
            .is_none());
        let result = EmptyInputStrategy
            .attempt(&NormalizedInput::new(" "))
            .await
            .unwrap();
        assert_eq!(result.source, ClassificationSource::EmptyInput);
    }

    #[tokio::test]
    async fn test_single_word_passes_on_sentences() {
        let strategy = SingleWordStrategy::new(KeywordTable::builtin());
        assert!(strategy
            .attempt(&NormalizedInput::new("write me a story"))
            .await
            .is_none());
        let result = strategy.attempt(&NormalizedInput::new("Blog")).await.unwrap();
        assert_eq!(result.mode, Mode::Author);
    }

    #[tokio::test]
    async fn test_chain_returns_first_answer() {
        let chain = StrategyChain::new()
            .with(EmptyInputStrategy)
            .with(KeywordFallbackStrategy::new(KeywordTable::builtin()));
        assert_eq!(chain.names(), vec!["empty-input", "keyword-fallback"]);

        let result = chain.resolve(&NormalizedInput::new("")).await.unwrap();
        assert_eq!(result.source, ClassificationSource::EmptyInput);

        let result = chain
            .resolve(&NormalizedInput::new("show me your github"))
            .await
            .unwrap();
        assert_eq!(result.mode, Mode::Lab);
    }

    #[tokio::test]
    async fn test_empty_chain_has_no_answer() {
        assert!(StrategyChain::new()
            .resolve(&NormalizedInput::new("anything"))
            .await
            .is_none());
    }
}
