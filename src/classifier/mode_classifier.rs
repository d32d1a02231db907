//! Mode classifier - the tiered decision pipeline
//!
//! Order of tiers:
//! 1. Empty input -> default mode
//! 2. Single word -> keyword table (no network)
//! 3. Multi-word, AI available -> structured AI classification
//! 4. Anything left -> keyword table over the full input, else default mode

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::result::ClassificationResult;
use super::strategy::{
    AiStrategy, EmptyInputStrategy, KeywordFallbackStrategy, SingleWordStrategy, StrategyChain,
};
use crate::config::{AiSettings, PrismConfig};
use crate::keywords::KeywordTable;
use crate::preset::{preset_for, ModeAudioPreset};
use crate::provider::{ClassificationProvider, GeminiProvider};
use crate::sanitize::NormalizedInput;

/// Whether an AI tier takes part in classification
#[derive(Clone, Default)]
pub enum AiTier {
    #[default]
    Unavailable,
    Available {
        provider: Arc<dyn ClassificationProvider>,
        timeout: Duration,
    },
}

impl AiTier {
    /// Build the Gemini tier from configuration
    pub fn from_settings(settings: &AiSettings) -> Self {
        match settings {
            AiSettings::Unconfigured => AiTier::Unavailable,
            AiSettings::Configured(provider_settings) => {
                match GeminiProvider::new(provider_settings.clone()) {
                    Ok(provider) => AiTier::Available {
                        provider: Arc::new(provider),
                        timeout: provider_settings.timeout(),
                    },
                    Err(e) => {
                        warn!("AI tier disabled ({}): {}", e.error_code(), e);
                        AiTier::Unavailable
                    }
                }
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, AiTier::Available { .. })
    }
}

/// Classifier from free text to a presentation mode
pub struct ModeClassifier {
    chain: StrategyChain,
    ai_available: bool,
}

impl ModeClassifier {
    pub fn new(ai: AiTier) -> Self {
        Self::with_table(ai, KeywordTable::builtin())
    }

    /// Keyword tiers only; fully deterministic
    pub fn keyword_only() -> Self {
        Self::new(AiTier::Unavailable)
    }

    pub fn from_config(config: &PrismConfig) -> Self {
        Self::new(AiTier::from_settings(&config.ai))
    }

    pub fn with_table(ai: AiTier, table: &'static KeywordTable) -> Self {
        let ai_available = ai.is_available();
        let mut chain = StrategyChain::new()
            .with(EmptyInputStrategy)
            .with(SingleWordStrategy::new(table));

        if let AiTier::Available { provider, timeout } = ai {
            chain = chain.with(AiStrategy::new(provider, timeout, table));
        }

        let chain = chain.with(KeywordFallbackStrategy::new(table));
        info!("Mode classifier tiers: {}", chain.names().join(" -> "));

        Self {
            chain,
            ai_available,
        }
    }

    pub fn ai_available(&self) -> bool {
        self.ai_available
    }

    /// Classify raw input. Always returns a result in one of the three modes.
    pub async fn classify(&self, raw: &str) -> ClassificationResult {
        let input = NormalizedInput::new(raw);
        debug!(
            "Classifying {} word(s): {:?}",
            input.word_count, input.text
        );

        self.chain
            .resolve(&input)
            .await
            .unwrap_or_else(ClassificationResult::default_mode)
    }

    /// Classify and return the full preset for the resolved mode
    pub async fn classify_with_preset(
        &self,
        raw: &str,
    ) -> (ClassificationResult, &'static ModeAudioPreset) {
        let result = self.classify(raw).await;
        let preset = preset_for(result.mode);
        (result, preset)
    }
}

impl Default for ModeClassifier {
    fn default() -> Self {
        Self::keyword_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassificationSource;
    use crate::mode::Mode;

    #[tokio::test]
    async fn test_keyword_only_defaults() {
        let classifier = ModeClassifier::keyword_only();
        assert!(!classifier.ai_available());

        let result = classifier.classify("xyzabc").await;
        assert_eq!(result.mode, Mode::Architect);
        assert_eq!(result.source, ClassificationSource::Default);
    }

    #[tokio::test]
    async fn test_unconfigured_settings_have_no_ai_tier() {
        let classifier = ModeClassifier::from_config(&PrismConfig::default());
        assert!(!classifier.ai_available());
    }

    #[tokio::test]
    async fn test_preset_follows_mode() {
        let classifier = ModeClassifier::keyword_only();
        let (result, preset) = classifier.classify_with_preset("poetry").await;
        assert_eq!(result.mode, Mode::Author);
        assert_eq!(preset.theme.ui_sound, "page-turn");
    }
}
