//! Classification result record

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::preset::{audio_params_for, AudioParams};
use crate::provider::ProviderClassification;

/// Confidence reported by every keyword-tier answer
pub const KEYWORD_CONFIDENCE: f32 = 0.7;

/// Which tier produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    /// Nothing to classify
    EmptyInput,
    /// A keyword matched
    Keyword,
    /// Structured output from the AI provider
    Ai,
    /// No keyword matched; default mode
    Default,
}

/// Outcome of one classification call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub mode: Mode,

    pub audio_params: AudioParams,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,

    pub source: ClassificationSource,
}

impl ClassificationResult {
    /// Keyword-tier hit
    pub fn from_keyword(mode: Mode, keyword: &str) -> Self {
        Self {
            mode,
            audio_params: audio_params_for(mode),
            confidence: Some(KEYWORD_CONFIDENCE),
            reasoning: Some(format!(
                "Keyword-based classification: matched '{}' -> {}",
                keyword, mode
            )),
            source: ClassificationSource::Keyword,
        }
    }

    /// Keyword-tier miss, resolved to the default mode
    pub fn default_mode() -> Self {
        Self {
            mode: Mode::DEFAULT,
            audio_params: audio_params_for(Mode::DEFAULT),
            confidence: Some(KEYWORD_CONFIDENCE),
            reasoning: Some(format!(
                "Keyword-based classification: no keyword matched, defaulting to {}",
                Mode::DEFAULT
            )),
            source: ClassificationSource::Default,
        }
    }

    /// Empty input, resolved to the default mode
    pub fn empty_input() -> Self {
        Self {
            reasoning: Some(format!(
                "Keyword-based classification: empty input, defaulting to {}",
                Mode::DEFAULT
            )),
            source: ClassificationSource::EmptyInput,
            ..Self::default_mode()
        }
    }

    /// Provider output, passed through as returned
    pub fn from_ai(output: ProviderClassification) -> Self {
        Self {
            mode: output.target_mode,
            audio_params: output.audio_params,
            confidence: None,
            reasoning: None,
            source: ClassificationSource::Ai,
        }
    }
}
