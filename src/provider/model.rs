//! Provider traits and wire-independent request/response types
//!
//! Every outbound generative service implements one of these traits so the
//! classifier and whisper generator can be driven by fakes in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mode::Mode;
use crate::preset::AudioParams;

/// Request for a structured mode classification
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRequest {
    /// Fixed task prompt describing the modes
    pub system_prompt: String,
    /// Sanitized user text wrapped in its instruction
    pub user_prompt: String,
    /// Output schema the provider must follow
    pub schema: serde_json::Value,
    /// Sampling temperature hint
    pub temperature: f32,
}

/// Structured output of a classification provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderClassification {
    pub target_mode: Mode,
    pub audio_params: AudioParams,
}

impl ProviderClassification {
    /// Parse and range-check raw provider text
    pub fn parse(raw: &str) -> Result<Self> {
        let json = raw
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();

        let parsed: Self =
            serde_json::from_str(json).map_err(|e| crate::error::PrismError::SchemaViolation {
                reason: format!("unparseable classification: {}", e),
            })?;
        parsed.audio_params.validate()?;
        Ok(parsed)
    }
}

/// Request for a short piece of free text
#[derive(Debug, Clone, Serialize)]
pub struct TextRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Structured classification service
#[async_trait]
pub trait ClassificationProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Classify; any error is treated by callers as "no answer"
    async fn classify(&self, request: &ClassificationRequest) -> Result<ProviderClassification>;
}

/// Free-text generation service
#[async_trait]
pub trait TextProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn generate_text(&self, request: &TextRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let parsed = ProviderClassification::parse(
            r#"{"targetMode":"lab","audioParams":{"reverb":0.25,"filter":450}}"#,
        )
        .unwrap();
        assert_eq!(parsed.target_mode, Mode::Lab);
        assert_eq!(parsed.audio_params.filter, 450.0);
    }

    #[test]
    fn test_parse_strips_code_fence() {
        let raw = "```json\n{\"targetMode\":\"author\",\"audioParams\":{\"reverb\":0.9,\"filter\":900}}\n```";
        assert_eq!(
            ProviderClassification::parse(raw).unwrap().target_mode,
            Mode::Author
        );
    }

    #[test]
    fn test_parse_rejects_landing_and_ranges() {
        let landing = r#"{"targetMode":"landing","audioParams":{"reverb":0.1,"filter":1800}}"#;
        let err = ProviderClassification::parse(landing).unwrap_err();
        assert_eq!(err.error_code(), "SCHEMA_VIOLATION");

        let loud = r#"{"targetMode":"lab","audioParams":{"reverb":3.0,"filter":400}}"#;
        assert!(ProviderClassification::parse(loud).is_err());
    }
}
