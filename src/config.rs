//! Environment-driven configuration
//!
//! Credential presence is the only behavior switch. A missing or blank
//! credential is a valid configuration that selects the offline paths.

use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

/// Default generative model
pub const DEFAULT_AI_MODEL: &str = "gemini-2.0-flash";

/// Default generative endpoint
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default speech endpoint
pub const DEFAULT_SPEECH_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Default ceiling for provider calls
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Accepted range for provider timeouts
pub const TIMEOUT_RANGE_MS: RangeInclusive<u64> = 1..=30_000;

/// Default pause between batched whisper requests
pub const DEFAULT_WHISPER_DELAY_MS: u64 = 300;

/// Default guestbook location
pub const DEFAULT_ECHO_PATH: &str = "echo_chamber.json";

/// Settings for a configured generative provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Whether the AI tier exists at all
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AiSettings {
    Configured(ProviderSettings),
    #[default]
    Unconfigured,
}

impl AiSettings {
    pub fn is_configured(&self) -> bool {
        matches!(self, AiSettings::Configured(_))
    }
}

/// Settings for the text-to-speech provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrismConfig {
    pub ai: AiSettings,
    pub speech: Option<SpeechSettings>,
    pub whisper_delay_ms: u64,
    pub echo_path: PathBuf,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            ai: AiSettings::Unconfigured,
            speech: None,
            whisper_delay_ms: DEFAULT_WHISPER_DELAY_MS,
            echo_path: PathBuf::from(DEFAULT_ECHO_PATH),
        }
    }
}

impl PrismConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let number = |key: &str, default: u64| match non_blank(key) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("{} is not a number ({}), using {}", key, raw, default);
                default
            }),
            None => default,
        };
        let timeout = |key: &str| {
            let raw = number(key, DEFAULT_TIMEOUT_MS);
            let clamped = raw.clamp(*TIMEOUT_RANGE_MS.start(), *TIMEOUT_RANGE_MS.end());
            if clamped != raw {
                warn!("{} of {}ms is out of range, using {}ms", key, raw, clamped);
            }
            clamped
        };

        let ai = match non_blank("GOOGLE_GENERATIVE_AI_API_KEY") {
            Some(api_key) => AiSettings::Configured(ProviderSettings {
                api_key,
                model: non_blank("PRISM_AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.into()),
                base_url: non_blank("PRISM_AI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_AI_BASE_URL.into()),
                timeout_ms: timeout("PRISM_AI_TIMEOUT_MS"),
            }),
            None => AiSettings::Unconfigured,
        };

        let speech = non_blank("ELEVENLABS_API_KEY").map(|api_key| SpeechSettings {
            api_key,
            base_url: non_blank("PRISM_SPEECH_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SPEECH_BASE_URL.into()),
            timeout_ms: timeout("PRISM_SPEECH_TIMEOUT_MS"),
        });

        let config = Self {
            ai,
            speech,
            whisper_delay_ms: number("PRISM_WHISPER_DELAY_MS", DEFAULT_WHISPER_DELAY_MS),
            echo_path: non_blank("PRISM_ECHO_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ECHO_PATH)),
        };

        info!(
            "Prism configured (ai={}, speech={})",
            config.ai.is_configured(),
            config.speech.is_some()
        );

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_is_unconfigured() {
        let config = PrismConfig::from_lookup(lookup(&[]));
        assert_eq!(config, PrismConfig::default());
    }

    #[test]
    fn test_blank_key_is_absent() {
        let config = PrismConfig::from_lookup(lookup(&[("GOOGLE_GENERATIVE_AI_API_KEY", "  ")]));
        assert!(!config.ai.is_configured());
    }

    #[test]
    fn test_configured_with_defaults() {
        let config = PrismConfig::from_lookup(lookup(&[("GOOGLE_GENERATIVE_AI_API_KEY", "k")]));
        match config.ai {
            AiSettings::Configured(settings) => {
                assert_eq!(settings.model, DEFAULT_AI_MODEL);
                assert_eq!(settings.timeout_ms, DEFAULT_TIMEOUT_MS);
            }
            AiSettings::Unconfigured => panic!("expected configured AI"),
        }
    }

    #[test]
    fn test_bad_number_falls_back() {
        let config = PrismConfig::from_lookup(lookup(&[
            ("ELEVENLABS_API_KEY", "s"),
            ("PRISM_SPEECH_TIMEOUT_MS", "soon"),
            ("PRISM_WHISPER_DELAY_MS", "0"),
        ]));
        assert_eq!(config.speech.unwrap().timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.whisper_delay_ms, 0);

        let config = PrismConfig::from_lookup(lookup(&[
            ("GOOGLE_GENERATIVE_AI_API_KEY", "k"),
            ("PRISM_AI_TIMEOUT_MS", "0"),
            ("ELEVENLABS_API_KEY", "s"),
            ("PRISM_SPEECH_TIMEOUT_MS", "86400000"),
        ]));
        match config.ai {
            AiSettings::Configured(settings) => assert_eq!(settings.timeout_ms, 1),
            AiSettings::Unconfigured => panic!("expected configured AI"),
        }
        assert_eq!(config.speech.unwrap().timeout_ms, 30_000);
    }
}
