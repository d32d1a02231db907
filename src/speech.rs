//! Text-to-speech boundary
//!
//! Failures are reported as typed result records (`success: false` plus a
//! message) rather than errors, so the UI can fall back to text-only.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{PrismConfig, SpeechSettings};
use crate::error::{PrismError, Result};
use crate::sanitize::{sanitize_input, MAX_ROUTING_LEN};

/// Longest text sent for synthesis
pub const MAX_SPEECH_LEN: usize = MAX_ROUTING_LEN;

/// Speech model requested from ElevenLabs
pub const SPEECH_MODEL_ID: &str = "eleven_multilingual_v2";

/// A voice offered by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Outcome of a synthesis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeechResult {
    pub success: bool,
    #[serde(skip)]
    pub audio: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SpeechResult {
    pub fn success(audio: Vec<u8>) -> Self {
        Self {
            success: true,
            audio: Some(audio),
            error: None,
        }
    }

    pub fn failure(error: &PrismError) -> Self {
        Self {
            success: false,
            audio: None,
            error: Some(error.to_string()),
        }
    }
}

/// Outcome of a voice listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceListResult {
    pub success: bool,
    pub voices: Vec<Voice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Speech synthesis service
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>>;

    async fn list_voices(&self) -> Result<Vec<Voice>>;
}

/// Map a non-success HTTP status to a speech error
pub fn error_for_status(status: StatusCode, voice_id: &str, body: &str) -> PrismError {
    match status.as_u16() {
        401 | 429 => PrismError::QuotaExceeded {
            reason: format!("{}: {}", status, body),
        },
        404 | 422 => PrismError::InvalidVoice {
            voice_id: voice_id.to_string(),
        },
        _ => PrismError::SpeechFailed {
            reason: format!("{}: {}", status, body),
        },
    }
}

fn request_error(e: reqwest::Error, timeout_ms: u64) -> PrismError {
    if e.is_timeout() {
        PrismError::Timeout { timeout_ms }
    } else {
        PrismError::SpeechFailed {
            reason: e.to_string(),
        }
    }
}

#[derive(Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[derive(Deserialize)]
struct VoicesResponse {
    voices: Vec<Voice>,
}

/// ElevenLabs HTTP implementation
pub struct ElevenLabsProvider {
    client: Client,
    settings: SpeechSettings,
}

impl ElevenLabsProvider {
    pub fn new(settings: SpeechSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(PrismError::MissingCredential {
                name: "ELEVENLABS_API_KEY".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| PrismError::SpeechFailed {
                reason: e.to_string(),
            })?;

        Ok(Self { client, settings })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsProvider {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(self.url(&format!("text-to-speech/{}", voice_id)))
            .header("xi-api-key", &self.settings.api_key)
            .header("Accept", "audio/mpeg")
            .json(&SynthesisRequest {
                text,
                model_id: SPEECH_MODEL_ID,
            })
            .send()
            .await
            .map_err(|e| request_error(e, self.settings.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, voice_id, &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| request_error(e, self.settings.timeout_ms))?;
        Ok(bytes.to_vec())
    }

    async fn list_voices(&self) -> Result<Vec<Voice>> {
        let response = self
            .client
            .get(self.url("voices"))
            .header("xi-api-key", &self.settings.api_key)
            .send()
            .await
            .map_err(|e| request_error(e, self.settings.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, "", &body));
        }

        let parsed: VoicesResponse =
            response
                .json()
                .await
                .map_err(|e| PrismError::SpeechFailed {
                    reason: format!("Invalid voice list: {}", e),
                })?;
        Ok(parsed.voices)
    }
}

/// Boundary wrapper that never returns `Err`
pub struct SpeechService {
    provider: Option<Arc<dyn SpeechProvider>>,
    timeout: Duration,
}

impl SpeechService {
    pub fn new(provider: Option<Arc<dyn SpeechProvider>>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn from_config(config: &PrismConfig) -> Self {
        let Some(settings) = &config.speech else {
            return Self::new(None, Duration::from_millis(crate::config::DEFAULT_TIMEOUT_MS));
        };

        let timeout = Duration::from_millis(settings.timeout_ms);
        match ElevenLabsProvider::new(settings.clone()) {
            Ok(provider) => Self::new(Some(Arc::new(provider)), timeout),
            Err(e) => {
                warn!("Speech disabled ({}): {}", e.error_code(), e);
                Self::new(None, timeout)
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    fn provider(&self) -> Result<&Arc<dyn SpeechProvider>> {
        self.provider
            .as_ref()
            .ok_or_else(|| PrismError::MissingCredential {
                name: "ELEVENLABS_API_KEY".to_string(),
            })
    }

    async fn try_synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>> {
        let text = sanitize_input(text, MAX_SPEECH_LEN);
        if text.is_empty() {
            return Err(PrismError::SpeechFailed {
                reason: "nothing to say".to_string(),
            });
        }
        let voice_id = voice_id.trim();
        if voice_id.is_empty() {
            return Err(PrismError::InvalidVoice {
                voice_id: voice_id.to_string(),
            });
        }

        let provider = self.provider()?;
        debug!("Synthesizing {} chars with voice {}", text.chars().count(), voice_id);

        match tokio::time::timeout(self.timeout, provider.synthesize(&text, voice_id)).await {
            Ok(result) => result,
            Err(_) => Err(PrismError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }

    /// Synthesize speech for text (sanitized to 500 chars)
    pub async fn synthesize(&self, text: &str, voice_id: &str) -> SpeechResult {
        match self.try_synthesize(text, voice_id).await {
            Ok(audio) => SpeechResult::success(audio),
            Err(e) => {
                warn!("Speech synthesis failed ({}): {}", e.error_code(), e);
                SpeechResult::failure(&e)
            }
        }
    }

    /// List available voices
    pub async fn list_voices(&self) -> VoiceListResult {
        let outcome = match self.provider() {
            Ok(provider) => {
                match tokio::time::timeout(self.timeout, provider.list_voices()).await {
                    Ok(result) => result,
                    Err(_) => Err(PrismError::Timeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    }),
                }
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(voices) => VoiceListResult {
                success: true,
                voices,
                error: None,
            },
            Err(e) => {
                warn!("Voice listing failed ({}): {}", e.error_code(), e);
                VoiceListResult {
                    success: false,
                    voices: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
