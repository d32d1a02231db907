//! Gemini generateContent client
//!
//! Implements both provider traits against the Google generative language
//! API. Structured classification uses `responseSchema` so the reply is JSON.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::model::{
    ClassificationProvider, ClassificationRequest, ProviderClassification, TextProvider,
    TextRequest,
};
use crate::config::ProviderSettings;
use crate::error::{PrismError, Result};

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiTextPart {
    text: String,
}

#[derive(Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider
// ============================================================================

/// Gemini-backed classification and text provider
pub struct GeminiProvider {
    client: Client,
    settings: ProviderSettings,
}

impl GeminiProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(PrismError::MissingCredential {
                name: "GOOGLE_GENERATIVE_AI_API_KEY".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| PrismError::NetworkFailure {
                reason: e.to_string(),
            })?;

        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    async fn generate(&self, request: &GeminiRequest) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PrismError::Timeout {
                        timeout_ms: self.settings.timeout_ms,
                    }
                } else {
                    PrismError::NetworkFailure {
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PrismError::NetworkFailure {
                reason: format!("Gemini returned {}: {}", status, body),
            });
        }

        let parsed: GeminiResponse =
            response
                .json()
                .await
                .map_err(|e| PrismError::SchemaViolation {
                    reason: format!("Invalid response from Gemini: {}", e),
                })?;

        if let Some(error) = parsed.error {
            return Err(PrismError::NetworkFailure {
                reason: error.message,
            });
        }

        let text: String = parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(PrismError::SchemaViolation {
                reason: "Gemini returned no text".to_string(),
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl ClassificationProvider for GeminiProvider {
    fn name(&self) -> &str {
        &self.settings.model
    }

    async fn classify(&self, request: &ClassificationRequest) -> Result<ProviderClassification> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiTextPart {
                    text: request.user_prompt.clone(),
                }],
            }],
            system_instruction: Some(GeminiContent {
                role: None,
                parts: vec![GeminiTextPart {
                    text: request.system_prompt.clone(),
                }],
            }),
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: None,
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(request.schema.clone()),
            },
        };

        let text = self.generate(&body).await?;
        ProviderClassification::parse(&text)
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn name(&self) -> &str {
        &self.settings.model
    }

    async fn generate_text(&self, request: &TextRequest) -> Result<String> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiTextPart {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: None,
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: Some(request.max_output_tokens),
                response_mime_type: None,
                response_schema: None,
            },
        };

        self.generate(&body).await
    }
}
