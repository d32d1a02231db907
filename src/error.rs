//! Error handling for Prism
//!
//! Classifier errors never reach callers of `ModeClassifier::classify`; they
//! are logged and mapped to the keyword tier. Speech errors are folded into
//! typed result records at the service boundary.

use thiserror::Error;

/// Result type alias for Prism operations
pub type Result<T> = std::result::Result<T, PrismError>;

/// Main error type for Prism operations
#[derive(Error, Debug)]
pub enum PrismError {
    // Provider Errors
    #[error("Missing credential: {name}")]
    MissingCredential { name: String },

    #[error("Network failure: {reason}")]
    NetworkFailure { reason: String },

    #[error("Provider timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Provider response violated schema: {reason}")]
    SchemaViolation { reason: String },

    // Speech Errors
    #[error("Speech quota exceeded: {reason}")]
    QuotaExceeded { reason: String },

    #[error("Invalid voice: {voice_id}")]
    InvalidVoice { voice_id: String },

    #[error("Speech generation failed: {reason}")]
    SpeechFailed { reason: String },

    // Guestbook Errors
    #[error("Invalid echo entry: {reason}")]
    InvalidEntry { reason: String },

    // Configuration Errors
    #[error("Invalid configuration for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },

    // Rendering Errors
    #[error("Ambient render failed: {reason}")]
    RenderError { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PrismError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            PrismError::MissingCredential { .. } => "MISSING_CREDENTIAL",
            PrismError::NetworkFailure { .. } => "NETWORK_FAILURE",
            PrismError::Timeout { .. } => "TIMEOUT",
            PrismError::SchemaViolation { .. } => "SCHEMA_VIOLATION",
            PrismError::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            PrismError::InvalidVoice { .. } => "INVALID_VOICE",
            PrismError::SpeechFailed { .. } => "SPEECH_FAILED",
            PrismError::InvalidEntry { .. } => "INVALID_ENTRY",
            PrismError::InvalidConfig { .. } => "INVALID_CONFIG",
            PrismError::RenderError { .. } => "RENDER_ERROR",
            PrismError::Io(_) => "IO_ERROR",
            PrismError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether this error came from a remote provider and can be answered
    /// by a local fallback
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            PrismError::MissingCredential { .. }
                | PrismError::NetworkFailure { .. }
                | PrismError::Timeout { .. }
                | PrismError::SchemaViolation { .. }
        )
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            PrismError::NetworkFailure { .. } => true,
            PrismError::Timeout { .. } => true,
            PrismError::SchemaViolation { .. } => true,
            PrismError::QuotaExceeded { .. } => true,
            PrismError::InvalidVoice { .. } => true,
            PrismError::InvalidEntry { .. } => true,
            _ => false,
        }
    }

    /// Get a user-friendly message for this error
    pub fn friendly_message(&self) -> String {
        match self {
            PrismError::QuotaExceeded { .. } => {
                "The voice is resting for now. The text is still here to read.".to_string()
            }
            PrismError::InvalidVoice { voice_id } => {
                format!("The voice '{}' isn't available. Try another one.", voice_id)
            }
            PrismError::SpeechFailed { .. } => {
                "Audio couldn't be generated this time. The text is still here to read."
                    .to_string()
            }
            PrismError::InvalidEntry { reason } => {
                format!("That echo couldn't be posted: {}", reason)
            }
            PrismError::MissingCredential { .. }
            | PrismError::NetworkFailure { .. }
            | PrismError::Timeout { .. }
            | PrismError::SchemaViolation { .. } => {
                "The prism is working offline right now.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PrismError::Timeout { timeout_ms: 10_000 };
        assert_eq!(err.error_code(), "TIMEOUT");
        assert_eq!(err.to_string(), "Provider timed out after 10000ms");
    }

    #[test]
    fn test_provider_failures() {
        assert!(PrismError::MissingCredential {
            name: "KEY".to_string()
        }
        .is_provider_failure());
        assert!(!PrismError::InvalidEntry {
            reason: "empty".to_string()
        }
        .is_provider_failure());
    }

    #[test]
    fn test_friendly_message_for_voice() {
        let err = PrismError::InvalidVoice {
            voice_id: "nobody".to_string(),
        };
        assert!(err.friendly_message().contains("nobody"));
        assert!(err.is_recoverable());
    }
}
