//! Whispers - short AI-generated lines floating over the current view
//!
//! A configured `TextProvider` writes the line; without one, or when it
//! fails, a fixed per-mode line pool answers instead. Generation never fails.

use chrono::{DateTime, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{AiSettings, PrismConfig, DEFAULT_TIMEOUT_MS};
use crate::error::PrismError;
use crate::mode::{Mode, ViewState};
use crate::provider::{GeminiProvider, TextProvider, TextRequest};
use crate::sanitize::{sanitize_input, MAX_AMBIENT_LEN};

/// Longest whisper kept from a provider
pub const MAX_WHISPER_LEN: usize = 120;

const WHISPER_TEMPERATURE: f32 = 0.9;
const WHISPER_MAX_TOKENS: u32 = 40;

/// Part of the day, used to color whispers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn at<Tz: TimeZone>(time: &DateTime<Tz>) -> Self {
        Self::from_hour(time.hour())
    }

    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

/// Context bundle for whisper generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhisperContext {
    pub mode: ViewState,
    pub time_of_day: TimeOfDay,
    pub mood: Option<String>,
}

impl WhisperContext {
    pub fn new(mode: ViewState, time_of_day: TimeOfDay) -> Self {
        Self {
            mode,
            time_of_day,
            mood: None,
        }
    }

    pub fn with_mood(mut self, mood: &str) -> Self {
        self.mood = Some(mood.to_string());
        self
    }

    fn sanitized_mood(&self) -> Option<String> {
        self.mood
            .as_deref()
            .map(|m| sanitize_input(m, MAX_AMBIENT_LEN))
            .filter(|m| !m.is_empty())
    }
}

/// Where a whisper came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhisperSource {
    Ai,
    Fallback,
}

/// One generated line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whisper {
    pub text: String,
    pub mode: Mode,
    pub source: WhisperSource,
}

fn tone(mode: Mode) -> &'static str {
    match mode {
        Mode::Architect => "confident, structured, forward-looking",
        Mode::Author => "lyrical, reflective, literary",
        Mode::Lab => "curious, terse, a little nerdy",
    }
}

fn fallback_pool(mode: Mode, time: TimeOfDay) -> &'static [&'static str] {
    match (mode, time) {
        (Mode::Architect, TimeOfDay::Morning) => &[
            "Every system starts as a sketch on a quiet morning.",
            "Plans are drafts. Shipping is the edit.",
        ],
        (Mode::Architect, TimeOfDay::Afternoon) => &[
            "Clarity scales better than effort.",
            "Good structure makes hard things feel obvious.",
        ],
        (Mode::Architect, TimeOfDay::Evening) => &[
            "The best decisions survive the end of the day.",
            "Review the blueprint before the light fades.",
        ],
        (Mode::Architect, TimeOfDay::Night) => &[
            "Strategy is what you still believe at midnight.",
            "Quiet hours, load-bearing ideas.",
        ],
        (Mode::Author, TimeOfDay::Morning) => &[
            "The page is still warm from last night's sentences.",
            "Morning light, first drafts, honest words.",
        ],
        (Mode::Author, TimeOfDay::Afternoon) => &[
            "Somewhere a paragraph is waiting to be cut.",
            "Stories drift in like slow afternoon weather.",
        ],
        (Mode::Author, TimeOfDay::Evening) => &[
            "Dusk reads every line twice.",
            "The ending always knows more than the beginning.",
        ],
        (Mode::Author, TimeOfDay::Night) => &[
            "Ink keeps its own hours.",
            "Night is a margin full of notes.",
        ],
        (Mode::Lab, TimeOfDay::Morning) => &[
            "Fresh coffee, fresh build, fresh bugs.",
            "git pull --rebase && hope",
        ],
        (Mode::Lab, TimeOfDay::Afternoon) => &[
            "The experiment failed successfully.",
            "Measure twice, benchmark once.",
        ],
        (Mode::Lab, TimeOfDay::Evening) => &[
            "Tests green. Sky orange.",
            "One more prototype before dinner.",
        ],
        (Mode::Lab, TimeOfDay::Night) => &[
            "Compiling dreams at 2am.",
            "The logs are quieter after dark.",
        ],
    }
}

/// Fallback line for a context; deterministic in `(context, index)`
pub fn fallback_whisper(context: &WhisperContext, index: usize) -> Whisper {
    let mode = context.mode.narrow();
    let pool = fallback_pool(mode, context.time_of_day);
    let selector = context
        .sanitized_mood()
        .map(|m| m.chars().count())
        .unwrap_or(0);

    Whisper {
        text: pool[(selector + index) % pool.len()].to_string(),
        mode,
        source: WhisperSource::Fallback,
    }
}

/// Clean provider output into a single line
fn clean_line(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let unquoted = line.trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”' | '`'));
    let clean = sanitize_input(unquoted, MAX_WHISPER_LEN);
    (!clean.is_empty()).then_some(clean)
}

/// Generator for whispers
pub struct WhisperGenerator {
    provider: Option<Arc<dyn TextProvider>>,
    timeout: Duration,
    delay: Duration,
}

impl WhisperGenerator {
    pub fn new(provider: Option<Arc<dyn TextProvider>>, timeout: Duration, delay: Duration) -> Self {
        Self {
            provider,
            timeout,
            delay,
        }
    }

    /// Fallback lines only
    pub fn offline() -> Self {
        Self::new(
            None,
            Duration::from_millis(DEFAULT_TIMEOUT_MS),
            Duration::ZERO,
        )
    }

    pub fn from_config(config: &PrismConfig) -> Self {
        let delay = Duration::from_millis(config.whisper_delay_ms);
        match &config.ai {
            AiSettings::Unconfigured => Self {
                delay,
                ..Self::offline()
            },
            AiSettings::Configured(settings) => match GeminiProvider::new(settings.clone()) {
                Ok(provider) => Self::new(Some(Arc::new(provider)), settings.timeout(), delay),
                Err(e) => {
                    warn!("Whisper provider disabled ({}): {}", e.error_code(), e);
                    Self {
                        delay,
                        ..Self::offline()
                    }
                }
            },
        }
    }

    fn request(context: &WhisperContext) -> TextRequest {
        let mode = context.mode.narrow();
        let mood = context
            .sanitized_mood()
            .unwrap_or_else(|| "unspecified".to_string());

        TextRequest {
            prompt: format!(
                "Write one short, evocative line (at most 12 words) that floats in the \
                 background of the {} view of a personal portfolio. Time of day: {}. \
                 Visitor mood: {}. Tone: {}. Return only the line, without quotes.",
                mode,
                context.time_of_day.as_str(),
                mood,
                tone(mode)
            ),
            temperature: WHISPER_TEMPERATURE,
            max_output_tokens: WHISPER_MAX_TOKENS,
        }
    }

    async fn generate_indexed(&self, context: &WhisperContext, index: usize) -> Whisper {
        let Some(provider) = &self.provider else {
            return fallback_whisper(context, index);
        };

        let request = Self::request(context);
        let outcome = match tokio::time::timeout(self.timeout, provider.generate_text(&request)).await
        {
            Ok(result) => result,
            Err(_) => Err(PrismError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        };

        match outcome.map(|raw| clean_line(&raw)) {
            Ok(Some(text)) => {
                debug!("{} whispered: {}", provider.name(), text);
                Whisper {
                    text,
                    mode: context.mode.narrow(),
                    source: WhisperSource::Ai,
                }
            }
            Ok(None) => {
                warn!("{} returned an empty whisper; using fallback", provider.name());
                fallback_whisper(context, index)
            }
            Err(e) => {
                warn!(
                    "Whisper generation via {} failed ({}): {}; using fallback",
                    provider.name(),
                    e.error_code(),
                    e
                );
                fallback_whisper(context, index)
            }
        }
    }

    /// Generate one whisper
    pub async fn generate(&self, context: &WhisperContext) -> Whisper {
        self.generate_indexed(context, 0).await
    }

    /// Generate `count` whispers, pacing provider requests
    pub async fn generate_batch(&self, context: &WhisperContext, count: usize) -> Vec<Whisper> {
        let mut whispers = Vec::with_capacity(count);
        for index in 0..count {
            if index > 0 && self.provider.is_some() && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            whispers.push(self.generate_indexed(context, index).await);
        }
        whispers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(4), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Night);
    }

    #[test]
    fn test_time_of_day_from_datetime() {
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 13, 30, 0).unwrap();
        assert_eq!(TimeOfDay::at(&time), TimeOfDay::Afternoon);
    }

    #[test]
    fn test_fallback_is_deterministic_and_narrowed() {
        let ctx = WhisperContext::new(ViewState::Landing, TimeOfDay::Night).with_mood("calm");
        let a = fallback_whisper(&ctx, 0);
        let b = fallback_whisper(&ctx, 0);
        assert_eq!(a, b);
        assert_eq!(a.mode, Mode::Author);
        assert_ne!(fallback_whisper(&ctx, 1).text, a.text);
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(
            clean_line("\n  \"Code hums <softly>.\"\nsecond line").as_deref(),
            Some("Code hums softly.")
        );
        assert_eq!(clean_line("  \n \"\" "), None);
    }

    #[test]
    fn test_request_sanitizes_mood() {
        let ctx = WhisperContext::new(ViewState::Lab, TimeOfDay::Morning)
            .with_mood(&format!("{{sleepy}}\n{}", "z".repeat(400)));
        let request = WhisperGenerator::request(&ctx);
        assert!(request.prompt.contains("Visitor mood: sleepy "));
        assert!(!request.prompt.contains('{'));
        assert!(!request.prompt.contains(&"z".repeat(200)));
    }
}
