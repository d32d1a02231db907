//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::ambient::AmbientRenderer;
use crate::classifier::ModeClassifier;
use crate::config::PrismConfig;
use crate::echo::EchoChamber;
use crate::error::{PrismError, Result};
use crate::mode::{Mode, ViewState};
use crate::preset::preset_for;
use crate::speech::SpeechService;
use crate::whispers::{TimeOfDay, WhisperContext, WhisperGenerator};

fn parse_mode(raw: &str) -> Result<Mode> {
    Mode::from_str(raw).ok_or_else(|| PrismError::InvalidConfig {
        key: "mode".to_string(),
        reason: format!("'{}' is not one of architect, author, lab", raw),
    })
}

fn parse_view_state(raw: &str) -> Result<ViewState> {
    ViewState::from_str(raw).ok_or_else(|| PrismError::InvalidConfig {
        key: "mode".to_string(),
        reason: format!("'{}' is not one of landing, architect, author, lab", raw),
    })
}

/// Classify free text and print the result.
pub async fn classify(config: &PrismConfig, text: &str, json: bool) -> Result<()> {
    info!("Classifying: {}", text);

    let classifier = ModeClassifier::from_config(config);
    let (result, preset) = classifier.classify_with_preset(text).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("=== The Prism ===");
    println!("Input: \"{}\"", text);
    println!(
        "AI tier: {}",
        if classifier.ai_available() {
            "available"
        } else {
            "unavailable"
        }
    );
    println!();
    println!("Mode: {}", result.mode);
    println!("  Source: {:?}", result.source);
    if let Some(confidence) = result.confidence {
        println!("  Confidence: {:.0}%", confidence * 100.0);
    }
    if let Some(reasoning) = &result.reasoning {
        println!("  Reasoning: {}", reasoning);
    }
    println!(
        "  Audio: reverb {:.2}, filter {:.0} Hz",
        result.audio_params.reverb, result.audio_params.filter
    );
    println!(
        "  Theme: {} ({} on {}, {})",
        preset.theme.name, preset.theme.foreground, preset.theme.background, preset.theme.ui_sound
    );

    Ok(())
}

/// Print the fixed preset for a mode.
pub fn show_preset(mode: &str) -> Result<()> {
    let preset = preset_for(parse_mode(mode)?);
    println!("{}", serde_json::to_string_pretty(preset)?);
    Ok(())
}

/// Generate and print whispers.
pub async fn whisper(
    config: &PrismConfig,
    mode: &str,
    mood: Option<&str>,
    count: usize,
) -> Result<()> {
    let mut context = WhisperContext::new(parse_view_state(mode)?, TimeOfDay::now());
    if let Some(mood) = mood {
        context = context.with_mood(mood);
    }
    info!(
        "Generating {} whisper(s) for {:?} at {}",
        count,
        context.mode,
        context.time_of_day.as_str()
    );

    let generator = WhisperGenerator::from_config(config);
    for whisper in generator.generate_batch(&context, count).await {
        println!("[{:?}] {}", whisper.source, whisper.text);
    }

    Ok(())
}

/// Synthesize speech to a file.
pub async fn speak(config: &PrismConfig, text: &str, voice: &str, out: &Path) -> Result<()> {
    info!("Speaking {} chars with voice {}", text.chars().count(), voice);

    let service = SpeechService::from_config(config);
    let result = service.synthesize(text, voice).await;

    match result.audio {
        Some(audio) if result.success => {
            fs::write(out, &audio)?;
            println!("Wrote {} bytes to {}", audio.len(), out.display());
        }
        _ => {
            let reason = result.error.unwrap_or_else(|| "unknown error".to_string());
            warn!("Speech unavailable: {}", reason);
            println!("Speech unavailable: {}", reason);
        }
    }

    Ok(())
}

/// List speech voices.
pub async fn voices(config: &PrismConfig) -> Result<()> {
    let service = SpeechService::from_config(config);
    let result = service.list_voices().await;

    if !result.success {
        println!(
            "Voices unavailable: {}",
            result.error.unwrap_or_else(|| "unknown error".to_string())
        );
        return Ok(());
    }

    for voice in &result.voices {
        println!(
            "{:<24} {} ({})",
            voice.voice_id,
            voice.name,
            voice.category.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

/// Post an entry to the Echo Chamber.
pub fn echo_post(config: &PrismConfig, name: &str, message: &str, mode: &str) -> Result<()> {
    let mode = parse_view_state(mode)?.narrow();
    let mut chamber = EchoChamber::open(&config.echo_path)?;

    match chamber.post(name, message, mode) {
        Ok(entry) => {
            println!("Echo posted: {} ({})", entry.id, entry.mode);
            Ok(())
        }
        Err(e) if e.is_recoverable() => {
            println!("{}", e.friendly_message());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// List recent Echo Chamber entries.
pub fn echo_list(config: &PrismConfig, limit: usize) -> Result<()> {
    let chamber = EchoChamber::open(&config.echo_path)?;
    let entries = chamber.recent(limit);

    if entries.is_empty() {
        println!("The Echo Chamber is quiet.");
        return Ok(());
    }

    println!("{:-<60}", "");
    for entry in entries {
        println!(
            "{} [{}] {}: {}",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.mode,
            entry.name,
            entry.message
        );
    }
    println!("{:-<60}", "");

    Ok(())
}

/// Render the preset drone for a mode to a WAV file.
pub fn render_ambient(mode: &str, out: &Path, seconds: f32) -> Result<()> {
    let mode = parse_mode(mode)?;
    info!("Rendering {}s {} drone to {}", seconds, mode, out.display());

    let renderer = AmbientRenderer::new();
    let samples = renderer.render(mode, seconds)?;
    renderer.write_wav(out, &samples)?;

    println!(
        "Rendered {} ({:.1}s, {} Hz) to {}",
        mode,
        seconds,
        renderer.sample_rate(),
        out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_mode_errors() {
        assert_eq!(parse_mode("LAB").unwrap(), Mode::Lab);
        assert_eq!(parse_mode("landing").unwrap_err().error_code(), "INVALID_CONFIG");
        assert_eq!(parse_view_state("landing").unwrap(), ViewState::Landing);
    }

    #[test]
    fn test_echo_round_trip_through_commands() {
        let dir = TempDir::new().unwrap();
        let config = PrismConfig {
            echo_path: dir.path().join("echo.json"),
            ..PrismConfig::default()
        };

        echo_post(&config, "Ada", "hello prism", "lab").unwrap();
        let chamber = EchoChamber::open(&config.echo_path).unwrap();
        assert_eq!(chamber.len(), 1);
        assert!(echo_list(&config, 5).is_ok());
    }
}
