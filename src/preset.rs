//! Mode presets: fixed audio parameters and theme per mode
//!
//! Pure lookups; nothing here is computed at runtime.

use serde::{Deserialize, Serialize};

use crate::error::{PrismError, Result};
use crate::mode::Mode;

/// Valid reverb range
pub const REVERB_RANGE: (f32, f32) = (0.0, 1.0);

/// Valid filter cutoff range in Hz
pub const FILTER_RANGE: (f32, f32) = (200.0, 2000.0);

/// Audio parameters handed to the ambient synth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioParams {
    /// Reverb amount: 0 (dry) to 1 (washed out)
    pub reverb: f32,
    /// Low-pass filter cutoff in Hz: 200 to 2000
    pub filter: f32,
}

impl AudioParams {
    pub const fn new(reverb: f32, filter: f32) -> Self {
        Self { reverb, filter }
    }

    /// Validate both parameters are within range
    pub fn validate(&self) -> Result<()> {
        if !(REVERB_RANGE.0..=REVERB_RANGE.1).contains(&self.reverb) {
            return Err(PrismError::SchemaViolation {
                reason: format!("reverb {} outside 0.0 to 1.0", self.reverb),
            });
        }
        if !(FILTER_RANGE.0..=FILTER_RANGE.1).contains(&self.filter) {
            return Err(PrismError::SchemaViolation {
                reason: format!("filter {} outside 200 to 2000", self.filter),
            });
        }
        Ok(())
    }
}

/// Visual and UI-sound identity of a mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescriptor {
    pub name: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
    pub accent: &'static str,
    pub heading_font: &'static str,
    pub body_font: &'static str,
    pub ui_sound: &'static str,
}

/// Fixed preset for one mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeAudioPreset {
    pub mode: Mode,
    pub audio: AudioParams,
    pub theme: ThemeDescriptor,
}

static ARCHITECT: ModeAudioPreset = ModeAudioPreset {
    mode: Mode::Architect,
    audio: AudioParams::new(0.1, 1800.0),
    theme: ThemeDescriptor {
        name: "Architect",
        background: "#0B1221",
        foreground: "#E6EDF7",
        accent: "#3B82F6",
        heading_font: "Inter",
        body_font: "Inter",
        ui_sound: "click-soft",
    },
};

static AUTHOR: ModeAudioPreset = ModeAudioPreset {
    mode: Mode::Author,
    audio: AudioParams::new(0.8, 1000.0),
    theme: ThemeDescriptor {
        name: "Author",
        background: "#F5F0E6",
        foreground: "#2B2118",
        accent: "#9C4A1A",
        heading_font: "Playfair Display",
        body_font: "Lora",
        ui_sound: "page-turn",
    },
};

static LAB: ModeAudioPreset = ModeAudioPreset {
    mode: Mode::Lab,
    audio: AudioParams::new(0.3, 400.0),
    theme: ThemeDescriptor {
        name: "Lab",
        background: "#050505",
        foreground: "#33FF66",
        accent: "#00E5FF",
        heading_font: "JetBrains Mono",
        body_font: "JetBrains Mono",
        ui_sound: "terminal-blip",
    },
};

/// Preset for a mode
pub fn preset_for(mode: Mode) -> &'static ModeAudioPreset {
    match mode {
        Mode::Architect => &ARCHITECT,
        Mode::Author => &AUTHOR,
        Mode::Lab => &LAB,
    }
}

/// Audio parameters for a mode
pub fn audio_params_for(mode: Mode) -> AudioParams {
    preset_for(mode).audio
}
