//! Ambient pad renderer
//!
//! Renders a short drone from a mode preset: a root/fifth/octave pad through
//! a one-pole low-pass at the preset cutoff, then a small comb/allpass reverb
//! mixed at the preset reverb amount.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f32::consts::PI;
use std::path::Path;
use tracing::debug;

use crate::error::{PrismError, Result};
use crate::mode::Mode;
use crate::preset::{audio_params_for, AudioParams};

/// Output sample rate
pub const SAMPLE_RATE: u32 = 48_000;

/// Longest render allowed
pub const MAX_RENDER_SECS: f32 = 60.0;

/// Peak level after normalization
const TARGET_PEAK: f32 = 0.9;

/// Comb delays at 44.1 kHz, taken from the Freeverb set
const COMB_DELAYS: [usize; 4] = [1116, 1277, 1422, 1557];
const ALLPASS_DELAYS: [usize; 2] = [556, 341];
const COMB_FEEDBACK: f32 = 0.84;
const COMB_DAMPING: f32 = 0.2;
const ALLPASS_GAIN: f32 = 0.5;

/// Partials of the pad as `(frequency ratio, amplitude)`
const PARTIALS: [(f32, f32); 3] = [(1.0, 0.5), (1.5, 0.3), (2.0, 0.2)];

/// Pad root frequency per mode
pub fn root_frequency(mode: Mode) -> f32 {
    match mode {
        Mode::Architect => 110.0,
        Mode::Author => 130.81,
        Mode::Lab => 73.42,
    }
}

struct OnePoleLowPass {
    coefficient: f32,
    state: f32,
}

impl OnePoleLowPass {
    fn new(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self {
            coefficient: 1.0 - (-2.0 * PI * cutoff_hz / sample_rate).exp(),
            state: 0.0,
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        self.state += self.coefficient * (input - self.state);
        self.state
    }
}

struct Comb {
    buffer: Vec<f32>,
    index: usize,
    filter_store: f32,
}

impl Comb {
    fn new(size: usize) -> Self {
        Self {
            buffer: vec![0.0; size.max(1)],
            index: 0,
            filter_store: 0.0,
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        let output = self.buffer[self.index];
        self.filter_store = output * (1.0 - COMB_DAMPING) + self.filter_store * COMB_DAMPING;
        self.buffer[self.index] = input + self.filter_store * COMB_FEEDBACK;
        self.index = (self.index + 1) % self.buffer.len();
        output
    }
}

struct Allpass {
    buffer: Vec<f32>,
    index: usize,
}

impl Allpass {
    fn new(size: usize) -> Self {
        Self {
            buffer: vec![0.0; size.max(1)],
            index: 0,
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        let buffered = self.buffer[self.index];
        let output = buffered - input;
        self.buffer[self.index] = input + buffered * ALLPASS_GAIN;
        self.index = (self.index + 1) % self.buffer.len();
        output
    }
}

struct PadReverb {
    combs: Vec<Comb>,
    allpasses: Vec<Allpass>,
}

impl PadReverb {
    fn new(sample_rate: f32) -> Self {
        let scale = |delay: usize| (delay as f32 * sample_rate / 44_100.0) as usize;
        Self {
            combs: COMB_DELAYS.iter().map(|&d| Comb::new(scale(d))).collect(),
            allpasses: ALLPASS_DELAYS.iter().map(|&d| Allpass::new(scale(d))).collect(),
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        let mut out: f32 = self.combs.iter_mut().map(|c| c.process(input)).sum();
        out /= self.combs.len() as f32;
        for allpass in &mut self.allpasses {
            out = allpass.process(out);
        }
        out
    }
}

/// Renderer for preset drones
#[derive(Debug, Clone, Copy)]
pub struct AmbientRenderer {
    sample_rate: u32,
}

impl AmbientRenderer {
    pub fn new() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Render the preset drone for a mode
    pub fn render(&self, mode: Mode, seconds: f32) -> Result<Vec<f32>> {
        self.render_params(root_frequency(mode), audio_params_for(mode), seconds)
    }

    /// Render a drone at `root_hz` shaped by `params`
    pub fn render_params(&self, root_hz: f32, params: AudioParams, seconds: f32) -> Result<Vec<f32>> {
        if !(seconds > 0.0 && seconds <= MAX_RENDER_SECS) {
            return Err(PrismError::RenderError {
                reason: format!("duration {}s outside (0, {}]", seconds, MAX_RENDER_SECS),
            });
        }
        params.validate().map_err(|e| PrismError::RenderError {
            reason: e.to_string(),
        })?;

        let sr = self.sample_rate as f32;
        let num_samples = ((seconds * sr).round() as usize).max(1);
        let fade = ((0.5 * sr) as usize).min(num_samples / 4).max(1);

        let mut lowpass = OnePoleLowPass::new(params.filter, sr);
        let mut reverb = PadReverb::new(sr);
        let wet = params.reverb;

        let mut samples: Vec<f32> = (0..num_samples)
            .map(|i| {
                let t = i as f32 / sr;
                let swell = 0.8 + 0.2 * (2.0 * PI * 0.1 * t).sin();
                let pad: f32 = PARTIALS
                    .iter()
                    .map(|(ratio, amp)| amp * (2.0 * PI * root_hz * ratio * t).sin())
                    .sum();

                let envelope = if i < fade {
                    i as f32 / fade as f32
                } else if i >= num_samples - fade {
                    (num_samples - i) as f32 / fade as f32
                } else {
                    1.0
                };

                let dry = lowpass.process(pad * swell * envelope);
                dry * (1.0 - wet) + reverb.process(dry) * wet
            })
            .collect();

        let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        if peak > 0.0 {
            let gain = TARGET_PEAK / peak;
            samples.iter_mut().for_each(|s| *s *= gain);
        }

        debug!(
            "Rendered {} samples (root {:.1} Hz, filter {:.0} Hz, reverb {:.2})",
            samples.len(),
            root_hz,
            params.filter,
            params.reverb
        );

        Ok(samples)
    }

    /// Write mono samples as 16-bit PCM WAV
    pub fn write_wav(&self, path: &Path, samples: &[f32]) -> Result<()> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let wav_error = |e: hound::Error| PrismError::RenderError {
            reason: format!("Failed to write {}: {}", path.display(), e),
        };

        let mut writer = WavWriter::create(path, spec).map_err(wav_error)?;
        for &sample in samples {
            let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(scaled).map_err(wav_error)?;
        }
        writer.finalize().map_err(wav_error)?;
        Ok(())
    }
}

impl Default for AmbientRenderer {
    fn default() -> Self {
        Self::new()
    }
}
