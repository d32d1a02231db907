//! Prism - intent routing and ambient services for The Prism portfolio
//!
//! One identity, refracted into three presentation modes:
//! - Architect: business audience
//! - Author: editorial audience
//! - Lab: technical audience
//!
//! # Architecture
//!
//! Free text from the landing screen flows through three stages:
//! - Normalizer: sanitizes and tokenizes input (`sanitize`)
//! - Classifier: tiered keyword / AI / keyword-fallback decision (`classifier`)
//! - Preset lookup: fixed audio parameters and theme per mode (`preset`)
//!
//! Around that core sit the ambient services: whispers, text-to-speech,
//! the Echo Chamber guestbook and a preset drone renderer.

pub mod ambient;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod echo;
pub mod error;
pub mod keywords;
pub mod mode;
pub mod preset;
pub mod provider;
pub mod sanitize;
pub mod speech;
pub mod whispers;

pub use classifier::{ClassificationResult, ModeClassifier};
pub use config::PrismConfig;
pub use error::{PrismError, Result};
pub use mode::{Mode, ViewState};
pub use preset::{preset_for, AudioParams, ModeAudioPreset};
pub use sanitize::sanitize_input;
