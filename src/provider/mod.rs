//! Outbound generative providers
//!
//! This module provides:
//! - `ClassificationProvider` and `TextProvider` traits
//! - The Gemini HTTP implementation
//! - Scripted mock implementations for testing

mod gemini;
mod mock;
mod model;

pub use gemini::GeminiProvider;
pub use mock::*;
pub use model::{
    ClassificationProvider, ClassificationRequest, ProviderClassification, TextProvider,
    TextRequest,
};
