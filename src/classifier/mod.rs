//! Intent classification
//!
//! This module provides:
//! - The tiered `ModeClassifier`
//! - Pluggable classification strategies and their chain
//! - The classification prompt and output schema

mod mode_classifier;
mod prompt;
mod result;
mod strategy;

pub use mode_classifier::{AiTier, ModeClassifier};
pub use prompt::{classification_schema, system_prompt, user_prompt, CLASSIFICATION_TEMPERATURE};
pub use result::{ClassificationResult, ClassificationSource, KEYWORD_CONFIDENCE};
pub use strategy::{
    AiStrategy, ClassificationStrategy, EmptyInputStrategy, KeywordFallbackStrategy,
    SingleWordStrategy, StrategyChain,
};
