//! Scripted providers for testing
//!
//! These never touch the network. Each one counts its calls so tests can
//! assert that a tier did or did not reach the provider.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::model::{
    ClassificationProvider, ClassificationRequest, ProviderClassification, TextProvider,
    TextRequest,
};
use crate::error::{PrismError, Result};

/// What a mock provider does when called
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return this value
    Respond(T),
    /// Fail with a network error
    FailNetwork,
    /// Fail with a schema violation
    FailSchema,
    /// Sleep, then respond; used to trip caller timeouts
    Hang(Duration, T),
}

impl<T: Clone> MockBehavior<T> {
    async fn run(&self) -> Result<T> {
        match self {
            MockBehavior::Respond(value) => Ok(value.clone()),
            MockBehavior::FailNetwork => Err(PrismError::NetworkFailure {
                reason: "mock network failure".to_string(),
            }),
            MockBehavior::FailSchema => Err(PrismError::SchemaViolation {
                reason: "mock malformed response".to_string(),
            }),
            MockBehavior::Hang(delay, value) => {
                tokio::time::sleep(*delay).await;
                Ok(value.clone())
            }
        }
    }
}

/// Mock structured classifier
pub struct MockClassificationProvider {
    behavior: MockBehavior<ProviderClassification>,
    calls: AtomicUsize,
}

impl MockClassificationProvider {
    pub fn new(behavior: MockBehavior<ProviderClassification>) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassificationProvider for MockClassificationProvider {
    fn name(&self) -> &str {
        "mock-classifier"
    }

    async fn classify(&self, _request: &ClassificationRequest) -> Result<ProviderClassification> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.behavior.run().await
    }
}

/// Mock text generator
pub struct MockTextProvider {
    behavior: MockBehavior<String>,
    calls: AtomicUsize,
}

impl MockTextProvider {
    pub fn new(behavior: MockBehavior<String>) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &str {
        "mock-text"
    }

    async fn generate_text(&self, _request: &TextRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.behavior.run().await
    }
}
