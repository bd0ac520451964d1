/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the translation backends:
 * - DeepL: keyed premium API, tried first when a key is configured
 * - Google: public translation endpoint, the secondary backend
 * - Mock: scripted provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single-text translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Target language as an ISO 639-1 code (e.g. "sl")
    pub target_language: String,
}

impl TranslationRequest {
    /// Create a new request
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
        }
    }
}

/// Common trait for all translation providers
///
/// One call is one try: retries and fallback belong to the gateway.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Translate a request, returning the translated text.
    ///
    /// An empty translation is reported as `ProviderError::EmptyResponse`.
    async fn complete(&self, request: &TranslationRequest) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete(&TranslationRequest::new("Hello", "de")).await.map(|_| ())
    }
}

pub mod deepl;
pub mod google;
pub mod mock;
