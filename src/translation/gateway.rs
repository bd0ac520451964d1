/*!
 * Translation gateway: one text in, one text out.
 *
 * The gateway knows nothing about documents. For every text it
 * 1. returns fragments that are not worth translating unchanged,
 * 2. answers from its cache when it can,
 * 3. tries the premium provider (when one is configured), then the
 *    secondary provider, each with a bounded number of tries,
 * 4. gives back the original text when every provider failed.
 *
 * It never returns an error: provider failures degrade to a no-op.
 */

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;
use std::time::Duration;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::language_utils::normalize_target_language;
use crate::providers::deepl::DeepL;
use crate::providers::google::GoogleTranslate;
use crate::providers::{Provider, TranslationRequest};
use super::cache::{truncate_text, TranslationCache};

/// Anything that can translate a single text.
///
/// Implementations never fail; an untranslatable text comes back as is.
#[async_trait]
pub trait Translate: Send + Sync {
    /// Translate `text` into the configured target language
    async fn translate(&self, text: &str) -> String;
}

/// Retry behavior for one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Tries per provider
    pub max_attempts: u32,
    /// Wait after the first failed try; doubled after each further one
    pub backoff_base: Duration,
}

impl RetryPolicy {
    /// Create a retry policy
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    /// Policy without waits, for tests and local providers
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Wait after the given failed try (1-based): base, 2*base, 4*base, ...
    pub fn backoff_after(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1).min(16);
        self.backoff_base * (1u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Translator statistics reported with each job
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GatewayStats {
    /// Normalized target language code
    pub target_language: String,
    /// Number of distinct cached translations
    pub cached_translations: usize,
    /// Cache hits
    pub cache_hits: usize,
    /// Cache misses
    pub cache_misses: usize,
}

/// Decide whether a text is a meaningful translation unit.
///
/// Blank text, text shorter than two characters once trimmed, and text that
/// is purely numeric once spaces and newlines are removed are left alone.
pub fn should_translate(text: &str) -> bool {
    let stripped = text.trim();
    if stripped.is_empty() || stripped.chars().count() < 2 {
        return false;
    }

    let mut significant = stripped.chars().filter(|c| *c != ' ' && *c != '\n').peekable();
    if significant.peek().is_none() {
        return false;
    }
    !significant.all(char::is_numeric)
}

/// Translation gateway with caching and provider fallback
pub struct TranslationGateway {
    /// Normalized target language code
    target_language: String,
    /// Keyed provider, tried first
    premium: Option<Box<dyn Provider>>,
    /// Fallback provider
    secondary: Box<dyn Provider>,
    /// Per-gateway translation cache
    cache: TranslationCache,
    /// Tries and backoff per provider
    retry: RetryPolicy,
}

impl TranslationGateway {
    /// Create a gateway with only a secondary provider
    pub fn new(target_language: &str, secondary: Box<dyn Provider>) -> Self {
        Self {
            target_language: normalize_target_language(target_language),
            premium: None,
            secondary,
            cache: TranslationCache::default(),
            retry: RetryPolicy::default(),
        }
    }

    /// Add a premium provider tried before the secondary one
    pub fn with_premium(mut self, premium: Box<dyn Provider>) -> Self {
        self.premium = Some(premium);
        self
    }

    /// Replace the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build the gateway described by the configuration.
    ///
    /// The premium provider is only created when a key is configured.
    pub fn from_config(config: &TranslationConfig, target_language: &str) -> Self {
        let secondary = GoogleTranslate::new(
            config.secondary.endpoint.clone(),
            Duration::from_secs(config.secondary.timeout_secs),
        );

        let mut gateway = Self::new(target_language, Box::new(secondary))
            .with_retry_policy(RetryPolicy::new(config.common.retry_count, config.retry_backoff()));

        if let Some(api_key) = config.premium_api_key() {
            let premium = DeepL::new(
                api_key,
                config.premium.endpoint.clone(),
                Duration::from_secs(config.premium.timeout_secs),
            );
            gateway = gateway.with_premium(Box::new(premium));
        }

        gateway
    }

    /// Normalized target language code
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Whether a premium provider is configured
    pub fn has_premium(&self) -> bool {
        self.premium.is_some()
    }

    /// Current translator statistics
    pub fn stats(&self) -> GatewayStats {
        let (hits, misses, _) = self.cache.stats();
        GatewayStats {
            target_language: self.target_language.clone(),
            cached_translations: self.cache.len(),
            cache_hits: hits,
            cache_misses: misses,
        }
    }

    /// Translate one text, never failing
    pub async fn translate(&self, text: &str) -> String {
        if !should_translate(text) {
            return text.to_string();
        }

        if let Some(cached) = self.cache.get(&self.target_language, text) {
            return cached;
        }

        let request = TranslationRequest::new(text, self.target_language.clone());

        let mut providers: Vec<&dyn Provider> = Vec::with_capacity(2);
        if let Some(premium) = &self.premium {
            providers.push(&**premium);
        }
        providers.push(&*self.secondary);

        for provider in providers {
            match self.try_provider(provider, &request).await {
                Ok(translated) => {
                    self.cache.store(&self.target_language, text, &translated);
                    return translated;
                },
                Err(e) => {
                    warn!("{} gave up on '{}': {}", provider.name(), truncate_text(text, 50), e);
                }
            }
        }

        warn!("Translation failed for: {}", truncate_text(text, 50));
        text.to_string()
    }

    /// Run up to `max_attempts` tries against one provider
    async fn try_provider(&self, provider: &dyn Provider, request: &TranslationRequest) -> Result<String, ProviderError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match provider.complete(request).await {
                Ok(translated) if !translated.is_empty() => {
                    debug!("{} translated '{}' on try {}", provider.name(), truncate_text(&request.text, 30), attempt);
                    return Ok(translated);
                },
                Ok(_) => {
                    warn!("{} attempt {} returned an empty translation", provider.name(), attempt);
                    if attempt >= self.retry.max_attempts {
                        return Err(ProviderError::EmptyResponse);
                    }
                },
                Err(e) => {
                    warn!("{} attempt {}/{} failed: {}", provider.name(), attempt, self.retry.max_attempts, e);
                    if !e.is_retryable() || attempt >= self.retry.max_attempts {
                        return Err(e);
                    }
                }
            }

            let backoff = self.retry.backoff_after(attempt);
            if !backoff.is_zero() {
                tokio::time::sleep(backoff).await;
            }
        }
    }
}

#[async_trait]
impl Translate for TranslationGateway {
    async fn translate(&self, text: &str) -> String {
        TranslationGateway::translate(self, text).await
    }
}
