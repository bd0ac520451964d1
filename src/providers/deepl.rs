use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::{Client, header};
use log::{error, debug};

use crate::errors::ProviderError;
use super::{Provider, TranslationRequest};

/// Endpoint for free-tier keys (those ending in ":fx")
pub const FREE_ENDPOINT: &str = "https://api-free.deepl.com";

/// Endpoint for paid keys
pub const PRO_ENDPOINT: &str = "https://api.deepl.com";

/// DeepL client for the premium translation API
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL
    endpoint: String,
}

/// DeepL translate request body
#[derive(Debug, Serialize)]
pub struct DeepLRequest {
    /// Texts to translate
    pub text: Vec<String>,

    /// Upper-case target language code (e.g. "SL")
    pub target_lang: String,
}

/// DeepL translate response body
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    /// One entry per requested text
    #[serde(default)]
    pub translations: Vec<DeepLTranslation>,
}

/// Individual translation in a DeepL response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// Source language DeepL detected
    #[serde(default)]
    pub detected_source_language: Option<String>,

    /// The translated text
    pub text: String,
}

impl DeepLRequest {
    /// Build a request for one text
    pub fn single(text: impl Into<String>, target_language: &str) -> Self {
        Self {
            text: vec![text.into()],
            target_lang: target_language.to_uppercase(),
        }
    }
}

impl DeepLResponse {
    /// First translated text, if any
    pub fn first_text(&self) -> Option<&str> {
        self.translations.first().map(|t| t.text.as_str())
    }
}

// Manual impl so the key never ends up in logs
impl std::fmt::Debug for DeepL {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepL")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl DeepL {
    /// Create a new DeepL client.
    ///
    /// An empty `endpoint` picks the free or pro API based on the key.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        let api_key = api_key.into();
        let endpoint = endpoint.into();
        let endpoint = if endpoint.is_empty() {
            Self::default_endpoint_for_key(&api_key).to_string()
        } else {
            endpoint
        };

        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key,
            endpoint,
        }
    }

    /// Free-tier keys carry a ":fx" suffix
    pub fn default_endpoint_for_key(api_key: &str) -> &'static str {
        if api_key.ends_with(":fx") {
            FREE_ENDPOINT
        } else {
            PRO_ENDPOINT
        }
    }

    /// API base URL this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a translate request
    pub async fn translate(&self, request: &DeepLRequest) -> Result<DeepLResponse, ProviderError> {
        let api_url = format!("{}/v2/translate", self.endpoint.trim_end_matches('/'));

        let response = self.client.post(&api_url)
            .header(header::AUTHORIZATION, format!("DeepL-Auth-Key {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        response.json::<DeepLResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("DeepL response: {}", e)))
    }
}

#[async_trait]
impl Provider for DeepL {
    fn name(&self) -> &str {
        "deepl"
    }

    async fn complete(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let body = DeepLRequest::single(request.text.clone(), &request.target_language);
        let response = self.translate(&body).await?;

        match response.first_text() {
            Some(text) if !text.is_empty() => {
                if let Some(detected) = response.translations.first().and_then(|t| t.detected_source_language.as_deref()) {
                    debug!("DeepL detected source language {}", detected);
                }
                Ok(text.to_string())
            },
            _ => Err(ProviderError::EmptyResponse),
        }
    }
}
