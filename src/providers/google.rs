use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use log::error;

use crate::errors::ProviderError;
use super::{Provider, TranslationRequest};

/// Public translation endpoint
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com";

/// Client for the public Google translation endpoint.
///
/// This is the keyless secondary backend: it auto-detects the source
/// language and answers with a nested JSON array of segments.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API base URL
    endpoint: String,
}

impl GoogleTranslate {
    /// Create a new client; an empty endpoint uses the public one
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
        }
    }

    /// API base URL this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Extract the translation from a response body.
    ///
    /// The body looks like `[[["Zdravo","Hello",null,null,10],...],null,"en",...]`;
    /// the translation is the concatenation of the first element of every
    /// segment in the first array.
    pub fn parse_response(body: &str) -> Result<String, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Google response is not JSON: {}", e)))?;

        let segments = value.get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Google response has no segment list".to_string()))?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(Value::as_str) {
                translated.push_str(part);
            }
        }

        if translated.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(translated)
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
    }

    async fn complete(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let api_url = format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'));

        let response = self.client.get(&api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", request.target_language.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
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
        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read Google response: {}", e)))?;

        if !status.is_success() {
            error!("Google translate error ({}): {}", status, body);
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        Self::parse_response(&body)
    }
}
