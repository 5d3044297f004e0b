//! LibreTranslate provider for machine translation
//!
//! Talks to a LibreTranslate instance, usually a local one started with
//! `libretranslate --load-only en,es`. The endpoint defaults to
//! `http://localhost:5000/translate` and can be moved with `LIBRE_URL`.
//!
//! # Example
//!
//! ```ignore
//! use mantr::mt::{LibreTranslateProvider, MachineTranslator};
//!
//! let provider = LibreTranslateProvider::new("http://localhost:5000/translate", 15)?;
//! let result = provider.translate("Suppress error messages", "en", "es").await?;
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, normalize_locale, validate_locale};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Default endpoint of a locally running LibreTranslate service
pub const DEFAULT_LIBRE_URL: &str = "http://localhost:5000/translate";

/// LibreTranslate HTTP provider
#[derive(Clone)]
pub struct LibreTranslateProvider {
    /// Full URL of the `/translate` endpoint
    url: String,
    /// HTTP client carrying the per-request timeout
    client: reqwest::Client,
    /// Optional API key for instances that require one
    api_key: Option<String>,
}

impl LibreTranslateProvider {
    /// Maximum characters accepted in one request
    const MAX_CHARS_PER_STRING: usize = 30_000;

    /// Create a provider for the given endpoint
    ///
    /// # Arguments
    ///
    /// * `url` - Full URL of the `/translate` endpoint
    /// * `timeout_secs` - Per-request timeout
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If the URL is empty or the HTTP client cannot be built
    pub fn new(url: &str, timeout_secs: u64) -> MtResult<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(MtError::ConfigError(
                "LibreTranslate URL cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            url: url.to_string(),
            client,
            api_key: None,
        })
    }

    /// Attach an API key sent as `api_key` in every request body
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = if key.trim().is_empty() { None } else { Some(key) };
        self
    }

    /// Endpoint this provider posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pull `translatedText` out of a LibreTranslate response body
    fn extract_translation(json: &serde_json::Value) -> MtResult<String> {
        if let Some(err) = json["error"].as_str() {
            return Err(MtError::TranslationError(format!(
                "LibreTranslate error: {}",
                err
            )));
        }

        json["translatedText"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                MtError::TranslationError(
                    "Invalid API response: missing 'translatedText' field".to_string(),
                )
            })
    }
}

impl std::fmt::Debug for LibreTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibreTranslateProvider")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for LibreTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if text.is_empty() {
            return Ok(String::new());
        }

        if text.len() > Self::MAX_CHARS_PER_STRING {
            return Err(MtError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }

        let mut body = json!({
            "q": text,
            "source": normalize_locale(source_locale),
            "target": normalize_locale(target_locale),
            "format": "text"
        });
        if let Some(key) = &self.api_key {
            body["api_key"] = json!(key);
        }

        let response = self.client.post(&self.url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(if status.is_client_error() {
                MtError::ConfigError(format!("API client error ({}): {}", status, error_text))
            } else {
                MtError::TranslationError(format!("API server error ({}): {}", status, error_text))
            });
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        Self::extract_translation(&json)
    }

    fn provider_name(&self) -> &str {
        "LibreTranslate"
    }
}
