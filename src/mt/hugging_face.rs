//! Hugging Face hosted inference provider
//!
//! Sends text to the hosted `Helsinki-NLP/opus-mt-en-es` model. The model only
//! knows one language pair, so any other pair is reported as unavailable and
//! the chain moves on.

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, normalize_locale, validate_locale};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Base URL of the hosted inference router
pub const DEFAULT_HF_API_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// Model served by this provider
pub const OPUS_MT_EN_ES: &str = "Helsinki-NLP/opus-mt-en-es";

/// Hosted Hugging Face translation pipeline
#[derive(Clone)]
pub struct HuggingFaceProvider {
    base_url: String,
    model: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HuggingFaceProvider {
    /// Create a provider for the en→es opus-mt model
    ///
    /// # Arguments
    ///
    /// * `base_url` - Inference API base URL (model id is appended)
    /// * `token` - Optional access token sent as a bearer token
    /// * `timeout_secs` - Per-request timeout
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> MtResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(MtError::ConfigError(
                "Hugging Face API URL cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.to_string(),
            model: OPUS_MT_EN_ES.to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            client,
        })
    }

    /// URL the request for this model is posted to
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, self.model)
    }

    fn supports_pair(source: &str, target: &str) -> bool {
        normalize_locale(source) == "en" && normalize_locale(target) == "es"
    }

    /// Read `translation_text` from either `[{...}]` or `{...}` response shapes
    fn extract_translation(json: &serde_json::Value) -> MtResult<String> {
        if let Some(err) = json["error"].as_str() {
            return Err(MtError::TranslationError(format!(
                "Hugging Face error: {}",
                err
            )));
        }

        let item = if json.is_array() { &json[0] } else { json };
        item["translation_text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                MtError::TranslationError(
                    "Invalid API response: missing 'translation_text' field".to_string(),
                )
            })
    }
}

impl std::fmt::Debug for HuggingFaceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for HuggingFaceProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if !Self::supports_pair(source_locale, target_locale) {
            return Err(MtError::Unavailable(format!(
                "{} only translates en→es, not {}→{}",
                self.model, source_locale, target_locale
            )));
        }

        if text.is_empty() {
            return Ok(String::new());
        }

        let mut request = self
            .client
            .post(self.endpoint())
            .json(&json!({ "inputs": text }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MtError::TranslationError(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        Self::extract_translation(&json)
    }

    fn provider_name(&self) -> &str {
        "Hugging Face"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_model() {
        let provider = HuggingFaceProvider::new("https://example.test/models/", None, 15).unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://example.test/models/Helsinki-NLP/opus-mt-en-es"
        );
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(matches!(
            HuggingFaceProvider::new("", None, 15),
            Err(MtError::ConfigError(_))
        ));
    }

    #[test]
    fn test_debug_masks_token() {
        let provider =
            HuggingFaceProvider::new(DEFAULT_HF_API_URL, Some("hf_secret".to_string()), 15)
                .unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("hf_secret"));
    }

    #[test]
    fn test_extract_translation_array_shape() {
        let json = json!([{"translation_text": "Hola"}]);
        assert_eq!(HuggingFaceProvider::extract_translation(&json).unwrap(), "Hola");
    }

    #[test]
    fn test_extract_translation_object_shape() {
        let json = json!({"translation_text": "Adiós"});
        assert_eq!(HuggingFaceProvider::extract_translation(&json).unwrap(), "Adiós");
    }

    #[test]
    fn test_extract_translation_loading_error() {
        let json = json!({"error": "Model is currently loading"});
        assert!(HuggingFaceProvider::extract_translation(&json).is_err());
    }

    #[tokio::test]
    async fn test_other_pairs_are_unavailable() {
        let provider = HuggingFaceProvider::new(DEFAULT_HF_API_URL, None, 15).unwrap();
        let result = provider.translate("hello", "en", "fr").await;
        assert!(matches!(result, Err(MtError::Unavailable(_))));
    }

    #[test]
    fn test_supports_regional_spanish() {
        assert!(HuggingFaceProvider::supports_pair("en", "es-MX"));
        assert!(!HuggingFaceProvider::supports_pair("de", "es"));
    }
}
