//! Machine translation trait and locale helpers
//!
//! This module defines the `MachineTranslator` trait for provider abstraction,
//! so the rendering pipeline can run against Argos, LibreTranslate, a hosted
//! Hugging Face model or the mock without knowing which one it talks to.
//!
//! # Example
//!
//! ```ignore
//! use mantr::mt::{LibreTranslateProvider, MachineTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = LibreTranslateProvider::new("http://localhost:5000/translate", 15)?;
//!     let result = provider.translate("Print lines that match patterns", "en", "es").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use async_trait::async_trait;

/// Generic trait for machine translation providers
///
/// A provider translates one piece of text at a time. Failures are reported as
/// `MtError`; callers higher up decide whether to fall through to another
/// provider or to keep the original text.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_locale` - Source language code (e.g., "en")
    /// * `target_locale` - Target language code (e.g., "es", "es-ES")
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(MtError)` - If the provider is unavailable or the call fails
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Get the name of this translation provider
    ///
    /// Used in log lines to identify which provider handled (or failed) a request.
    fn provider_name(&self) -> &str;
}

/// Normalize a locale code by stripping region information
///
/// - `es-ES` → `es`
/// - `pt_BR` → `pt`
/// - `EN` → `en`
pub fn normalize_locale(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}

/// Whether the target locale is any flavour of Spanish
///
/// Spanish targets get the glossary and locale fixes; every other language
/// receives backend output as-is.
pub fn is_spanish(locale: &str) -> bool {
    normalize_locale(locale) == "es"
}

/// Validate that a locale code is in acceptable format
///
/// Checks that the locale code contains only alphanumeric characters,
/// hyphens, and underscores.
///
/// # Example
///
/// ```ignore
/// validate_locale("es")?; // OK
/// validate_locale("es-MX")?; // OK
/// validate_locale("es/../x").unwrap_err(); // Error
/// ```
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}
