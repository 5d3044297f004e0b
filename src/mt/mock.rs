//! Mock Machine Translator for testing
//!
//! This module provides a deterministic, network-free translator so the whole
//! rendering pipeline can be exercised without Argos, LibreTranslate or a
//! Hugging Face token.
//!
//! # Example
//!
//! ```ignore
//! use mantr::mt::{MachineTranslator, MockMode, MockTranslator};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", "en", "es").await.unwrap();
//!     assert_eq!(result, "hello_es");
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append locale suffix: "hello" → "hello_es"
    Suffix,

    /// Use predefined mappings: (text, target_locale) → translation.
    /// Unmapped text comes back unchanged, like a backend that silently
    /// gives up on a span.
    Mappings(HashMap<(String, String), String>),

    /// Simulate backend errors
    Error(String),

    /// Return an empty string (a service that answers with nothing)
    Empty,

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
///
/// Clones share the same call counter, so a test can hand one clone to the
/// pipeline and keep another to count how often the backend was reached.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    calls: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new MockTranslator with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Convenience constructor for `MockMode::Mappings` with an `es` target
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mock = MockTranslator::spanish(&[("Quiet", "Silencioso")]);
    /// ```
    pub fn spanish(pairs: &[(&str, &str)]) -> Self {
        let map = pairs
            .iter()
            .map(|(src, tgt)| ((src.to_string(), "es".to_string()), tgt.to_string()))
            .collect();
        Self::new(MockMode::Mappings(map))
    }

    /// Number of `translate` calls made so far (across all clones)
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Apply translation logic based on the mode
    fn apply_translation(&self, text: &str, _source: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map.get(&key).cloned().unwrap_or_else(|| text.to_string()))
            }
            MockMode::Error(msg) => Err(MtError::TranslationError(msg.clone())),
            MockMode::Empty => Ok(String::new()),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.apply_translation(text, source_locale, target_locale)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Suffix Mode Tests ==========

    #[tokio::test]
    async fn test_suffix_single_translation() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let result = mock.translate("hello", "en", "es").await.unwrap();
        assert_eq!(result, "hello_es");
    }

    #[tokio::test]
    async fn test_suffix_different_targets() {
        let mock = MockTranslator::new(MockMode::Suffix);
        assert_eq!(mock.translate("hello", "en", "es").await.unwrap(), "hello_es");
        assert_eq!(mock.translate("hello", "en", "de").await.unwrap(), "hello_de");
    }

    // ========== Mapping Mode Tests ==========

    #[tokio::test]
    async fn test_mapping_single_translation() {
        let mock = MockTranslator::spanish(&[("hello", "hola")]);
        let result = mock.translate("hello", "en", "es").await.unwrap();
        assert_eq!(result, "hola");
    }

    #[tokio::test]
    async fn test_mapping_unknown_text_unchanged() {
        let mock = MockTranslator::spanish(&[("hello", "hola")]);
        let result = mock.translate("unknown", "en", "es").await.unwrap();
        assert_eq!(result, "unknown");
    }

    #[tokio::test]
    async fn test_mapping_respects_target() {
        let mock = MockTranslator::spanish(&[("hello", "hola")]);
        let result = mock.translate("hello", "en", "fr").await.unwrap();
        assert_eq!(result, "hello");
    }

    // ========== Error / Empty / NoOp Tests ==========

    #[tokio::test]
    async fn test_error_mode_returns_error() {
        let mock = MockTranslator::new(MockMode::Error("API unavailable".to_string()));
        match mock.translate("hello", "en", "es").await {
            Err(MtError::TranslationError(msg)) => assert_eq!(msg, "API unavailable"),
            _ => panic!("Expected TranslationError"),
        }
    }

    #[tokio::test]
    async fn test_empty_mode_returns_empty() {
        let mock = MockTranslator::new(MockMode::Empty);
        assert_eq!(mock.translate("hello", "en", "es").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_noop_returns_unchanged() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let text = "Hello world";
        assert_eq!(mock.translate(text, "en", "es").await.unwrap(), text);
    }

    // ========== Call Counter Tests ==========

    #[tokio::test]
    async fn test_call_count_shared_between_clones() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let clone = mock.clone();
        clone.translate("a", "en", "es").await.unwrap();
        clone.translate("b", "en", "es").await.unwrap();
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_counted() {
        let mock = MockTranslator::new(MockMode::Error("down".to_string()));
        let _ = mock.translate("a", "en", "es").await;
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_provider_name() {
        let mock = MockTranslator::new(MockMode::Suffix);
        assert_eq!(mock.provider_name(), "Mock Translator");
    }
}
