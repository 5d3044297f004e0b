//! Ordered backend chain
//!
//! Providers are tried in order. In automatic mode the first non-empty answer
//! wins and every failure is logged and skipped; in pinned mode exactly one
//! provider is consulted and its answer is surfaced as-is.

use crate::mt::translator::MachineTranslator;
use tracing::debug;

/// How the chain treats its providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainMode {
    /// Try each provider until one returns a non-empty result
    Auto,
    /// Use the first provider only; a failure surfaces the input unchanged
    Pinned,
}

/// An ordered list of translation providers
pub struct TranslatorChain {
    providers: Vec<Box<dyn MachineTranslator>>,
    mode: ChainMode,
}

impl TranslatorChain {
    /// Fallback chain over `providers`, tried in order
    pub fn auto(providers: Vec<Box<dyn MachineTranslator>>) -> Self {
        Self {
            providers,
            mode: ChainMode::Auto,
        }
    }

    /// Chain pinned to exactly one provider
    pub fn pinned(provider: Box<dyn MachineTranslator>) -> Self {
        Self {
            providers: vec![provider],
            mode: ChainMode::Pinned,
        }
    }

    pub fn mode(&self) -> ChainMode {
        self.mode
    }

    /// Names of the configured providers, in the order they are tried
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.provider_name()).collect()
    }

    /// Translate `text`, never failing
    ///
    /// # Returns
    ///
    /// * `Some(String)` - A provider answer (pinned mode: the answer, or `text`
    ///   itself when the provider failed)
    /// * `None` - Automatic mode and no provider produced anything, or `text`
    ///   is blank
    pub async fn translate(&self, text: &str, source: &str, target: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        match self.mode {
            ChainMode::Auto => {
                for provider in &self.providers {
                    if let Some(out) = Self::attempt(provider.as_ref(), text, source, target).await {
                        return Some(out);
                    }
                }
                debug!(chars = text.len(), "no provider produced a translation");
                None
            }
            ChainMode::Pinned => {
                let provider = self.providers.first()?;
                Some(
                    Self::attempt(provider.as_ref(), text, source, target)
                        .await
                        .unwrap_or_else(|| text.to_string()),
                )
            }
        }
    }

    async fn attempt(
        provider: &dyn MachineTranslator,
        text: &str,
        source: &str,
        target: &str,
    ) -> Option<String> {
        match provider.translate(text, source, target).await {
            Ok(out) if !out.trim().is_empty() => Some(out),
            Ok(_) => {
                debug!(provider = provider.provider_name(), "empty translation");
                None
            }
            Err(err) => {
                debug!(provider = provider.provider_name(), error = %err, "provider failed");
                None
            }
        }
    }
}
