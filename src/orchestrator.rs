//! Total translation of one chunk of text.
//!
//! [`Orchestrator::translate_with_fallback`] never fails: it tries the whole
//! chunk first and, when the backend hands the text back untouched (the usual
//! symptom of a span it choked on), retries clause by clause. A dead backend
//! degrades to the original text.

use crate::locale_fix::LocaleFixer;
use crate::mt::TranslatorChain;
use crate::mt::translator::is_spanish;
use crate::normalize::normalize_for_translation;
use tracing::debug;

/// Characters the fallback splits on; they are kept in place in the output.
const FRAGMENT_SEPARATORS: [char; 4] = ['.', ';', ':', ','];

/// Backend chain plus everything needed to post-process its answers
pub struct Orchestrator {
    chain: TranslatorChain,
    fixer: LocaleFixer,
    source_locale: String,
    target_locale: String,
}

impl Orchestrator {
    pub fn new(
        chain: TranslatorChain,
        fixer: LocaleFixer,
        source_locale: impl Into<String>,
        target_locale: impl Into<String>,
    ) -> Self {
        Self {
            chain,
            fixer,
            source_locale: source_locale.into(),
            target_locale: target_locale.into(),
        }
    }

    pub fn target_locale(&self) -> &str {
        &self.target_locale
    }

    /// Whether Spanish post-processing applies
    pub fn target_is_spanish(&self) -> bool {
        is_spanish(&self.target_locale)
    }

    /// Translate `text`, falling back to fragments and finally to the original
    ///
    /// # Returns
    ///
    /// The translated text with locale fixes applied (Spanish only). When no
    /// backend produced anything different from the input, the normalized
    /// input itself.
    pub async fn translate_with_fallback(&self, text: &str) -> String {
        let base = normalize_for_translation(text);
        if base.is_empty() {
            return base;
        }

        if let Some(out) = self.translate_span(&base).await {
            return self.fixer.fix(&out, self.target_is_spanish());
        }

        debug!(chars = base.len(), "whole-text translation failed, retrying by fragment");
        let mut assembled = String::with_capacity(base.len());
        let mut translated_any = false;
        let mut start = 0;
        for (idx, ch) in base.char_indices() {
            if FRAGMENT_SEPARATORS.contains(&ch) {
                translated_any |= self
                    .push_fragment(&base[start..idx], &mut assembled)
                    .await;
                assembled.push(ch);
                start = idx + ch.len_utf8();
            }
        }
        translated_any |= self.push_fragment(&base[start..], &mut assembled).await;

        if !translated_any {
            debug!("no fragment translated, keeping original text");
            return base;
        }
        assembled.trim().to_string()
    }

    /// One backend round trip; `None` unless the answer differs from the input
    async fn translate_span(&self, span: &str) -> Option<String> {
        let out = self
            .chain
            .translate(span, &self.source_locale, &self.target_locale)
            .await?;
        if out.trim() == span.trim() {
            None
        } else {
            Some(out.trim().to_string())
        }
    }

    /// Translate one fragment, keeping its surrounding whitespace
    ///
    /// Returns whether the backend changed the fragment.
    async fn push_fragment(&self, fragment: &str, out: &mut String) -> bool {
        let core = fragment.trim();
        if core.is_empty() {
            out.push_str(fragment);
            return false;
        }

        let lead = &fragment[..fragment.len() - fragment.trim_start().len()];
        let trail = &fragment[fragment.trim_end().len()..];

        let translated = self.translate_span(core).await;
        let changed = translated.is_some();
        let text = translated.unwrap_or_else(|| core.to_string());

        out.push_str(lead);
        out.push_str(&self.fixer.fix(&text, self.target_is_spanish()));
        out.push_str(trail);
        changed
    }
}
