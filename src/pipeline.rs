//! One document from raw input to rendered text, with caching.

use crate::assembler::BlockAssembler;
use crate::cache::{ResultCache, compute_cache_key};
use crate::config::Settings;
use crate::mt::MtResult;
use crate::orchestrator::Orchestrator;
use crate::segment::parse_segments;
use tracing::info;

/// Output of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// The text came from the cache and no backend was consulted
    pub from_cache: bool,
}

/// Cache lookup, rendering and cache write for one document
pub struct Pipeline {
    orchestrator: Orchestrator,
    cache: Option<ResultCache>,
    command: String,
    backend: String,
}

impl Pipeline {
    pub fn new(
        orchestrator: Orchestrator,
        cache: Option<ResultCache>,
        command: impl Into<String>,
        backend: impl Into<String>,
    ) -> Self {
        Self {
            orchestrator,
            cache,
            command: command.into(),
            backend: backend.into(),
        }
    }

    /// Build the whole pipeline from settings
    ///
    /// # Errors
    ///
    /// Fails only when a backend client or the override file cannot be set up.
    pub fn from_settings(settings: &Settings) -> MtResult<Self> {
        Ok(Self::new(
            settings.build_orchestrator()?,
            settings.cache(),
            settings.command.clone(),
            settings.backend.to_string(),
        ))
    }

    /// Render `raw`, consulting the cache first
    ///
    /// Never fails: backend trouble degrades to untranslated text and cache
    /// trouble to a fresh render.
    pub async fn run(&self, raw: &[u8]) -> Rendered {
        if raw.is_empty() {
            return Rendered {
                text: String::new(),
                from_cache: false,
            };
        }

        let key = compute_cache_key(
            &self.command,
            self.orchestrator.target_locale(),
            &self.backend,
            raw,
        );

        if let Some(cache) = &self.cache {
            if let Some(text) = cache.lookup(&key) {
                info!(file = %key.file_name(), "cache hit");
                return Rendered {
                    text,
                    from_cache: true,
                };
            }
            info!(file = %key.file_name(), "cache miss");
        }

        let input = String::from_utf8_lossy(raw);
        let segments = parse_segments(&input);
        info!(segments = segments.len(), target = %self.orchestrator.target_locale(), "rendering");
        let text = BlockAssembler::new(&self.orchestrator)
            .assemble(&segments)
            .await;

        if let Some(cache) = &self.cache {
            cache.store(&key, &text);
        }

        Rendered {
            text,
            from_cache: false,
        }
    }
}
