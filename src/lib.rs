//! Manual page translation
//!
//! Turns the tagged stream produced by a man page extractor into a translated,
//! 80-column man-style document.
//!
//! # Workflow Example
//!
//! ```ignore
//! use mantr::{Pipeline, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings {
//!         command: "grep".to_string(),
//!         ..Settings::default()
//!     };
//!
//!     // 1. Backend chain, locale fixer and cache from settings
//!     let pipeline = Pipeline::from_settings(&settings)?;
//!
//!     // 2. Render (served from the cache on a repeat run)
//!     let raw = b"--- section ---\nNAME\n--- text ---\ngrep - print lines\n";
//!     let rendered = pipeline.run(raw).await;
//!
//!     println!("{}", rendered.text);
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod cache;
pub mod config;
pub mod layout;
pub mod locale_fix;
pub mod mt;
pub mod normalize;
pub mod options;
pub mod orchestrator;
pub mod pager;
pub mod pipeline;
pub mod segment;

#[cfg(test)]
mod integration_tests;

pub use assembler::{BlockAssembler, SectionState};
pub use cache::{CacheKey, ResultCache, compute_cache_key};
pub use config::{Backend, Settings};
pub use locale_fix::{LocaleFixer, PhraseOverride, map_section_title};
pub use mt::{MachineTranslator, MtError, MtResult, TranslatorChain};
pub use normalize::{normalize_for_translation, unhyphenate};
pub use options::{OptionEntry, OptionLine, looks_like_options_block, translate_options_block};
pub use orchestrator::Orchestrator;
pub use pipeline::{Pipeline, Rendered};
pub use segment::{Segment, SegmentKind, parse_segments};
