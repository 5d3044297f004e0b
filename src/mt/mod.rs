/// Translation backends
///
/// Everything that actually talks to a machine translation engine lives here.
/// The rest of the crate only sees the `TranslatorChain`.
///
/// # Overview
///
/// 1. **`MachineTranslator`** - Generic async trait implemented by every backend
/// 2. **Providers** - Argos (offline CLI), LibreTranslate (HTTP), Hugging Face
///    (hosted opus-mt) and a deterministic mock for tests
/// 3. **`TranslatorChain`** - Ordered fallback over providers, or a single
///    pinned provider
///
/// # Example
///
/// ```ignore
/// use mantr::mt::{ArgosProvider, LibreTranslateProvider, TranslatorChain};
///
/// let chain = TranslatorChain::auto(vec![
///     Box::new(ArgosProvider::new("argos-translate", 15)),
///     Box::new(LibreTranslateProvider::new("http://localhost:5000/translate", 15)?),
/// ]);
/// let out = chain.translate("Print lines that match patterns", "en", "es").await;
/// ```
pub mod argos;
pub mod chain;
pub mod error;
pub mod hugging_face;
pub mod libre_translate;
pub mod mock;
pub mod translator;

pub use argos::ArgosProvider;
pub use chain::{ChainMode, TranslatorChain};
pub use error::{MtError, MtResult};
pub use hugging_face::HuggingFaceProvider;
pub use libre_translate::LibreTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use translator::{MachineTranslator, is_spanish, normalize_locale, validate_locale};
