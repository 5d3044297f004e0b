//! Run-time settings and backend selection.

use crate::cache::{ResultCache, UNKNOWN_COMMAND};
use crate::locale_fix::{LocaleFixer, load_overrides};
use crate::mt::argos::DEFAULT_ARGOS_BIN;
use crate::mt::hugging_face::DEFAULT_HF_API_URL;
use crate::mt::libre_translate::DEFAULT_LIBRE_URL;
use crate::mt::{
    ArgosProvider, HuggingFaceProvider, LibreTranslateProvider, MachineTranslator, MtError,
    MtResult, TranslatorChain,
};
use crate::orchestrator::Orchestrator;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Seconds a single backend call may take
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Which translation backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    Argos,
    Libre,
    Hf,
    /// Argos, then LibreTranslate, then Hugging Face
    #[default]
    Auto,
}

impl Backend {
    pub const NAMES: [&'static str; 4] = ["argos", "libre", "hf", "auto"];
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Argos => "argos",
            Backend::Libre => "libre",
            Backend::Hf => "hf",
            Backend::Auto => "auto",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Backend {
    type Err = MtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argos" => Ok(Backend::Argos),
            "libre" => Ok(Backend::Libre),
            "hf" => Ok(Backend::Hf),
            "auto" => Ok(Backend::Auto),
            other => Err(MtError::ConfigError(format!(
                "unknown backend '{}', expected one of: {}",
                other,
                Backend::NAMES.join(", ")
            ))),
        }
    }
}

/// Every knob of a run
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: String,
    pub target: String,
    pub backend: Backend,
    pub libre_url: String,
    pub libre_api_key: Option<String>,
    pub hf_url: String,
    pub hf_token: Option<String>,
    pub argos_bin: PathBuf,
    /// `None` disables caching
    pub cache_dir: Option<PathBuf>,
    pub command: String,
    pub overrides: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: "en".to_string(),
            target: "es".to_string(),
            backend: Backend::Auto,
            libre_url: DEFAULT_LIBRE_URL.to_string(),
            libre_api_key: None,
            hf_url: DEFAULT_HF_API_URL.to_string(),
            hf_token: None,
            argos_bin: PathBuf::from(DEFAULT_ARGOS_BIN),
            cache_dir: default_cache_dir(),
            command: UNKNOWN_COMMAND.to_string(),
            overrides: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `~/.cache/mantr`, when a home directory is known
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cache").join("mantr"))
}

impl Settings {
    /// Turn the backend selection into a chain
    ///
    /// `auto` tries every backend in order; any other choice pins that one
    /// backend, so its failures leave text untranslated.
    pub fn build_chain(&self) -> MtResult<TranslatorChain> {
        let chain = match self.backend {
            Backend::Argos => TranslatorChain::pinned(Box::new(self.argos())),
            Backend::Libre => TranslatorChain::pinned(Box::new(self.libre()?)),
            Backend::Hf => TranslatorChain::pinned(Box::new(self.hugging_face()?)),
            Backend::Auto => {
                let providers: Vec<Box<dyn MachineTranslator>> = vec![
                    Box::new(self.argos()),
                    Box::new(self.libre()?),
                    Box::new(self.hugging_face()?),
                ];
                TranslatorChain::auto(providers)
            }
        };
        Ok(chain)
    }

    /// Load the phrase-override file, if any, on top of the built-in table
    pub fn build_fixer(&self) -> MtResult<LocaleFixer> {
        let fixer = LocaleFixer::default();
        match &self.overrides {
            Some(path) => Ok(fixer.with_overrides(load_overrides(path)?)),
            None => Ok(fixer),
        }
    }

    pub fn build_orchestrator(&self) -> MtResult<Orchestrator> {
        Ok(Orchestrator::new(
            self.build_chain()?,
            self.build_fixer()?,
            self.source.clone(),
            self.target.clone(),
        ))
    }

    pub fn cache(&self) -> Option<ResultCache> {
        self.cache_dir.as_ref().map(ResultCache::new)
    }

    fn argos(&self) -> ArgosProvider {
        ArgosProvider::new(&self.argos_bin, self.timeout_secs)
    }

    fn libre(&self) -> MtResult<LibreTranslateProvider> {
        let provider = LibreTranslateProvider::new(&self.libre_url, self.timeout_secs)?;
        Ok(match &self.libre_api_key {
            Some(key) => provider.with_api_key(key.clone()),
            None => provider,
        })
    }

    fn hugging_face(&self) -> MtResult<HuggingFaceProvider> {
        HuggingFaceProvider::new(&self.hf_url, self.hf_token.clone(), self.timeout_secs)
    }
}
