/// Error types for the translation backends
///
/// None of these ever reach the rendered document: the backend chain logs them
/// and treats the failing provider as having produced no result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MtError {
    /// Locale code is empty or contains unexpected characters
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
    /// Provider is misconfigured (bad URL, unreadable override table, ...)
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Transport-level failure talking to a remote service
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Provider cannot serve this request at all (missing binary, unsupported pair)
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    /// Provider did not answer within the configured time budget
    #[error("Timed out after {0}s")]
    Timeout(u64),
    /// Provider answered, but with something unusable
    #[error("Translation error: {0}")]
    TranslationError(String),
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MtError::NetworkError(format!("request timed out: {}", err))
        } else {
            MtError::NetworkError(err.to_string())
        }
    }
}

/// Result type for translation backend operations
pub type MtResult<T> = Result<T, MtError>;
