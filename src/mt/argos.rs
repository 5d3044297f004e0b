//! Argos Translate provider (offline)
//!
//! Runs the `argos-translate` command line tool that ships with the
//! `argostranslate` package. Everything happens locally once the language
//! package (for example en→es) is installed, so this is the first provider
//! tried in automatic mode.

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, normalize_locale, validate_locale};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Executable looked up on `PATH` when no explicit binary is configured
pub const DEFAULT_ARGOS_BIN: &str = "argos-translate";

/// Offline provider backed by the `argos-translate` CLI
#[derive(Debug, Clone)]
pub struct ArgosProvider {
    binary: PathBuf,
    timeout: Duration,
}

impl ArgosProvider {
    pub fn new(binary: impl Into<PathBuf>, timeout_secs: u64) -> Self {
        Self {
            binary: binary.into(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn command(&self, text: &str, source: &str, target: &str) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--from")
            .arg(source)
            .arg("--to")
            .arg(target)
            .arg(text)
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl MachineTranslator for ArgosProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if text.is_empty() {
            return Ok(String::new());
        }

        let source = normalize_locale(source_locale);
        let target = normalize_locale(target_locale);
        let output = tokio::time::timeout(
            self.timeout,
            self.command(text, &source, &target).output(),
        )
        .await
        .map_err(|_| MtError::Timeout(self.timeout.as_secs()))?
        .map_err(|e| {
            MtError::Unavailable(format!("cannot run {}: {}", self.binary.display(), e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MtError::TranslationError(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let translated = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if translated.is_empty() {
            return Err(MtError::TranslationError(
                "argos-translate produced no output".to_string(),
            ));
        }
        Ok(translated)
    }

    fn provider_name(&self) -> &str {
        "Argos Translate"
    }
}
