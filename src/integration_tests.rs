//! End-to-end tests for the rendering pipeline
//!
//! Every test drives raw tagged input through `Pipeline::run` with a mock
//! backend. The last one talks to a real LibreTranslate instance:
//!
//! ```bash
//! export LIBRE_URL=http://localhost:5000/translate
//! cargo test --lib integration_tests -- --ignored --nocapture
//! ```

#[cfg(test)]
mod tests {
    use crate::cache::ResultCache;
    use crate::config::{Backend, Settings};
    use crate::layout::WRAP_WIDTH;
    use crate::locale_fix::LocaleFixer;
    use crate::mt::{MachineTranslator, MockMode, MockTranslator, TranslatorChain};
    use crate::orchestrator::Orchestrator;
    use crate::pipeline::Pipeline;
    use tempfile::TempDir;

    const GREP_PAGE: &str = "--- section ---\nNAME\n--- text ---\ngrep - print lines that match patterns\n\
--- section ---\nSYNOPSIS\n--- text ---\ngrep [OPTION...] PATTERNS [FILE...]\n\
--- section ---\nOPTIONS\n--- options ---\n  -q, --quiet, --silent\n      Quiet; do not write anything to standard output.\n";

    fn pipeline_with(mock: &MockTranslator, target: &str, cache: Option<ResultCache>) -> Pipeline {
        let chain = TranslatorChain::auto(vec![Box::new(mock.clone()) as Box<dyn MachineTranslator>]);
        let orch = Orchestrator::new(chain, LocaleFixer::default(), "en", target);
        Pipeline::new(orch, cache, "grep", "auto")
    }

    fn grep_mock() -> MockTranslator {
        MockTranslator::spanish(&[
            (
                "grep - print lines that match patterns",
                "grep - imprime líneas que coinciden con patrones",
            ),
            (
                "Quiet; do not write anything to standard output.",
                "Silencioso; do not write nada en la salida estándar.",
            ),
        ])
    }

    // ============================================================================
    // Section titles and prose
    // ============================================================================

    #[tokio::test]
    async fn test_e2e_name_section() {
        let mock = grep_mock();
        let p = pipeline_with(&mock, "es", None);
        let out = p
            .run(b"--- section ---\nNAME\n--- text ---\ngrep - print lines that match patterns\n")
            .await
            .text;

        assert_eq!(out, "NOMBRE\n\ngrep - imprime líneas que coinciden con patrones\n\n");
        assert!(out.lines().all(|l| l.chars().count() <= WRAP_WIDTH));
    }

    // ============================================================================
    // Option lists
    // ============================================================================

    #[tokio::test]
    async fn test_e2e_options_columns_and_do_not_rule() {
        let mock = grep_mock();
        let p = pipeline_with(&mock, "es", None);
        let out = p
            .run(b"--- options ---\n  -q, --quiet, --silent\n      Quiet; do not write anything to standard output.\n")
            .await
            .text;

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "       -q, --quiet, --silent");
        assert_eq!(
            lines[1],
            "              Silencioso; no escribir nada en la salida estándar."
        );
        assert_eq!(lines.len(), 2);
    }

    // ============================================================================
    // Cache
    // ============================================================================

    #[tokio::test]
    async fn test_e2e_repeat_run_hits_cache() {
        let tmp = TempDir::new().unwrap();
        let mock = grep_mock();
        let p = pipeline_with(&mock, "es", Some(ResultCache::new(tmp.path())));

        let first = p.run(GREP_PAGE.as_bytes()).await;
        let calls = mock.call_count();
        assert!(calls > 0);

        let second = p.run(GREP_PAGE.as_bytes()).await;
        assert!(second.from_cache);
        assert_eq!(second.text.as_bytes(), first.text.as_bytes());
        assert_eq!(mock.call_count(), calls);
    }

    #[tokio::test]
    async fn test_e2e_cache_separates_targets() {
        let tmp = TempDir::new().unwrap();
        let mock = MockTranslator::new(MockMode::Suffix);
        let es = pipeline_with(&mock, "es", Some(ResultCache::new(tmp.path())));
        let fr = pipeline_with(&mock, "fr", Some(ResultCache::new(tmp.path())));

        es.run(GREP_PAGE.as_bytes()).await;
        let rendered = fr.run(GREP_PAGE.as_bytes()).await;
        assert!(!rendered.from_cache);
        assert!(rendered.text.starts_with("NAME\n\n"));
    }

    // ============================================================================
    // SYNOPSIS
    // ============================================================================

    #[tokio::test]
    async fn test_e2e_synopsis_never_translated() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let p = pipeline_with(&mock, "es", None);
        let out = p
            .run(b"--- section ---\nSYNOPSIS\n--- text ---\ngrep [OPTION...] PATTERNS [FILE...]\n")
            .await
            .text;

        assert_eq!(out, "SINOPSIS\n\ngrep [OPTION...] PATTERNS [FILE...]\n\n");
        assert_eq!(mock.call_count(), 0);
    }

    // ============================================================================
    // Whole page
    // ============================================================================

    #[tokio::test]
    async fn test_e2e_full_page_order() {
        let mock = grep_mock();
        let p = pipeline_with(&mock, "es", None);
        let out = p.run(GREP_PAGE.as_bytes()).await.text;

        let expected = concat!(
            "NOMBRE\n\n",
            "grep - imprime líneas que coinciden con patrones\n\n",
            "SINOPSIS\n\n",
            "grep [OPTION...] PATTERNS [FILE...]\n\n",
            "OPCIONES\n\n",
            "       -q, --quiet, --silent\n",
            "              Silencioso; no escribir nada en la salida estándar.\n",
        );
        assert_eq!(out, expected);
    }

    #[tokio::test]
    async fn test_e2e_dead_backend_degrades_to_source() {
        let mock = MockTranslator::new(MockMode::Error("connection refused".to_string()));
        let p = pipeline_with(&mock, "es", None);
        let out = p.run(GREP_PAGE.as_bytes()).await.text;

        assert!(out.starts_with("NOMBRE\n\ngrep - print lines that match patterns\n\n"));
        assert!(out.contains("              Quiet; do not write anything to standard output.\n"));
    }

    #[tokio::test]
    async fn test_e2e_non_spanish_target_skips_fixer() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let p = pipeline_with(&mock, "de", None);
        let out = p.run(GREP_PAGE.as_bytes()).await.text;

        assert!(out.starts_with("NAME\n\n"));
        assert!(out.contains("OPTIONS\n\n"));
        assert!(out.contains("do not write"));
    }

    // ============================================================================
    // Live backend
    // ============================================================================

    #[tokio::test]
    #[ignore]
    async fn test_e2e_libre_translate_live() {
        let Ok(url) = std::env::var("LIBRE_URL") else {
            eprintln!("Skipping: LIBRE_URL not set");
            return;
        };
        let settings = Settings {
            backend: Backend::Libre,
            libre_url: url,
            cache_dir: None,
            command: "grep".to_string(),
            ..Settings::default()
        };
        let p = Pipeline::from_settings(&settings).unwrap();
        let out = p.run(GREP_PAGE.as_bytes()).await.text;
        println!("{}", out);

        assert!(out.starts_with("NOMBRE\n\n"));
        assert!(out.contains("       -q, --quiet, --silent\n"));
    }
}
