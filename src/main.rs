use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command, value_parser};
use mantr::config::{Backend, DEFAULT_TIMEOUT_SECS, default_cache_dir};
use mantr::mt::argos::DEFAULT_ARGOS_BIN;
use mantr::mt::hugging_face::DEFAULT_HF_API_URL;
use mantr::mt::libre_translate::DEFAULT_LIBRE_URL;
use mantr::{Pipeline, Settings, pager};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("mantr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate a segmented manual page read from stdin")
        .arg(
            Arg::new("target")
                .help("Target language code (e.g., es, fr, de)")
                .default_value("es")
                .index(1),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Source language code")
                .default_value("en"),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .short('b')
                .env("BACKEND")
                .help("Translation backend; auto tries argos, libre, then hf")
                .value_parser(Backend::NAMES)
                .default_value("auto"),
        )
        .arg(
            Arg::new("libre-url")
                .long("libre-url")
                .env("LIBRE_URL")
                .help("LibreTranslate /translate endpoint")
                .default_value(DEFAULT_LIBRE_URL),
        )
        .arg(
            Arg::new("libre-api-key")
                .long("libre-api-key")
                .env("LIBRE_API_KEY")
                .hide_env_values(true)
                .help("API key for LibreTranslate instances that require one"),
        )
        .arg(
            Arg::new("hf-url")
                .long("hf-url")
                .env("HF_API_URL")
                .help("Base URL of the Hugging Face inference API")
                .default_value(DEFAULT_HF_API_URL),
        )
        .arg(
            Arg::new("hf-token")
                .long("hf-token")
                .env("HF_TOKEN")
                .hide_env_values(true)
                .help("Hugging Face access token"),
        )
        .arg(
            Arg::new("argos-bin")
                .long("argos-bin")
                .env("ARGOS_BIN")
                .help("Argos Translate command line program")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_ARGOS_BIN),
        )
        .arg(
            Arg::new("cache-dir")
                .long("cache-dir")
                .env("MANTR_CACHE_DIR")
                .help("Directory of cached pages (default: ~/.cache/mantr)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("no-cache")
                .long("no-cache")
                .help("Neither read nor write the cache")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("command")
                .long("command")
                .short('c')
                .env("MANTR_CMD")
                .help("Name of the page being translated, used in cache file names")
                .default_value("unknown"),
        )
        .arg(
            Arg::new("overrides")
                .long("overrides")
                .env("MANTR_OVERRIDES")
                .help("JSON file of extra phrase overrides for Spanish output")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Seconds allowed per backend call")
                .value_parser(value_parser!(u64))
                .default_value("15"),
        )
        .arg(
            Arg::new("no-pager")
                .long("no-pager")
                .help("Write to stdout instead of piping through less")
                .action(ArgAction::SetTrue),
        )
}

fn settings_from(matches: &clap::ArgMatches) -> Result<Settings> {
    let string = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();
    let secret = |id: &str| {
        matches
            .get_one::<String>(id)
            .filter(|s| !s.trim().is_empty())
            .cloned()
    };

    let backend: Backend = string("backend").parse()?;
    let cache_dir = if matches.get_flag("no-cache") {
        None
    } else {
        matches
            .get_one::<PathBuf>("cache-dir")
            .cloned()
            .or_else(default_cache_dir)
    };

    Ok(Settings {
        source: string("source"),
        target: string("target"),
        backend,
        libre_url: string("libre-url"),
        libre_api_key: secret("libre-api-key"),
        hf_url: string("hf-url"),
        hf_token: secret("hf-token"),
        argos_bin: matches
            .get_one::<PathBuf>("argos-bin")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARGOS_BIN)),
        cache_dir,
        command: string("command"),
        overrides: matches.get_one::<PathBuf>("overrides").cloned(),
        timeout_secs: matches
            .get_one::<u64>("timeout")
            .copied()
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let settings = settings_from(&matches)?;

    let mut raw = Vec::new();
    std::io::stdin()
        .read_to_end(&mut raw)
        .context("failed to read stdin")?;
    if raw.is_empty() {
        return Ok(());
    }

    let pipeline = Pipeline::from_settings(&settings).context("failed to set up translation")?;
    let rendered = pipeline.run(&raw).await;

    let use_pager = !matches.get_flag("no-pager") && std::io::stdout().is_terminal();
    pager::display(&rendered.text, use_pager).context("failed to write output")?;
    Ok(())
}
