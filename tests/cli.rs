use mantr::compute_cache_key;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

/// The binary pinned to an Argos program that does not exist, so every
/// translation degrades to the source text without touching the network.
fn cmd(cache: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_mantr")));
    cmd.env("BACKEND", "argos")
        .env("ARGOS_BIN", "/nonexistent/argos-translate")
        .env("MANTR_CACHE_DIR", cache.path())
        .env_remove("MANTR_CMD")
        .env_remove("MANTR_OVERRIDES")
        .env_remove("RUST_LOG")
        .arg("--no-pager");
    cmd
}

const PAGE: &str = "--- section ---\nNAME\n--- text ---\ngrep - print lines that match patterns\n\
--- section ---\nSYNOPSIS\n--- text ---\ngrep  [OPTION...]\n    PATTERNS [FILE...]\n\
--- section ---\nEXAMPLES\n--- code ---\n  $ grep -i hello *.txt\n--- /code ---\n";

#[test]
fn cli_empty_input_prints_nothing() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(std::fs::read_dir(cache.path()).unwrap().count(), 0);
}

#[test]
fn cli_renders_page() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .write_stdin(PAGE)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "NOMBRE\n\ngrep - print lines that match patterns\n\n",
        ))
        .stdout(predicate::str::contains(
            "SINOPSIS\n\ngrep [OPTION...] PATTERNS [FILE...]\n\n",
        ))
        .stdout(predicate::str::contains("EXAMPLES\n\n  $ grep -i hello *.txt\n"));
}

#[test]
fn cli_other_target_keeps_titles() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .arg("fr")
        .write_stdin(PAGE)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("NAME\n\n"))
        .stdout(predicate::str::contains("SYNOPSIS\n\n"));
}

#[test]
fn cli_writes_cache_entry() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .args(["--command", "/usr/bin/grep"])
        .write_stdin(PAGE)
        .assert()
        .success();

    let key = compute_cache_key("/usr/bin/grep", "es", "argos", PAGE.as_bytes());
    let stored = std::fs::read_to_string(cache.path().join(key.file_name())).unwrap();
    assert!(stored.starts_with("NOMBRE\n\n"));
}

#[test]
fn cli_serves_cached_page() {
    let cache = TempDir::new().unwrap();
    let key = compute_cache_key("grep", "es", "argos", PAGE.as_bytes());
    std::fs::write(cache.path().join(key.file_name()), "cached page\n").unwrap();

    cmd(&cache)
        .env("MANTR_CMD", "grep")
        .write_stdin(PAGE)
        .assert()
        .success()
        .stdout("cached page\n");
}

#[test]
fn cli_no_cache_ignores_stored_page() {
    let cache = TempDir::new().unwrap();
    let key = compute_cache_key("unknown", "es", "argos", PAGE.as_bytes());
    std::fs::write(cache.path().join(key.file_name()), "cached page\n").unwrap();

    cmd(&cache)
        .arg("--no-cache")
        .write_stdin(PAGE)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("NOMBRE\n\n"));
}

#[test]
fn cli_rejects_unknown_backend() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .env("BACKEND", "google")
        .write_stdin(PAGE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("google"));
}

#[test]
fn cli_missing_overrides_file_fails() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .args(["--overrides", "/nonexistent/overrides.json"])
        .write_stdin(PAGE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("overrides.json"));
}
