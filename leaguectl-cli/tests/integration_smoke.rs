//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `leaguectl` isolated from the caller's environment and any .env file
fn leaguectl(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("leaguectl").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG")
        .env_remove("LEAGUECTL_STORE")
        .env_remove("LEAGUECTL_BIND")
        .env_remove("DATABASE_URL")
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_ANON_KEY");
    cmd
}

// === Help ===

#[test]
fn test_top_level_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    leaguectl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("news"));
}

#[test]
fn test_serve_help() {
    let dir = TempDir::new().unwrap();
    leaguectl(&dir)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_news_help() {
    let dir = TempDir::new().unwrap();
    leaguectl(&dir)
        .args(["news", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Only featured articles"));
}

// === Config ===

#[test]
fn test_config_init_then_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("league.toml");

    leaguectl(&dir)
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("backend = \"memory\""));

    leaguectl(&dir)
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_show_masks_secrets() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("league.toml");
    std::fs::write(
        &path,
        "[store]\nbackend = \"rest\"\nrest_url = \"https://demo.supabase.co\"\napi_key = \"secret-anon-key\"\n",
    )
    .unwrap();

    leaguectl(&dir)
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://demo.supabase.co"))
        .stdout(predicate::str::contains("secret-anon-key").not());
}

#[test]
fn test_config_path_honours_flag() {
    let dir = TempDir::new().unwrap();
    leaguectl(&dir)
        .args(["--config", "/tmp/elsewhere.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/elsewhere.toml"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    leaguectl(&dir)
        .args(["--config", "does-not-exist.toml", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

// === Reads over the memory store ===

#[test]
fn test_stats_on_empty_memory_store() {
    let dir = TempDir::new().unwrap();
    leaguectl(&dir)
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalTeams\": 0"))
        .stdout(predicate::str::contains("\"totalItems\": 0"));
}

#[test]
fn test_news_on_empty_memory_store() {
    let dir = TempDir::new().unwrap();
    leaguectl(&dir)
        .args(["news", "--featured", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No published news."));
}

#[test]
fn test_news_rejects_non_numeric_limit() {
    let dir = TempDir::new().unwrap();
    leaguectl(&dir)
        .args(["news", "--limit", "abc"])
        .assert()
        .failure();
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    leaguectl(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leaguectl"));
}
