//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn sitectl() -> Command {
    let mut cmd = Command::cargo_bin("sitectl").unwrap();
    cmd.env_remove("SITECTL_ADMIN_USER")
        .env_remove("SITECTL_ADMIN_PASSWORD")
        .env("SITECTL_CONFIG", "/nonexistent/sitectl/config.toml");
    cmd
}

#[test]
fn test_top_level_help_lists_commands() {
    sitectl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("admin"));
}

#[test]
fn test_serve_help() {
    sitectl()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database URL"));
}

#[test]
fn test_news_delete_help_mentions_confirmation() {
    sitectl()
        .args(["admin", "news", "delete", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("must be exactly DELETE"));
}

#[test]
fn test_visas_add_requires_file() {
    sitectl()
        .args(["admin", "visas", "add"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file"));
}

#[test]
fn test_image_file_and_url_conflict() {
    sitectl()
        .args([
            "admin", "news", "add", "--title", "T", "--content", "C",
            "--image-file", "a.png", "--image-url", "http://x/a.png",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_wrong_password_is_rejected() {
    sitectl()
        .args(["admin", "-u", "admin", "-p", "wrong", "jobs", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
}

#[test]
fn test_delete_with_wrong_token_is_cancelled() {
    sitectl()
        .args([
            "admin", "-u", "admin", "-p", "1234", "news", "delete", "some-article", "--confirm", "delete",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Deletion cancelled"));
}

#[test]
fn test_migrate_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("site.sqlite");
    let url = format!("sqlite://{}", db.display());

    sitectl()
        .args(["migrate", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied"));
    assert!(db.exists());

    sitectl()
        .args(["migrate", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema is up to date"));

    sitectl()
        .args(["migrate", "--status", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("7 applied, 0 pending"));
}

#[test]
fn test_migrate_status_leaves_missing_database_alone() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("absent.sqlite");
    let url = format!("sqlite://{}", db.display());

    sitectl()
        .args(["migrate", "--status", "--database-url", &url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open database"));
    assert!(!db.exists());
}
