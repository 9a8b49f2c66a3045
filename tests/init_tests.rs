//! Integration tests for init, list and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{add_template, config_dir, customtex_cmd, init_config};

#[test]
fn test_init_creates_layout() {
    let temp = TempDir::new().unwrap();
    let dir = config_dir(&temp);

    customtex_cmd()
        .arg("init")
        .arg("--config-dir")
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration directory ready"));

    let config = fs::read_to_string(dir.join("config.yaml")).unwrap();
    assert!(config.contains("default_context:"));
    assert!(config.contains("titlepage:"));
    assert!(dir.join("templates/article/main.ctex").exists());
    assert!(dir.join("templates/article/tex/preamble.tex.ctex").exists());
}

#[test]
fn test_init_uses_env_dir() {
    let temp = TempDir::new().unwrap();
    let dir = config_dir(&temp);

    customtex_cmd()
        .env("CUSTOMTEX_CONFIG_DIR", &dir)
        .arg("init")
        .assert()
        .success();

    assert!(dir.join("config.yaml").exists());
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();
    let dir = init_config(&temp);

    customtex_cmd()
        .arg("init")
        .arg("--config-dir")
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));

    customtex_cmd()
        .arg("init")
        .arg("--reset")
        .arg("--config-dir")
        .arg(&dir)
        .assert()
        .success();
}

#[test]
fn test_missing_config_dir() {
    let temp = TempDir::new().unwrap();

    customtex_cmd()
        .arg("list")
        .arg("--config-dir")
        .arg(config_dir(&temp))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("customtex init"));
}

#[test]
fn test_list_templates() {
    let temp = TempDir::new().unwrap();
    let dir = init_config(&temp);
    add_template(&dir, "beamer", &[("slides.tex.ctex", "slides")]);

    customtex_cmd()
        .arg("list")
        .arg("--config-dir")
        .arg(&dir)
        .assert()
        .success()
        .stdout("article\nbeamer\n");
}

#[test]
fn test_config_set_get_unset() {
    let temp = TempDir::new().unwrap();
    let dir = init_config(&temp);

    customtex_cmd()
        .args(["config", "author", "Ada Lovelace", "--config-dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set author = Ada Lovelace"));

    customtex_cmd()
        .args(["config", "author", "--config-dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout("Ada Lovelace\n");

    customtex_cmd()
        .args(["config", "--list", "--config-dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("author = Ada Lovelace"))
        .stdout(predicate::str::contains("created = "));

    customtex_cmd()
        .args(["config", "author", "--unset", "--config-dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed author"));

    customtex_cmd()
        .args(["config", "author", "--config-dir"])
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No default set for 'author'"));
}

#[test]
fn test_config_rejects_invalid_key() {
    let temp = TempDir::new().unwrap();
    let dir = init_config(&temp);

    customtex_cmd()
        .args(["config", "bad-key", "x", "--config-dir"])
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid key"));
}
