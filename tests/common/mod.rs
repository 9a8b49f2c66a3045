#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn customtex_cmd() -> Command {
    let mut cmd = Command::cargo_bin("customtex").unwrap();
    cmd.env_remove("CUSTOMTEX_CONFIG_DIR");
    cmd.env_remove("CUSTOMTEX_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Configuration directory inside a temp dir
pub fn config_dir(temp: &TempDir) -> PathBuf {
    temp.path().join("config")
}

/// Run `customtex init` into a temp configuration directory
pub fn init_config(temp: &TempDir) -> PathBuf {
    let dir = config_dir(temp);
    customtex_cmd()
        .arg("init")
        .arg("--config-dir")
        .arg(&dir)
        .assert()
        .success();
    dir
}

/// Install a template made of `(relative path, contents)` files
pub fn add_template(config_dir: &Path, name: &str, files: &[(&str, &str)]) {
    let dir = config_dir.join("templates").join(name);
    for (rel, contents) in files {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}
