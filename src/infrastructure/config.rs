//! User configuration (`config.yaml`)

use crate::domain::builtin::DEFAULT_CONTEXT;
use crate::domain::ResolvedOptions;
use crate::error::{CustomTexError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the config file inside the configuration directory
pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Answers used to pre-seed every generated project
    #[serde(default)]
    pub default_context: ResolvedOptions,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            default_context: DEFAULT_CONTEXT.iter().copied().collect(),
            created: Utc::now(),
        }
    }

    /// Load config from config.yaml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CustomTexError::NotConfigDirectory(path.to_path_buf())
            } else {
                CustomTexError::Io(e)
            }
        })?;

        serde_yaml::from_str(&contents)
            .map_err(|e| CustomTexError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))
    }

    /// Save config to config.yaml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let contents = serde_yaml::to_string(self)
            .map_err(|e| CustomTexError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path.join(CONFIG_FILE), contents)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config_has_block_answers() {
        let config = Config::new();
        assert_eq!(config.default_context.get("titlepage"), Some("yes"));
        assert_eq!(config.default_context.get("margins"), Some("normal"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new();
        config.default_context.set("author", "Example Name");
        config.default_context.set("title", "Example title");

        config.save_to_dir(temp.path()).unwrap();

        let yaml = fs::read_to_string(temp.path().join(CONFIG_FILE)).unwrap();
        assert!(yaml.contains("default_context:"));
        assert!(yaml.contains("author: Example Name"));
        assert!(yaml.contains("title: Example title"));

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.default_context, config.default_context);
        assert_eq!(loaded.created, config.created);
    }

    #[test]
    fn test_load_without_created() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "default_context:\n  author: Example Name\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.default_context.get("author"), Some("Example Name"));
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            CustomTexError::NotConfigDirectory(_) => {}
            other => panic!("Expected NotConfigDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "default_context: [1, 2").unwrap();

        let result = Config::load_from_dir(temp.path());
        assert!(matches!(result, Err(CustomTexError::Config(_))));
    }
}
