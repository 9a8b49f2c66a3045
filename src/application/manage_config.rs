//! Config management use case

use crate::domain::syntax::is_valid_name;
use crate::error::{CustomTexError, Result};
use crate::infrastructure::{Config, ConfigRepository, FileSystemRepository};

/// Service for reading and editing the default context
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single default value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        config
            .default_context
            .get(key)
            .map(|v| v.to_string())
            .ok_or_else(|| CustomTexError::Config(format!("No default set for '{}'", key)))
    }

    /// Set a default value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        if !is_valid_name(key) {
            return Err(CustomTexError::Config(format!(
                "Invalid key '{}': keys are tag names (letters, digits, '_')",
                key
            )));
        }

        let mut config = self.repository.load_config()?;
        config.default_context.set(key, value);
        self.repository.save_config(&config)
    }

    /// Remove a default value, returning whether it was present
    pub fn unset(&self, key: &str) -> Result<bool> {
        let mut config = self.repository.load_config()?;

        let removed = config.default_context.remove(key).is_some();
        if removed {
            self.repository.save_config(&config)?;
        }

        Ok(removed)
    }

    /// Full configuration
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
