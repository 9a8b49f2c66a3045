//! Configuration directory: config file and installed templates

use crate::domain::builtin::{BuiltinTemplate, DEFAULT_TEMPLATE};
use crate::error::{CustomTexError, Result};
use crate::infrastructure::config::CONFIG_FILE;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Folder holding one directory per template
pub const TEMPLATES_FOLDER: &str = "templates";

/// Environment variable pointing at the configuration directory
pub const CONFIG_DIR_ENV: &str = "CUSTOMTEX_CONFIG_DIR";

/// Abstract repository for the configuration directory
pub trait ConfigRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from config.yaml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to config.yaml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if config.yaml exists
    fn is_initialized(&self) -> bool;

    /// Create the directory structure, default config and built-in template
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of ConfigRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Locate the configuration directory.
    /// An explicit path wins, then CUSTOMTEX_CONFIG_DIR, then ~/.customtex
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(FileSystemRepository::new(path.to_path_buf()));
        }

        if let Ok(root_path) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(FileSystemRepository::new(PathBuf::from(root_path)));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            CustomTexError::Config(format!(
                "Cannot determine home directory; set {} or pass --config-dir",
                CONFIG_DIR_ENV
            ))
        })?;
        Ok(FileSystemRepository::new(home.join(".customtex")))
    }

    /// Locate and require an initialized directory
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let repo = Self::locate(explicit)?;
        if !repo.is_initialized() {
            return Err(CustomTexError::NotConfigDirectory(repo.root));
        }
        debug!("Using configuration directory {}", repo.root.display());
        Ok(repo)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_FOLDER)
    }

    /// Directory of an installed template
    pub fn template_dir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.templates_dir().join(name);
        if name.is_empty() || name.contains(['/', '\\']) || !dir.is_dir() {
            return Err(CustomTexError::TemplateNotFound(name.to_string()));
        }
        Ok(dir)
    }

    /// Names of installed templates, sorted
    pub fn list_templates(&self) -> Result<Vec<String>> {
        let dir = self.templates_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Replace the config file and the built-in template with fresh copies.
    /// Other installed templates are left alone.
    pub fn reset(&self) -> Result<()> {
        fs::create_dir_all(self.templates_dir())?;
        self.save_config(&Config::new())?;
        BuiltinTemplate::from_name(DEFAULT_TEMPLATE)?
            .install(&self.templates_dir().join(DEFAULT_TEMPLATE))?;
        info!("Reset configuration directory {}", self.root.display());
        Ok(())
    }
}

impl ConfigRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        self.root.join(CONFIG_FILE).is_file()
    }

    fn initialize(&self) -> Result<()> {
        if self.is_initialized() {
            return Err(CustomTexError::Config(format!(
                "Directory already initialized: {} (use --reset to start over)",
                self.root.display()
            )));
        }

        self.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_layout() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().join("config"));

        assert!(!repo.is_initialized());
        repo.initialize().unwrap();

        assert!(repo.is_initialized());
        assert!(repo.root.join(CONFIG_FILE).is_file());
        assert!(repo.templates_dir().is_dir());
        assert!(repo.template_dir(DEFAULT_TEMPLATE).is_ok());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();

        let result = repo.initialize();
        assert!(matches!(result, Err(CustomTexError::Config(_))));
    }

    #[test]
    fn test_reset_restores_config() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();

        let mut config = repo.load_config().unwrap();
        config.default_context.set("author", "Someone");
        repo.save_config(&config).unwrap();

        repo.reset().unwrap();
        let config = repo.load_config().unwrap();
        assert_eq!(config.default_context.get("author"), None);
    }

    #[test]
    fn test_list_templates() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        fs::create_dir_all(repo.templates_dir().join("beamer")).unwrap();
        fs::create_dir_all(repo.templates_dir().join(".hidden")).unwrap();
        fs::write(repo.templates_dir().join("notes.txt"), "").unwrap();

        assert_eq!(repo.list_templates().unwrap(), vec!["article", "beamer"]);
    }

    #[test]
    fn test_template_dir_missing() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();

        assert!(matches!(
            repo.template_dir("thesis"),
            Err(CustomTexError::TemplateNotFound(_))
        ));
        assert!(matches!(
            repo.template_dir("../article"),
            Err(CustomTexError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_discover_requires_config() {
        let temp = TempDir::new().unwrap();
        let result = FileSystemRepository::discover(Some(temp.path()));
        assert!(matches!(result, Err(CustomTexError::NotConfigDirectory(_))));

        FileSystemRepository::new(temp.path().to_path_buf())
            .initialize()
            .unwrap();
        let repo = FileSystemRepository::discover(Some(temp.path())).unwrap();
        assert_eq!(repo.root(), temp.path());
    }
}
