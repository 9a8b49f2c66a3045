//! Error types for customtex

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for customtex
#[derive(Debug, Error)]
pub enum CustomTexError {
    #[error("Invalid tag syntax: {0}")]
    InvalidSyntax(String),

    #[error("Duplicate default for '{0}'")]
    DuplicateDefault(String),

    #[error("Multioption '{0}' is referenced before it is defined")]
    UndefinedMultiOption(String),

    #[error("Name '{0}' is declared as more than one kind of tag")]
    NameCollision(String),

    #[error("Content outside of any subblock: '{0}'")]
    OrphanContent(String),

    #[error("Subblock '{subblock}' declared twice in block '{block}'")]
    DuplicateBlock { block: String, subblock: String },

    #[error("Malformed block: {0}")]
    MalformedBlock(String),

    #[error("Block '{0}' is never closed")]
    UnclosedBlock(String),

    #[error("Output path '{0}' must stay inside the output directory")]
    UnsafePath(String),

    #[error("More than one document writes to '{0}'")]
    DuplicateDocument(String),

    #[error("Block '{block}' has no subblock named '{value}'")]
    UnknownSubblock { block: String, value: String },

    #[error("Invalid selection {index} for '{name}' (expected 1-{count})")]
    InvalidSelection {
        name: String,
        index: usize,
        count: usize,
    },

    #[error("No value for '{0}'")]
    MissingValue(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("File already exists: {0}")]
    FileExists(PathBuf),

    #[error("Not a customtex configuration directory: {0}")]
    NotConfigDirectory(PathBuf),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CustomTexError {
    /// Whether this error is a grammar violation found while parsing a template
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            CustomTexError::InvalidSyntax(_)
                | CustomTexError::DuplicateDefault(_)
                | CustomTexError::UndefinedMultiOption(_)
                | CustomTexError::NameCollision(_)
                | CustomTexError::OrphanContent(_)
                | CustomTexError::DuplicateBlock { .. }
                | CustomTexError::MalformedBlock(_)
                | CustomTexError::UnclosedBlock(_)
                | CustomTexError::DuplicateDocument(_)
                | CustomTexError::UnsafePath(_)
        )
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CustomTexError::NotConfigDirectory(_) => 2,
            CustomTexError::TemplateNotFound(_) => 3,
            CustomTexError::FileExists(_) => 4,
            CustomTexError::MissingValue(_) | CustomTexError::Prompt(_) => 5,
            e if e.is_template_error() => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            CustomTexError::NotConfigDirectory(path) => {
                format!(
                    "Not a customtex configuration directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'customtex init' to create the configuration directory\n\
                    • Pass --config-dir to point at an existing one\n\
                    • Set CUSTOMTEX_CONFIG_DIR environment variable",
                    path.display()
                )
            }
            CustomTexError::TemplateNotFound(name) => {
                format!(
                    "Template not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'customtex list' to see installed templates\n\
                    • Run 'customtex init --reset' to restore the built-in 'article' template",
                    name
                )
            }
            CustomTexError::FileExists(path) => {
                format!(
                    "File already exists: {}\n\n\
                    Use --overwrite to replace existing files.",
                    path.display()
                )
            }
            CustomTexError::MissingValue(name) => {
                format!(
                    "No value for '{}' and prompting is disabled\n\n\
                    Suggestions:\n\
                    • Pass it on the command line: --set {}=<value>\n\
                    • Store it in your configuration: customtex config {} <value>\n\
                    • Use --defaults to accept template defaults",
                    name, name, name
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using CustomTexError
pub type Result<T> = std::result::Result<T, CustomTexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_config_directory_suggestion() {
        let err = CustomTexError::NotConfigDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("customtex init"));
        assert!(msg.contains("CUSTOMTEX_CONFIG_DIR"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_template_not_found_suggestions() {
        let err = CustomTexError::TemplateNotFound("thesis".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'thesis'"));
        assert!(msg.contains("customtex list"));
    }

    #[test]
    fn test_missing_value_suggestions() {
        let err = CustomTexError::MissingValue("author".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("--set author=<value>"));
        assert!(msg.contains("customtex config author"));
        assert!(msg.contains("--defaults"));
    }

    #[test]
    fn test_file_exists_mentions_overwrite() {
        let err = CustomTexError::FileExists(PathBuf::from("out/main.tex"));
        assert!(err.display_with_suggestions().contains("--overwrite"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CustomTexError::NotConfigDirectory(PathBuf::from("x")).exit_code(),
            2
        );
        assert_eq!(CustomTexError::TemplateNotFound("x".into()).exit_code(), 3);
        assert_eq!(CustomTexError::FileExists(PathBuf::from("x")).exit_code(), 4);
        assert_eq!(CustomTexError::MissingValue("x".into()).exit_code(), 5);
        assert_eq!(CustomTexError::UnclosedBlock("x".into()).exit_code(), 6);
        assert_eq!(CustomTexError::Config("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_unsafe_path_is_a_template_error() {
        let err = CustomTexError::UnsafePath("../x.tex".to_string());
        assert!(err.is_template_error());
        assert!(err.to_string().contains("'../x.tex'"));
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = CustomTexError::Config("bad key".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Configuration error: bad key");
    }
}
