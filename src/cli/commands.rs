//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "customtex")]
#[command(about = "Generate LaTeX projects from templates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration directory (default: $CUSTOMTEX_CONFIG_DIR or ~/.customtex)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the configuration directory with the built-in template
    Init {
        /// Restore the default configuration and built-in template
        #[arg(long)]
        reset: bool,
    },

    /// Create a new LaTeX project from a template
    New {
        /// Template to use
        #[arg(default_value = "article")]
        template: String,

        /// Directory to write the project into (default: current directory)
        #[arg(default_value = ".")]
        output_dir: PathBuf,

        /// Answer a tag up front (repeatable)
        #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Author name
        #[arg(long)]
        author: Option<String>,

        /// Document date
        #[arg(long)]
        date: Option<String>,

        /// Accept template defaults instead of asking
        #[arg(short, long)]
        defaults: bool,

        /// Fail instead of asking for missing values
        #[arg(long)]
        no_prompt: bool,

        /// Ignore the default_context of the configuration file
        #[arg(long)]
        no_config: bool,

        /// Overwrite existing files
        #[arg(long)]
        overwrite: bool,

        /// Print the resolved files instead of writing them
        #[arg(long)]
        dry_run: bool,

        /// Save every answer to this YAML file
        #[arg(long, value_name = "FILE")]
        save_options: Option<PathBuf>,
    },

    /// View or modify default answers
    Config {
        /// Key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,

        /// Remove the key
        #[arg(long, requires = "key")]
        unset: bool,
    },

    /// List installed templates
    List,
}

/// Parse `KEY=VALUE`
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}
