//! Output formatting utilities

use crate::domain::RenderedDocument;
use crate::infrastructure::Config;
use colored::Colorize;

/// Informational line
pub fn info(message: &str) -> String {
    format!("{} {}", "(i)".yellow().bold(), message)
}

/// Success line
pub fn success(message: &str) -> String {
    format!("{} {}", "(\u{2713})".green().bold(), message)
}

/// Error line
pub fn error(message: &str) -> String {
    format!("{} {}", "Error:".red().bold(), message)
}

/// Format the list of installed templates
pub fn format_template_list(templates: &[String]) -> String {
    if templates.is_empty() {
        return "No templates found".to_string();
    }

    let mut output = String::new();
    for template in templates {
        output.push_str(&format!("{}\n", template));
    }
    output
}

/// Format the configuration for `config --list`
pub fn format_config(config: &Config) -> String {
    let mut output = format!("created = {}\n", config.created.to_rfc3339());
    for (key, value) in config.default_context.iter() {
        output.push_str(&format!("{} = {}\n", key, value));
    }
    output
}

/// Format resolved documents for a dry run
pub fn format_rendered(documents: &[RenderedDocument]) -> String {
    let mut output = String::new();
    for document in documents {
        output.push_str(&format!("==> {} <==\n", document.name));
        output.push_str(&document.content);
        if !document.content.ends_with('\n') {
            output.push('\n');
        }
    }
    output
}
