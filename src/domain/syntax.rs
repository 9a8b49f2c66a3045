//! Tag delimiters and the patterns derived from them
//!
//! Every parser in the engine matches tags through the patterns built here,
//! never through literal delimiters. A template may override the delimiters
//! in its `syntax.toml`.

use crate::error::{CustomTexError, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Pattern for tag, block and subblock names
const NAME: &str = r"[A-Za-z_][A-Za-z0-9_]*";

/// Delimiters of the tag language plus the compiled patterns built from them
#[derive(Debug, Clone)]
pub struct TagSyntax {
    start: String,
    end: String,
    separator: String,
    variable: Regex,
    multi: Regex,
    block_open: Regex,
    file_header: Regex,
}

/// On-disk form of a template's `syntax.toml`
#[derive(Debug, Deserialize)]
struct SyntaxFile {
    start_tag: String,
    end_tag: String,
    options_separator: String,
}

impl TagSyntax {
    /// Build a syntax from its three delimiters; none may be empty
    pub fn new(start: &str, end: &str, separator: &str) -> Result<Self> {
        if start.is_empty() {
            return Err(CustomTexError::InvalidSyntax(
                "start tag cannot be empty".to_string(),
            ));
        }
        if end.is_empty() {
            return Err(CustomTexError::InvalidSyntax(
                "end tag cannot be empty".to_string(),
            ));
        }
        if separator.is_empty() {
            return Err(CustomTexError::InvalidSyntax(
                "options separator cannot be empty".to_string(),
            ));
        }

        let s = regex::escape(start);
        let e = regex::escape(end);

        Ok(TagSyntax {
            start: start.to_string(),
            end: end.to_string(),
            separator: separator.to_string(),
            variable: compile(&format!(r"{s}var:({NAME})(?:=(.*?))?{e}"))?,
            multi: compile(&format!(r"{s}multi:({NAME})(?:(==?)(.*?))?{e}"))?,
            block_open: compile(&format!(r"^{s}block:({NAME}){e}$"))?,
            file_header: compile(&format!(r"^{s}file:(\S+?){e}$"))?,
        })
    }

    /// Parse a `syntax.toml` document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: SyntaxFile = toml::from_str(contents)?;
        Self::new(&file.start_tag, &file.end_tag, &file.options_separator)
    }

    /// Load `syntax.toml` from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Variable tags: captures name and optional default
    pub fn variable_pattern(&self) -> &Regex {
        &self.variable
    }

    /// Multi-option tags: captures name, optional `=`/`==` marker and option list
    pub fn multi_pattern(&self) -> &Regex {
        &self.multi
    }

    /// Name of the block opened by this line, if it is a block-open line
    pub fn block_open_name<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.block_open
            .captures(strip_line_ending(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Whether this line opens any block
    pub fn is_block_open(&self, line: &str) -> bool {
        self.block_open_name(line).is_some()
    }

    /// The exact close tag for a block name
    pub fn block_close_tag(&self, name: &str) -> String {
        format!("{}endblock:{}{}", self.start, name, self.end)
    }

    /// Whether this line closes the block with the given name
    pub fn is_block_close(&self, line: &str, name: &str) -> bool {
        strip_line_ending(line) == self.block_close_tag(name)
    }

    /// Line pattern for subblock tags belonging to `parent`; captures the subblock name
    pub fn subblock_pattern(&self, parent: &str) -> Result<Regex> {
        compile(&format!(
            r"^{}{}:({NAME}){}$",
            regex::escape(&self.start),
            regex::escape(parent),
            regex::escape(&self.end)
        ))
    }

    /// Output path declared by a file-header line
    pub fn file_header_path<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.file_header
            .captures(strip_line_ending(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Split a multi-option list on the separator
    pub fn split_options(&self, list: &str) -> Vec<String> {
        list.split(self.separator.as_str())
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for TagSyntax {
    fn default() -> Self {
        // Fixed non-empty delimiters always build
        Self::new("<", ">", "|").unwrap()
    }
}

/// Whether `name` is a valid tag name
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Drop a trailing `\n` or `\r\n`
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| CustomTexError::InvalidSyntax(e.to_string()))
}
