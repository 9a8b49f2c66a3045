//! A directory of template sources resolved together

use crate::domain::document::{check_output_name, save, Document};
use crate::domain::options::{ResolveContext, ResolvedOptions};
use crate::domain::syntax::TagSyntax;
use crate::domain::unit::Declarations;
use crate::error::{CustomTexError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extension of template source files
pub const TEMPLATE_EXTENSION: &str = "ctex";
/// Optional per-template delimiter settings
pub const SYNTAX_FILE: &str = "syntax.toml";
/// Optional per-template pre-seeded answers
pub const PRESET_FILE: &str = "preset.yaml";

/// A resolved document: output name and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub name: String,
    pub content: String,
}

/// All documents of a template, sharing one syntax
#[derive(Debug, Clone)]
pub struct TemplateSet {
    name: String,
    syntax: Arc<TagSyntax>,
    preset: ResolvedOptions,
    documents: Vec<Document>,
    declarations: Declarations,
}

impl TemplateSet {
    /// Load every `*.ctex` file under `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("template")
            .to_string();

        let syntax_path = dir.join(SYNTAX_FILE);
        let syntax = if syntax_path.exists() {
            debug!("Loading tag syntax from {}", syntax_path.display());
            TagSyntax::load(&syntax_path)?
        } else {
            TagSyntax::default()
        };

        let preset_path = dir.join(PRESET_FILE);
        let preset = if preset_path.exists() {
            debug!("Loading preset from {}", preset_path.display());
            let contents = fs::read_to_string(&preset_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            ResolvedOptions::new()
        };

        let mut sources = Vec::new();
        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || entry
                        .file_name()
                        .to_str()
                        .is_none_or(|name| !name.starts_with('.'))
            });

        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }
            let Ok(rel) = path.strip_prefix(dir) else {
                continue;
            };
            let Some(rel) = normalize_relative_path(rel) else {
                warn!("Skipping template file with non UTF-8 path: {}", path.display());
                continue;
            };
            debug!("Reading template source {}", rel);
            sources.push((rel, fs::read_to_string(path)?));
        }

        if sources.is_empty() {
            warn!("No .{} files found in {}", TEMPLATE_EXTENSION, dir.display());
        }

        let set = Self::from_sources(&name, syntax, preset, sources)?;
        info!(
            "Loaded template '{}' ({} documents)",
            set.name,
            set.documents.len()
        );
        Ok(set)
    }

    /// Build a set from `(relative source path, text)` pairs
    pub fn from_sources(
        name: &str,
        syntax: TagSyntax,
        preset: ResolvedOptions,
        sources: Vec<(String, String)>,
    ) -> Result<Self> {
        let syntax = Arc::new(syntax);
        let mut documents = Vec::new();

        for (source, text) in &sources {
            for (doc_name, doc_text) in split_documents(source, text, &syntax)? {
                documents.push(Document::new(&doc_name, &doc_text, Arc::clone(&syntax))?);
            }
        }

        documents.sort_by(|a, b| a.name().cmp(b.name()));

        let mut seen = BTreeSet::new();
        let mut declarations = Declarations::new();
        for document in &documents {
            if !seen.insert(document.name()) {
                return Err(CustomTexError::DuplicateDocument(document.name().to_string()));
            }
            for (tag, kind) in document.declarations().iter() {
                declarations.record(tag, kind)?;
            }
        }

        Ok(TemplateSet {
            name: name.to_string(),
            syntax,
            preset,
            documents,
            declarations,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn syntax(&self) -> &TagSyntax {
        &self.syntax
    }

    /// Answers shipped with the template
    pub fn preset(&self) -> &ResolvedOptions {
        &self.preset
    }

    /// Documents in write order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Every name declared anywhere in the set
    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    /// Resolve every document without touching the filesystem
    pub fn render_all(&self, ctx: &mut ResolveContext<'_>) -> Result<Vec<RenderedDocument>> {
        self.documents
            .iter()
            .map(|document| {
                Ok(RenderedDocument {
                    name: document.resolve_name(ctx)?,
                    content: document.process(ctx)?,
                })
            })
            .collect()
    }

    /// Resolve and write every document under `target_dir`.
    ///
    /// Every output path is resolved and checked and every document is
    /// rendered before the first file is written.
    pub fn write_all(
        &self,
        target_dir: &Path,
        ctx: &mut ResolveContext<'_>,
        overwrite: bool,
    ) -> Result<Vec<PathBuf>> {
        let paths = self
            .documents
            .iter()
            .map(|document| document.target_path(target_dir, ctx, overwrite))
            .collect::<Result<Vec<_>>>()?;

        let mut seen = BTreeSet::new();
        for path in &paths {
            if !seen.insert(path) {
                return Err(CustomTexError::DuplicateDocument(path.display().to_string()));
            }
        }

        let contents = self
            .documents
            .iter()
            .map(|document| document.process(ctx))
            .collect::<Result<Vec<_>>>()?;

        if !target_dir.exists() {
            fs::create_dir_all(target_dir)?;
        }
        for (path, content) in paths.iter().zip(&contents) {
            save(path, content)?;
        }
        Ok(paths)
    }
}

/// Split one source file into `(output name, text)` pairs.
///
/// A line consisting only of a file header starts a new document named by the
/// header, relative to the source's directory. Headers are only recognized
/// outside blocks; inside a block the line is ordinary content. A source
/// without headers is a single document named after the source minus its
/// extension.
pub fn split_documents(
    source: &str,
    text: &str,
    syntax: &TagSyntax,
) -> Result<Vec<(String, String)>> {
    let (parent, file) = match source.rsplit_once('/') {
        Some((parent, file)) => (Some(parent), file),
        None => (None, source),
    };
    let qualify = |name: &str| match parent {
        Some(parent) => format!("{}/{}", parent, name),
        None => name.to_string(),
    };

    let mut documents: Vec<(String, String)> = Vec::new();
    let mut leading = String::new();
    let mut open_blocks: Vec<&str> = Vec::new();

    for line in text.split_inclusive('\n') {
        if open_blocks.is_empty() {
            if let Some(path) = syntax.file_header_path(line) {
                check_output_name(path)?;
                documents.push((qualify(path), String::new()));
                continue;
            }
        }

        if let Some(name) = syntax.block_open_name(line) {
            open_blocks.push(name);
        } else if open_blocks
            .last()
            .is_some_and(|name| syntax.is_block_close(line, name))
        {
            open_blocks.pop();
        }

        match documents.last_mut() {
            Some((_, content)) => content.push_str(line),
            None => leading.push_str(line),
        }
    }

    if documents.is_empty() {
        let stem = file
            .strip_suffix(&format!(".{}", TEMPLATE_EXTENSION))
            .unwrap_or(file);
        return Ok(vec![(qualify(stem), leading)]);
    }

    if let Some(line) = leading.lines().find(|line| !line.trim().is_empty()) {
        return Err(CustomTexError::OrphanContent(line.trim_end().to_string()));
    }

    Ok(documents)
}

fn normalize_relative_path(path: &Path) -> Option<String> {
    let parts: Vec<&str> = path
        .iter()
        .map(|part| part.to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}
