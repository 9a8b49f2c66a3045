//! Generate a project from a template use case

use crate::domain::{Prompter, RenderedDocument, ResolveContext, ResolvedOptions, TemplateSet};
use crate::error::{CustomTexError, Result};
use crate::infrastructure::{ConfigRepository, FileSystemRepository};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Options for generating a project
#[derive(Debug, Clone)]
pub struct NewProjectOptions {
    /// Installed template name
    pub template: String,
    /// Directory the project is written into
    pub output_dir: PathBuf,
    /// Values given on the command line; these win over everything else
    pub overrides: ResolvedOptions,
    /// Seed answers from the config file's default_context
    pub use_config: bool,
    /// Accept template defaults instead of asking
    pub use_defaults: bool,
    /// Replace files that already exist
    pub overwrite: bool,
    /// Resolve everything but write nothing
    pub dry_run: bool,
    /// Write the final answers to this YAML file
    pub save_options: Option<PathBuf>,
}

impl NewProjectOptions {
    pub fn new(template: &str, output_dir: PathBuf) -> Self {
        NewProjectOptions {
            template: template.to_string(),
            output_dir,
            overrides: ResolvedOptions::new(),
            use_config: true,
            use_defaults: false,
            overwrite: false,
            dry_run: false,
            save_options: None,
        }
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct NewProjectOutcome {
    /// Files written (empty on a dry run)
    pub written: Vec<PathBuf>,
    /// Resolved documents (only filled on a dry run)
    pub rendered: Vec<RenderedDocument>,
    /// Every answer used, including prompted ones
    pub options: ResolvedOptions,
}

/// Service for generating projects
pub struct NewProjectService {
    repository: FileSystemRepository,
}

impl NewProjectService {
    pub fn new(repository: FileSystemRepository) -> Self {
        NewProjectService { repository }
    }

    /// Load, resolve and write a template
    pub fn execute(
        &self,
        options: &NewProjectOptions,
        prompter: &mut dyn Prompter,
    ) -> Result<NewProjectOutcome> {
        let template_dir = self.repository.template_dir(&options.template)?;
        let set = TemplateSet::load(&template_dir)?;

        let mut answers = self.seed(&set, options)?;
        debug!("Seeded {} answers", answers.len());

        let mut ctx = ResolveContext::new(&mut answers, options.use_defaults, prompter);
        let (written, rendered) = if options.dry_run {
            (Vec::new(), set.render_all(&mut ctx)?)
        } else {
            let written = set.write_all(&options.output_dir, &mut ctx, options.overwrite)?;
            info!(
                "Generated {} files from '{}' in {}",
                written.len(),
                set.name(),
                options.output_dir.display()
            );
            (written, Vec::new())
        };

        if let Some(path) = &options.save_options {
            save_answers(path, &answers)?;
        }

        Ok(NewProjectOutcome {
            written,
            rendered,
            options: answers,
        })
    }

    /// Template preset, then config defaults, then command-line values
    fn seed(&self, set: &TemplateSet, options: &NewProjectOptions) -> Result<ResolvedOptions> {
        let mut answers = set.preset().clone();

        if options.use_config {
            let config = self.repository.load_config()?;
            answers.extend(config.default_context);
        }

        answers.extend(options.overrides.clone());
        Ok(answers)
    }
}

fn save_answers(path: &PathBuf, answers: &ResolvedOptions) -> Result<()> {
    let contents = serde_yaml::to_string(answers)
        .map_err(|e| CustomTexError::Config(format!("Failed to serialize answers: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;

    debug!("Saved answers to {}", path.display());
    Ok(())
}
