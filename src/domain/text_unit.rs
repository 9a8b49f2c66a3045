//! Plain text units: variables and multi-option choices

use crate::domain::options::{ResolveContext, ResolvedOptions};
use crate::domain::prompt::{choose, ChoiceKind};
use crate::domain::syntax::TagSyntax;
use crate::domain::unit::TagKind;
use crate::error::{CustomTexError, Result};
use std::ops::Range;
use tracing::debug;

/// A variable declared in a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub default: Option<String>,
}

/// A multi-option declared in a unit; `options[0]` is the default when marked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiOption {
    pub name: String,
    pub options: Vec<String>,
    pub default_marked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Tag(String),
}

/// A tag occurrence found while scanning
enum Found {
    Variable {
        name: String,
        default: Option<String>,
    },
    Multi {
        name: String,
        definition: Option<(bool, Vec<String>)>,
    },
}

/// Text without blocks, parsed once into literal runs and tag references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pieces: Vec<Piece>,
    variables: Vec<Variable>,
    multi_options: Vec<MultiOption>,
}

impl TextUnit {
    /// Scan `text` for variable and multi-option tags
    pub fn parse(text: &str, syntax: &TagSyntax) -> Result<Self> {
        let mut found: Vec<(Range<usize>, Found)> = Vec::new();

        for caps in syntax.variable_pattern().captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            found.push((
                whole.range(),
                Found::Variable {
                    name: caps[1].to_string(),
                    default: caps.get(2).map(|m| m.as_str().to_string()),
                },
            ));
        }

        for caps in syntax.multi_pattern().captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let definition = match (caps.get(2), caps.get(3)) {
                (Some(marker), Some(list)) => Some((
                    marker.as_str() == "==",
                    syntax.split_options(list.as_str()),
                )),
                _ => None,
            };
            found.push((
                whole.range(),
                Found::Multi {
                    name: caps[1].to_string(),
                    definition,
                },
            ));
        }

        found.sort_by_key(|(range, _)| range.start);

        let mut unit = TextUnit {
            pieces: Vec::new(),
            variables: Vec::new(),
            multi_options: Vec::new(),
        };
        let mut cursor = 0;

        for (range, tag) in found {
            // A tag inside another tag's default is part of that default
            if range.start < cursor {
                continue;
            }
            if range.start > cursor {
                unit.pieces
                    .push(Piece::Literal(text[cursor..range.start].to_string()));
            }

            let name = match tag {
                Found::Variable { name, default } => {
                    unit.declare_variable(&name, default)?;
                    name
                }
                Found::Multi { name, definition } => {
                    if definition.as_ref().is_some_and(|(_, options)| options.len() < 2) {
                        return Err(CustomTexError::InvalidSyntax(format!(
                            "multioption '{}' needs at least two options separated by '{}'",
                            name,
                            syntax.separator()
                        )));
                    }
                    unit.declare_multi(&name, definition)?;
                    name
                }
            };
            unit.pieces.push(Piece::Tag(name));
            cursor = range.end;
        }

        if cursor < text.len() {
            unit.pieces.push(Piece::Literal(text[cursor..].to_string()));
        }

        Ok(unit)
    }

    fn declare_variable(&mut self, name: &str, default: Option<String>) -> Result<()> {
        if self.multi_options.iter().any(|m| m.name == name) {
            return Err(CustomTexError::NameCollision(name.to_string()));
        }

        match self.variables.iter_mut().find(|v| v.name == name) {
            Some(existing) => match (&existing.default, default) {
                (Some(_), Some(_)) => {
                    return Err(CustomTexError::DuplicateDefault(name.to_string()))
                }
                (None, Some(default)) => existing.default = Some(default),
                _ => {}
            },
            None => self.variables.push(Variable {
                name: name.to_string(),
                default,
            }),
        }

        Ok(())
    }

    fn declare_multi(&mut self, name: &str, definition: Option<(bool, Vec<String>)>) -> Result<()> {
        if self.variables.iter().any(|v| v.name == name) {
            return Err(CustomTexError::NameCollision(name.to_string()));
        }

        let existing = self.multi_options.iter().find(|m| m.name == name);

        match (existing, definition) {
            (Some(existing), Some((default_marked, options))) => {
                if existing.options != options || existing.default_marked != default_marked {
                    return Err(CustomTexError::DuplicateDefault(name.to_string()));
                }
            }
            (None, Some((default_marked, options))) => self.multi_options.push(MultiOption {
                name: name.to_string(),
                options,
                default_marked,
            }),
            (Some(_), None) => {}
            (None, None) => return Err(CustomTexError::UndefinedMultiOption(name.to_string())),
        }

        Ok(())
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn multi_options(&self) -> &[MultiOption] {
        &self.multi_options
    }

    /// Every name declared here with its kind
    pub fn declarations(&self) -> impl Iterator<Item = (&str, TagKind)> {
        self.variables
            .iter()
            .map(|v| (v.name.as_str(), TagKind::Variable))
            .chain(
                self.multi_options
                    .iter()
                    .map(|m| (m.name.as_str(), TagKind::MultiOption)),
            )
    }

    /// Fill in every missing name, then substitute all tags
    pub fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<String> {
        for variable in &self.variables {
            if ctx.options.contains(&variable.name) {
                continue;
            }
            let value = match &variable.default {
                Some(default) if ctx.use_defaults => {
                    debug!("Using default for variable '{}'", variable.name);
                    default.clone()
                }
                _ => ctx
                    .prompter
                    .text(&variable.name, variable.default.as_deref())?,
            };
            ctx.options.insert(&variable.name, value);
        }

        for multi in &self.multi_options {
            if ctx.options.contains(&multi.name) {
                continue;
            }
            let value = if ctx.use_defaults && multi.default_marked {
                debug!("Using default for multioption '{}'", multi.name);
                multi.options[0].clone()
            } else {
                choose(
                    &mut *ctx.prompter,
                    &multi.name,
                    ChoiceKind::MultiOption,
                    &multi.options,
                )?
                .to_string()
            };
            ctx.options.insert(&multi.name, value);
        }

        Ok(self.render(ctx.options))
    }

    /// Substitute tags from `options`; tags without a value render empty
    fn render(&self, options: &ResolvedOptions) -> String {
        let mut output = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => output.push_str(text),
                Piece::Tag(name) => output.push_str(options.get(name).unwrap_or_default()),
            }
        }
        output
    }
}
