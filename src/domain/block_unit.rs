//! Blocks: named regions holding mutually exclusive subblocks

use crate::domain::options::ResolveContext;
use crate::domain::prompt::{choose, ChoiceKind};
use crate::domain::syntax::{strip_line_ending, TagSyntax};
use crate::domain::unit::{parse_units, resolve_units, Declarations, TagKind, Unit};
use crate::error::{CustomTexError, Result};
use tracing::debug;

/// One alternative of a block, parsed eagerly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subblock {
    pub name: String,
    pub content: String,
    units: Vec<Unit>,
}

/// A block segment: open line, subblocks, close line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockUnit {
    name: String,
    subblocks: Vec<Subblock>,
}

impl BlockUnit {
    /// Parse a block segment, including every subblock's content
    pub fn parse(text: &str, syntax: &TagSyntax) -> Result<Self> {
        let mut lines = text.split_inclusive('\n');

        let first = lines
            .next()
            .ok_or_else(|| CustomTexError::MalformedBlock("empty block".to_string()))?;
        let name = syntax
            .block_open_name(first)
            .ok_or_else(|| {
                CustomTexError::MalformedBlock(format!(
                    "'{}' does not open a block",
                    strip_line_ending(first)
                ))
            })?
            .to_string();

        let body: Vec<&str> = lines.collect();
        let (last, inner) = body.split_last().ok_or_else(|| {
            CustomTexError::MalformedBlock(format!("block '{}' has no close tag", name))
        })?;
        if !syntax.is_block_close(last, &name) {
            return Err(CustomTexError::MalformedBlock(format!(
                "block '{}' must end with '{}'",
                name,
                syntax.block_close_tag(&name)
            )));
        }

        let subblock_tag = syntax.subblock_pattern(&name)?;
        let mut raw: Vec<(String, String)> = Vec::new();

        for line in inner {
            if let Some(caps) = subblock_tag.captures(strip_line_ending(line)) {
                let subblock = &caps[1];
                if raw.iter().any(|(existing, _)| existing == subblock) {
                    return Err(CustomTexError::DuplicateBlock {
                        block: name,
                        subblock: subblock.to_string(),
                    });
                }
                raw.push((subblock.to_string(), String::new()));
                continue;
            }

            match raw.last_mut() {
                Some((_, content)) => content.push_str(line),
                None if line.trim().is_empty() => {}
                None => {
                    return Err(CustomTexError::OrphanContent(
                        strip_line_ending(line).to_string(),
                    ))
                }
            }
        }

        if raw.is_empty() {
            return Err(CustomTexError::MalformedBlock(format!(
                "block '{}' has no subblocks",
                name
            )));
        }

        let subblocks = raw
            .into_iter()
            .map(|(subblock, content)| {
                let units = parse_units(&content, syntax)?;
                Ok(Subblock {
                    name: subblock,
                    content,
                    units,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(BlockUnit { name, subblocks })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subblocks(&self) -> &[Subblock] {
        &self.subblocks
    }

    pub fn subblock_names(&self) -> Vec<String> {
        self.subblocks.iter().map(|s| s.name.clone()).collect()
    }

    pub fn collect_declarations(&self, declarations: &mut Declarations) -> Result<()> {
        declarations.record(&self.name, TagKind::Block)?;
        for subblock in &self.subblocks {
            for unit in &subblock.units {
                unit.collect_declarations(declarations)?;
            }
        }
        Ok(())
    }

    /// Pick a subblock (asking once per block name) and resolve its content
    pub fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<String> {
        let chosen = match ctx.options.get(&self.name) {
            Some(value) => value.to_string(),
            None => {
                let names = self.subblock_names();
                let chosen = choose(&mut *ctx.prompter, &self.name, ChoiceKind::Block, &names)?
                    .to_string();
                ctx.options.insert(&self.name, chosen.clone());
                chosen
            }
        };

        let subblock = self
            .subblocks
            .iter()
            .find(|s| s.name == chosen)
            .ok_or_else(|| CustomTexError::UnknownSubblock {
                block: self.name.clone(),
                value: chosen.clone(),
            })?;

        debug!("Block '{}' resolved to '{}'", self.name, subblock.name);
        resolve_units(&subblock.units, ctx)
    }
}
