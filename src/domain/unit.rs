//! Resolvable units: plain text or block

use crate::domain::block_unit::BlockUnit;
use crate::domain::options::ResolveContext;
use crate::domain::splitter::{split, Segment, SegmentKind};
use crate::domain::syntax::TagSyntax;
use crate::domain::text_unit::TextUnit;
use crate::error::{CustomTexError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// The three kinds of named tag sharing one namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TagKind {
    Variable,
    MultiOption,
    Block,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::Variable => write!(f, "variable"),
            TagKind::MultiOption => write!(f, "multioption"),
            TagKind::Block => write!(f, "block"),
        }
    }
}

/// Names seen so far and the kind each was declared as
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    names: BTreeMap<String, TagKind>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration; the same name as another kind is a collision
    pub fn record(&mut self, name: &str, kind: TagKind) -> Result<()> {
        match self.names.get(name) {
            Some(existing) if *existing != kind => {
                Err(CustomTexError::NameCollision(name.to_string()))
            }
            Some(_) => Ok(()),
            None => {
                self.names.insert(name.to_string(), kind);
                Ok(())
            }
        }
    }

    pub fn kind_of(&self, name: &str) -> Option<TagKind> {
        self.names.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TagKind)> {
        self.names.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One top-level piece of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    Text(TextUnit),
    Block(BlockUnit),
}

impl Unit {
    pub fn from_segment(segment: &Segment, syntax: &TagSyntax) -> Result<Self> {
        match segment.kind {
            SegmentKind::Plain => Ok(Unit::Text(TextUnit::parse(&segment.text, syntax)?)),
            SegmentKind::Block => Ok(Unit::Block(BlockUnit::parse(&segment.text, syntax)?)),
        }
    }

    pub fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<String> {
        match self {
            Unit::Text(unit) => unit.resolve(ctx),
            Unit::Block(unit) => unit.resolve(ctx),
        }
    }

    /// Add every name declared in this unit (and nested units) to `declarations`
    pub fn collect_declarations(&self, declarations: &mut Declarations) -> Result<()> {
        match self {
            Unit::Text(unit) => {
                for (name, kind) in unit.declarations() {
                    declarations.record(name, kind)?;
                }
                Ok(())
            }
            Unit::Block(unit) => unit.collect_declarations(declarations),
        }
    }
}

/// Split `text` and parse every segment
pub fn parse_units(text: &str, syntax: &TagSyntax) -> Result<Vec<Unit>> {
    split(text, syntax)?
        .iter()
        .map(|segment| Unit::from_segment(segment, syntax))
        .collect()
}

/// Resolve units in order and concatenate their output
pub fn resolve_units(units: &[Unit], ctx: &mut ResolveContext<'_>) -> Result<String> {
    let mut output = String::new();
    for unit in units {
        output.push_str(&unit.resolve(ctx)?);
    }
    Ok(output)
}
