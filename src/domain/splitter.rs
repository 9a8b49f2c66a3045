//! Top-level splitting of template text into plain and block segments

use crate::domain::syntax::TagSyntax;
use crate::error::{CustomTexError, Result};

/// Whether a segment is plain text or a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Plain,
    Block,
}

/// A contiguous slice of template text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    fn new(kind: SegmentKind, text: String) -> Self {
        Segment { kind, text }
    }
}

/// Split text into top-level segments.
///
/// Lines keep their terminators, so concatenating the segments gives back the
/// input. Only the outermost blocks are recognized here; a block nested in a
/// subblock is found when that subblock's content is split in turn.
pub fn split(text: &str, syntax: &TagSyntax) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut open_block: Option<String> = None;

    for line in text.split_inclusive('\n') {
        match &open_block {
            None => {
                if let Some(name) = syntax.block_open_name(line) {
                    if !current.is_empty() {
                        segments.push(Segment::new(
                            SegmentKind::Plain,
                            std::mem::take(&mut current),
                        ));
                    }
                    open_block = Some(name.to_string());
                }
                current.push_str(line);
            }
            Some(name) => {
                current.push_str(line);
                if syntax.is_block_close(line, name) {
                    segments.push(Segment::new(
                        SegmentKind::Block,
                        std::mem::take(&mut current),
                    ));
                    open_block = None;
                }
            }
        }
    }

    if let Some(name) = open_block {
        return Err(CustomTexError::UnclosedBlock(name));
    }

    if !current.is_empty() {
        segments.push(Segment::new(SegmentKind::Plain, current));
    }

    Ok(segments)
}
