//! Domain layer - The tag resolution engine

pub mod block_unit;
pub mod builtin;
pub mod document;
pub mod options;
pub mod prompt;
pub mod splitter;
pub mod syntax;
pub mod template_set;
pub mod text_unit;
pub mod unit;

pub use block_unit::BlockUnit;
pub use builtin::BuiltinTemplate;
pub use document::Document;
pub use options::{ResolveContext, ResolvedOptions};
pub use prompt::{ChoiceKind, NoPrompter, Prompter, ScriptedPrompter, Selection};
pub use syntax::TagSyntax;
pub use template_set::{RenderedDocument, TemplateSet};
pub use text_unit::TextUnit;
pub use unit::{Declarations, TagKind, Unit};
