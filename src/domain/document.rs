//! A single output file built from template text

use crate::domain::options::ResolveContext;
use crate::domain::syntax::TagSyntax;
use crate::domain::text_unit::TextUnit;
use crate::domain::unit::{parse_units, resolve_units, Declarations, Unit};
use crate::error::{CustomTexError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Template text bound to one output file.
///
/// The name is relative to the output directory and may itself contain
/// variable or multi-option tags, for example `<var:project_name>.tex`.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    name_unit: TextUnit,
    syntax: Arc<TagSyntax>,
    units: Vec<Unit>,
    declarations: Declarations,
}

impl Document {
    /// Parse the whole document (names and content) up front
    pub fn new(name: &str, text: &str, syntax: Arc<TagSyntax>) -> Result<Self> {
        let name_unit = TextUnit::parse(name, &syntax)?;
        let units = parse_units(text, &syntax)?;

        let mut declarations = Declarations::new();
        for (tag, kind) in name_unit.declarations() {
            declarations.record(tag, kind)?;
        }
        for unit in &units {
            unit.collect_declarations(&mut declarations)?;
        }

        Ok(Document {
            name: name.to_string(),
            name_unit,
            syntax,
            units,
            declarations,
        })
    }

    /// Raw (unresolved) output name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn syntax(&self) -> &TagSyntax {
        &self.syntax
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    /// Resolve the output name; it must stay relative to the output directory
    pub fn resolve_name(&self, ctx: &mut ResolveContext<'_>) -> Result<String> {
        let name = self.name_unit.resolve(ctx)?;
        check_output_name(&name)?;
        Ok(name)
    }

    /// Resolve every unit in order
    pub fn process(&self, ctx: &mut ResolveContext<'_>) -> Result<String> {
        resolve_units(&self.units, ctx)
    }

    /// Resolve the output path under `target_dir`, failing if it already exists
    pub fn target_path(
        &self,
        target_dir: &Path,
        ctx: &mut ResolveContext<'_>,
        overwrite: bool,
    ) -> Result<PathBuf> {
        let path = target_dir.join(self.resolve_name(ctx)?);
        if path.exists() && !overwrite {
            return Err(CustomTexError::FileExists(path));
        }
        Ok(path)
    }

    /// Resolve and write under `target_dir`, returning the written path
    pub fn write(
        &self,
        target_dir: &Path,
        ctx: &mut ResolveContext<'_>,
        overwrite: bool,
    ) -> Result<PathBuf> {
        let path = self.target_path(target_dir, ctx, overwrite)?;
        let content = self.process(ctx)?;
        save(&path, &content)?;
        Ok(path)
    }
}

/// Reject output names that are empty, absolute or climb out with `..`
pub fn check_output_name(name: &str) -> Result<()> {
    let path = Path::new(name);
    let mut components = path.components().peekable();
    if components.peek().is_none()
        || !components.all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(CustomTexError::UnsafePath(name.to_string()));
    }
    Ok(())
}

/// Write `content` to `path`, creating parent directories
pub(crate) fn save(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;

    info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::ResolvedOptions;
    use crate::domain::prompt::NoPrompter;
    use crate::domain::unit::TagKind;
    use tempfile::TempDir;

    fn document(name: &str, text: &str) -> Result<Document> {
        Document::new(name, text, Arc::new(TagSyntax::default()))
    }

    #[test]
    fn test_process_concatenates_units() {
        let doc = document(
            "main.tex",
            "\\title{<var:title=Notes>}\n<block:toc>\n<toc:yes>\n\\tableofcontents\n<toc:no>\n<endblock:toc>\n\\end{document}\n",
        )
        .unwrap();

        let mut options: ResolvedOptions = [("toc", "yes")].into_iter().collect();
        let mut prompter = NoPrompter;
        let mut ctx = ResolveContext::new(&mut options, true, &mut prompter);
        let output = doc.process(&mut ctx).unwrap();
        assert_eq!(
            output,
            "\\title{Notes}\n\\tableofcontents\n\\end{document}\n"
        );
    }

    #[test]
    fn test_same_block_twice_uses_one_choice() {
        let block = "<block:lang>\n<lang:en>\nhello\n<lang:es>\nhola\n<endblock:lang>\n";
        let doc = document("a.tex", &format!("{block}--\n{block}")).unwrap();

        let mut options = ResolvedOptions::new();
        let mut prompter = crate::domain::prompt::ScriptedPrompter::new(["2"]);
        let mut ctx = ResolveContext::new(&mut options, false, &mut prompter);
        assert_eq!(doc.process(&mut ctx).unwrap(), "hola\n--\nhola\n");
        assert_eq!(prompter.asked(), ["lang"]);
    }

    #[test]
    fn test_declarations_span_name_and_blocks() {
        let doc = document(
            "<var:slug=paper>.tex",
            "<multi:cls==article|report>\n<block:sec>\n<sec:a>\n<var:inner>\n<endblock:sec>\n",
        )
        .unwrap();
        let decl = doc.declarations();
        assert_eq!(decl.kind_of("slug"), Some(TagKind::Variable));
        assert_eq!(decl.kind_of("cls"), Some(TagKind::MultiOption));
        assert_eq!(decl.kind_of("sec"), Some(TagKind::Block));
        assert_eq!(decl.kind_of("inner"), Some(TagKind::Variable));
    }

    #[test]
    fn test_block_name_colliding_with_variable() {
        let result = document(
            "main.tex",
            "<var:sec>\n<block:sec>\n<sec:a>\nA\n<endblock:sec>\n",
        );
        assert!(matches!(result, Err(CustomTexError::NameCollision(_))));
    }

    #[test]
    fn test_write_resolves_name() {
        let temp = TempDir::new().unwrap();
        let doc = document("tex/<var:slug=paper>.tex", "body\n").unwrap();

        let mut options = ResolvedOptions::new();
        let mut prompter = NoPrompter;
        let mut ctx = ResolveContext::new(&mut options, true, &mut prompter);
        let path = doc.write(temp.path(), &mut ctx, false).unwrap();

        assert_eq!(path, temp.path().join("tex/paper.tex"));
        assert_eq!(fs::read_to_string(path).unwrap(), "body\n");
    }

    #[test]
    fn test_write_refuses_existing_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("main.tex"), "old").unwrap();
        let doc = document("main.tex", "new").unwrap();

        let mut options = ResolvedOptions::new();
        let mut prompter = NoPrompter;
        let mut ctx = ResolveContext::new(&mut options, true, &mut prompter);
        let result = doc.write(temp.path(), &mut ctx, false);
        assert!(matches!(result, Err(CustomTexError::FileExists(_))));

        let path = doc.write(temp.path(), &mut ctx, true).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_answer_cannot_leave_output_dir() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let doc = document("<var:slug>.tex", "body\n").unwrap();

        for slug in ["../escaped", "/tmp/abs", "sub/../../up"] {
            let mut options: ResolvedOptions = [("slug", slug)].into_iter().collect();
            let mut prompter = NoPrompter;
            let mut ctx = ResolveContext::new(&mut options, true, &mut prompter);
            let result = doc.write(&out, &mut ctx, false);
            assert!(matches!(result, Err(CustomTexError::UnsafePath(_))), "{}", slug);
        }
        assert!(!temp.path().join("escaped.tex").exists());
        assert!(!out.exists());
    }

    #[test]
    fn test_check_output_name() {
        assert!(check_output_name("main.tex").is_ok());
        assert!(check_output_name("tex/./macros.tex").is_ok());
        assert!(check_output_name("").is_err());
        assert!(check_output_name("../main.tex").is_err());
        assert!(check_output_name("/etc/main.tex").is_err());
    }
}
