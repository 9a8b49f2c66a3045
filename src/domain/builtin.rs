//! Templates shipped with customtex

use crate::error::{CustomTexError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the template installed by `customtex init`
pub const DEFAULT_TEMPLATE: &str = "article";

const ARTICLE_MAIN: &str = r"<file:<var:project_slug=main>.tex>
\documentclass[<var:documentoptions=a4paper,11pt>]{<multi:documentclass==article|report|book>}

\input{tex/preamble.tex}
\input{tex/macros.tex}

<block:titlepage>
<titlepage:yes>
\title{<var:title=Untitled>}
\author{<var:author>}
\date{<var:date=\today>}

\begin{document}
  \maketitle

\end{document}
<titlepage:no>
\begin{document}

\end{document}
<endblock:titlepage>
";

const ARTICLE_PREAMBLE: &str = r"\usepackage[<multi:language==english|spanish|catalan>]{babel}

<block:margins>
<margins:normal>
\usepackage[margin=2.54cm]{geometry}
<margins:wide>
\usepackage[margin=3.17cm]{geometry}
<margins:custom>
\usepackage[<var:custommargins=margin=2cm>]{geometry}
<margins:none>
<endblock:margins>
\usepackage{mathtools}
<block:graphicx>
<graphicx:yes>
\usepackage{graphicx}
\graphicspath{ {<var:graphicspath=img/>} }
<graphicx:no>
<endblock:graphicx>
<block:hyperref>
<hyperref:yes>
\usepackage{hyperref}
\hypersetup{colorlinks=true, linkcolor=<multi:linkcolor==blue|black|red>}
<hyperref:no>
<endblock:hyperref>
";

const ARTICLE_MACROS: &str = r"% Macros for <var:title=Untitled>
\newcommand{\N}{\mathbb{N}}
\newcommand{\Z}{\mathbb{Z}}
\newcommand{\R}{\mathbb{R}}
";

const ARTICLE_FILES: &[(&str, &str)] = &[
    ("main.ctex", ARTICLE_MAIN),
    ("tex/preamble.tex.ctex", ARTICLE_PREAMBLE),
    ("tex/macros.tex.ctex", ARTICLE_MACROS),
];

/// Answers stored in a fresh configuration so the built-in template can be
/// generated with `--defaults` without questions about its blocks
pub const DEFAULT_CONTEXT: &[(&str, &str)] = &[
    ("titlepage", "yes"),
    ("margins", "normal"),
    ("graphicx", "no"),
    ("hyperref", "yes"),
];

/// A template embedded in the binary
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTemplate {
    name: &'static str,
    files: &'static [(&'static str, &'static str)],
}

impl BuiltinTemplate {
    /// Look up a built-in template by name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            DEFAULT_TEMPLATE => Ok(BuiltinTemplate {
                name: DEFAULT_TEMPLATE,
                files: ARTICLE_FILES,
            }),
            _ => Err(CustomTexError::TemplateNotFound(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `(relative path, contents)` of every source file
    pub fn files(&self) -> &'static [(&'static str, &'static str)] {
        self.files
    }

    /// Write the template's files into `dir`, creating it if needed
    pub fn install(&self, dir: &Path) -> Result<()> {
        for (rel, contents) in self.files {
            let path = dir.join(rel);
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            debug!("Installing {}", path.display());
            fs::write(&path, contents)?;
        }
        Ok(())
    }
}
