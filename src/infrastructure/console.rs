//! Interactive prompts on a terminal

use crate::domain::prompt::{ChoiceKind, Prompter, Selection};
use crate::error::{CustomTexError, Result};
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Asks questions on `output` and reads answers line by line from `input`.
///
/// An empty answer accepts the shown default. Selections are re-asked until a
/// number in range is given.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompter<StdinLock<'static>, Stdout> {
    /// Prompter on the process's stdin and stdout
    pub fn stdio() -> Self {
        ConsolePrompter::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsolePrompter { input, output }
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CustomTexError::Prompt("unexpected end of input".to_string()));
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn text(&mut self, name: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(default) => write!(self.output, "Enter value for '{}' [{}]: ", name, default)?,
            None => write!(self.output, "Enter value for '{}': ", name)?,
        }
        self.output.flush()?;

        let answer = self.read_answer()?;
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn select(&mut self, selection: &Selection<'_>) -> Result<usize> {
        let what = match selection.kind {
            ChoiceKind::MultiOption => "option",
            ChoiceKind::Block => "block",
        };
        writeln!(self.output, "Choose {} for '{}':", what, selection.name)?;
        for (i, choice) in selection.choices.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, choice)?;
        }

        let count = selection.choices.len();
        loop {
            write!(self.output, "Enter number: ")?;
            self.output.flush()?;

            let answer = self.read_answer()?;
            match answer.trim().parse::<usize>() {
                Ok(index) if (1..=count).contains(&index) => return Ok(index),
                _ => writeln!(self.output, "Please enter a number between 1 and {}", count)?,
            }
        }
    }
}
