//! Sources of answers for names that have no value yet

use crate::error::{CustomTexError, Result};
use std::collections::VecDeque;

/// What kind of tag a selection is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceKind {
    MultiOption,
    Block,
}

/// A request to pick one entry from an ordered list
#[derive(Debug)]
pub struct Selection<'a> {
    pub name: &'a str,
    pub kind: ChoiceKind,
    pub choices: &'a [String],
}

/// Provides values for names the engine cannot resolve on its own.
///
/// Calls block until an answer is available; the engine never retries, so an
/// implementation that wants to re-ask on bad input must do it itself.
pub trait Prompter {
    /// Free-form value for a variable, `default` is shown when present
    fn text(&mut self, name: &str, default: Option<&str>) -> Result<String>;

    /// 1-based index into `selection.choices`
    fn select(&mut self, selection: &Selection<'_>) -> Result<usize>;
}

/// Ask `prompter` for a choice and return the chosen entry
pub(crate) fn choose<'c>(
    prompter: &mut dyn Prompter,
    name: &str,
    kind: ChoiceKind,
    choices: &'c [String],
) -> Result<&'c str> {
    let index = prompter.select(&Selection {
        name,
        kind,
        choices,
    })?;

    index
        .checked_sub(1)
        .and_then(|i| choices.get(i))
        .map(|c| c.as_str())
        .ok_or_else(|| CustomTexError::InvalidSelection {
            name: name.to_string(),
            index,
            count: choices.len(),
        })
}

/// Answers from a fixed queue, in order. Records every name it was asked for.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Names asked so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next_answer(&mut self, name: &str) -> Result<String> {
        self.asked.push(name.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| CustomTexError::Prompt(format!("no scripted answer for '{}'", name)))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&mut self, name: &str, _default: Option<&str>) -> Result<String> {
        self.next_answer(name)
    }

    fn select(&mut self, selection: &Selection<'_>) -> Result<usize> {
        let answer = self.next_answer(selection.name)?;
        answer.trim().parse().map_err(|_| {
            CustomTexError::Prompt(format!(
                "scripted answer '{}' for '{}' is not a number",
                answer, selection.name
            ))
        })
    }
}

/// Refuses every question
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompter;

impl Prompter for NoPrompter {
    fn text(&mut self, name: &str, _default: Option<&str>) -> Result<String> {
        Err(CustomTexError::MissingValue(name.to_string()))
    }

    fn select(&mut self, selection: &Selection<'_>) -> Result<usize> {
        Err(CustomTexError::MissingValue(selection.name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<String> {
        vec!["en".to_string(), "es".to_string()]
    }

    #[test]
    fn test_choose_is_one_based() {
        let mut prompter = ScriptedPrompter::new(["2"]);
        let list = choices();
        let chosen = choose(&mut prompter, "lang", ChoiceKind::MultiOption, &list).unwrap();
        assert_eq!(chosen, "es");
        assert_eq!(prompter.asked(), ["lang"]);
    }

    #[test]
    fn test_choose_rejects_out_of_range() {
        let list = choices();
        for answer in ["0", "3"] {
            let mut prompter = ScriptedPrompter::new([answer]);
            let result = choose(&mut prompter, "lang", ChoiceKind::MultiOption, &list);
            match result {
                Err(CustomTexError::InvalidSelection { name, count, .. }) => {
                    assert_eq!(name, "lang");
                    assert_eq!(count, 2);
                }
                other => panic!("Expected InvalidSelection, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_scripted_runs_out() {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert!(matches!(
            prompter.text("title", None),
            Err(CustomTexError::Prompt(_))
        ));
    }

    #[test]
    fn test_scripted_non_numeric_selection() {
        let mut prompter = ScriptedPrompter::new(["first"]);
        let list = choices();
        let result = choose(&mut prompter, "lang", ChoiceKind::MultiOption, &list);
        assert!(matches!(result, Err(CustomTexError::Prompt(_))));
    }

    #[test]
    fn test_no_prompter_reports_missing_name() {
        let mut prompter = NoPrompter;
        match prompter.text("author", Some("Ada")) {
            Err(CustomTexError::MissingValue(name)) => assert_eq!(name, "author"),
            other => panic!("Expected MissingValue, got {:?}", other),
        }
    }
}
