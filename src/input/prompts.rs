use super::validation::{normalize_answer, validate_required};
use crate::error::CliError;
use colored::*;
use inquire::validator::Validation;
use inquire::{Confirm, Select, Text};

/// A free-text question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPrompt {
    pub message: String,
    /// Ask again until the answer is not empty.
    pub required: bool,
    /// Used when the answer is empty.
    pub default: Option<String>,
    /// Shown in front of the input, e.g. the chosen commit type.
    pub prefix: Option<String>,
}

impl TextPrompt {
    pub fn new(message: impl Into<String>) -> Self {
        TextPrompt {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// Blocking console questions.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// `None` when an optional question was skipped.
    fn text(&self, prompt: &TextPrompt) -> Result<Option<String>, CliError>;

    /// Index of the chosen option.
    fn select(&self, message: &str, options: &[String], default: usize) -> Result<usize, CliError>;

    fn confirm(&self, message: &str, default: bool) -> Result<bool, CliError>;

    /// Ask a yes/no question; on yes, ask `follow_up` and return its answer.
    fn confirm_then_text(&self, message: &str, follow_up: &str) -> Result<Option<String>, CliError> {
        if self.confirm(message, false)? {
            self.text(&TextPrompt::new(follow_up))
        } else {
            Ok(None)
        }
    }
}

/// Terminal prompts backed by `inquire`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn text(&self, prompt: &TextPrompt) -> Result<Option<String>, CliError> {
        println!("{}", format!(" {} ", prompt.message).black().on_cyan());
        let label = prompt
            .prefix
            .as_ref()
            .map(|p| format!(" {} ", p))
            .unwrap_or_else(|| ">".to_string());

        let mut question = Text::new(&label);
        if let Some(default) = &prompt.default {
            question = question.with_default(default);
        }
        if prompt.required {
            question = question.with_validator(
                |s: &str| -> Result<Validation, inquire::CustomUserError> {
                    Ok(match validate_required(s) {
                        Ok(()) => Validation::Valid,
                        Err(message) => Validation::Invalid(message.into()),
                    })
                },
            );
        }

        let answer = question.prompt()?;
        println!();
        Ok(normalize_answer(&answer))
    }

    fn select(&self, message: &str, options: &[String], default: usize) -> Result<usize, CliError> {
        let choice = Select::new(message, options.to_vec())
            .with_starting_cursor(default.min(options.len().saturating_sub(1)))
            .raw_prompt()?;
        Ok(choice.index)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool, CliError> {
        let answer = Confirm::new(message).with_default(default).prompt()?;
        println!("{}", if answer { " Yes ".yellow() } else { " No ".yellow() });
        Ok(answer)
    }
}
