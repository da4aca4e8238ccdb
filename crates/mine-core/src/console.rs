//! Interactive console capability
//!
//! The workflow never talks to the terminal directly. It asks a [`Console`]
//! for answers and feedback, so the same code runs behind cliclack prompts
//! (see `tui`), in `--yes` mode, and under tests.

use crate::error::{MineError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Validation hook for free-text answers; `Err` carries the message shown before re-prompting
pub type Validator = fn(&str) -> std::result::Result<(), &'static str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// A running progress indicator
///
/// Stopping consumes the handle, so it can only happen once. Implementations
/// should also stop themselves if dropped while still running.
pub trait Progress {
    fn stop(self: Box<Self>, message: &str);
}

pub trait Console {
    /// Ask for a line of text; an empty answer means `default`
    ///
    /// Surrounding whitespace is stripped before the answer is validated and returned.
    fn ask_text(&self, label: &str, default: &str, validate: Validator) -> Result<String>;

    /// Ask to pick one of `options`; returns its index
    fn ask_choice(&self, label: &str, options: &[String]) -> Result<usize>;

    /// Ask a yes/no question
    fn confirm(&self, label: &str, default: bool) -> Result<bool>;

    fn show_progress(&self, label: &str) -> Box<dyn Progress>;

    fn notify(&self, level: Level, message: &str);
}

/// Accepts any answer
pub fn any_text(_: &str) -> std::result::Result<(), &'static str> {
    Ok(())
}

pub fn non_empty(input: &str) -> std::result::Result<(), &'static str> {
    if input.trim().is_empty() {
        Err("Value cannot be empty")
    } else {
        Ok(())
    }
}

pub fn port_number(input: &str) -> std::result::Result<(), &'static str> {
    match input.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err("Please enter a port between 1 and 65535"),
        Ok(_) => Ok(()),
    }
}

pub fn index_number(input: &str) -> std::result::Result<(), &'static str> {
    input
        .trim()
        .parse::<u32>()
        .map(|_| ())
        .map_err(|_| "Please enter a non-negative number")
}

/// A canned answer for [`ScriptedConsole`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Choice(usize),
    Confirm(bool),
    /// Take whatever the prompt offers by default
    Default,
}

/// Non-interactive console that replays canned answers
///
/// Once the script runs out every prompt takes its default, which is what
/// `--yes` mode uses. An answer rejected by the validator is recorded and the
/// next one is tried, the same way a person would be asked again.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: Mutex<VecDeque<Answer>>,
    transcript: Mutex<Vec<(Level, String)>>,
    rejected: Mutex<Vec<String>>,
}

impl ScriptedConsole {
    /// Console that accepts every default
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Every notification and progress message so far
    pub fn transcript(&self) -> Vec<(Level, String)> {
        lock(&self.transcript).clone()
    }

    /// Answers that failed validation
    pub fn rejected(&self) -> Vec<String> {
        lock(&self.rejected).clone()
    }

    fn next_answer(&self) -> Answer {
        lock(&self.answers).pop_front().unwrap_or(Answer::Default)
    }

    fn record(&self, level: Level, message: impl Into<String>) {
        lock(&self.transcript).push((level, message.into()));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Console for ScriptedConsole {
    fn ask_text(&self, label: &str, default: &str, validate: Validator) -> Result<String> {
        loop {
            let input = match self.next_answer() {
                Answer::Text(text) if !text.trim().is_empty() => text.trim().to_string(),
                Answer::Text(_) | Answer::Default => default.to_string(),
                other => {
                    return Err(MineError::Input(format!(
                        "expected text for '{}', script had {:?}",
                        label, other
                    )))
                }
            };

            match validate(&input) {
                Ok(()) => return Ok(input),
                Err(message) if input == default => {
                    return Err(MineError::Input(format!("{}: {}", label, message)));
                }
                Err(_) => lock(&self.rejected).push(input),
            }
        }
    }

    fn ask_choice(&self, label: &str, options: &[String]) -> Result<usize> {
        if options.is_empty() {
            return Err(MineError::Input(format!("no options to choose from for '{}'", label)));
        }
        loop {
            match self.next_answer() {
                Answer::Choice(index) if index < options.len() => return Ok(index),
                Answer::Choice(index) => lock(&self.rejected).push(index.to_string()),
                Answer::Default => return Ok(0),
                other => {
                    return Err(MineError::Input(format!(
                        "expected a choice for '{}', script had {:?}",
                        label, other
                    )))
                }
            }
        }
    }

    fn confirm(&self, label: &str, default: bool) -> Result<bool> {
        match self.next_answer() {
            Answer::Confirm(value) => Ok(value),
            Answer::Default => Ok(default),
            other => Err(MineError::Input(format!(
                "expected yes/no for '{}', script had {:?}",
                label, other
            ))),
        }
    }

    fn show_progress(&self, label: &str) -> Box<dyn Progress> {
        self.record(Level::Info, label);
        Box::new(ScriptedProgress)
    }

    fn notify(&self, level: Level, message: &str) {
        self.record(level, message);
    }
}

struct ScriptedProgress;

impl Progress for ScriptedProgress {
    fn stop(self: Box<Self>, message: &str) {
        tracing::debug!("progress stopped: {}", message);
    }
}
