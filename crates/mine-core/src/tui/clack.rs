//! Charm-style console using cliclack

use crate::console::{Console, Level, Progress, Validator};
use crate::error::{MineError, Result};

/// Terminal console backed by cliclack prompts, spinners and log lines
#[derive(Debug, Default, Clone, Copy)]
pub struct ClackConsole {
    assume_defaults: bool,
}

impl ClackConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-interactive mode (`--yes`): every prompt takes its default, output is unchanged
    pub fn assume_defaults(mut self, assume: bool) -> Self {
        self.assume_defaults = assume;
        self
    }

    fn log_default(&self, label: &str, value: impl std::fmt::Display) {
        if let Err(e) = cliclack::log::step(format!("{}: {} (default)", label, value)) {
            tracing::warn!("failed to write to terminal: {}", e);
        }
    }

    pub fn intro(&self, title: &str) -> Result<()> {
        cliclack::intro(title).map_err(|e| MineError::io("failed to write to terminal", e))
    }

    pub fn outro(&self, message: &str) -> Result<()> {
        cliclack::outro(message).map_err(|e| MineError::io("failed to write to terminal", e))
    }

    pub fn outro_cancel(&self, message: &str) -> Result<()> {
        cliclack::outro_cancel(message)
            .map_err(|e| MineError::io("failed to write to terminal", e))
    }
}

fn prompt_error(label: &str, err: std::io::Error) -> MineError {
    if err.kind() == std::io::ErrorKind::Interrupted {
        MineError::Input(format!("'{}' was cancelled", label))
    } else {
        MineError::Input(format!("'{}' failed: {}", label, err))
    }
}

impl Console for ClackConsole {
    fn ask_text(&self, label: &str, default: &str, validate: Validator) -> Result<String> {
        if self.assume_defaults {
            validate(default).map_err(|m| MineError::Input(format!("{}: {}", label, m)))?;
            let shown = if label.to_lowercase().contains("password") && !default.is_empty() {
                "********"
            } else {
                default
            };
            self.log_default(label, shown);
            return Ok(default.to_string());
        }

        let answer: String = cliclack::input(label)
            .placeholder(default)
            .default_input(default)
            .required(!default.is_empty())
            .validate(move |input: &String| validate(input))
            .interact()
            .map_err(|e| prompt_error(label, e))?;

        match answer.trim() {
            "" => Ok(default.to_string()),
            trimmed => Ok(trimmed.to_string()),
        }
    }

    fn ask_choice(&self, label: &str, options: &[String]) -> Result<usize> {
        if options.is_empty() {
            return Err(MineError::Input(format!("no options to choose from for '{}'", label)));
        }
        if self.assume_defaults {
            self.log_default(label, &options[0]);
            return Ok(0);
        }

        let mut select = cliclack::select(label);
        for (idx, option) in options.iter().enumerate() {
            select = select.item(idx, option, "");
        }
        select.interact().map_err(|e| prompt_error(label, e))
    }

    fn confirm(&self, label: &str, default: bool) -> Result<bool> {
        if self.assume_defaults {
            self.log_default(label, if default { "yes" } else { "no" });
            return Ok(default);
        }
        cliclack::confirm(label)
            .initial_value(default)
            .interact()
            .map_err(|e| prompt_error(label, e))
    }

    fn show_progress(&self, label: &str) -> Box<dyn Progress> {
        let spinner = cliclack::spinner();
        spinner.start(label);
        Box::new(ClackProgress {
            spinner: Some(spinner),
        })
    }

    fn notify(&self, level: Level, message: &str) {
        let written = match level {
            Level::Info => cliclack::log::info(message),
            Level::Success => cliclack::log::success(message),
            Level::Warning => cliclack::log::warning(message),
            Level::Error => cliclack::log::error(message),
        };
        if let Err(e) = written {
            tracing::warn!("failed to write to terminal: {}", e);
        }
    }
}

struct ClackProgress {
    spinner: Option<cliclack::ProgressBar>,
}

impl Progress for ClackProgress {
    fn stop(mut self: Box<Self>, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        }
    }
}

impl Drop for ClackProgress {
    fn drop(&mut self) {
        // Dropped without stop() means the step bailed out with an error
        if let Some(spinner) = self.spinner.take() {
            spinner.error("Failed");
        }
    }
}
