//! Utility functions for CLI operations.
//!
//! This module provides what every command needs: the global options, the
//! directory to work in, and the terminal-backed process prompt.

use crate::error::CliError;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use videre::selection::{Choice, Prompt};
use videre::{init_logger, Error as LibError, Logger};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the config directory.
    pub dir: Option<PathBuf>,
}

impl GlobalOptions {
    /// Logger honouring `--verbose`, `--quiet` and `VIDERE_LOG_MODE`.
    pub fn logger(&self) -> Logger {
        init_logger(self.verbose, self.quiet)
    }
}

/// Resolve the working directory, using CWD if `--dir` was not given.
///
/// Relative paths are made absolute against the CWD but not canonicalized.
pub fn resolve_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    let cwd = env::current_dir()?;
    Ok(match &global.dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    })
}

/// Arrow-key selection list on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn select(&self, message: &str, choices: &[Choice]) -> videre::Result<Option<String>> {
        if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
            return Err(LibError::Prompt(
                "no terminal to choose a process from, pass --filter <ID>".to_string(),
            ));
        }

        let labels: Vec<&str> = choices.iter().map(|choice| choice.label.as_str()).collect();
        let picked = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|e| LibError::Prompt(e.to_string()))?;

        Ok(picked
            .and_then(|index| choices.get(index))
            .map(|choice| choice.value.clone()))
    }
}
