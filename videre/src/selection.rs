//! Choosing which configured process to start.
//!
//! An explicit id that names a configured process is used as-is. Anything
//! else ends in an interactive prompt listing every process; an explicit id
//! that does not exist only earns a warning before the prompt.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::Logger;

/// Prompt message shown above the process list.
pub const SELECT_MESSAGE: &str = "Which process would you like to start?";

/// One entry in an interactive selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Text shown to the user.
    pub label: String,
    /// Value returned when this choice is picked.
    pub value: String,
}

/// Interactive single-choice prompt.
///
/// Implementations block until the user picks a choice or cancels.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt {
    /// Show `choices` and wait for one to be picked.
    ///
    /// Returns `Ok(None)` when the user cancels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prompt`] if the prompt cannot be shown or read.
    fn select(&self, message: &str, choices: &[Choice]) -> Result<Option<String>>;
}

/// Outcome of process selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The selected process id.
    pub process_id: String,
    /// Whether the user had to pick interactively.
    pub prompted: bool,
    /// Warning emitted for an explicit id that did not exist.
    pub warning: Option<String>,
}

/// Resolves the process to start from an optional explicit id.
pub struct ProcessSelector<'a> {
    prompt: &'a dyn Prompt,
    logger: &'a Logger,
}

impl<'a> ProcessSelector<'a> {
    /// Creates a selector that falls back to `prompt`.
    #[must_use]
    pub fn new(prompt: &'a dyn Prompt, logger: &'a Logger) -> Self {
        Self { prompt, logger }
    }

    /// Pick a process id from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelectionCancelled`] if the user dismisses the
    /// prompt, or [`Error::Prompt`] if the prompt fails or answers with an
    /// id that is not configured.
    pub fn select(&self, config: &Config, explicit: Option<&str>) -> Result<Selection> {
        let explicit = explicit.filter(|id| !id.is_empty());

        if let Some(id) = explicit {
            if config.contains(id) {
                self.logger.debug(&format!("using process \"{id}\" from --filter"));
                return Ok(Selection {
                    process_id: id.to_string(),
                    prompted: false,
                    warning: None,
                });
            }
        }

        let warning = explicit.map(|id| {
            let message = format!("Invalid process ID, \"{id}\" does not exist in the config!");
            self.logger.warn(&message);
            message
        });

        let choices = choices(config);
        let picked = self
            .prompt
            .select(SELECT_MESSAGE, &choices)?
            .ok_or(Error::SelectionCancelled)?;

        if !config.contains(&picked) {
            return Err(Error::Prompt(format!(
                "selected process \"{picked}\" is not in the config"
            )));
        }

        Ok(Selection {
            process_id: picked,
            prompted: true,
            warning,
        })
    }
}

/// One choice per configured process, labelled `<id> - <engine>`, in file order.
#[must_use]
pub fn choices(config: &Config) -> Vec<Choice> {
    config
        .processes
        .iter()
        .map(|(id, entry)| Choice {
            label: format!("{id} - {}", entry.engine),
            value: id.clone(),
        })
        .collect()
}
