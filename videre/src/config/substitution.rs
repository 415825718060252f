//! Environment substitution for source-form config files.
//!
//! `${NAME}` is replaced by the value of `NAME`; `${NAME:-fallback}` uses
//! `fallback` when `NAME` is unset or empty. Substitution runs on string
//! scalars of an already parsed document, so a value can never change the
//! document's structure and commented-out references are never seen.

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::env;
use std::sync::LazyLock;
use thiserror::Error;

static VARIABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
        .expect("substitution pattern is a valid regex")
});

/// Errors raised while expanding a config file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubstitutionError {
    /// A referenced variable is unset and has no fallback.
    #[error("environment variable \"{0}\" is not set and has no default")]
    UndefinedVariable(String),
}

/// Variables available to `${...}` expressions.
///
/// # Examples
///
/// ```
/// use videre::config::Substitutor;
///
/// let subst = Substitutor::empty().with_var("PORT", "4000");
/// assert_eq!(subst.expand("port: ${PORT}").unwrap(), "port: 4000");
/// assert_eq!(subst.expand("host: ${HOST:-localhost}").unwrap(), "host: localhost");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Substitutor {
    vars: HashMap<String, String>,
}

impl Substitutor {
    /// A substitutor with no variables defined.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A substitutor seeded from the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    /// Define or replace a variable.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Expand every `${...}` expression in `input` in a single pass.
    ///
    /// Substituted values are not expanded again.
    ///
    /// # Errors
    ///
    /// Returns [`SubstitutionError::UndefinedVariable`] for the first variable
    /// that is unset and has no fallback.
    pub fn expand(&self, input: &str) -> Result<String, SubstitutionError> {
        let mut error = None;

        let expanded = VARIABLE_PATTERN.replace_all(input, |caps: &Captures| {
            if error.is_some() {
                return String::new();
            }
            match self.resolve(caps) {
                Ok(value) => value,
                Err(e) => {
                    error = Some(e);
                    String::new()
                }
            }
        });

        match error {
            Some(e) => Err(e),
            None => Ok(expanded.into_owned()),
        }
    }

    /// Expand every string scalar in `value`, leaving keys alone.
    ///
    /// A scalar that is exactly one `${...}` expression takes the type its
    /// value spells (`4000` becomes a number, `true` a boolean); everything
    /// else stays a string.
    ///
    /// # Errors
    ///
    /// Returns [`SubstitutionError::UndefinedVariable`] for the first variable,
    /// in document order, that is unset and has no fallback.
    pub fn expand_value(&self, value: Value) -> Result<Value, SubstitutionError> {
        Ok(match value {
            Value::String(text) => self.expand_scalar(&text)?,
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.expand_value(item))
                    .collect::<Result<Vec<_>, SubstitutionError>>()?,
            ),
            Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, item)| Ok((key, self.expand_value(item)?)))
                    .collect::<Result<Map<_, _>, SubstitutionError>>()?,
            ),
            other => other,
        })
    }

    fn expand_scalar(&self, text: &str) -> Result<Value, SubstitutionError> {
        let expanded = self.expand(text)?;
        let whole = VARIABLE_PATTERN
            .find(text)
            .is_some_and(|m| m.start() == 0 && m.end() == text.len());
        if whole {
            if let Ok(typed @ (Value::Number(_) | Value::Bool(_))) =
                serde_yaml::from_str::<Value>(&expanded)
            {
                if typed.to_string() == expanded {
                    return Ok(typed);
                }
            }
        }
        Ok(Value::String(expanded))
    }

    fn resolve(&self, caps: &Captures) -> Result<String, SubstitutionError> {
        let name = &caps[1];
        match (self.vars.get(name), caps.get(2)) {
            (Some(value), _) if !value.is_empty() => Ok(value.clone()),
            (_, Some(fallback)) => Ok(fallback.as_str().to_string()),
            (Some(value), None) => Ok(value.clone()),
            (None, None) => Err(SubstitutionError::UndefinedVariable(name.to_string())),
        }
    }
}
