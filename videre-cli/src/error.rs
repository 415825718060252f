//! CLI-specific error types with exit codes.
//!
//! Wraps library errors and turns every failure into the single line printed
//! on stderr before the process exits.

use std::fmt;
use videre::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// I/O error.
    Io(std::io::Error),

    /// Plan could not be serialized for `--dry-run`.
    Serialize(serde_json::Error),

    /// A sub-process exited unsuccessfully.
    ProcessFailed {
        /// Label of the failed sub-process.
        name: String,
        /// Its exit code, if it exited normally.
        code: Option<i32>,
    },
}

impl CliError {
    /// Get the exit code for this error.
    ///
    /// Every failure exits with 1, except a sub-process failure, which
    /// passes the child's own non-zero exit code through.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ProcessFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }

    /// The line shown to the user.
    ///
    /// Schema failures report only the first failing field, in the form
    /// `Error in Videre config - "<code>" at <path>, message: "<message>"`.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Library(LibError::SchemaValidation(validation)) => {
                match validation.first() {
                    Some(first) => {
                        let path = if first.path.is_empty() {
                            "(root)"
                        } else {
                            first.path.as_str()
                        };
                        format!(
                            "Error in Videre config - \"{}\" at {}, message: \"{}\"",
                            first.code, path, first.message
                        )
                    }
                    None => serde_json::to_string(validation.errors())
                        .unwrap_or_else(|_| validation.to_string()),
                }
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Serialize(e) => write!(f, "Failed to serialize launch plan: {e}"),
            CliError::ProcessFailed {
                name,
                code: Some(code),
            } => write!(f, "{name} exited with status {code}"),
            CliError::ProcessFailed { name, code: None } => {
                write!(f, "{name} was terminated by a signal")
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Serialize(e) => Some(e),
            CliError::ProcessFailed { .. } => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialize(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use videre::config::{FieldError, FieldErrorCode, ValidationError};

    fn schema_error(errors: Vec<FieldError>) -> CliError {
        CliError::from(LibError::SchemaValidation(ValidationError::new(errors)))
    }

    #[test]
    fn test_schema_error_reports_first_failure() {
        let err = schema_error(vec![
            FieldError::new(
                "processes.local.databaseUrl",
                FieldErrorCode::InvalidString,
                "Invalid url",
            ),
            FieldError::new(
                "processes.local.serverPort",
                FieldErrorCode::InvalidType,
                "Expected number, received string",
            ),
        ]);

        assert_eq!(
            err.user_message(),
            "Error in Videre config - \"invalid_string\" at processes.local.databaseUrl, message: \"Invalid url\""
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_schema_error_at_root() {
        let err = schema_error(vec![FieldError::new(
            "",
            FieldErrorCode::InvalidType,
            "Expected object, received array",
        )]);

        assert!(err.user_message().contains(" at (root), "));
    }

    #[test]
    fn test_schema_error_without_entries_falls_back_to_list() {
        let err = schema_error(Vec::new());
        assert_eq!(err.user_message(), "[]");
    }

    #[test]
    fn test_other_errors_use_display() {
        let err = CliError::from(LibError::EmptyConfig);
        assert_eq!(err.user_message(), "No processes defined in the config!");
        assert_eq!(err.exit_code(), 1);

        let err = CliError::from(LibError::UnsupportedEngine {
            engine: "redis".to_string(),
        });
        assert_eq!(err.user_message(), "Invalid engine \"redis\"");
    }

    #[test]
    fn test_process_failure_exit_code() {
        let err = CliError::ProcessFailed {
            name: "APP".to_string(),
            code: Some(3),
        };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.user_message(), "APP exited with status 3");

        let signalled = CliError::ProcessFailed {
            name: "SERVER".to_string(),
            code: None,
        };
        assert_eq!(signalled.exit_code(), 1);
    }
}
