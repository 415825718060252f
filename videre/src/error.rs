//! Error types for the videre library.
//!
//! Every step of the resolution pipeline (locate, load, validate, select,
//! plan) reports failure through [`Error`]. None of these errors are retried;
//! the CLI turns any of them into a single line on stderr and exit status 1.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ValidationError;

/// Result type alias for operations that may fail with a videre error.
///
/// # Examples
///
/// ```
/// use videre::{Error, Result};
///
/// fn pick() -> Result<&'static str> {
///     Err(Error::SelectionCancelled)
/// }
///
/// assert!(pick().is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the videre library.
#[derive(Debug, Error)]
pub enum Error {
    /// Neither a source-form nor a compiled config file exists.
    #[error("No videre.config file found in {}", dir.display())]
    ConfigNotFound {
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// The config file exists but could not be read, compiled, or evaluated.
    #[error("Failed to load {}: {message}", path.display())]
    ConfigLoad {
        /// The config file being loaded.
        path: PathBuf,
        /// The underlying failure message.
        message: String,
    },

    /// The loaded value does not match the config schema.
    #[error("{0}")]
    SchemaValidation(ValidationError),

    /// The config is well-formed but defines no processes.
    #[error("No processes defined in the config!")]
    EmptyConfig,

    /// An engine name reached plan building without a known engine behind it.
    #[error("Invalid engine \"{engine}\"")]
    UnsupportedEngine {
        /// The unrecognized engine name.
        engine: String,
    },

    /// An engine package is not installed where Node would find it.
    #[error(
        "Could not resolve Videre package \"{package}\", install the correct @videre package via the npm registry"
    )]
    PackageResolution {
        /// The npm package name that could not be found.
        package: String,
        /// Every `node_modules` directory that was searched.
        searched: Vec<PathBuf>,
    },

    /// The user dismissed the interactive process selection.
    #[error("Process selection was cancelled")]
    SelectionCancelled,

    /// The interactive prompt could not be shown or read.
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// A sub-process could not be started.
    #[error("failed to start {name}: {source}")]
    Spawn {
        /// Label of the sub-process (`SERVER`, `APP`).
        name: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::SchemaValidation(err)
    }
}

impl Error {
    /// Check if the error means no config file was found.
    ///
    /// # Examples
    ///
    /// ```
    /// use videre::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::ConfigNotFound { dir: PathBuf::from("/project") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. })
    }
}
