//! Configuration file discovery and loading.
//!
//! A project keeps its config beside the place `videre` is run from, in one
//! of two forms:
//!
//! - source form, `videre.config.yaml` (or `.yml`): YAML with `${VAR}`
//!   substitutions, compiled to JSON before it is evaluated
//! - compiled form, `videre.config.json`: evaluated as-is
//!
//! Source form wins when both exist. Compiling a source file stages the JSON
//! in a temporary file next to the config; that file never outlives the load.

use chrono::Utc;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::substitution::Substitutor;
use crate::error::{Error, Result};

/// Base name shared by every config file form.
pub const CONFIG_NAME: &str = "videre.config";

/// Candidate file names, highest priority first.
const CANDIDATES: &[(&str, ConfigFormat)] = &[
    ("videre.config.yaml", ConfigFormat::Source),
    ("videre.config.yml", ConfigFormat::Source),
    ("videre.config.json", ConfigFormat::Compiled),
];

/// How a config file must be processed before it yields a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML with substitutions; compiled before evaluation.
    Source,
    /// Plain JSON.
    Compiled,
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Compiled => write!(f, "compiled"),
        }
    }
}

/// A discovered config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Absolute or caller-relative path to the file.
    pub path: PathBuf,
    /// The file's form.
    pub format: ConfigFormat,
}

impl ConfigFile {
    /// File name for progress messages, e.g. `videre.config.yaml`.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

/// A config file together with the raw value it exported.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Where the value came from.
    pub file: ConfigFile,
    /// The unvalidated value.
    pub value: Value,
}

/// Finds and evaluates `videre.config` files.
///
/// # Examples
///
/// ```no_run
/// use videre::config::ConfigLoader;
/// use std::path::Path;
///
/// let loaded = ConfigLoader::new().load(Path::new(".")).unwrap();
/// println!("loaded {}", loaded.file.file_name());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    substitutor: Substitutor,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that substitutes from the current process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_substitutor(Substitutor::from_env())
    }

    /// A loader with explicit substitution variables.
    #[must_use]
    pub fn with_substitutor(substitutor: Substitutor) -> Self {
        Self { substitutor }
    }

    /// Find the config file in `dir`.
    ///
    /// Exactly one file is returned even if several forms exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if no candidate exists.
    pub fn discover(dir: &Path) -> Result<ConfigFile> {
        CANDIDATES
            .iter()
            .map(|(name, format)| ConfigFile {
                path: dir.join(name),
                format: *format,
            })
            .find(|candidate| candidate.path.is_file())
            .ok_or_else(|| Error::ConfigNotFound {
                dir: dir.to_path_buf(),
            })
    }

    /// Discover and evaluate the config file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if there is no config file and
    /// [`Error::ConfigLoad`] if it cannot be read, compiled, or evaluated.
    pub fn load(&self, dir: &Path) -> Result<LoadedConfig> {
        let file = Self::discover(dir)?;
        let value = self.load_file(&file)?;
        Ok(LoadedConfig { file, value })
    }

    /// Evaluate a specific config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigLoad`] on any read, compile, or parse failure.
    pub fn load_file(&self, file: &ConfigFile) -> Result<Value> {
        match file.format {
            ConfigFormat::Source => self.load_source(&file.path),
            ConfigFormat::Compiled => {
                Self::evaluate(&file.path).map_err(|message| load_error(&file.path, message))
            }
        }
    }

    /// Compile source-form text into compiled-form JSON text.
    ///
    /// # Errors
    ///
    /// Returns a message describing the substitution or YAML failure.
    pub fn compile_source(&self, source: &str) -> std::result::Result<String, String> {
        let parsed: Value =
            serde_yaml::from_str(source).map_err(|e| format!("invalid YAML: {e}"))?;
        let value = exported(parsed)?;
        let expanded = self.substitutor.expand_value(value).map_err(|e| e.to_string())?;
        serde_json::to_string_pretty(&expanded).map_err(|e| e.to_string())
    }

    fn load_source(&self, path: &Path) -> Result<Value> {
        let source = fs::read_to_string(path).map_err(|e| load_error(path, e))?;
        let compiled = self
            .compile_source(&source)
            .map_err(|message| load_error(path, message))?;

        stage_and_evaluate(path, &compiled, Self::evaluate)
    }

    fn evaluate(path: &Path) -> std::result::Result<Value, String> {
        let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let value: Value = serde_json::from_str(&contents).map_err(|e| format!("invalid JSON: {e}"))?;
        exported(value)
    }
}

/// Write `compiled` to a staged file beside `path`, run `evaluate` on it, and
/// remove the staged file whatever the outcome.
fn stage_and_evaluate<F>(path: &Path, compiled: &str, evaluate: F) -> Result<Value>
where
    F: FnOnce(&Path) -> std::result::Result<Value, String>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropped (and so removed) on every early return below.
    let mut staged = tempfile::Builder::new()
        .prefix(&format!("__{CONFIG_NAME}.{}.", Utc::now().timestamp_millis()))
        .suffix(".json")
        .tempfile_in(dir)
        .map_err(|e| load_error(path, e))?;

    staged
        .write_all(compiled.as_bytes())
        .and_then(|()| staged.flush())
        .map_err(|e| load_error(path, e))?;

    log::debug!(
        "compiled {} to {}",
        path.display(),
        staged.path().display()
    );

    let evaluated = evaluate(staged.path());
    let removed = staged.close();

    let value = evaluated.map_err(|message| load_error(path, message))?;
    removed.map_err(|e| load_error(path, format!("failed to remove staged config: {e}")))?;
    Ok(value)
}

fn exported(value: Value) -> std::result::Result<Value, String> {
    if value.is_null() {
        Err("config file does not export a value".to_string())
    } else {
        Ok(value)
    }
}

fn load_error(path: &Path, message: impl ToString) -> Error {
    Error::ConfigLoad {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
