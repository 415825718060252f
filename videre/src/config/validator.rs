//! Configuration validation.
//!
//! Walks a raw config value and records every field that does not match the
//! schema, in document order. Only a value with no recorded failures is
//! converted into a typed [`Config`].

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use url::Url;

use crate::config::schema::{Config, Engine};
use crate::error::{Error, Result};

const PROCESS_FIELDS: &[&str] = &["engine", "serverPort", "clientPort", "databaseUrl", "showLogs"];

/// Machine-readable kind of a field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorCode {
    /// Missing value or value of the wrong JSON type.
    InvalidType,
    /// A string that is not one of the allowed values.
    InvalidEnumValue,
    /// A string with the right type but the wrong format (e.g. not a URL).
    InvalidString,
    /// A number below the allowed minimum.
    TooSmall,
    /// A number above the allowed maximum.
    TooBig,
    /// Keys the schema does not know about.
    UnrecognizedKeys,
}

impl FieldErrorCode {
    /// The snake_case code shown to users.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::InvalidString => "invalid_string",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::UnrecognizedKeys => "unrecognized_keys",
        }
    }
}

impl fmt::Display for FieldErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single schema failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path to the failing field, e.g. `processes.local.serverPort`.
    /// Empty for the document root.
    pub path: String,
    /// Failure kind.
    pub code: FieldErrorCode,
    /// Human-readable description.
    pub message: String,
}

impl FieldError {
    /// Creates a field failure.
    pub fn new(path: impl Into<String>, code: FieldErrorCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code,
            message: message.into(),
        }
    }
}

/// Every schema failure found in a config value, in the order encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// Wraps a list of field failures.
    #[must_use]
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// All recorded failures.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The failure reported to users.
    #[must_use]
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    /// Number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.split_first() {
            None => write!(f, "invalid config"),
            Some((first, rest)) => {
                write!(f, "invalid config at '{}': {}", first.path, first.message)?;
                if !rest.is_empty() {
                    write!(f, " (and {} more)", rest.len())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates raw config values against the schema.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use videre::config::ConfigValidator;
///
/// let raw = json!({
///     "processes": {
///         "local": {
///             "engine": "mongodb",
///             "serverPort": 4000,
///             "clientPort": 5173,
///             "databaseUrl": "mongodb://localhost:27017/db"
///         }
///     }
/// });
/// let config = ConfigValidator::validate(&raw).unwrap();
/// assert!(config.contains("local"));
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a raw config value and convert it into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaValidation`] carrying every field failure when
    /// the shape does not match, and [`Error::EmptyConfig`] when the shape is
    /// fine but `processes` has no entries.
    pub fn validate(raw: &Value) -> Result<Config> {
        let errors = Self::check(raw);
        if !errors.is_empty() {
            return Err(ValidationError::new(errors).into());
        }

        let config: Config = serde_json::from_value(raw.clone()).map_err(|e| {
            ValidationError::new(vec![FieldError::new(
                "",
                FieldErrorCode::InvalidType,
                e.to_string(),
            )])
        })?;

        if config.processes.is_empty() {
            return Err(Error::EmptyConfig);
        }

        log::debug!("validated config with {} process(es)", config.processes.len());
        Ok(config)
    }

    /// Collect every schema failure in `raw` without converting it.
    #[must_use]
    pub fn check(raw: &Value) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let Some(root) = expect_object("", raw, &mut errors) else {
            return errors;
        };

        match root.get("processes") {
            None => errors.push(required("processes")),
            Some(processes) => {
                if let Some(processes) = expect_object("processes", processes, &mut errors) {
                    for (id, entry) in processes {
                        check_process(&format!("processes.{id}"), entry, &mut errors);
                    }
                }
            }
        }

        check_unknown_keys("", root, &["processes"], &mut errors);
        errors
    }
}

fn check_process(path: &str, value: &Value, errors: &mut Vec<FieldError>) {
    let Some(entry) = expect_object(path, value, errors) else {
        return;
    };

    let engine_path = format!("{path}.engine");
    match entry.get("engine") {
        None => errors.push(required(&engine_path)),
        Some(Value::String(name)) => {
            if name.parse::<Engine>().is_err() {
                let expected = Engine::ALL
                    .iter()
                    .map(|e| format!("'{e}'"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                errors.push(FieldError::new(
                    engine_path,
                    FieldErrorCode::InvalidEnumValue,
                    format!("Invalid enum value. Expected {expected}, received '{name}'"),
                ));
            }
        }
        Some(other) => errors.push(type_mismatch(&engine_path, "string", other)),
    }

    check_port(&format!("{path}.serverPort"), entry.get("serverPort"), errors);
    check_port(&format!("{path}.clientPort"), entry.get("clientPort"), errors);

    let url_path = format!("{path}.databaseUrl");
    match entry.get("databaseUrl") {
        None => errors.push(required(&url_path)),
        Some(Value::String(raw)) => {
            if let Err(e) = Url::parse(raw) {
                errors.push(FieldError::new(
                    url_path,
                    FieldErrorCode::InvalidString,
                    format!("Invalid url: {e}"),
                ));
            }
        }
        Some(other) => errors.push(type_mismatch(&url_path, "string", other)),
    }

    match entry.get("showLogs") {
        None | Some(Value::Bool(_)) => {}
        Some(other) => errors.push(type_mismatch(&format!("{path}.showLogs"), "boolean", other)),
    }

    check_unknown_keys(path, entry, PROCESS_FIELDS, errors);
}

fn check_port(path: &str, value: Option<&Value>, errors: &mut Vec<FieldError>) {
    let number = match value {
        None => return errors.push(required(path)),
        Some(Value::Number(n)) => n,
        Some(other) => return errors.push(type_mismatch(path, "number", other)),
    };

    // Whole-number floats such as `4000.0` are integers too.
    let Some(port) = number.as_f64().filter(|n| n.fract() == 0.0) else {
        return errors.push(FieldError::new(
            path,
            FieldErrorCode::InvalidType,
            "Expected integer, received float",
        ));
    };

    if port < 0.0 {
        errors.push(FieldError::new(
            path,
            FieldErrorCode::TooSmall,
            "Number must be greater than or equal to 0",
        ));
    } else if port > f64::from(u16::MAX) {
        errors.push(FieldError::new(
            path,
            FieldErrorCode::TooBig,
            format!("Number must be less than or equal to {}", u16::MAX),
        ));
    }
}

fn check_unknown_keys(
    path: &str,
    object: &Map<String, Value>,
    known: &[&str],
    errors: &mut Vec<FieldError>,
) {
    let unknown: Vec<String> = object
        .keys()
        .filter(|key| !known.contains(&key.as_str()))
        .map(|key| format!("'{key}'"))
        .collect();

    if !unknown.is_empty() {
        errors.push(FieldError::new(
            path,
            FieldErrorCode::UnrecognizedKeys,
            format!("Unrecognized key(s) in object: {}", unknown.join(", ")),
        ));
    }
}

fn expect_object<'a>(
    path: &str,
    value: &'a Value,
    errors: &mut Vec<FieldError>,
) -> Option<&'a Map<String, Value>> {
    if let Value::Object(map) = value {
        Some(map)
    } else {
        errors.push(type_mismatch(path, "object", value));
        None
    }
}

fn required(path: &str) -> FieldError {
    FieldError::new(path, FieldErrorCode::InvalidType, "Required")
}

fn type_mismatch(path: &str, expected: &str, actual: &Value) -> FieldError {
    FieldError::new(
        path,
        FieldErrorCode::InvalidType,
        format!("Expected {expected}, received {}", kind_of(actual)),
    )
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
