//! Configuration schema definitions.
//!
//! These types describe a validated `videre.config` file. Raw file contents
//! are checked by [`ConfigValidator`](crate::config::ConfigValidator) before
//! they are turned into these types, so every [`Config`] in hand is
//! structurally sound.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Backend technology a process entry targets.
///
/// # Examples
///
/// ```
/// use videre::config::Engine;
///
/// let engine: Engine = "mongodb".parse().unwrap();
/// assert_eq!(engine, Engine::MongoDb);
/// assert_eq!(engine.display_name(), "MongoDB");
/// assert!("redis".parse::<Engine>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Engine {
    /// MongoDB-backed server and app.
    #[serde(rename = "mongodb")]
    MongoDb,
}

impl Engine {
    /// Every supported engine, in declaration order.
    pub const ALL: &'static [Engine] = &[Engine::MongoDb];

    /// The identifier used in config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MongoDb => "mongodb",
        }
    }

    /// Human-readable name shown in the start banner.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MongoDb => "MongoDB",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|engine| engine.as_str() == s)
            .ok_or_else(|| Error::UnsupportedEngine {
                engine: s.to_string(),
            })
    }
}

/// One named process: a server and an app bound to an engine.
///
/// # Examples
///
/// ```
/// use videre::config::{Engine, ProcessEntry};
///
/// let entry = ProcessEntry {
///     engine: Engine::MongoDb,
///     server_port: 4000,
///     client_port: 5173,
///     database_url: "mongodb://localhost:27017/db".to_string(),
///     show_logs: None,
/// };
/// assert!(!entry.shows_logs());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProcessEntry {
    /// Backend engine.
    pub engine: Engine,

    /// Port the API server listens on.
    #[serde(deserialize_with = "deserialize_port")]
    pub server_port: u16,

    /// Port the app dev server listens on.
    #[serde(deserialize_with = "deserialize_port")]
    pub client_port: u16,

    /// Database connection URL handed to the server.
    pub database_url: String,

    /// Stream server and app output to the terminal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_logs: Option<bool>,
}

/// Accepts integers and whole-number floats in `0..=65535`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(n))
                .map(|n| n as u64)
        })
        .and_then(|n| u16::try_from(n).ok())
        .ok_or_else(|| D::Error::custom(format!("invalid port {number}")))
}

impl ProcessEntry {
    /// Whether sub-process output should be shown (defaults to false).
    #[must_use]
    pub fn shows_logs(&self) -> bool {
        self.show_logs.unwrap_or(false)
    }
}

/// A validated configuration file.
///
/// Process ids keep the order they were written in, which is the order they
/// are offered in the interactive prompt.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Process entries keyed by process id.
    pub processes: IndexMap<String, ProcessEntry>,
}

impl Config {
    /// Look up a process by id.
    #[must_use]
    pub fn process(&self, id: &str) -> Option<&ProcessEntry> {
        self.processes.get(id)
    }

    /// Whether `id` names a configured process.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.processes.contains_key(id)
    }

    /// Process ids in file order.
    pub fn process_ids(&self) -> impl Iterator<Item = &str> {
        self.processes.keys().map(String::as_str)
    }
}
