//! Configuration system for videre.
//!
//! A project describes its processes in a `videre.config` file:
//!
//! ```yaml
//! processes:
//!   local:
//!     engine: mongodb
//!     serverPort: 4000
//!     clientPort: 5173
//!     databaseUrl: ${DATABASE_URL:-mongodb://localhost:27017/videre}
//!     showLogs: true
//! ```
//!
//! Loading happens in two steps: [`ConfigLoader`] finds the file and turns it
//! into a raw JSON value, then [`ConfigValidator`] checks that value against
//! the schema and produces a typed [`Config`].
//!
//! # Examples
//!
//! ```no_run
//! use videre::config::{ConfigLoader, ConfigValidator};
//! use std::path::Path;
//!
//! let loaded = ConfigLoader::new().load(Path::new(".")).unwrap();
//! let config = ConfigValidator::validate(&loaded.value).unwrap();
//!
//! for id in config.process_ids() {
//!     println!("{id}");
//! }
//! ```

pub mod loader;
pub mod schema;
pub mod substitution;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use loader::{ConfigFile, ConfigFormat, ConfigLoader, LoadedConfig, CONFIG_NAME};
pub use schema::{Config, Engine, ProcessEntry};
pub use substitution::{SubstitutionError, Substitutor};
pub use validator::{ConfigValidator, FieldError, FieldErrorCode, ValidationError};
