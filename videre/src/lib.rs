#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # videre
//!
//! A library for starting Videre's database-viewer stack from a project
//! config file.
//!
//! A run goes through a fixed pipeline: find and load `videre.config.*`,
//! validate it against the config schema, pick one process (from a filter or
//! an interactive prompt), build a [`LaunchPlan`] for it, and hand the plan's
//! commands to a [`Runner`].
//!
//! ## Core Types
//!
//! - [`Config`] and [`ProcessEntry`]: The validated config
//! - [`ConfigLoader`] and [`ConfigValidator`]: Loading and checking it
//! - [`ProcessSelector`] and [`Prompt`]: Choosing a process
//! - [`LaunchPlan`] and [`LaunchPlanBuilder`]: What to start and how
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use videre::ConfigValidator;
//!
//! let value = serde_json::json!({
//!     "processes": {
//!         "local": {
//!             "engine": "mongodb",
//!             "serverPort": 4000,
//!             "clientPort": 5173,
//!             "databaseUrl": "mongodb://localhost:27017/db"
//!         }
//!     }
//! });
//!
//! let config = ConfigValidator::validate(&value).unwrap();
//! assert_eq!(config.process_ids().collect::<Vec<_>>(), vec!["local"]);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod plan;
pub mod resolve;
pub mod runner;
pub mod selection;

pub use config::{Config, ConfigLoader, ConfigValidator, Engine, ProcessEntry, ValidationError};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use plan::{LaunchCommand, LaunchPlan, LaunchPlanBuilder, LogSettings, PackageResolver};
pub use resolve::{load_config, resolve_launch_plan, ResolveOptions};
pub use runner::{ExitReport, RunSummary, Runner};
pub use selection::{Choice, ProcessSelector, Prompt, Selection};
