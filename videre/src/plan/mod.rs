//! Launch plans.
//!
//! A [`LaunchPlan`] is everything needed to start a process: where the
//! engine's server and app packages live, the environment each one gets, and
//! which output to show. It is built once per invocation by
//! [`LaunchPlanBuilder`] and handed to the [`Runner`](crate::runner::Runner)
//! as a list of [`LaunchCommand`]s.

pub mod builder;
pub mod engine;
pub mod packages;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::ProcessEntry;

pub use builder::LaunchPlanBuilder;
pub use engine::{env_overrides, EnginePackages, EnvOverrides};
pub use packages::PackageResolver;

/// Label of the API server sub-process.
pub const SERVER_LABEL: &str = "SERVER";

/// Label of the app sub-process.
pub const APP_LABEL: &str = "APP";

/// Command run inside each package directory.
pub const START_COMMAND: &str = "npm run start";

/// Package directories for the server and app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDirs {
    /// Server package directory.
    pub server: PathBuf,
    /// App package directory.
    pub app: PathBuf,
}

/// Complete environments for the server and app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchEnv {
    /// Server environment.
    pub server: BTreeMap<String, String>,
    /// App environment.
    pub app: BTreeMap<String, String>,
}

/// How sub-process output is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogSettings {
    /// What each output line is prefixed with (`name`: the process label).
    pub prefix: String,
    /// Labels whose output is suppressed.
    pub hide: Vec<String>,
}

impl LogSettings {
    /// Whether output from `label` is suppressed.
    #[must_use]
    pub fn hides(&self, label: &str) -> bool {
        self.hide.iter().any(|hidden| hidden == label)
    }
}

/// A fully resolved, ready-to-run process selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchPlan {
    /// Engine display name, e.g. `MongoDB`.
    pub name: String,
    /// Selected process id.
    pub process_id: String,
    /// Selected process entry.
    pub process: ProcessEntry,
    /// Installed package locations.
    pub package_dirs: PackageDirs,
    /// Sub-process environments.
    pub env: LaunchEnv,
    /// Output display settings.
    pub logs: LogSettings,
}

/// One sub-process to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    /// Shell command line.
    pub command: String,
    /// Label used for log prefixes.
    pub name: String,
    /// Working directory.
    pub cwd: PathBuf,
    /// Complete environment.
    pub env: BTreeMap<String, String>,
}

impl LaunchPlan {
    /// The server and app commands, in start order.
    #[must_use]
    pub fn commands(&self) -> Vec<LaunchCommand> {
        vec![
            LaunchCommand {
                command: START_COMMAND.to_string(),
                name: SERVER_LABEL.to_string(),
                cwd: self.package_dirs.server.clone(),
                env: self.env.server.clone(),
            },
            LaunchCommand {
                command: START_COMMAND.to_string(),
                name: APP_LABEL.to_string(),
                cwd: self.package_dirs.app.clone(),
                env: self.env.app.clone(),
            },
        ]
    }

    /// Where the API server will listen.
    #[must_use]
    pub fn server_url(&self) -> String {
        format!("http://localhost:{}", self.process.server_port)
    }

    /// Where the app will listen.
    #[must_use]
    pub fn app_url(&self) -> String {
        format!("http://localhost:{}", self.process.client_port)
    }

    /// Lines printed once the sub-processes are started.
    #[must_use]
    pub fn banner(&self) -> Vec<String> {
        vec![
            format!("Videre - {} -- {}", self.name, self.process_id),
            format!("Videre API Server running on {}", self.server_url()),
            format!("Videre App running on {}", self.app_url()),
        ]
    }
}
