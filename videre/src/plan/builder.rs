//! Building a [`LaunchPlan`] from a selected process entry.

use std::collections::BTreeMap;

use crate::config::ProcessEntry;
use crate::error::Result;
use crate::plan::engine::{env_overrides, EnginePackages};
use crate::plan::packages::PackageResolver;
use crate::plan::{LaunchEnv, LaunchPlan, LogSettings, PackageDirs, APP_LABEL, SERVER_LABEL};

/// Builds launch plans, resolving engine packages through a [`PackageResolver`].
///
/// # Examples
///
/// ```no_run
/// use videre::config::{Engine, ProcessEntry};
/// use videre::plan::{LaunchPlanBuilder, PackageResolver};
///
/// let entry = ProcessEntry {
///     engine: Engine::MongoDb,
///     server_port: 4000,
///     client_port: 5173,
///     database_url: "mongodb://localhost:27017/db".to_string(),
///     show_logs: Some(true),
/// };
///
/// let builder = LaunchPlanBuilder::new(PackageResolver::new("."));
/// let plan = builder.build("local", &entry, std::env::vars()).unwrap();
/// assert!(plan.logs.hide.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct LaunchPlanBuilder {
    resolver: PackageResolver,
}

impl LaunchPlanBuilder {
    /// Creates a builder.
    #[must_use]
    pub fn new(resolver: PackageResolver) -> Self {
        Self { resolver }
    }

    /// Build the plan for `entry`.
    ///
    /// `base_env` is the environment the sub-processes inherit; engine
    /// variables are layered on top of it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PackageResolution`](crate::Error::PackageResolution)
    /// if the engine's server or app package is not installed.
    pub fn build<I>(&self, process_id: &str, entry: &ProcessEntry, base_env: I) -> Result<LaunchPlan>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let packages = EnginePackages::for_engine(entry.engine);
        let package_dirs = PackageDirs {
            server: self.resolver.resolve(packages.server)?,
            app: self.resolver.resolve(packages.app)?,
        };

        let inherited: BTreeMap<String, String> = base_env.into_iter().collect();
        let overrides = env_overrides(entry);
        let mut server = inherited.clone();
        server.extend(overrides.server);
        let mut app = inherited;
        app.extend(overrides.app);

        let hide = if entry.shows_logs() {
            Vec::new()
        } else {
            vec![SERVER_LABEL.to_string(), APP_LABEL.to_string()]
        };

        Ok(LaunchPlan {
            name: entry.engine.display_name().to_string(),
            process_id: process_id.to_string(),
            process: entry.clone(),
            package_dirs,
            env: LaunchEnv { server, app },
            logs: LogSettings {
                prefix: "name".to_string(),
                hide,
            },
        })
    }
}
