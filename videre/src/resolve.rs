//! The resolution pipeline: locate, load, validate, select, plan.
//!
//! Each step only runs if the previous one succeeded, so no process is ever
//! spawned from a partially valid configuration.

use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigLoader, ConfigValidator};
use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::plan::{LaunchPlan, LaunchPlanBuilder, PackageResolver};
use crate::selection::{ProcessSelector, Prompt};

/// Inputs to [`resolve_launch_plan`].
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Directory holding `videre.config.*`; packages are resolved from here too.
    pub dir: PathBuf,
    /// Process id requested on the command line.
    pub filter: Option<String>,
    /// Environment the sub-processes inherit.
    pub base_env: Vec<(String, String)>,
}

impl ResolveOptions {
    /// Options for `dir` inheriting the current process environment.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            filter: None,
            base_env: std::env::vars().collect(),
        }
    }

    /// Set the requested process id.
    #[must_use]
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the inherited environment.
    #[must_use]
    pub fn with_base_env(mut self, base_env: Vec<(String, String)>) -> Self {
        self.base_env = base_env;
        self
    }
}

/// Load and validate the config in `dir`.
///
/// # Errors
///
/// Propagates loader and validator errors.
pub fn load_config(loader: &ConfigLoader, dir: &Path, logger: &Logger) -> Result<Config> {
    let file = ConfigLoader::discover(dir)?;
    logger.info(&format!("Found {}, validating...", file.file_name()));

    let value = loader.load_file(&file)?;
    ConfigValidator::validate(&value)
}

/// Run the whole pipeline and return a plan ready to hand to the runner.
///
/// # Errors
///
/// Returns the first failure of any step; later steps do not run.
pub fn resolve_launch_plan(
    options: &ResolveOptions,
    loader: &ConfigLoader,
    prompt: &dyn Prompt,
    logger: &Logger,
) -> Result<LaunchPlan> {
    let config = load_config(loader, &options.dir, logger)?;

    let selection =
        ProcessSelector::new(prompt, logger).select(&config, options.filter.as_deref())?;
    let entry = config.process(&selection.process_id).ok_or_else(|| {
        Error::Prompt(format!("unknown process \"{}\"", selection.process_id))
    })?;

    let builder = LaunchPlanBuilder::new(PackageResolver::new(&options.dir));
    builder.build(&selection.process_id, entry, options.base_env.iter().cloned())
}
