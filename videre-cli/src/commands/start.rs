//! Command to start a configured process.

use crate::error::CliError;
use crate::utils::{resolve_dir, GlobalOptions, TerminalPrompt};
use clap::Args;
use videre::config::ConfigLoader;
use videre::{resolve_launch_plan, ResolveOptions, Runner};

/// Start the server and app for one configured process.
#[derive(Args)]
pub struct StartCommand {
    /// Process id to start; prompts when missing or unknown
    #[arg(short, long, value_name = "ID")]
    pub filter: Option<String>,

    /// Print the resolved launch plan as JSON without starting anything
    #[arg(long)]
    pub dry_run: bool,
}

impl StartCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let logger = global.logger();
        let dir = resolve_dir(global)?;

        let filter = self.filter.filter(|id| !id.is_empty());
        let options = ResolveOptions::new(&dir).with_filter(filter);
        let plan = resolve_launch_plan(&options, &ConfigLoader::new(), &TerminalPrompt, &logger)?;

        if self.dry_run {
            println!("{}", serde_json::to_string_pretty(&plan)?);
            return Ok(());
        }

        logger.banner(&plan.banner());
        let summary = Runner::new(plan.commands(), plan.logs.clone()).run()?;

        match summary.first_failure() {
            Some(failed) => Err(CliError::ProcessFailed {
                name: failed.name.clone(),
                code: failed.code,
            }),
            None => Ok(()),
        }
    }
}
