//! Command to validate the videre config file.

use crate::error::CliError;
use crate::utils::{resolve_dir, GlobalOptions};
use clap::Args;
use videre::config::ConfigLoader;
use videre::load_config;
use videre::selection::choices;

/// Validate the videre config file and list its processes.
#[derive(Args)]
pub struct ValidateCommand {}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let logger = global.logger();
        let dir = resolve_dir(global)?;

        let config = load_config(&ConfigLoader::new(), &dir, &logger)?;

        println!("Configuration is valid");
        for choice in choices(&config) {
            println!("{}", choice.label);
        }
        Ok(())
    }
}
