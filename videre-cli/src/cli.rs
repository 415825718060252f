//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{StartCommand, ValidateCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for launching Videre processes.
#[derive(Parser)]
#[command(name = "videre")]
#[command(version, about = "Launch Videre database viewer processes", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Directory holding videre.config.* (defaults to the current directory)
    #[arg(long, value_name = "PATH", global = true, env = "VIDERE_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Start a configured process
    Start(StartCommand),

    /// Validate the config file
    Validate(ValidateCommand),
}
