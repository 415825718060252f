//! Build script for videre-cli.
//!
//! Generates the `videre.1` man page into OUT_DIR with clap_mangen.
//!
//! The command structure is rebuilt here because a build script cannot
//! depend on the crate it is building.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs and src/commands/.
fn build_cli() -> Command {
    Command::new("videre")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Launch Videre database viewer processes")
        .long_about(
            "Start the Videre API server and app for a process defined in videre.config.*",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .help("Directory holding videre.config.* (defaults to the current directory)")
                .value_name("PATH")
                .global(true)
                .env("VIDERE_DIR"),
        )
        .subcommands(vec![
            Command::new("start")
                .about("Start a configured process")
                .long_about("Resolve a process from the config and run its server and app")
                .arg(
                    Arg::new("filter")
                        .short('f')
                        .long("filter")
                        .value_name("ID")
                        .help("Process id to start; prompts when missing or unknown"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Print the resolved launch plan as JSON without starting anything")
                        .action(clap::ArgAction::SetTrue),
                ),
            Command::new("validate")
                .about("Validate the config file")
                .long_about("Check videre.config.* against the schema and list its processes"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("videre.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
