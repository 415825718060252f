//! Spawning the server and app and relaying their output.
//!
//! Each [`LaunchCommand`] runs through the platform shell in its own working
//! directory with exactly the environment from the plan. Output from labels
//! listed in [`LogSettings::hide`] is discarded; everything else is relayed
//! line by line with a `[LABEL]` prefix. Nothing is restarted.

use std::io::{BufRead, BufReader, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};
use crate::plan::{LaunchCommand, LogSettings};

/// How one sub-process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitReport {
    /// Sub-process label.
    pub name: String,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Whether the process exited successfully.
    pub success: bool,
}

impl ExitReport {
    fn new(name: &str, status: ExitStatus) -> Self {
        Self {
            name: name.to_string(),
            code: status.code(),
            success: status.success(),
        }
    }
}

/// Outcome of a run, one report per command in start order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Per-process exit reports.
    pub exits: Vec<ExitReport>,
}

impl RunSummary {
    /// The first sub-process, in start order, that did not exit successfully.
    #[must_use]
    pub fn first_failure(&self) -> Option<&ExitReport> {
        self.exits.iter().find(|exit| !exit.success)
    }
}

struct Running {
    name: String,
    child: Child,
    relays: Vec<JoinHandle<()>>,
}

/// Starts a set of commands and waits for all of them.
pub struct Runner {
    commands: Vec<LaunchCommand>,
    logs: LogSettings,
}

impl Runner {
    /// Creates a runner.
    #[must_use]
    pub fn new(commands: Vec<LaunchCommand>, logs: LogSettings) -> Self {
        Self { commands, logs }
    }

    /// Start every command, then block until all have exited.
    ///
    /// If a later command fails to start, the ones already running are
    /// killed before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`] if a command cannot be started and
    /// [`Error::Io`] if waiting on a child fails.
    pub fn run(self) -> Result<RunSummary> {
        let mut running: Vec<Running> = Vec::with_capacity(self.commands.len());

        for command in &self.commands {
            match self.spawn(command) {
                Ok(process) => running.push(process),
                Err(e) => {
                    for process in &mut running {
                        let _ = process.child.kill();
                        let _ = process.child.wait();
                    }
                    return Err(e);
                }
            }
        }

        let mut summary = RunSummary::default();
        for mut process in running {
            let status = process.child.wait()?;
            for relay in process.relays {
                let _ = relay.join();
            }
            log::debug!("{} exited with {status}", process.name);
            summary.exits.push(ExitReport::new(&process.name, status));
        }

        Ok(summary)
    }

    fn spawn(&self, command: &LaunchCommand) -> Result<Running> {
        let hidden = self.logs.hides(&command.name);
        let output = || if hidden { Stdio::null() } else { Stdio::piped() };

        let mut child = shell(&command.command)
            .current_dir(&command.cwd)
            .env_clear()
            .envs(&command.env)
            .stdin(Stdio::null())
            .stdout(output())
            .stderr(output())
            .spawn()
            .map_err(|source| Error::Spawn {
                name: command.name.clone(),
                source,
            })?;

        let mut relays = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            relays.push(relay(&command.name, stdout, false));
        }
        if let Some(stderr) = child.stderr.take() {
            relays.push(relay(&command.name, stderr, true));
        }

        Ok(Running {
            name: command.name.clone(),
            child,
            relays,
        })
    }
}

#[cfg(unix)]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}

#[cfg(windows)]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(command_line);
    command
}

fn relay<R>(name: &str, stream: R, is_stderr: bool) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    let prefix = format!("[{name}]");
    thread::spawn(move || {
        for line in BufReader::new(stream).lines() {
            let Ok(line) = line else { break };
            if is_stderr {
                eprintln!("{prefix} {line}");
            } else {
                println!("{prefix} {line}");
            }
        }
    })
}
