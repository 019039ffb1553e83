//! Command-line interface.
//!
//! Settings come from the environment (see [`crate::config`]); the command
//! line only selects what to run.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Algorand participation and proposer reward tracker.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// What to run. Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the selected command, `serve` if none was given.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }
}

/// Subcommands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the collection scheduler and the dashboard server.
    #[default]
    Serve,
    /// Run one collection and exit. Exits non-zero if the run fails.
    Collect,
    /// Print the rewards report for the start date onwards.
    Report {
        /// Also write an SVG chart of the local history to this path.
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Print the participation status of the account.
    Status,
}
