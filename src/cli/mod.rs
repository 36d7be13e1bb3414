//! Command-line interface
//!
//! Argument parsing, the terminal reviewer and output formatting. Commands
//! wire the infrastructure adapters into the services and report an
//! [`Outcome`] that `main` turns into the process exit code.

pub mod commands;
pub mod output;
pub mod reviewer;
pub mod types;

pub use reviewer::TerminalReviewer;
pub use types::{BrowseArgs, Cli, Commands, ReportArgs, SyncArgs};

use console::style;

/// Exit code for fatal errors
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for a session ended by the user
pub const EXIT_INTERRUPTED: i32 = 130;

/// How a command finished, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Interrupted,
}

impl Outcome {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Completed => 0,
            Self::Interrupted => EXIT_INTERRUPTED,
        }
    }
}

/// Print a fatal error with its context chain.
pub fn handle_error(err: &anyhow::Error, json: bool) {
    if json {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        let body = serde_json::json!({ "error": err.to_string(), "causes": &chain[1..] });
        eprintln!("{body}");
    } else {
        eprintln!("{} {err:#}", style("Error:").red().bold());
    }
}
