//! Host CLI connection.
//!
//! CliConnection -> the two calls the plugin needs from the host (auth state, app lookup)
//! parse_host_command -> HostCommand { program, args }
//! CfCurlConnection -> CliConnection backed by `<host> curl` and the host config file
//!
use anyhow::{Context, Result, bail};
use shell_words::split as shell_split;
use std::fmt;

pub mod curl;
pub mod model;

pub use curl::CfCurlConnection;
pub use model::{ApplicationRecord, RouteSummary, ServiceSummary};

/// Default host CLI invocation.
pub const DEFAULT_HOST_COMMAND: &str = "cf";

/// The part of the host connection this plugin consumes.
///
/// Transport, authentication and retries live behind this seam; errors are
/// opaque to the plugin and only ever rendered.
pub trait CliConnection {
    /// Whether the host CLI currently holds a session.
    fn is_logged_in(&self) -> Result<bool>;

    /// Fetch the application named `name` in the targeted space.
    fn get_app(&self, name: &str) -> Result<ApplicationRecord>;
}

/// A parsed host CLI invocation (`cf`, `/usr/local/bin/cf7`, `cf --some-flag`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for HostCommand {
    fn default() -> Self {
        HostCommand {
            program: DEFAULT_HOST_COMMAND.to_string(),
            args: Vec::new(),
        }
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.program)
        } else {
            write!(f, "{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Parse a host command line with shell-style splitting.
///
/// Examples:
/// - "cf" -> program "cf"
/// - "\"/opt/cf cli/cf\" --quiet" -> program "/opt/cf cli/cf", args ["--quiet"]
pub fn parse_host_command(raw: &str) -> Result<HostCommand> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("Host command is empty");
    }

    let parts = shell_split(trimmed).context("Failed to parse host command (shell splitting)")?;
    let Some((program, args)) = parts.split_first() else {
        bail!("No tokens produced when parsing host command");
    };
    if program.is_empty() {
        bail!("Empty program name in host command");
    }
    Ok(HostCommand {
        program: program.clone(),
        args: args.to_vec(),
    })
}
