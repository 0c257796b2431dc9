use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

mod cf;
mod cmd;
mod utils;

use cf::{CfCurlConnection, HostCommand};
use cmd::{AppInfoPlugin, Plugin};

/// cf-app-info - print a single property of a Cloud Foundry application.
///
/// Invoked by the host CLI with its raw argument list:
///   cf-app-info app-info <app-name> <Property>
///
/// Any other command name is ignored silently (the host calls every installed
/// plugin, e.g. during uninstall).
///
/// Global flags / env:
///   -v / -vv        Increase verbosity (logs go to stderr)
///   -q / --quiet    Errors only
///   --cf            Host CLI invocation (or APP_INFO_CF env; default "cf")
///   --metadata      Print the registration descriptor as JSON
///   CF_HOME         Directory containing the host's .cf/config.json
///
/// Examples:
///   cf-app-info app-info helloworld Guid
///   cf-app-info app-info helloworld Routes
///   cf-app-info --cf "/usr/local/bin/cf7" app-info helloworld State
#[derive(Parser, Debug)]
#[command(
    name = "cf-app-info",
    version,
    author,
    about = "cf plugin: print one property of an application",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all non-error logging
    #[arg(short, long)]
    quiet: bool,

    /// Host CLI invocation used for API calls
    #[arg(long = "cf", value_name = "CMD")]
    cf: Option<String>,

    /// Print plugin metadata (JSON) and exit
    #[arg(long)]
    metadata: bool,

    /// Host argument list: <command> [ARGS]...
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let plugin = AppInfoPlugin;

    if cli.metadata {
        let md = serde_json::to_string_pretty(&plugin.metadata())
            .context("Failed to serialize plugin metadata")?;
        println!("{md}");
        return Ok(());
    }

    // Host command: --cf flag > APP_INFO_CF env > "cf"
    let host_raw = cli.cf.clone().or_else(|| {
        std::env::var("APP_INFO_CF")
            .ok()
            .filter(|s| !s.trim().is_empty())
    });
    // Validate if present
    let host = match host_raw.as_deref().map(cf::parse_host_command) {
        Some(Ok(h)) => h,
        Some(Err(e)) => {
            eprintln!("Invalid host command '{}': {e}", host_raw.as_deref().unwrap_or_default());
            std::process::exit(2);
        }
        None => HostCommand::default(),
    };
    log_debug!("host command: {host}");

    let conn = CfCurlConnection::new(host);

    let result = {
        let mut out = io::stdout().lock();
        plugin.run(&conn, &cli.args, &mut out)
    };
    if let Err(e) = result {
        fatal(e);
    }
    Ok(())
}

/// Print `error: <message>` on stdout and exit with status 1.
fn fatal(msg: impl std::fmt::Display) -> ! {
    log_error!("{msg}");
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "error: {msg}");
    let _ = out.flush();
    std::process::exit(1);
}
