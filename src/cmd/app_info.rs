/*!
`app_info.rs`

The `app-info` command: print one property of a deployed application.

  cf app-info <app-name> <Property>

Flow:
  Plugin::run        host entry point; invoked for every host command, so it
                     stays silent unless args[0] is `app-info`
  get_app_info       arg count -> auth check -> fetch -> resolve -> write

Output:
  - success: the property value, verbatim, no trailing newline
  - failure: nothing is written here; the error is returned to `main`,
             which owns the `error: <message>` line and the exit status
*/

use std::io::Write;

use crate::cf::CliConnection;
use crate::cmd::AppInfoError;
use crate::cmd::fields::resolve_field;
use crate::cmd::metadata::{COMMAND_NAME, PluginMetadata, plugin_metadata};
use crate::{log_debug, log_trace};

/// Host plugin contract.
pub trait Plugin {
    /// Entry point for every host command. `args[0]` is the command name.
    fn run(
        &self,
        conn: &dyn CliConnection,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), AppInfoError>;

    /// Registration descriptor, read once at install time.
    fn metadata(&self) -> PluginMetadata;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AppInfoPlugin;

impl Plugin for AppInfoPlugin {
    fn run(
        &self,
        conn: &dyn CliConnection,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), AppInfoError> {
        // Only handle our own command, else uninstall would trigger a lookup.
        let Some((command, rest)) = args.split_first() else {
            return Ok(());
        };
        if command != COMMAND_NAME {
            log_trace!("ignoring host command '{command}'");
            return Ok(());
        }
        get_app_info(conn, rest, out)
    }

    fn metadata(&self) -> PluginMetadata {
        plugin_metadata()
    }
}

/// Look up `<app-name> <property>` and write the rendered value to `out`.
pub fn get_app_info(
    conn: &dyn CliConnection,
    args: &[String],
    out: &mut dyn Write,
) -> Result<(), AppInfoError> {
    let [app_name, prop_name] = args else {
        return Err(AppInfoError::InvalidArguments);
    };

    let logged_in = conn.is_logged_in().map_err(AppInfoError::AuthCheckFailed)?;
    if !logged_in {
        return Err(AppInfoError::NotLoggedIn);
    }

    let app = conn
        .get_app(app_name)
        .map_err(|source| AppInfoError::AppLookupFailed {
            name: app_name.clone(),
            source,
        })?;
    log_debug!("fetched app '{}' ({})", app.name, app.guid);

    let value = resolve_field(&app, prop_name);
    out.write_all(value.as_bytes())?;
    out.flush()?;
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */
