//! Error taxonomy of the `app-info` command.
//!
//! Every variant is terminal: it propagates to `main`, which prints
//! `error: <message>` and exits with status 1.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppInfoError {
    /// Argument count other than `<app-name> <property>`.
    #[error("invalid parameters")]
    InvalidArguments,

    /// The host could not report its authentication state.
    #[error("{0:#}")]
    AuthCheckFailed(#[source] anyhow::Error),

    #[error("you need to log in")]
    NotLoggedIn,

    /// Fetching the named application failed.
    #[error("couldn't get app {name}: {source:#}")]
    AppLookupFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
