/*!
Plugin surface of the `app-info` command.

Layout:
  src/cmd/
    mod.rs        (this file: module declarations + re-exports)
    app_info.rs   (Plugin trait, AppInfoPlugin, get_app_info)
    fields.rs     (property name -> rendered value tables)
    format.rs     (route / service one-liners)
    metadata.rs   (registration descriptor)
    error.rs      (AppInfoError)

Conventions:
  - Nothing in here prints errors or exits; `main.rs` owns that boundary.
  - Output goes through a `&mut dyn Write` so tests can capture it.
*/

pub mod app_info;
pub mod error;
pub mod fields;
pub mod format;
pub mod metadata;

pub use app_info::{AppInfoPlugin, Plugin};
pub use error::AppInfoError;
