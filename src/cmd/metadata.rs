//! Static registration descriptor handed to the host CLI.
//!
//! Keys serialize in PascalCase to match the host's plugin registration schema.

use serde::Serialize;
use std::fmt;

use crate::cmd::fields::property_names;

/// Plugin name. A single token: the host's uninstall flow splits on whitespace.
pub const PLUGIN_NAME: &str = "app-info";

/// The one command this plugin contributes.
pub const COMMAND_NAME: &str = "app-info";

pub const HELP_TEXT: &str = "Plugin to get the application id";

const EXAMPLE_APP: &str = "helloworld";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionType {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Usage {
    pub usage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Command {
    pub name: String,
    pub help_text: String,
    pub usage_details: Usage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginMetadata {
    pub name: String,
    pub version: VersionType,
    pub min_cli_version: VersionType,
    pub commands: Vec<Command>,
}

/// One `$ cf app-info helloworld <Property>` line per recognized property.
pub fn usage_text() -> String {
    property_names()
        .map(|p| format!("$ cf {COMMAND_NAME} {EXAMPLE_APP} {p}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn plugin_metadata() -> PluginMetadata {
    PluginMetadata {
        name: PLUGIN_NAME.to_string(),
        version: VersionType {
            major: 0,
            minor: 0,
            build: 1,
        },
        min_cli_version: VersionType {
            major: 6,
            minor: 7,
            build: 0,
        },
        commands: vec![Command {
            name: COMMAND_NAME.to_string(),
            help_text: HELP_TEXT.to_string(),
            usage_details: Usage {
                usage: usage_text(),
            },
        }],
    }
}
