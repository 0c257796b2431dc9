/*!
curl.rs - `CliConnection` backed by the host CLI itself.

The host CLI already owns login, token refresh and API transport. This
connection leans on it instead of re-implementing any of that:

  - is_logged_in: read the host config file (`$CF_HOME/.cf/config.json`)
                  and check for a non-empty access token
  - get_app:      `<host> curl /v2/spaces/<space>/apps?q=name:<name>` to resolve the guid,
                  then `<host> curl /v2/apps/<guid>/summary` for the record

Process invocations run on a throwaway current-thread Tokio runtime so the
plugin surface stays synchronous.
*/

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use url::form_urlencoded::byte_serialize;

use super::model::{AppSummary, ApplicationRecord};
use super::{CliConnection, HostCommand};
use crate::{log_debug, log_info, log_trace};

/* ---- Host config ---- */

/// Subset of the host config file this connection reads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostConfig {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub space_fields: SpaceFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpaceFields {
    #[serde(rename = "GUID", default)]
    pub guid: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

impl HostConfig {
    pub fn is_logged_in(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

/// Resolve the directory holding `.cf/` (CF_HOME, then the user's home).
pub fn resolve_cf_home() -> Result<PathBuf> {
    ["CF_HOME", "HOME", "USERPROFILE"]
        .iter()
        .filter_map(|k| std::env::var_os(k))
        .find(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("Cannot locate host config: none of CF_HOME, HOME, USERPROFILE is set"))
}

/* ---- Connection ---- */

#[derive(Debug, Clone)]
pub struct CfCurlConnection {
    host: HostCommand,
    /// Resolved lazily so an unset home only matters once the config is read.
    cf_home: Option<PathBuf>,
}

impl CfCurlConnection {
    /// Connection using the config directory found in the environment.
    pub fn new(host: HostCommand) -> Self {
        Self {
            host,
            cf_home: None,
        }
    }

    #[cfg(test)]
    pub fn with_cf_home(host: HostCommand, cf_home: impl Into<PathBuf>) -> Self {
        Self {
            host,
            cf_home: Some(cf_home.into()),
        }
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        let home = match &self.cf_home {
            Some(h) => h.clone(),
            None => resolve_cf_home()?,
        };
        Ok(home.join(".cf").join("config.json"))
    }

    /// Load the host config; `None` when the file does not exist yet.
    fn load_config(&self) -> Result<Option<HostConfig>> {
        let path = self.config_path()?;
        if !path.exists() {
            log_info!("host config not found at {}, treating as logged out", path.display());
            return Ok(None);
        }
        read_config(&path).map(Some)
    }

    async fn curl(&self, api_path: &str) -> Result<serde_json::Value> {
        log_trace!("{} curl {}", self.host, api_path);
        let output = Command::new(&self.host.program)
            .args(&self.host.args)
            .arg("curl")
            .arg(api_path)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("Failed to run '{} curl {}'", self.host, api_path))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            bail!(
                "'{} curl {}' exited with {}: {}",
                self.host,
                api_path,
                output.status,
                detail
            );
        }

        let body: serde_json::Value = serde_json::from_slice(&output.stdout)
            .with_context(|| format!("Invalid JSON from '{} curl {}'", self.host, api_path))?;
        check_api_error(&body)?;
        Ok(body)
    }

    async fn fetch_app(&self, space_guid: &str, name: &str) -> Result<ApplicationRecord> {
        let listing = self.curl(&apps_query_path(space_guid, name)).await?;
        let guid = first_resource_guid(&listing).ok_or_else(|| anyhow!("App {name} not found"))?;
        log_debug!("resolved app '{name}' to guid {guid}");

        let summary = self.curl(&format!("/v2/apps/{guid}/summary")).await?;
        let summary: AppSummary =
            serde_json::from_value(summary).context("Unexpected app summary format")?;
        Ok(summary.into())
    }
}

impl CliConnection for CfCurlConnection {
    fn is_logged_in(&self) -> Result<bool> {
        Ok(self
            .load_config()?
            .map(|c| c.is_logged_in())
            .unwrap_or(false))
    }

    fn get_app(&self, name: &str) -> Result<ApplicationRecord> {
        let config = self.load_config()?.unwrap_or_default();
        let space_guid = config.space_fields.guid.trim();
        if space_guid.is_empty() {
            bail!("No space targeted, use 'cf target -s SPACE'");
        }
        log_debug!(
            "looking up '{name}' in space {} ({})",
            config.space_fields.name,
            config.target
        );

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create Tokio runtime")?;
        rt.block_on(self.fetch_app(space_guid, name))
    }
}

/* ---- Helpers ---- */

pub fn read_config(path: &Path) -> Result<HostConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read host config {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("Malformed host config {}", path.display()))
}

pub fn parse_config(raw: &str) -> Result<HostConfig> {
    Ok(serde_json::from_str(raw)?)
}

/// `/v2/spaces/<space>/apps?q=name%3A<name>` with the filter form-encoded.
pub fn apps_query_path(space_guid: &str, name: &str) -> String {
    let filter: String = byte_serialize(format!("name:{name}").as_bytes()).collect();
    format!("/v2/spaces/{space_guid}/apps?q={filter}")
}

/// Cloud Controller reports failures in-band as `{"error_code": ..., "description": ...}`.
pub fn check_api_error(body: &serde_json::Value) -> Result<()> {
    let Some(code) = body.get("error_code").and_then(|v| v.as_str()) else {
        return Ok(());
    };
    let desc = body
        .get("description")
        .and_then(|v| v.as_str())
        .unwrap_or("no description");
    bail!("{desc} ({code})")
}

pub fn first_resource_guid(listing: &serde_json::Value) -> Option<String> {
    listing
        .get("resources")?
        .as_array()?
        .first()?
        .get("metadata")?
        .get("guid")?
        .as_str()
        .map(|s| s.to_string())
}

/* ---- Tests ---- */
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    /// Scratch CF_HOME, optionally with a host config file.
    fn cf_home(config: Option<&str>) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        if let Some(raw) = config {
            std::fs::create_dir_all(dir.path().join(".cf")).unwrap();
            std::fs::write(dir.path().join(".cf").join("config.json"), raw).unwrap();
        }
        dir
    }

    #[cfg(unix)]
    const TARGETED: &str = r#"{"AccessToken":"bearer t","Target":"https://api.example.com","SpaceFields":{"GUID":"s1","Name":"dev"}}"#;

    /// Host command running `script` through `sh`; the script sees `curl <path>` as `$1 $2`.
    #[cfg(unix)]
    fn scripted_host(home: &TempDir, script: &str) -> HostCommand {
        let path = home.path().join("fake-cf.sh");
        std::fs::write(&path, script).unwrap();
        HostCommand {
            program: "sh".into(),
            args: vec![path.to_string_lossy().into_owned()],
        }
    }

    #[test]
    fn query_path_encodes_filter() {
        assert_eq!(
            apps_query_path("space-1", "hello world"),
            "/v2/spaces/space-1/apps?q=name%3Ahello+world"
        );
    }

    #[test]
    fn api_error_is_reported() {
        let body = json!({"code": 100004, "description": "The app could not be found", "error_code": "CF-AppNotFound"});
        let err = check_api_error(&body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The app could not be found (CF-AppNotFound)"
        );
        assert!(check_api_error(&json!({"resources": []})).is_ok());
    }

    #[test]
    fn first_guid_from_listing() {
        let listing = json!({
            "total_results": 1,
            "resources": [{"metadata": {"guid": "abc"}, "entity": {"name": "hello"}}]
        });
        assert_eq!(first_resource_guid(&listing).as_deref(), Some("abc"));
        assert_eq!(first_resource_guid(&json!({"resources": []})), None);
    }

    #[test]
    fn config_token_decides_login() {
        let cfg = parse_config(
            r#"{"AccessToken":"bearer xyz","Target":"https://api.example.com","SpaceFields":{"GUID":"s1","Name":"dev","AllowSSH":true}}"#,
        )
        .unwrap();
        assert!(cfg.is_logged_in());
        assert_eq!(cfg.space_fields.guid, "s1");

        let cfg = parse_config(r#"{"AccessToken":""}"#).unwrap();
        assert!(!cfg.is_logged_in());
    }

    #[test]
    fn missing_config_means_logged_out() {
        let home = cf_home(None);
        let conn = CfCurlConnection::with_cf_home(HostCommand::default(), home.path());
        assert!(!conn.is_logged_in().unwrap());
    }

    #[test]
    fn config_file_is_read() {
        let home = cf_home(Some(r#"{"AccessToken":"bearer t"}"#));
        let conn = CfCurlConnection::with_cf_home(HostCommand::default(), home.path());
        assert!(conn.is_logged_in().unwrap());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let home = cf_home(Some("{not json"));
        let conn = CfCurlConnection::with_cf_home(HostCommand::default(), home.path());
        let err = conn.is_logged_in().unwrap_err();
        assert!(err.to_string().contains("Malformed host config"));
        assert!(format!("{err:#}").contains("key must be a string"));
    }

    #[test]
    fn get_app_requires_targeted_space() {
        let home = cf_home(Some(r#"{"AccessToken":"bearer t","SpaceFields":{"GUID":""}}"#));
        let conn = CfCurlConnection::with_cf_home(HostCommand::default(), home.path());
        let err = conn.get_app("hello").unwrap_err();
        assert!(err.to_string().contains("No space targeted"));
    }

    #[cfg(unix)]
    #[test]
    fn host_failure_exit_is_an_error() {
        let home = cf_home(Some(TARGETED));
        let host = scripted_host(&home, "echo 'FAILED: not authorized' >&2\nexit 3\n");
        let conn = CfCurlConnection::with_cf_home(host, home.path());
        let msg = format!("{:#}", conn.get_app("hello").unwrap_err());
        assert!(msg.contains("exited with"), "{msg}");
        assert!(msg.contains("FAILED: not authorized"), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn empty_listing_is_not_found() {
        let home = cf_home(Some(TARGETED));
        let host = scripted_host(&home, "echo '{\"total_results\":0,\"resources\":[]}'\n");
        let conn = CfCurlConnection::with_cf_home(host, home.path());
        let err = conn.get_app("hello").unwrap_err();
        assert_eq!(err.to_string(), "App hello not found");
    }

    #[cfg(unix)]
    #[test]
    fn api_error_payload_is_an_error() {
        let home = cf_home(Some(TARGETED));
        let host = scripted_host(
            &home,
            "echo '{\"code\":10002,\"description\":\"Authentication error\",\"error_code\":\"CF-NotAuthenticated\"}'\n",
        );
        let conn = CfCurlConnection::with_cf_home(host, home.path());
        let err = conn.get_app("hello").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Authentication error (CF-NotAuthenticated)"
        );
    }

    #[cfg(unix)]
    #[test]
    fn summary_is_decoded_into_record() {
        let home = cf_home(Some(TARGETED));
        let script = r#"case "$2" in
  /v2/spaces/s1/apps*)
    echo '{"total_results":1,"resources":[{"metadata":{"guid":"app-1"},"entity":{"name":"hello"}}]}' ;;
  /v2/apps/app-1/summary)
    echo '{"guid":"app-1","name":"hello","memory":256,"instances":2,"state":"STARTED","routes":[{"host":"hello","path":"","domain":{"name":"example.com"}}],"services":[{"guid":"svc-1","name":"db"}]}' ;;
  *)
    echo "unexpected path $2" >&2; exit 1 ;;
esac
"#;
        let host = scripted_host(&home, script);
        let conn = CfCurlConnection::with_cf_home(host, home.path());
        let app = conn.get_app("hello").unwrap();
        assert_eq!(app.guid, "app-1");
        assert_eq!(app.memory, 256);
        assert_eq!(app.instance_count, 2);
        assert_eq!(app.routes.len(), 1);
        assert_eq!(app.routes[0].domain, "example.com");
        assert_eq!(app.services[0].name, "db");
        assert_eq!(app.services[0].guid, "svc-1");
    }
}
