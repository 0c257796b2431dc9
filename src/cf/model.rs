/*!
model.rs - application snapshot returned by a `CliConnection`.

`ApplicationRecord` is what the field resolver reads. `AppSummary` is the wire
shape of the Cloud Controller `/v2/apps/:guid/summary` document; it is decoded
with serde and converted into an `ApplicationRecord` right away so nothing
downstream depends on the API layout.
*/

use serde::Deserialize;

/* ---- Record types ---- */

/// Immutable snapshot of one deployed application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationRecord {
    pub guid: String,
    pub name: String,
    pub buildpack_url: String,
    pub command: String,
    pub diego: bool,
    pub detected_start_command: String,
    pub disk_quota: i64,
    pub instance_count: i64,
    pub memory: i64,
    pub running_instances: i64,
    pub health_check_timeout: i64,
    pub state: String,
    pub space_guid: String,
    /// Timestamp as reported by the API; absent until a package was uploaded.
    pub package_updated_at: Option<String>,
    pub package_state: String,
    pub staging_failed_reason: String,
    pub routes: Vec<RouteSummary>,
    pub services: Vec<ServiceSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSummary {
    pub host: String,
    /// Domain name the route is bound to.
    pub domain: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSummary {
    pub name: String,
    pub guid: String,
}

/* ---- Wire types (Cloud Controller v2) ---- */

/// `/v2/apps/:guid/summary` response body. Nullable API fields are `Option`.
#[derive(Debug, Deserialize)]
pub struct AppSummary {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub buildpack: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub diego: bool,
    #[serde(default)]
    pub detected_start_command: Option<String>,
    #[serde(default)]
    pub disk_quota: Option<i64>,
    #[serde(default)]
    pub instances: Option<i64>,
    #[serde(default)]
    pub memory: Option<i64>,
    #[serde(default)]
    pub running_instances: Option<i64>,
    #[serde(default)]
    pub health_check_timeout: Option<i64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub space_guid: Option<String>,
    #[serde(default)]
    pub package_updated_at: Option<String>,
    #[serde(default)]
    pub package_state: Option<String>,
    #[serde(default)]
    pub staging_failed_reason: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RouteEntry {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub domain: Option<DomainEntry>,
}

#[derive(Debug, Deserialize)]
pub struct DomainEntry {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ServiceEntry {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub name: String,
}

impl From<AppSummary> for ApplicationRecord {
    fn from(s: AppSummary) -> Self {
        // Only the configured buildpack; detection results are not reported.
        ApplicationRecord {
            guid: s.guid,
            name: s.name,
            buildpack_url: s.buildpack.unwrap_or_default(),
            command: s.command.unwrap_or_default(),
            diego: s.diego,
            detected_start_command: s.detected_start_command.unwrap_or_default(),
            disk_quota: s.disk_quota.unwrap_or(0),
            instance_count: s.instances.unwrap_or(0),
            memory: s.memory.unwrap_or(0),
            running_instances: s.running_instances.unwrap_or(0),
            health_check_timeout: s.health_check_timeout.unwrap_or(0),
            state: s.state.unwrap_or_default(),
            space_guid: s.space_guid.unwrap_or_default(),
            package_updated_at: s.package_updated_at.filter(|t| !t.is_empty()),
            package_state: s.package_state.unwrap_or_default(),
            staging_failed_reason: s.staging_failed_reason.unwrap_or_default(),
            routes: s.routes.into_iter().map(RouteSummary::from).collect(),
            services: s.services.into_iter().map(ServiceSummary::from).collect(),
        }
    }
}

impl From<RouteEntry> for RouteSummary {
    fn from(r: RouteEntry) -> Self {
        RouteSummary {
            host: r.host,
            domain: r.domain.map(|d| d.name).unwrap_or_default(),
            path: r.path.unwrap_or_default(),
        }
    }
}

impl From<ServiceEntry> for ServiceSummary {
    fn from(s: ServiceEntry) -> Self {
        ServiceSummary {
            name: s.name,
            guid: s.guid,
        }
    }
}

/* ---- Tests ---- */
