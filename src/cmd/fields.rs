/*!
fields.rs - property name -> rendered value.

Two fixed tables, both built at compile time:

  COLLECTION_FIELDS  Routes / Services, rendered one entry per line
  SCALAR_FIELDS      every scalar attribute, rendered with `to_string`

Lookup is exact and case-sensitive. A name found in neither table renders as
the empty string; callers get no error for it.
*/

use crate::cf::ApplicationRecord;
use crate::cmd::format::{format_route, format_service, join_lines};
use crate::log_debug;

/// Renders one property of a record.
pub type Accessor = fn(&ApplicationRecord) -> String;

pub const ROUTES: &str = "Routes";
pub const SERVICES: &str = "Services";

/// Collection-valued properties; consulted before the scalar table.
pub const COLLECTION_FIELDS: &[(&str, Accessor)] = &[
    (ROUTES, |a| join_lines(a.routes.iter().map(format_route))),
    (SERVICES, |a| join_lines(a.services.iter().map(format_service))),
];

/// Scalar properties, in the order they are documented.
pub const SCALAR_FIELDS: &[(&str, Accessor)] = &[
    ("Guid", |a| a.guid.clone()),
    ("Name", |a| a.name.clone()),
    ("BuildpackUrl", |a| a.buildpack_url.clone()),
    ("Command", |a| a.command.clone()),
    ("Diego", |a| a.diego.to_string()),
    ("DetectedStartCommand", |a| a.detected_start_command.clone()),
    ("DiskQuota", |a| a.disk_quota.to_string()),
    ("InstanceCount", |a| a.instance_count.to_string()),
    ("Memory", |a| a.memory.to_string()),
    ("RunningInstances", |a| a.running_instances.to_string()),
    ("HealthCheckTimeout", |a| a.health_check_timeout.to_string()),
    ("State", |a| a.state.clone()),
    ("SpaceGuid", |a| a.space_guid.clone()),
    ("PackageUpdatedAt", |a| a.package_updated_at.clone().unwrap_or_default()),
    ("PackageState", |a| a.package_state.clone()),
    ("StagingFailedReason", |a| a.staging_failed_reason.clone()),
];

fn lookup(table: &[(&str, Accessor)], name: &str) -> Option<Accessor> {
    table
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, accessor)| *accessor)
}

/// Render property `name` of `app`; unknown names yield `""`.
pub fn resolve_field(app: &ApplicationRecord, name: &str) -> String {
    match lookup(COLLECTION_FIELDS, name).or_else(|| lookup(SCALAR_FIELDS, name)) {
        Some(accessor) => accessor(app),
        None => {
            log_debug!("unknown property '{name}', rendering empty value");
            String::new()
        }
    }
}

/// All recognized property names: scalars first, then collections.
pub fn property_names() -> impl Iterator<Item = &'static str> {
    SCALAR_FIELDS
        .iter()
        .chain(COLLECTION_FIELDS.iter())
        .map(|(name, _)| *name)
}
