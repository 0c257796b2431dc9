/*!
format.rs

One-line renderings of the collection entries of an `ApplicationRecord`.

  - format_route(route)     -> "{host}.{domain}{path}"
  - format_service(service) -> "{name}:{guid}"
  - join_lines(items)       -> newline separated, order preserved, no trailing newline

The path is appended as-is: routes without a path end at the domain, and
nothing is inserted between domain and path.
*/

use crate::cf::{RouteSummary, ServiceSummary};

pub fn format_route(route: &RouteSummary) -> String {
    format!("{}.{}{}", route.host, route.domain, route.path)
}

pub fn format_service(service: &ServiceSummary) -> String {
    format!("{}:{}", service.name, service.guid)
}

pub fn join_lines<I>(items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    items.into_iter().collect::<Vec<_>>().join("\n")
}
