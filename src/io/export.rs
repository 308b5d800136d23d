//! Writing a result back into an instance document.

use std::fs;
use std::path::Path;

use crate::error::RoutingError;
use crate::models::{Instance, RoutingResult};

use super::dto::{InstanceDocument, RouteDto};

/// Builds an instance document carrying the result's routes.
///
/// Routes are keyed `1..=n` in result order, `totalDistance` is the result's
/// total and `status` its status label. Loading the document again and planning
/// it reproduces the same routes by passthrough.
///
/// # Examples
///
/// ```
/// use u_dispatch::config::RoutingConfig;
/// use u_dispatch::io::{default_instance, to_document};
/// use u_dispatch::planner::{plan_with, Strategy};
///
/// let instance = default_instance();
/// let result = plan_with(&instance, &RoutingConfig::default(), Strategy::Construct).unwrap();
/// let doc = to_document(&instance, &result);
///
/// assert_eq!(doc.status.as_deref(), Some("Heuristic"));
/// assert_eq!(doc.routes.as_ref().map(|r| r.len()), Some(3));
/// assert_eq!(doc.total_distance, Some(result.total_distance()));
/// ```
pub fn to_document(instance: &Instance, result: &RoutingResult) -> InstanceDocument {
    let mut doc = InstanceDocument::from_instance(instance);
    doc.routes = Some(
        result
            .routes()
            .iter()
            .enumerate()
            .map(|(idx, route)| {
                let dto = RouteDto {
                    sequence: route.sequence().to_vec(),
                    demand: Some(route.demand()),
                    distance: Some(route.distance()),
                    depot: Some(route.depot_id()),
                    vehicle_idx: Some(route.vehicle_idx()),
                    capacity: Some(route.capacity()),
                };
                (idx as u64 + 1, dto)
            })
            .collect(),
    );
    doc.total_distance = Some(result.total_distance());
    doc.status = Some(result.status().to_string());
    doc
}

/// Pretty-prints an instance document to a file.
pub fn write_instance_json(path: impl AsRef<Path>, doc: &InstanceDocument) -> Result<(), RoutingError> {
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json)?;
    Ok(())
}
