//! Instance loading with a built-in fallback.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::RoutingError;
use crate::models::{Instance, Node, PrecomputedRoutes, RouteRecord, TimeWindow, DEFAULT_STATUS};

use super::dto::InstanceDocument;

/// Parses an instance from a JSON document.
///
/// # Examples
///
/// ```
/// use u_dispatch::io::parse_instance;
///
/// let instance = parse_instance(r#"{
///     "nodes": {
///         "1": {"name": "North", "lat": 40.44, "lon": -3.69, "depot": true},
///         "10": {"name": "Client", "demand": 150, "lat": 40.45, "lon": -3.69}
///     }
/// }"#).unwrap();
/// assert_eq!(instance.num_depots(), 1);
/// assert_eq!(instance.num_customers(), 1);
/// ```
pub fn parse_instance(json: &str) -> Result<Instance, RoutingError> {
    let doc: InstanceDocument = serde_json::from_str(json)?;
    Ok(doc.to_instance())
}

/// Reads and parses an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance, RoutingError> {
    let text = fs::read_to_string(path)?;
    parse_instance(&text)
}

/// Reads an instance file, falling back to [`default_instance`] when the file
/// is missing or malformed.
pub fn load_instance_or_default(path: impl AsRef<Path>) -> Instance {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "no instance file, using built-in instance");
        return default_instance();
    }
    match read_instance(path) {
        Ok(instance) => {
            info!(path = %path.display(), nodes = instance.len(), "loaded instance");
            instance
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load instance, using built-in instance");
            default_instance()
        }
    }
}

/// The built-in demo instance: three depots in Madrid, six customers (10-15)
/// and the route set the visualizer computed for them.
pub fn default_instance() -> Instance {
    let depots = [
        (1, "Almacén Norte", 40.44528933211498, -3.6955678224704815),
        (2, "Almacén Sur", 40.44118520927391, -3.6940182715253753),
        (3, "Almacén Este", 40.443506084379536, -3.693013713679337),
    ];
    let customers = [
        (10, "Cliente 10", 40.44859519461797, -3.6926292780233725, 200.0),
        (11, "Cliente 11", 40.44932983072975, -3.697363599788293, 220.0),
        (12, "Cliente 12", 40.447370801098344, -3.6948739997874047, 250.0),
        (13, "Cliente 13", 40.440141139987915, -3.6976901048825503, 200.0),
        (14, "Cliente 14", 40.44215512692083, -3.696616266836483, 210.0),
        (15, "Cliente", 40.44566918127527, -3.691091197295794, 200.0),
    ];

    // Opening hours in minutes: depots all day, customers the first 8 hours
    let open_until = |node: Node, latest: f64| match TimeWindow::new(0.0, latest) {
        Some(tw) => node.with_time_window(tw),
        None => node,
    };

    let mut instance = Instance::new();
    for (id, name, lat, lon) in depots {
        instance.insert_node(open_until(Node::depot(id, name, lat, lon, 1), 1440.0));
    }
    for (id, name, lat, lon, demand) in customers {
        instance.insert_node(open_until(Node::customer(id, name, lat, lon, demand), 480.0));
    }

    let route = |depot, sequence: Vec<usize>, demand, distance| RouteRecord {
        depot: Some(depot),
        sequence,
        demand,
        distance,
        vehicle_idx: Some(0),
        capacity: Some(22000.0),
    };
    let routes = PrecomputedRoutes::new(2.754661170184616)
        .with_status(DEFAULT_STATUS)
        .with_route(1, route(1, vec![1, 12, 10, 11, 1], 670.0, 1.355614079477195))
        .with_route(2, route(2, vec![2, 14, 13, 2], 410.0, 0.8182880438967184))
        .with_route(3, route(3, vec![3, 15, 3], 200.0, 0.5807590468107028));

    instance.with_precomputed_routes(routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_instance_shape() {
        let inst = default_instance();
        assert_eq!(inst.num_depots(), 3);
        assert_eq!(inst.num_customers(), 6);
        let ids: Vec<_> = inst.customers().map(|n| n.id()).collect();
        assert_eq!(ids, vec![10, 11, 12, 13, 14, 15]);
        let total: f64 = inst.customers().map(|n| n.demand()).sum();
        assert_eq!(total, 1280.0);
        assert!(inst.has_precomputed_routes());
        assert_eq!(inst.precomputed().map(|p| p.len()), Some(3));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_instance("{ not json"), Err(RoutingError::Json(_))));
        assert!(matches!(
            parse_instance(r#"{"nodes": {"1": {"name": "no coordinates"}}}"#),
            Err(RoutingError::Json(_))
        ));
    }

    #[test]
    fn test_parse_without_routes() {
        let inst = parse_instance(
            r#"{"nodes": {"1": {"lat": 0.0, "lon": 0.0, "depot": true, "vehicles": 4}}}"#,
        )
        .expect("valid");
        assert!(inst.precomputed().is_none());
        assert_eq!(inst.node(1).and_then(|n| n.declared_vehicles()), Some(4));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_instance("/nonexistent/u-dispatch/data.json").expect_err("missing");
        assert!(matches!(err, RoutingError::Io(_)));
    }

    #[test]
    fn test_fallback_on_missing_file() {
        let inst = load_instance_or_default("/nonexistent/u-dispatch/data.json");
        assert_eq!(inst, default_instance());
    }
}
