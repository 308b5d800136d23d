//! Plain-text route summary.

use std::fs;
use std::path::Path;

use crate::config::VEHICLES_PER_DEPOT;
use crate::error::RoutingError;
use crate::models::{Instance, NodeId, Route, RoutingResult};

/// Formats a result as a human-readable summary grouped by depot.
///
/// Node demands are read from `instance`; pass the normalized instance to show
/// the demands the routes were planned with.
///
/// # Examples
///
/// ```
/// use u_dispatch::config::RoutingConfig;
/// use u_dispatch::io::{default_instance, format_report};
/// use u_dispatch::planner::plan;
///
/// let instance = default_instance();
/// let result = plan(&instance, &RoutingConfig::default()).unwrap();
/// let report = format_report(&instance, &result);
///
/// assert!(report.starts_with("Status: Heuristic | Dist(total): 2.755 km"));
/// assert!(report.contains("Almacén 1 - Almacén Norte | Salida: 670kg / Cap: 22000kg"));
/// assert!(report.contains("  Vehículo 1: D1 -> N12(d=250) -> N10(d=200) -> N11(d=220) -> D1"));
/// ```
pub fn format_report(instance: &Instance, result: &RoutingResult) -> String {
    let mut lines = vec![format!(
        "Status: {} | Dist(total): {:.3} km",
        result.status(),
        result.total_distance()
    )];

    // Depots in order of first appearance
    let mut depots: Vec<NodeId> = Vec::new();
    for route in result.routes() {
        if !depots.contains(&route.depot_id()) {
            depots.push(route.depot_id());
        }
    }

    for depot_id in depots {
        let routes: Vec<&Route> = result.routes_for_depot(depot_id).collect();
        let name = instance.node(depot_id).map(|n| n.name()).unwrap_or("");
        let outbound: f64 = routes.iter().map(|r| r.demand()).sum();
        let capacity = routes
            .first()
            .map_or(0.0, |r| r.capacity() * VEHICLES_PER_DEPOT as f64);

        lines.push(String::new());
        lines.push(format!(
            "Almacén {depot_id} - {name} | Salida: {outbound}kg / Cap: {capacity}kg"
        ));
        for (idx, route) in routes.iter().enumerate() {
            lines.push(format!(
                "  Vehículo {}: {} | Carga: {} / Cap:{} | Dist: {:.3} km",
                idx + 1,
                format_sequence(instance, route.sequence()),
                route.demand(),
                route.capacity(),
                route.distance()
            ));
        }
    }

    if !result.unserved().is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Sin servir: {}",
            format_nodes(instance, result.unserved(), ", ")
        ));
    }

    lines.join("\n")
}

fn format_sequence(instance: &Instance, sequence: &[NodeId]) -> String {
    format_nodes(instance, sequence, " -> ")
}

fn format_nodes(instance: &Instance, ids: &[NodeId], sep: &str) -> String {
    ids.iter()
        .map(|&id| match instance.node(id) {
            Some(n) if n.is_depot() => format!("D{id}"),
            Some(n) => format!("N{id}(d={})", n.demand()),
            None => id.to_string(),
        })
        .collect::<Vec<_>>()
        .join(sep)
}

/// Writes a formatted report to a file, replacing any existing content.
pub fn write_report(path: impl AsRef<Path>, report: &str) -> Result<(), RoutingError> {
    fs::write(path, report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, PlanMode};

    fn setup() -> (Instance, RoutingResult) {
        let inst = Instance::new()
            .with_node(Node::depot(1, "North", 0.0, 0.0, 1))
            .with_node(Node::depot(2, "South", 0.0, 1.0, 1))
            .with_node(Node::customer(10, "a", 0.0, 0.1, 200.0))
            .with_node(Node::customer(11, "b", 0.0, 0.2, 250.5))
            .with_node(Node::customer(12, "c", 0.0, 0.3, 30000.0));
        let mut result = RoutingResult::new(PlanMode::Constructed);
        result.add_route(Route::from_parts(1, vec![1, 10, 11, 1], 450.5, 1.23456, 0, 22000.0));
        result.add_route(Route::from_parts(2, vec![2, 2], 0.0, 0.0, 0, 22000.0));
        result.add_unserved(12);
        result.set_total_distance(1.23456);
        (inst, result)
    }

    #[test]
    fn test_report_layout() {
        let (inst, result) = setup();
        let report = format_report(&inst, &result);
        let expected = "\
Status: Heuristic | Dist(total): 1.235 km

Almacén 1 - North | Salida: 450.5kg / Cap: 22000kg
  Vehículo 1: D1 -> N10(d=200) -> N11(d=250.5) -> D1 | Carga: 450.5 / Cap:22000 | Dist: 1.235 km

Almacén 2 - South | Salida: 0kg / Cap: 22000kg
  Vehículo 1: D2 -> D2 | Carga: 0 / Cap:22000 | Dist: 0.000 km

Sin servir: N12(d=30000)";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_unknown_node_printed_raw() {
        let inst = Instance::new();
        assert_eq!(format_sequence(&inst, &[1, 5, 1]), "1 -> 5 -> 1");
    }

    #[test]
    fn test_empty_result() {
        let report = format_report(&Instance::new(), &RoutingResult::new(PlanMode::Passthrough));
        assert_eq!(report, "Status: Heuristic | Dist(total): 0.000 km");
    }

    #[test]
    fn test_passthrough_status_header() {
        let inst = Instance::new().with_node(Node::depot(1, "North", 0.0, 0.0, 1));
        let mut result = RoutingResult::new(PlanMode::Passthrough);
        result.add_route(Route::from_parts(1, vec![1, 1], 0.0, 0.0, 0, 22000.0));
        assert!(format_report(&inst, &result).starts_with("Status: Heuristic | "));

        result.set_status("NotRun");
        assert!(format_report(&inst, &result).starts_with("Status: NotRun | "));
    }
}
