//! Route set validation and result consistency checks.

use std::collections::BTreeSet;

use crate::error::RoutingError;
use crate::models::{
    Instance, PrecomputedRoutes, Route, RoutingResult, Violation, ViolationType,
};

/// Relative tolerance when comparing the reported and summed total distance.
const TOTAL_DISTANCE_TOLERANCE: f64 = 1e-9;

/// Checks that a precomputed route set only references known nodes and
/// starts and ends at depots.
///
/// # Errors
///
/// Returns the first problem found, in route key order:
/// [`RoutingError::EmptyRoute`], [`RoutingError::UnknownNode`] or
/// [`RoutingError::NotADepot`].
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Instance, Node, PrecomputedRoutes, RouteRecord};
/// use u_dispatch::evaluation::validate_routes;
///
/// let instance = Instance::new()
///     .with_node(Node::depot(1, "d", 0.0, 0.0, 1))
///     .with_node(Node::customer(10, "c", 0.0, 0.1, 200.0));
/// let record = |sequence: Vec<usize>| RouteRecord {
///     depot: Some(1),
///     sequence,
///     demand: 200.0,
///     distance: 22.2,
///     vehicle_idx: None,
///     capacity: None,
/// };
///
/// let ok = PrecomputedRoutes::new(22.2).with_route(1, record(vec![1, 10, 1]));
/// assert!(validate_routes(&instance, &ok).is_ok());
///
/// let bad = PrecomputedRoutes::new(22.2).with_route(1, record(vec![1, 99, 1]));
/// assert!(validate_routes(&instance, &bad).is_err());
/// ```
pub fn validate_routes(instance: &Instance, routes: &PrecomputedRoutes) -> Result<(), RoutingError> {
    for (key, record) in routes.iter() {
        let (first, last) = match (record.sequence.first(), record.sequence.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return Err(RoutingError::EmptyRoute { route: key }),
        };

        if let Some(&node) = record
            .sequence
            .iter()
            .find(|&&id| instance.node(id).is_none())
        {
            return Err(RoutingError::UnknownNode { route: key, node });
        }

        let endpoints = [Some(first), Some(last), record.depot];
        for node in endpoints.into_iter().flatten() {
            match instance.node(node) {
                None => return Err(RoutingError::UnknownNode { route: key, node }),
                Some(n) if !n.is_depot() => return Err(RoutingError::NotADepot { route: key, node }),
                Some(_) => {}
            }
        }
    }
    Ok(())
}

/// Checks routes and results against the instance they were planned for.
///
/// # Examples
///
/// ```
/// use u_dispatch::config::RoutingConfig;
/// use u_dispatch::constructive::greedy_multi_depot;
/// use u_dispatch::evaluation::ResultChecker;
/// use u_dispatch::models::{Instance, Node};
///
/// let instance = Instance::new()
///     .with_node(Node::depot(1, "d", 0.0, 0.0, 1))
///     .with_node(Node::customer(10, "c", 0.0, 0.1, 200.0));
/// let result = greedy_multi_depot(&instance, &RoutingConfig::default()).unwrap();
///
/// let checker = ResultChecker::new(&instance);
/// assert!(checker.check(&result).is_empty());
/// ```
pub struct ResultChecker<'a> {
    instance: &'a Instance,
}

impl<'a> ResultChecker<'a> {
    /// Creates a checker for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Checks capacity, closure and interior depots of a single route.
    pub fn check_route(&self, route_index: usize, route: &Route) -> Vec<Violation> {
        let mut violations = Vec::new();
        let sequence = route.sequence();

        let closed = sequence.len() >= 2
            && sequence.first() == Some(&route.depot_id())
            && sequence.last() == Some(&route.depot_id());
        if !closed {
            violations.push(Violation::new(ViolationType::RouteNotClosed { route_index }));
        }

        for &node_id in route.stops() {
            if self.instance.node(node_id).is_some_and(|n| n.is_depot()) {
                violations.push(Violation::new(ViolationType::DepotInsideRoute {
                    route_index,
                    node_id,
                }));
            }
        }

        if route.demand() > route.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index,
                load: route.demand(),
                capacity: route.capacity(),
            }));
        }

        violations
    }

    /// Checks every route, duplicate service across routes, and the total.
    pub fn check(&self, result: &RoutingResult) -> Vec<Violation> {
        let mut violations: Vec<Violation> = result
            .routes()
            .iter()
            .enumerate()
            .flat_map(|(idx, route)| self.check_route(idx, route))
            .collect();

        let mut seen = BTreeSet::new();
        for node_id in result.served_ids() {
            let is_depot = self.instance.node(node_id).is_some_and(|n| n.is_depot());
            if !is_depot && !seen.insert(node_id) {
                violations.push(Violation::new(ViolationType::DuplicateService { node_id }));
            }
        }

        let summed = result.summed_route_distance();
        let reported = result.total_distance();
        let scale = reported.abs().max(summed.abs()).max(1.0);
        if (reported - summed).abs() > TOTAL_DISTANCE_TOLERANCE * scale {
            violations.push(Violation::new(ViolationType::TotalDistanceMismatch {
                reported,
                summed,
            }));
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, PlanMode, RouteRecord};

    fn setup() -> Instance {
        Instance::new()
            .with_node(Node::depot(1, "d1", 0.0, 0.0, 1))
            .with_node(Node::depot(2, "d2", 0.0, 1.0, 1))
            .with_node(Node::customer(10, "a", 0.0, 0.1, 200.0))
            .with_node(Node::customer(11, "b", 0.0, 0.2, 200.0))
    }

    fn record(depot: Option<usize>, sequence: Vec<usize>) -> RouteRecord {
        RouteRecord {
            depot,
            sequence,
            demand: 0.0,
            distance: 0.0,
            vehicle_idx: None,
            capacity: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        let routes = PrecomputedRoutes::new(0.0)
            .with_route(1, record(Some(1), vec![1, 10, 11, 1]))
            .with_route(2, record(None, vec![2, 2]));
        assert!(validate_routes(&setup(), &routes).is_ok());
    }

    #[test]
    fn test_validate_empty_sequence() {
        let routes = PrecomputedRoutes::new(0.0).with_route(4, record(Some(1), vec![]));
        assert!(matches!(
            validate_routes(&setup(), &routes),
            Err(RoutingError::EmptyRoute { route: 4 })
        ));
    }

    #[test]
    fn test_validate_unknown_node() {
        let routes = PrecomputedRoutes::new(0.0).with_route(1, record(Some(1), vec![1, 42, 1]));
        assert!(matches!(
            validate_routes(&setup(), &routes),
            Err(RoutingError::UnknownNode { route: 1, node: 42 })
        ));
    }

    #[test]
    fn test_validate_endpoint_not_depot() {
        let routes = PrecomputedRoutes::new(0.0).with_route(3, record(None, vec![10, 11, 1]));
        assert!(matches!(
            validate_routes(&setup(), &routes),
            Err(RoutingError::NotADepot { route: 3, node: 10 })
        ));
    }

    #[test]
    fn test_validate_declared_depot_not_depot() {
        let routes = PrecomputedRoutes::new(0.0).with_route(1, record(Some(11), vec![1, 10, 1]));
        assert!(matches!(
            validate_routes(&setup(), &routes),
            Err(RoutingError::NotADepot { route: 1, node: 11 })
        ));
    }

    #[test]
    fn test_check_capacity_exceeded() {
        let inst = setup();
        let route = Route::from_parts(1, vec![1, 10, 1], 500.0, 1.0, 0, 400.0);
        let violations = ResultChecker::new(&inst).check_route(0, &route);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded { route_index: 0, .. }
        ));
    }

    #[test]
    fn test_check_not_closed_and_interior_depot() {
        let inst = setup();
        let route = Route::from_parts(1, vec![1, 10, 2, 11], 400.0, 1.0, 0, 22000.0);
        let violations = ResultChecker::new(&inst).check_route(3, &route);
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationType::RouteNotClosed { route_index: 3 }));
        assert!(violations.iter().any(|v| v.kind
            == ViolationType::DepotInsideRoute {
                route_index: 3,
                node_id: 2
            }));
    }

    #[test]
    fn test_check_duplicates_and_total() {
        let inst = setup();
        let mut result = RoutingResult::new(PlanMode::Passthrough);
        result.add_route(Route::from_parts(1, vec![1, 10, 1], 200.0, 1.0, 0, 22000.0));
        result.add_route(Route::from_parts(2, vec![2, 10, 2], 200.0, 2.0, 0, 22000.0));
        result.set_total_distance(5.0);
        let violations = ResultChecker::new(&inst).check(&result);
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationType::DuplicateService { node_id: 10 }));
        assert!(violations.iter().any(|v| matches!(
            v.kind,
            ViolationType::TotalDistanceMismatch { .. }
        )));
    }
}
