//! Single-vehicle nearest-neighbor route for one depot.
//!
//! Starting at the depot, the vehicle repeatedly drives to the nearest
//! candidate that is not yet served and still fits in the remaining
//! capacity. When nothing fits, it returns to the depot.
//!
//! # Complexity
//!
//! O(k²) where k = number of candidates of the depot.

use std::collections::BTreeSet;

use tracing::debug;

use crate::distance::DistanceMatrix;
use crate::models::{Instance, NodeId, Route};

/// Customers already placed on a route, shared by all depots of one plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServedSet {
    served: BTreeSet<NodeId>,
}

impl ServedSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a customer as served. Returns `false` if it already was.
    pub fn mark(&mut self, node_id: NodeId) -> bool {
        self.served.insert(node_id)
    }

    /// Returns `true` if the customer is on some route.
    pub fn contains(&self, node_id: NodeId) -> bool {
        self.served.contains(&node_id)
    }

    /// Number of served customers.
    pub fn len(&self) -> usize {
        self.served.len()
    }

    /// Returns `true` if nobody is served yet.
    pub fn is_empty(&self) -> bool {
        self.served.is_empty()
    }
}

/// Builds the route of a depot's single vehicle from its candidate customers.
///
/// Ties between equally near candidates go to the earliest one in
/// `candidates`. Candidates whose demand alone exceeds `capacity` are never
/// selected. Every selected customer is marked in `served`, so a customer
/// listed for several depots is visited at most once.
///
/// # Arguments
///
/// * `instance` — Nodes with normalized demands
/// * `distances` — Distance matrix over the instance
/// * `depot_id` — Depot the vehicle starts and ends at
/// * `candidates` — Customers assigned to this depot
/// * `served` — Customers already on a route
/// * `capacity` — Vehicle capacity (kg)
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Instance, Node};
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::constructive::{build_depot_route, ServedSet};
///
/// let instance = Instance::new()
///     .with_node(Node::depot(1, "d", 0.0, 0.0, 1))
///     .with_node(Node::customer(10, "far", 0.0, 0.3, 200.0))
///     .with_node(Node::customer(11, "near", 0.0, 0.1, 200.0));
/// let dm = DistanceMatrix::from_instance(&instance);
/// let mut served = ServedSet::new();
///
/// let route = build_depot_route(&instance, &dm, 1, &[10, 11], &mut served, 22000.0);
/// assert_eq!(route.sequence(), &[1, 11, 10, 1]);
/// assert_eq!(route.demand(), 400.0);
/// assert!(served.contains(10) && served.contains(11));
/// ```
pub fn build_depot_route(
    instance: &Instance,
    distances: &DistanceMatrix,
    depot_id: NodeId,
    candidates: &[NodeId],
    served: &mut ServedSet,
    capacity: f64,
) -> Route {
    let mut route = Route::new(depot_id, 0, capacity);
    let mut current = depot_id;

    loop {
        // Find nearest unserved candidate that fits the remaining capacity
        let load = route.demand();
        let mut best: Option<(NodeId, f64, f64)> = None;
        for &cid in candidates {
            if served.contains(cid) {
                continue;
            }
            let Some(demand) = instance.node(cid).map(|n| n.demand()) else {
                continue;
            };
            if load + demand > capacity {
                continue;
            }
            let Some(d) = distances.try_get(current, cid) else {
                continue;
            };
            if best.map_or(true, |(_, bd, _)| d < bd) {
                best = Some((cid, d, demand));
            }
        }

        match best {
            Some((next, _, demand)) => {
                served.mark(next);
                route.push_stop(next, demand);
                current = next;
            }
            None => break,
        }
    }

    let mut sequence = route.sequence().to_vec();
    sequence.push(depot_id);
    route.close(distances.path_length(&sequence));

    debug!(
        depot = depot_id,
        stops = route.len(),
        load = route.demand(),
        km = route.distance(),
        "built depot route"
    );
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn line_instance() -> Instance {
        Instance::new()
            .with_node(Node::depot(1, "d", 0.0, 0.0, 1))
            .with_node(Node::customer(10, "a", 0.0, 0.01, 300.0))
            .with_node(Node::customer(11, "b", 0.0, 0.02, 300.0))
            .with_node(Node::customer(12, "c", 0.0, 0.03, 300.0))
    }

    #[test]
    fn test_visits_in_nearest_order() {
        let inst = line_instance();
        let dm = DistanceMatrix::from_instance(&inst);
        let mut served = ServedSet::new();
        let route = build_depot_route(&inst, &dm, 1, &[12, 10, 11], &mut served, 22000.0);
        assert_eq!(route.sequence(), &[1, 10, 11, 12, 1]);
        assert_eq!(route.demand(), 900.0);
        assert_eq!(route.vehicle_idx(), 0);
        assert_eq!(route.capacity(), 22000.0);
        let expected = dm.get(1, 10) + dm.get(10, 11) + dm.get(11, 12) + dm.get(12, 1);
        assert!((route.distance() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_capacity_stops_route() {
        let inst = line_instance();
        let dm = DistanceMatrix::from_instance(&inst);
        let mut served = ServedSet::new();
        let route = build_depot_route(&inst, &dm, 1, &[10, 11, 12], &mut served, 650.0);
        assert_eq!(route.stops(), &[10, 11]);
        assert!(route.demand() <= 650.0);
        assert!(!served.contains(12));
    }

    #[test]
    fn test_skips_non_fitting_takes_farther() {
        let inst = Instance::new()
            .with_node(Node::depot(1, "d", 0.0, 0.0, 1))
            .with_node(Node::customer(10, "heavy", 0.0, 0.01, 900.0))
            .with_node(Node::customer(11, "light", 0.0, 0.05, 200.0));
        let dm = DistanceMatrix::from_instance(&inst);
        let mut served = ServedSet::new();
        let route = build_depot_route(&inst, &dm, 1, &[10, 11], &mut served, 500.0);
        assert_eq!(route.stops(), &[11]);
    }

    #[test]
    fn test_oversized_customer_never_served() {
        let inst = Instance::new()
            .with_node(Node::depot(1, "d", 0.0, 0.0, 1))
            .with_node(Node::customer(10, "huge", 0.0, 0.01, 30000.0));
        let dm = DistanceMatrix::from_instance(&inst);
        let mut served = ServedSet::new();
        let route = build_depot_route(&inst, &dm, 1, &[10], &mut served, 22000.0);
        assert!(route.is_empty());
        assert_eq!(route.sequence(), &[1, 1]);
        assert_eq!(route.distance(), 0.0);
        assert!(served.is_empty());
    }

    #[test]
    fn test_respects_served_set() {
        let inst = line_instance();
        let dm = DistanceMatrix::from_instance(&inst);
        let mut served = ServedSet::new();
        served.mark(10);
        let route = build_depot_route(&inst, &dm, 1, &[10, 11, 12], &mut served, 22000.0);
        assert_eq!(route.stops(), &[11, 12]);
        assert_eq!(served.len(), 3);
    }

    #[test]
    fn test_tie_takes_first_candidate() {
        let inst = Instance::new()
            .with_node(Node::depot(1, "d", 0.0, 0.0, 1))
            .with_node(Node::customer(10, "east", 0.0, 0.1, 200.0))
            .with_node(Node::customer(11, "west", 0.0, -0.1, 200.0));
        let dm = DistanceMatrix::from_instance(&inst);
        let mut served = ServedSet::new();
        let route = build_depot_route(&inst, &dm, 1, &[11, 10], &mut served, 22000.0);
        assert_eq!(route.stops()[0], 11);
    }

    #[test]
    fn test_served_set() {
        let mut s = ServedSet::new();
        assert!(s.is_empty());
        assert!(s.mark(3));
        assert!(!s.mark(3));
        assert_eq!(s.len(), 1);
    }
}
