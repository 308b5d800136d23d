//! Nearest-depot assignment.
//!
//! Every customer goes to the depot at the smallest great-circle distance.
//! Depots are scanned in ascending ID order and only a strictly smaller
//! distance replaces the incumbent, so ties go to the lowest depot ID.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::RoutingError;
use crate::models::{Instance, NodeId};

/// Customers grouped by the depot they were assigned to.
///
/// Every depot of the instance has an entry, possibly empty. Candidate lists
/// are in ascending customer ID order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepotAssignment {
    by_depot: BTreeMap<NodeId, Vec<NodeId>>,
}

impl DepotAssignment {
    /// Candidate customers of a depot, or `None` for an unknown depot.
    pub fn candidates(&self, depot_id: NodeId) -> Option<&[NodeId]> {
        self.by_depot.get(&depot_id).map(Vec::as_slice)
    }

    /// Depot IDs in ascending order.
    pub fn depots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.by_depot.keys().copied()
    }

    /// `(depot, candidates)` pairs in ascending depot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[NodeId])> {
        self.by_depot.iter().map(|(&d, c)| (d, c.as_slice()))
    }

    /// Total number of assigned customers.
    pub fn num_assigned(&self) -> usize {
        self.by_depot.values().map(Vec::len).sum()
    }
}

/// Partitions the instance's customers across its depots by nearest distance.
///
/// # Errors
///
/// Returns [`RoutingError::NoDepots`] if the instance has no depot.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Instance, Node};
/// use u_dispatch::constructive::assign_to_depots;
///
/// let instance = Instance::new()
///     .with_node(Node::depot(1, "west", 0.0, 0.0, 1))
///     .with_node(Node::depot(2, "east", 0.0, 1.0, 1))
///     .with_node(Node::customer(10, "a", 0.0, 0.1, 200.0))
///     .with_node(Node::customer(11, "b", 0.0, 0.9, 200.0));
///
/// let assignment = assign_to_depots(&instance).unwrap();
/// assert_eq!(assignment.candidates(1), Some(&[10][..]));
/// assert_eq!(assignment.candidates(2), Some(&[11][..]));
/// ```
pub fn assign_to_depots(instance: &Instance) -> Result<DepotAssignment, RoutingError> {
    let depots: Vec<_> = instance.depots().collect();
    if depots.is_empty() {
        return Err(RoutingError::NoDepots);
    }

    let mut by_depot: BTreeMap<NodeId, Vec<NodeId>> =
        depots.iter().map(|d| (d.id(), Vec::new())).collect();

    for customer in instance.customers() {
        let mut best = depots[0].id();
        let mut best_d = f64::INFINITY;
        for depot in &depots {
            let d = customer.distance_to(depot);
            if d < best_d {
                best_d = d;
                best = depot.id();
            }
        }
        debug!(customer = customer.id(), depot = best, km = best_d, "assigned");
        by_depot.entry(best).or_default().push(customer.id());
    }

    Ok(DepotAssignment { by_depot })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    #[test]
    fn test_no_depots() {
        let inst = Instance::new().with_node(Node::customer(10, "a", 0.0, 0.0, 200.0));
        assert!(matches!(assign_to_depots(&inst), Err(RoutingError::NoDepots)));
    }

    #[test]
    fn test_no_customers() {
        let inst = Instance::new()
            .with_node(Node::depot(1, "a", 0.0, 0.0, 1))
            .with_node(Node::depot(2, "b", 0.0, 1.0, 1));
        let a = assign_to_depots(&inst).expect("has depots");
        assert_eq!(a.depots().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(a.candidates(1), Some(&[][..]));
        assert_eq!(a.candidates(2), Some(&[][..]));
        assert_eq!(a.num_assigned(), 0);
    }

    #[test]
    fn test_nearest_depot() {
        let inst = Instance::new()
            .with_node(Node::depot(1, "west", 0.0, 0.0, 1))
            .with_node(Node::depot(2, "east", 0.0, 1.0, 1))
            .with_node(Node::customer(10, "a", 0.0, 0.2, 200.0))
            .with_node(Node::customer(11, "b", 0.0, 0.7, 200.0))
            .with_node(Node::customer(12, "c", 0.0, 0.4, 200.0));
        let a = assign_to_depots(&inst).expect("has depots");
        assert_eq!(a.candidates(1), Some(&[10, 12][..]));
        assert_eq!(a.candidates(2), Some(&[11][..]));
        assert_eq!(a.candidates(99), None);
        assert_eq!(a.num_assigned(), 3);
    }

    #[test]
    fn test_tie_goes_to_lowest_depot() {
        let inst = Instance::new()
            .with_node(Node::depot(5, "east", 0.0, 0.1, 1))
            .with_node(Node::depot(3, "west", 0.0, -0.1, 1))
            .with_node(Node::customer(10, "middle", 0.0, 0.0, 200.0));
        let a = assign_to_depots(&inst).expect("has depots");
        assert_eq!(a.candidates(3), Some(&[10][..]));
        assert_eq!(a.candidates(5), Some(&[][..]));
    }
}
