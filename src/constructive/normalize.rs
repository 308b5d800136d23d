//! Demand floor.

use tracing::debug;

use crate::models::Instance;

/// Raises every customer demand below `min_demand` to exactly `min_demand`.
///
/// Depots and demands already at or above the floor are left unchanged.
/// Returns the number of customers whose demand was raised.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Instance, Node};
/// use u_dispatch::constructive::normalize_demands;
///
/// let mut instance = Instance::new()
///     .with_node(Node::depot(1, "d", 0.0, 0.0, 1))
///     .with_node(Node::customer(10, "small", 0.0, 0.1, 0.0))
///     .with_node(Node::customer(11, "large", 0.0, 0.2, 900.0));
///
/// assert_eq!(normalize_demands(&mut instance, 200.0), 1);
/// assert_eq!(instance.node(10).map(|n| n.demand()), Some(200.0));
/// assert_eq!(instance.node(11).map(|n| n.demand()), Some(900.0));
/// assert_eq!(instance.node(1).map(|n| n.demand()), Some(0.0));
/// ```
pub fn normalize_demands(instance: &mut Instance, min_demand: f64) -> usize {
    let mut raised = 0;
    for node in instance.customers_mut() {
        let before = node.demand();
        if node.raise_demand_to(min_demand) {
            debug!(node = node.id(), before, after = min_demand, "raised demand to floor");
            raised += 1;
        }
    }
    raised
}
