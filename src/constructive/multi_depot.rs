//! Greedy multi-depot construction.
//!
//! # Algorithm
//!
//! 1. Raise customer demands to the configured floor (on a working copy).
//! 2. Assign each customer to its nearest depot.
//! 3. For each depot in ascending ID order, run one vehicle with
//!    [`build_depot_route`] over its assigned customers.
//!
//! The total distance is the sum of the routes' distance fields.

use tracing::{debug, info, warn};

use crate::config::{RoutingConfig, VEHICLES_PER_DEPOT};
use crate::distance::DistanceMatrix;
use crate::error::RoutingError;
use crate::models::{Instance, PlanMode, RoutingResult};

use super::{assign_to_depots, build_depot_route, normalize_demands, ServedSet};

/// Builds one nearest-neighbor route per depot.
///
/// The input instance is not modified. Customers no vehicle can take (demand
/// above capacity) are reported in [`RoutingResult::unserved`].
///
/// # Errors
///
/// Returns [`RoutingError::NoDepots`] if the instance has no depot, or
/// [`RoutingError::InvalidConfig`] for a non-positive capacity.
///
/// # Examples
///
/// ```
/// use u_dispatch::config::RoutingConfig;
/// use u_dispatch::models::{Instance, Node};
/// use u_dispatch::constructive::greedy_multi_depot;
///
/// let instance = Instance::new()
///     .with_node(Node::depot(1, "west", 0.0, 0.0, 1))
///     .with_node(Node::depot(2, "east", 0.0, 1.0, 3))
///     .with_node(Node::customer(10, "a", 0.0, 0.1, 50.0))
///     .with_node(Node::customer(11, "b", 0.0, 0.9, 300.0));
///
/// let result = greedy_multi_depot(&instance, &RoutingConfig::default()).unwrap();
/// assert_eq!(result.num_routes(), 2);
/// assert_eq!(result.routes()[0].sequence(), &[1, 10, 1]);
/// assert_eq!(result.routes()[0].demand(), 200.0); // raised to the floor
/// assert_eq!(result.routes()[1].sequence(), &[2, 11, 2]);
/// ```
pub fn greedy_multi_depot(
    instance: &Instance,
    config: &RoutingConfig,
) -> Result<RoutingResult, RoutingError> {
    config.validate()?;

    let mut working = instance.clone();
    normalize_demands(&mut working, config.min_demand_kg);

    let assignment = assign_to_depots(&working)?;
    let distances = DistanceMatrix::from_instance(&working);
    debug!(
        depots = working.num_depots(),
        customers = working.num_customers(),
        assigned = assignment.num_assigned(),
        matrix = distances.size(),
        "assigned customers to nearest depots"
    );

    let mut served = ServedSet::new();
    let mut result = RoutingResult::new(PlanMode::Constructed);

    for (depot_id, candidates) in assignment.iter() {
        for _ in 0..VEHICLES_PER_DEPOT {
            let route = build_depot_route(
                &working,
                &distances,
                depot_id,
                candidates,
                &mut served,
                config.vehicle_capacity_kg,
            );
            result.add_route(route);
        }
    }

    for customer in working.customers() {
        if !served.contains(customer.id()) {
            warn!(
                customer = customer.id(),
                demand = customer.demand(),
                capacity = config.vehicle_capacity_kg,
                "customer left unserved"
            );
            result.add_unserved(customer.id());
        }
    }

    let total = result.summed_route_distance();
    result.set_total_distance(total);

    info!(
        routes = result.num_routes(),
        served = served.len(),
        unserved = result.num_unserved(),
        km = total,
        "constructed multi-depot plan"
    );
    Ok(result)
}
