//! Plan entry point: construct routes or pass supplied routes through.
//!
//! An instance that carries a non-empty precomputed route set is reproduced
//! as-is so the output matches the tool that computed it. Any other instance
//! goes through [`greedy_multi_depot`].

use tracing::info;

use crate::config::RoutingConfig;
use crate::constructive::greedy_multi_depot;
use crate::error::RoutingError;
use crate::evaluation::validate_routes;
use crate::models::{Instance, PlanMode, Route, RoutingResult};

/// How routes are obtained for an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Run the greedy multi-depot construction.
    Construct,
    /// Copy the instance's precomputed routes.
    Passthrough,
}

impl Strategy {
    /// Passthrough when the instance carries routes, otherwise construction.
    pub fn select(instance: &Instance) -> Self {
        if instance.has_precomputed_routes() {
            Strategy::Passthrough
        } else {
            Strategy::Construct
        }
    }
}

/// Plans routes for an instance with the strategy chosen by [`Strategy::select`].
///
/// # Examples
///
/// ```
/// use u_dispatch::config::RoutingConfig;
/// use u_dispatch::io::default_instance;
/// use u_dispatch::models::PlanMode;
/// use u_dispatch::planner::plan;
///
/// let instance = default_instance();
/// let result = plan(&instance, &RoutingConfig::default()).unwrap();
/// assert_eq!(result.mode(), PlanMode::Passthrough);
/// assert_eq!(result.total_distance(), 2.754661170184616);
/// ```
pub fn plan(instance: &Instance, config: &RoutingConfig) -> Result<RoutingResult, RoutingError> {
    plan_with(instance, config, Strategy::select(instance))
}

/// Plans routes with an explicit strategy.
///
/// `Strategy::Construct` ignores any precomputed routes. `Strategy::Passthrough`
/// on an instance without routes yields an empty result.
pub fn plan_with(
    instance: &Instance,
    config: &RoutingConfig,
    strategy: Strategy,
) -> Result<RoutingResult, RoutingError> {
    info!(?strategy, nodes = instance.len(), "planning routes");
    match strategy {
        Strategy::Construct => greedy_multi_depot(instance, config),
        Strategy::Passthrough => passthrough(instance, config),
    }
}

/// Converts the instance's precomputed routes into a result.
///
/// Depot, sequence, demand, distance and capacity are copied verbatim (a
/// missing capacity becomes the configured vehicle capacity, a missing depot
/// the first element of the sequence). Routes are ordered by numeric key and
/// the total distance is the instance's declared total, not recomputed. The
/// declared status label is kept; without one the result reads `Heuristic`.
///
/// # Errors
///
/// Fails if a route is empty, references an unknown node, or does not start
/// and end at a depot. See [`validate_routes`].
pub fn passthrough(instance: &Instance, config: &RoutingConfig) -> Result<RoutingResult, RoutingError> {
    let mut result = RoutingResult::new(PlanMode::Passthrough);
    let Some(precomputed) = instance.precomputed() else {
        return Ok(result);
    };

    validate_routes(instance, precomputed)?;

    for (_, record) in precomputed.iter() {
        let depot_id = match record.depot.or_else(|| record.sequence.first().copied()) {
            Some(id) => id,
            None => continue,
        };
        result.add_route(Route::from_parts(
            depot_id,
            record.sequence.clone(),
            record.demand,
            record.distance,
            record.vehicle_idx.unwrap_or(0),
            record.capacity.unwrap_or(config.vehicle_capacity_kg),
        ));
    }

    let served = result.served_ids();
    for customer in instance.customers() {
        if !served.contains(&customer.id()) {
            result.add_unserved(customer.id());
        }
    }
    result.set_total_distance(precomputed.total_distance());
    if let Some(status) = precomputed.status() {
        result.set_status(status);
    }

    info!(
        routes = result.num_routes(),
        served = result.num_served(),
        km = result.total_distance(),
        "passed through precomputed routes"
    );
    Ok(result)
}
