//! Routing result and violation types.

use super::{NodeId, Route};

/// A type of inconsistency found in a routing result.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Summed stop demand exceeds the route's vehicle capacity.
    CapacityExceeded {
        /// Route index in the result.
        route_index: usize,
        /// Summed demand of the stops.
        load: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
    /// Sequence does not start and end at the route's depot.
    RouteNotClosed {
        /// Route index in the result.
        route_index: usize,
    },
    /// A depot appears between the endpoints of a route.
    DepotInsideRoute {
        /// Route index in the result.
        route_index: usize,
        /// The depot found among the stops.
        node_id: NodeId,
    },
    /// A customer is served by more than one stop.
    DuplicateService {
        /// The customer served twice.
        node_id: NodeId,
    },
    /// The reported total differs from the sum of route distances.
    TotalDistanceMismatch {
        /// Reported total.
        reported: f64,
        /// Sum of the routes' distance fields.
        summed: f64,
    },
}

/// An inconsistency in a routing result.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// How a result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    /// Built by the greedy multi-depot construction.
    Constructed,
    /// Copied from routes supplied with the instance.
    Passthrough,
}

/// Status label of results that carry no declared status.
pub const DEFAULT_STATUS: &str = "Heuristic";

/// Routes for every depot plus the total distance.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{PlanMode, Route, RoutingResult};
///
/// let mut result = RoutingResult::new(PlanMode::Constructed);
/// let mut route = Route::new(1, 0, 22000.0);
/// route.push_stop(10, 200.0);
/// route.close(2.0);
/// result.add_route(route);
/// result.set_total_distance(2.0);
///
/// assert_eq!(result.num_routes(), 1);
/// assert_eq!(result.num_served(), 1);
/// assert_eq!(result.total_distance(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingResult {
    routes: Vec<Route>,
    unserved: Vec<NodeId>,
    total_distance: f64,
    mode: PlanMode,
    status: String,
}

impl RoutingResult {
    /// Creates an empty result.
    pub fn new(mode: PlanMode) -> Self {
        Self {
            routes: Vec::new(),
            unserved: Vec::new(),
            total_distance: 0.0,
            mode,
            status: DEFAULT_STATUS.to_string(),
        }
    }

    /// Appends a route.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Records a customer that no route serves.
    pub fn add_unserved(&mut self, node_id: NodeId) {
        self.unserved.push(node_id);
    }

    /// Sets the total distance.
    pub fn set_total_distance(&mut self, km: f64) {
        self.total_distance = km;
    }

    /// Replaces the status label.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Routes in construction (or key) order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Customers left without a route, in ascending ID order.
    pub fn unserved(&self) -> &[NodeId] {
        &self.unserved
    }

    /// Number of unserved customers.
    pub fn num_unserved(&self) -> usize {
        self.unserved.len()
    }

    /// Total distance (km).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Sum of the routes' distance fields (km).
    pub fn summed_route_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.distance()).sum()
    }

    /// Total number of stops across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// All served node IDs in route order.
    pub fn served_ids(&self) -> Vec<NodeId> {
        self.routes
            .iter()
            .flat_map(|r| r.stops().iter().copied())
            .collect()
    }

    /// Routes departing from the given depot.
    pub fn routes_for_depot(&self, depot_id: NodeId) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(move |r| r.depot_id() == depot_id)
    }

    /// How the result was obtained.
    pub fn mode(&self) -> PlanMode {
        self.mode
    }

    /// Status label shown in reports and written to exported documents.
    pub fn status(&self) -> &str {
        &self.status
    }
}
