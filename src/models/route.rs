//! Route type.

use super::NodeId;

/// A closed vehicle tour from a depot through its stops and back.
///
/// The sequence holds the depot as first and last element; stops are the
/// elements in between.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Route;
///
/// let mut route = Route::new(1, 0, 22000.0);
/// route.push_stop(12, 250.0);
/// route.push_stop(10, 200.0);
/// route.close(1.25);
///
/// assert_eq!(route.sequence(), &[1, 12, 10, 1]);
/// assert_eq!(route.stops(), &[12, 10]);
/// assert_eq!(route.demand(), 450.0);
/// assert_eq!(route.distance(), 1.25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    depot_id: NodeId,
    sequence: Vec<NodeId>,
    demand: f64,
    distance: f64,
    vehicle_idx: usize,
    capacity: f64,
}

impl Route {
    /// Starts an open route at the given depot.
    pub fn new(depot_id: NodeId, vehicle_idx: usize, capacity: f64) -> Self {
        Self {
            depot_id,
            sequence: vec![depot_id],
            demand: 0.0,
            distance: 0.0,
            vehicle_idx,
            capacity,
        }
    }

    /// Creates a route from already computed fields, taken verbatim.
    pub fn from_parts(
        depot_id: NodeId,
        sequence: Vec<NodeId>,
        demand: f64,
        distance: f64,
        vehicle_idx: usize,
        capacity: f64,
    ) -> Self {
        Self {
            depot_id,
            sequence,
            demand,
            distance,
            vehicle_idx,
            capacity,
        }
    }

    /// Appends a stop and adds its demand to the load.
    pub fn push_stop(&mut self, node_id: NodeId, demand: f64) {
        self.sequence.push(node_id);
        self.demand += demand;
    }

    /// Returns to the depot and records the route length.
    pub fn close(&mut self, distance: f64) {
        self.sequence.push(self.depot_id);
        self.distance = distance;
    }

    /// Depot the route starts and ends at.
    pub fn depot_id(&self) -> NodeId {
        self.depot_id
    }

    /// Full visit sequence including both depot endpoints.
    pub fn sequence(&self) -> &[NodeId] {
        &self.sequence
    }

    /// Visited nodes between the depot endpoints.
    pub fn stops(&self) -> &[NodeId] {
        match self.sequence.len() {
            0..=2 => &[],
            n => &self.sequence[1..n - 1],
        }
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops().len()
    }

    /// Returns `true` if the route visits no stops.
    pub fn is_empty(&self) -> bool {
        self.stops().is_empty()
    }

    /// Summed demand of the stops (kg).
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Route length (km).
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Vehicle index within the depot. Always 0 for constructed routes.
    pub fn vehicle_idx(&self) -> usize {
        self.vehicle_idx
    }

    /// Vehicle capacity (kg).
    pub fn capacity(&self) -> f64 {
        self.capacity
    }
}
