//! Problem instance: nodes plus an optional precomputed route set.

use std::collections::BTreeMap;

use super::{Node, NodeId};

/// A route as supplied with an instance (e.g. exported by the visualizer).
///
/// Fields are kept verbatim; they are checked only when the route set is
/// passed through.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    /// Declared depot, if any. Falls back to the first element of `sequence`.
    pub depot: Option<NodeId>,
    /// Visit order, depot first and last.
    pub sequence: Vec<NodeId>,
    /// Summed demand of the stops (kg).
    pub demand: f64,
    /// Route length (km).
    pub distance: f64,
    /// Vehicle index within the depot.
    pub vehicle_idx: Option<usize>,
    /// Vehicle capacity (kg).
    pub capacity: Option<f64>,
}

/// A route set computed elsewhere, with its declared total distance and
/// status label.
///
/// Routes are keyed by the numeric value of their document key, so iteration
/// follows numeric key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecomputedRoutes {
    routes: BTreeMap<u64, RouteRecord>,
    total_distance: f64,
    status: Option<String>,
}

impl PrecomputedRoutes {
    /// Creates an empty route set with the given declared total distance.
    pub fn new(total_distance: f64) -> Self {
        Self {
            routes: BTreeMap::new(),
            total_distance,
            status: None,
        }
    }

    /// Sets the declared status label.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Adds a route under the given key.
    pub fn with_route(mut self, key: u64, record: RouteRecord) -> Self {
        self.routes.insert(key, record);
        self
    }

    /// Inserts a route under the given key.
    pub fn insert(&mut self, key: u64, record: RouteRecord) {
        self.routes.insert(key, record);
    }

    /// Routes in numeric key order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &RouteRecord)> {
        self.routes.iter().map(|(&k, r)| (k, r))
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes are present.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Declared total distance (km).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Declared status label, if the document carried one.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

/// A multi-depot routing instance.
///
/// Nodes are stored by ID in ascending order; every traversal over depots or
/// customers follows that order.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Instance, Node};
///
/// let instance = Instance::new()
///     .with_node(Node::depot(1, "North", 40.445, -3.695, 1))
///     .with_node(Node::customer(10, "Client 10", 40.448, -3.692, 200.0));
///
/// assert_eq!(instance.num_depots(), 1);
/// assert_eq!(instance.num_customers(), 1);
/// assert!(!instance.has_precomputed_routes());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instance {
    nodes: BTreeMap<NodeId, Node>,
    precomputed: Option<PrecomputedRoutes>,
}

impl Instance {
    /// Creates an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, replacing any node with the same ID.
    pub fn with_node(mut self, node: Node) -> Self {
        self.insert_node(node);
        self
    }

    /// Attaches a precomputed route set.
    pub fn with_precomputed_routes(mut self, routes: PrecomputedRoutes) -> Self {
        self.precomputed = Some(routes);
        self
    }

    /// Inserts a node, replacing any node with the same ID.
    pub fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id(), node);
    }

    /// Drops any precomputed route set.
    pub fn clear_precomputed_routes(&mut self) {
        self.precomputed = None;
    }

    /// Looks up a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// All nodes in ascending ID order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Depot nodes in ascending ID order.
    pub fn depots(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.is_depot())
    }

    /// Customer nodes in ascending ID order.
    pub fn customers(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| !n.is_depot())
    }

    pub(crate) fn customers_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut().filter(|n| !n.is_depot())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of depots.
    pub fn num_depots(&self) -> usize {
        self.depots().count()
    }

    /// Number of customers.
    pub fn num_customers(&self) -> usize {
        self.customers().count()
    }

    /// The precomputed route set, if any.
    pub fn precomputed(&self) -> Option<&PrecomputedRoutes> {
        self.precomputed.as_ref()
    }

    /// Returns `true` if a non-empty precomputed route set is attached.
    pub fn has_precomputed_routes(&self) -> bool {
        self.precomputed.as_ref().is_some_and(|p| !p.is_empty())
    }
}
