//! Node and time window types.

use crate::distance::{haversine_km, GeoPoint};

/// Identifier of a node (depot or customer). Unique across an instance.
pub type NodeId = usize;

/// A service time window in minutes from the start of the day.
///
/// Carried along with instance data; route construction does not use it.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::TimeWindow;
///
/// let tw = TimeWindow::new(0.0, 480.0).unwrap();
/// assert!(tw.earliest() <= tw.latest());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    earliest: f64,
    latest: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest` or either value is non-finite.
    pub fn new(earliest: f64, latest: f64) -> Option<Self> {
        if !earliest.is_finite() || !latest.is_finite() || earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// Earliest service start.
    pub fn earliest(&self) -> f64 {
        self.earliest
    }

    /// Latest service start.
    pub fn latest(&self) -> f64 {
        self.latest
    }
}

/// Whether a node is a customer or a depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A delivery point with a demand.
    Customer,
    /// A depot. `vehicles` is the declared fleet size; only one vehicle is
    /// ever dispatched.
    Depot {
        /// Declared vehicle count.
        vehicles: u32,
    },
}

/// A depot or customer in a multi-depot instance.
///
/// Demands are in kilograms, coordinates in degrees.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Node;
///
/// let depot = Node::depot(1, "North", 40.445, -3.695, 2);
/// assert!(depot.is_depot());
/// assert_eq!(depot.declared_vehicles(), Some(2));
/// assert_eq!(depot.demand(), 0.0);
///
/// let c = Node::customer(10, "Client 10", 40.448, -3.692, 250.0);
/// assert!(!c.is_depot());
/// assert_eq!(c.demand(), 250.0);
/// assert!(c.distance_to(&depot) > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    name: String,
    demand: f64,
    position: GeoPoint,
    kind: NodeKind,
    time_window: Option<TimeWindow>,
}

impl Node {
    /// Creates a customer node.
    pub fn customer(id: NodeId, name: impl Into<String>, lat: f64, lon: f64, demand: f64) -> Self {
        Self {
            id,
            name: name.into(),
            demand,
            position: GeoPoint::new(lat, lon),
            kind: NodeKind::Customer,
            time_window: None,
        }
    }

    /// Creates a depot node (demand 0) with a declared vehicle count.
    pub fn depot(id: NodeId, name: impl Into<String>, lat: f64, lon: f64, vehicles: u32) -> Self {
        Self {
            id,
            name: name.into(),
            demand: 0.0,
            position: GeoPoint::new(lat, lon),
            kind: NodeKind::Depot { vehicles },
            time_window: None,
        }
    }

    /// Sets a time window for this node.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = Some(tw);
        self
    }

    /// Node ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Demand in kilograms (0 for depots).
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Raises the demand to `floor` if it is below it. Returns `true` if changed.
    pub(crate) fn raise_demand_to(&mut self, floor: f64) -> bool {
        if self.demand < floor {
            self.demand = floor;
            true
        } else {
            false
        }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.position.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.position.lon
    }

    /// Position on the globe.
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    /// Customer or depot.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns `true` for depot nodes.
    pub fn is_depot(&self) -> bool {
        matches!(self.kind, NodeKind::Depot { .. })
    }

    /// Declared vehicle count, for depots.
    pub fn declared_vehicles(&self) -> Option<u32> {
        match self.kind {
            NodeKind::Depot { vehicles } => Some(vehicles),
            NodeKind::Customer => None,
        }
    }

    /// Time window, if any.
    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref()
    }

    /// Great-circle distance in kilometers to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        haversine_km(self.position, other.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_valid() {
        let tw = TimeWindow::new(0.0, 1440.0).expect("valid");
        assert_eq!(tw.earliest(), 0.0);
        assert_eq!(tw.latest(), 1440.0);
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(10.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_customer_new() {
        let c = Node::customer(12, "Client 12", 40.44, -3.69, 250.0);
        assert_eq!(c.id(), 12);
        assert_eq!(c.name(), "Client 12");
        assert_eq!(c.lat(), 40.44);
        assert_eq!(c.lon(), -3.69);
        assert_eq!(c.demand(), 250.0);
        assert_eq!(c.kind(), NodeKind::Customer);
        assert!(c.declared_vehicles().is_none());
        assert!(c.time_window().is_none());
    }

    #[test]
    fn test_depot_new() {
        let d = Node::depot(1, "North", 40.44, -3.69, 3);
        assert!(d.is_depot());
        assert_eq!(d.demand(), 0.0);
        assert_eq!(d.kind(), NodeKind::Depot { vehicles: 3 });
    }

    #[test]
    fn test_raise_demand() {
        let mut c = Node::customer(10, "c", 0.0, 0.0, 150.0);
        assert!(c.raise_demand_to(200.0));
        assert_eq!(c.demand(), 200.0);
        assert!(!c.raise_demand_to(200.0));

        let mut big = Node::customer(11, "c", 0.0, 0.0, 900.0);
        assert!(!big.raise_demand_to(200.0));
        assert_eq!(big.demand(), 900.0);
    }

    #[test]
    fn test_with_time_window() {
        let tw = TimeWindow::new(0.0, 480.0).expect("valid");
        let c = Node::customer(10, "c", 0.0, 0.0, 200.0).with_time_window(tw);
        assert_eq!(c.time_window().expect("has tw").latest(), 480.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Node::depot(1, "a", 40.445, -3.695, 1);
        let b = Node::customer(10, "b", 40.448, -3.692, 200.0);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
        assert_eq!(a.distance_to(&a), 0.0);
    }
}
