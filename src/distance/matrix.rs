//! Dense great-circle distance matrix keyed by node ID.

use crate::models::{Instance, NodeId};

use super::haversine_km;

/// A dense n×n distance matrix (km) stored in row-major order.
///
/// Rows and columns are the instance's node IDs in ascending order; lookups
/// translate IDs to dense indices.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Instance, Node};
/// use u_dispatch::distance::DistanceMatrix;
///
/// let instance = Instance::new()
///     .with_node(Node::depot(1, "d", 0.0, 0.0, 1))
///     .with_node(Node::customer(10, "c", 0.0, 1.0, 200.0));
/// let dm = DistanceMatrix::from_instance(&instance);
///
/// assert_eq!(dm.size(), 2);
/// assert!((dm.get(1, 10) - 111.19492664455873).abs() < 1e-9);
/// assert_eq!(dm.get(1, 10), dm.get(10, 1));
/// assert!(dm.try_get(1, 99).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    ids: Vec<NodeId>,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes pairwise haversine distances for every node of the instance.
    pub fn from_instance(instance: &Instance) -> Self {
        let nodes: Vec<_> = instance.nodes().collect();
        let n = nodes.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_km(nodes[i].position(), nodes[j].position());
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self {
            ids: nodes.iter().map(|n| n.id()).collect(),
            data,
        }
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    /// Returns the distance between two nodes, or `None` if either is unknown.
    pub fn try_get(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        Some(self.data[i * self.ids.len() + j])
    }

    /// Returns the distance between two nodes.
    ///
    /// # Panics
    ///
    /// Panics if either ID is not part of the matrix.
    pub fn get(&self, from: NodeId, to: NodeId) -> f64 {
        match self.try_get(from, to) {
            Some(d) => d,
            None => panic!("node {from} or {to} is not in the distance matrix"),
        }
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.ids.len()
    }

    /// Sum of distances over consecutive pairs of `sequence`.
    ///
    /// # Panics
    ///
    /// Panics if the sequence references an unknown node.
    pub fn path_length(&self, sequence: &[NodeId]) -> f64 {
        sequence.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}
