//! Wire format of instance documents.
//!
//! Mirrors the JSON exported by the route visualizer: nodes and routes are
//! objects keyed by their numeric ID, time windows are the `E`/`L` fields.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Instance, Node, NodeId, PrecomputedRoutes, RouteRecord, TimeWindow};

/// A node entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDto {
    #[serde(default)]
    pub name: String,
    /// Absent or `null` reads as 0.
    #[serde(default)]
    pub demand: Option<f64>,
    #[serde(rename = "E", default, skip_serializing_if = "Option::is_none")]
    pub earliest: Option<f64>,
    #[serde(rename = "L", default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<f64>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub depot: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<u32>,
}

/// A route entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    #[serde(default)]
    pub sequence: Vec<NodeId>,
    #[serde(default)]
    pub demand: Option<f64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depot: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_idx: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
}

/// A complete instance document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDocument {
    #[serde(default, deserialize_with = "distinct_keys")]
    pub nodes: BTreeMap<NodeId, NodeDto>,
    #[serde(
        default,
        deserialize_with = "optional_distinct_keys",
        skip_serializing_if = "Option::is_none"
    )]
    pub routes: Option<BTreeMap<u64, RouteDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Reads an object keyed by numeric IDs, rejecting a key that appears twice
/// instead of keeping the last entry.
struct DistinctKeys<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for DistinctKeys<K, V>
where
    K: Deserialize<'de> + Ord + fmt::Display,
    V: Deserialize<'de>,
{
    type Value = BTreeMap<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object keyed by distinct numeric IDs")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = BTreeMap::new();
        while let Some(key) = access.next_key::<K>()? {
            match map.entry(key) {
                Entry::Occupied(e) => {
                    return Err(de::Error::custom(format!("duplicate key {}", e.key())));
                }
                Entry::Vacant(e) => {
                    e.insert(access.next_value()?);
                }
            }
        }
        Ok(map)
    }
}

struct OptionalDistinctKeys<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for OptionalDistinctKeys<K, V>
where
    K: Deserialize<'de> + Ord + fmt::Display,
    V: Deserialize<'de>,
{
    type Value = Option<BTreeMap<K, V>>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("null or an object keyed by distinct numeric IDs")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        distinct_keys(deserializer).map(Some)
    }
}

fn distinct_keys<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord + fmt::Display,
    V: Deserialize<'de>,
{
    deserializer.deserialize_map(DistinctKeys(PhantomData))
}

fn optional_distinct_keys<'de, D, K, V>(deserializer: D) -> Result<Option<BTreeMap<K, V>>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord + fmt::Display,
    V: Deserialize<'de>,
{
    deserializer.deserialize_option(OptionalDistinctKeys(PhantomData))
}

impl From<&Node> for NodeDto {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name().to_string(),
            demand: Some(node.demand()),
            earliest: node.time_window().map(|tw| tw.earliest()),
            latest: node.time_window().map(|tw| tw.latest()),
            lat: node.lat(),
            lon: node.lon(),
            depot: node.is_depot(),
            vehicles: node.declared_vehicles(),
        }
    }
}

impl NodeDto {
    /// Converts to a domain node with the given ID.
    pub fn to_node(&self, id: NodeId) -> Node {
        let node = if self.depot {
            Node::depot(id, self.name.clone(), self.lat, self.lon, self.vehicles.unwrap_or(1))
        } else {
            Node::customer(id, self.name.clone(), self.lat, self.lon, self.demand.unwrap_or(0.0))
        };
        let window = match (self.earliest, self.latest) {
            (Some(e), Some(l)) => TimeWindow::new(e, l),
            (None, Some(l)) => TimeWindow::new(0.0, l),
            _ => None,
        };
        match window {
            Some(tw) => node.with_time_window(tw),
            None => node,
        }
    }
}

impl From<&RouteDto> for RouteRecord {
    fn from(dto: &RouteDto) -> Self {
        Self {
            depot: dto.depot,
            sequence: dto.sequence.clone(),
            demand: dto.demand.unwrap_or(0.0),
            distance: dto.distance.unwrap_or(0.0),
            vehicle_idx: dto.vehicle_idx,
            capacity: dto.capacity,
        }
    }
}

impl From<&RouteRecord> for RouteDto {
    fn from(record: &RouteRecord) -> Self {
        Self {
            sequence: record.sequence.clone(),
            demand: Some(record.demand),
            distance: Some(record.distance),
            depot: record.depot,
            vehicle_idx: record.vehicle_idx,
            capacity: record.capacity,
        }
    }
}

impl InstanceDocument {
    /// Converts the document into a domain instance.
    ///
    /// An absent `totalDistance` reads as 0. `status` is kept with the routes;
    /// without routes it has no effect.
    pub fn to_instance(&self) -> Instance {
        let mut instance = Instance::new();
        for (&id, dto) in &self.nodes {
            instance.insert_node(dto.to_node(id));
        }
        if let Some(routes) = &self.routes {
            let mut precomputed = PrecomputedRoutes::new(self.total_distance.unwrap_or(0.0));
            if let Some(status) = &self.status {
                precomputed = precomputed.with_status(status.clone());
            }
            for (&key, dto) in routes {
                precomputed.insert(key, RouteRecord::from(dto));
            }
            instance = instance.with_precomputed_routes(precomputed);
        }
        instance
    }

    /// Builds a document from a domain instance.
    pub fn from_instance(instance: &Instance) -> Self {
        let nodes = instance.nodes().map(|n| (n.id(), NodeDto::from(n))).collect();
        let (routes, total_distance, status) = match instance.precomputed() {
            Some(p) => (
                Some(p.iter().map(|(k, r)| (k, RouteDto::from(r))).collect()),
                Some(p.total_distance()),
                p.status().map(str::to_string),
            ),
            None => (None, None, None),
        };
        Self {
            nodes,
            routes,
            total_distance,
            status,
        }
    }
}
