//! Greedy multi-depot route construction.
//!
//! - [`normalize_demands`] — Minimum demand floor for customers
//! - [`assign_to_depots`] — Nearest-depot partition of customers
//! - [`build_depot_route`] — Single-vehicle nearest-neighbor route, O(k²)
//! - [`greedy_multi_depot`] — One route per depot, total distance

mod assign;
mod multi_depot;
mod nearest_neighbor;
mod normalize;

pub use assign::{assign_to_depots, DepotAssignment};
pub use multi_depot::greedy_multi_depot;
pub use nearest_neighbor::{build_depot_route, ServedSet};
pub use normalize::normalize_demands;
