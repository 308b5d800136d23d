//! Domain model types for multi-depot routing.
//!
//! Provides depots and customers as [`Node`]s, the [`Instance`] that holds
//! them (optionally with a precomputed route set), closed [`Route`]s and the
//! [`RoutingResult`] returned by the planner.

mod instance;
mod node;
mod route;
mod solution;

pub use instance::{Instance, PrecomputedRoutes, RouteRecord};
pub use node::{Node, NodeId, NodeKind, TimeWindow};
pub use route::Route;
pub use solution::{PlanMode, RoutingResult, Violation, ViolationType, DEFAULT_STATUS};
