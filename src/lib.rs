//! # u-dispatch
//!
//! Multi-depot delivery planning: customers are assigned to their nearest
//! depot by great-circle distance, then each depot dispatches a single
//! capacity-bounded vehicle along a greedy nearest-neighbor route.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, Instance, Route, RoutingResult)
//! - [`distance`] — Haversine distance and distance matrix
//! - [`constructive`] — Demand floor, depot assignment, nearest-neighbor routes
//! - [`evaluation`] — Route set validation and result checks
//! - [`planner`] — Construct-or-passthrough entry point
//! - [`io`] — Instance JSON, text report, result export
//!
//! ## Example
//!
//! ```
//! use u_dispatch::config::RoutingConfig;
//! use u_dispatch::io::default_instance;
//! use u_dispatch::planner::{plan_with, Strategy};
//!
//! let instance = default_instance();
//! let result = plan_with(&instance, &RoutingConfig::default(), Strategy::Construct).unwrap();
//!
//! assert_eq!(result.num_routes(), 3);
//! assert_eq!(result.num_served(), 6);
//! assert_eq!(result.routes()[0].sequence(), &[1, 12, 10, 11, 1]);
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod models;
pub mod planner;

pub use error::RoutingError;
