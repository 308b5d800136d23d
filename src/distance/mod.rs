//! Great-circle distances.
//!
//! Provides the haversine distance function and a dense distance matrix over
//! an instance's nodes.

mod haversine;
mod matrix;

pub use haversine::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
