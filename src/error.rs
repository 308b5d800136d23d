//! Error type for planning and instance I/O.

use std::fmt;

use crate::models::NodeId;

/// Errors raised while loading an instance or planning routes.
#[derive(Debug)]
pub enum RoutingError {
    /// The instance has no depot to assign customers to.
    NoDepots,
    /// A route references a node that is not part of the instance.
    UnknownNode {
        /// Key of the offending route.
        route: u64,
        /// The missing node.
        node: NodeId,
    },
    /// A route's endpoint or declared depot is not a depot node.
    NotADepot {
        /// Key of the offending route.
        route: u64,
        /// The node expected to be a depot.
        node: NodeId,
    },
    /// A route has an empty sequence.
    EmptyRoute {
        /// Key of the offending route.
        route: u64,
    },
    /// Configuration values out of range.
    InvalidConfig(String),
    /// Reading or writing a file failed.
    Io(std::io::Error),
    /// An instance document could not be parsed or written.
    Json(serde_json::Error),
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::NoDepots => write!(f, "instance has no depots"),
            RoutingError::UnknownNode { route, node } => {
                write!(f, "route {route} references unknown node {node}")
            }
            RoutingError::NotADepot { route, node } => {
                write!(f, "route {route}: node {node} is not a depot")
            }
            RoutingError::EmptyRoute { route } => write!(f, "route {route} has an empty sequence"),
            RoutingError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            RoutingError::Io(e) => write!(f, "I/O error: {e}"),
            RoutingError::Json(e) => write!(f, "malformed instance document: {e}"),
        }
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoutingError::Io(e) => Some(e),
            RoutingError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RoutingError {
    fn from(e: std::io::Error) -> Self {
        RoutingError::Io(e)
    }
}

impl From<serde_json::Error> for RoutingError {
    fn from(e: serde_json::Error) -> Self {
        RoutingError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(RoutingError::NoDepots.to_string(), "instance has no depots");
        assert_eq!(
            RoutingError::UnknownNode { route: 2, node: 99 }.to_string(),
            "route 2 references unknown node 99"
        );
        assert_eq!(
            RoutingError::NotADepot { route: 1, node: 10 }.to_string(),
            "route 1: node 10 is not a depot"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated");
        let err = RoutingError::from(err);
        assert!(matches!(err, RoutingError::Json(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
