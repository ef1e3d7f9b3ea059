//! Error type for hard failures.
//!
//! Infeasibility (no path, no circuit, no tour) is never an error: it is
//! reported through `f64::INFINITY` distances and empty sequences. The
//! variants below cover invariant violations and orchestrator misuse only.

use std::fmt;

/// A hard failure raised by a solver or by the [`Planner`](crate::fleet::Planner).
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// The graph reports an odd number of odd-degree vertices.
    ///
    /// The handshake lemma forbids this for undirected graphs; with one-way
    /// streets it means the direction-aware degree is not balanced and no
    /// pairing can exist.
    OddVertexCount {
        /// Number of odd-degree vertices found.
        count: usize,
    },
    /// The graph has no vertex, so there is no depot to start from.
    EmptyGraph,
    /// A vertex key did not match any vertex of the graph.
    UnknownVertex(String),
    /// The exact tour solver was asked for more points than allowed.
    TooManyPoints {
        /// Number of points requested.
        requested: usize,
        /// Configured upper bound.
        limit: usize,
    },
    /// A truck capacity that is not a positive finite number.
    InvalidCapacity(f64),
}

/// A type alias for results carrying a [`RoutingError`].
pub type RoutingResult<T> = Result<T, RoutingError>;

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddVertexCount { count } => {
                write!(f, "graph has {count} odd-degree vertices, expected an even count")
            }
            Self::EmptyGraph => write!(f, "graph has no vertices"),
            Self::UnknownVertex(key) => write!(f, "unknown vertex '{key}'"),
            Self::TooManyPoints { requested, limit } => {
                write!(f, "exact tour requested for {requested} points, limit is {limit}")
            }
            Self::InvalidCapacity(capacity) => {
                write!(f, "truck capacity must be positive and finite, got {capacity}")
            }
        }
    }
}

impl std::error::Error for RoutingError {}
