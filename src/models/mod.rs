//! Domain model types for road-network routing.
//!
//! Provides the core abstractions: vertices (intersections and collection
//! points), directed or two-way edges, the graph that owns them, routes as
//! ordered sequences of stops, and route plans grouping the routes of a fleet.

mod edge;
mod graph;
mod route;
mod solution;
mod vertex;

pub use edge::{Direction, Edge, EdgeId};
pub use graph::{Graph, DEPOT_KEY};
pub use route::{Route, Visit};
pub use solution::{RoutePlan, Uncollectable, UncollectableReason, Violation, ViolationType};
pub use vertex::{Vertex, VertexId};
