//! Shortest paths and distance matrices.
//!
//! The shortest-path engine is the distance oracle of every solver in this
//! crate; the dense matrix caches its answers for a set of locations.

mod matrix;
mod shortest_path;

pub use matrix::DistanceMatrix;
pub use shortest_path::{shortest_distance, shortest_edge_path, shortest_path, ShortestPathTree};
