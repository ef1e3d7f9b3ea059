//! # waste-routing
//!
//! Routing core for a municipal waste-collection fleet: shortest paths,
//! street-sweeping circuits and capacity-bounded truck tours over a small
//! road network with two-way and one-way streets.
//!
//! ## Modules
//!
//! - [`models`] — Road network (Vertex, Edge, Graph) and route types (Route, RoutePlan)
//! - [`distance`] — Dijkstra shortest paths and the distance matrix built from them
//! - [`circuit`] — Eulerian circuits (Hierholzer) and the Chinese Postman solver
//! - [`exact`] — Exact small tour (Held-Karp bitmask DP)
//! - [`constructive`] — Capacitated route heuristics (nearest neighbor, MST shortcut)
//! - [`evaluation`] — Route materialization and plan auditing
//! - [`config`] — Solver tunables and logging hook
//! - [`error`] — Hard failures
//! - [`scenarios`] — Demonstration networks and a random network generator
//! - [`fleet`] — Actors and the planner orchestrating the solvers
//!
//! ## Example
//!
//! ```
//! use waste_routing::circuit::solve_postman;
//! use waste_routing::config::SolverConfig;
//! use waste_routing::scenarios::Scenario;
//!
//! let graph = Scenario::DeadEnd.build();
//! let sweep = solve_postman(&graph, &SolverConfig::default()).unwrap();
//! assert!((sweep.total_distance - 2.0 * graph.total_length()).abs() < 1e-10);
//! ```

pub mod circuit;
pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod exact;
pub mod fleet;
pub mod models;
pub mod scenarios;
