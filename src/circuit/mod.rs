//! Circuits that traverse every street.
//!
//! - [`eulerian_circuit`] — Hierholzer's algorithm, O(V + E)
//! - [`solve_postman`] — Chinese Postman by odd-vertex pairing and edge duplication

mod eulerian;
mod postman;

pub use eulerian::{eulerian_circuit, eulerian_walk, EulerianWalk};
pub use postman::{solve_postman, PostmanSolution, PostmanWarning};
