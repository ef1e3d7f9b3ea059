//! Exact tour over a small set of collection points.
//!
//! - [`solve_exact_tour`] — Held-Karp bitmask dynamic programming, O(2ⁿ · n²)

mod held_karp;

pub use held_karp::{solve_exact_tour, TourSolution};
