//! Capacitated route constructors.
//!
//! - [`nearest_neighbor_routes`] — Greedy nearest-neighbor with capacity cut-off, O(n²)
//! - [`mst_routes`] — Kruskal tree preorder, shortcut, split by capacity, O(n² log n)
//!
//! Both take shortest-path distances as their oracle and report points no
//! truck can serve instead of looping on them.

mod collection;
mod mst_shortcut;
mod nearest_neighbor;
mod spanning_tree;

pub use mst_shortcut::mst_routes;
pub use nearest_neighbor::nearest_neighbor_routes;
