//! Chinese Postman solver for street-sweeping circuits.
//!
//! # Algorithm
//!
//! 1. Collect the odd-degree vertices. An odd count of them is an invariant
//!    violation and aborts with [`RoutingError::OddVertexCount`].
//! 2. With no odd vertex the graph is Eulerian: build the circuit directly
//!    from the depot.
//! 3. Otherwise pair the odd vertices sequentially, `(o0, o1), (o2, o3), …`
//!    in the order the graph lists them, and duplicate every edge of the
//!    shortest path between each pair into a private copy of the graph.
//!    This is not a minimum-weight perfect matching, so the extra distance
//!    is not guaranteed minimal.
//! 4. Build the Eulerian circuit of the augmented copy from the depot.
//! 5. Sum the lengths of the traversed edges. Duplicates are exact copies
//!    of original edges, so this is the length of the walk in the original
//!    network.
//!
//! The classical method assumes two-way streets. One-way streets are
//! accepted but reported through [`PostmanWarning::OneWayStreets`]; the
//! circuit may then be sub-optimal or empty.
//!
//! # Complexity
//!
//! O(k · (V + E) log V) for k odd vertices, plus O(V + E) for the circuit.
//!
//! # Reference
//!
//! Edmonds, J. & Johnson, E.L. (1973). "Matching, Euler tours and the
//! Chinese postman", *Mathematical Programming* 5, 88-124.

use super::eulerian::eulerian_walk;
use crate::config::SolverConfig;
use crate::distance::shortest_edge_path;
use crate::error::{RoutingError, RoutingResult};
use crate::models::{EdgeId, Graph, VertexId};
use serde::Serialize;

/// A non-fatal condition met while solving.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PostmanWarning {
    /// The network has one-way streets; optimality is not guaranteed and
    /// the circuit may be infeasible.
    OneWayStreets,
    /// No path joins two paired odd vertices; the pair was skipped.
    UnpairedOddVertices {
        /// First vertex of the pair.
        from: VertexId,
        /// Second vertex of the pair.
        to: VertexId,
    },
}

/// Result of [`solve_postman`].
#[derive(Debug, Clone, Serialize)]
pub struct PostmanSolution {
    /// Closed walk from the depot covering every street; empty when no
    /// circuit exists even after duplication.
    pub circuit: Vec<VertexId>,
    /// Length of the walk (0 when `circuit` is empty).
    pub total_distance: f64,
    /// Original edges traversed a second time, one entry per duplication.
    pub duplicated_edges: Vec<EdgeId>,
    /// Number of odd-degree vertices in the input graph.
    pub odd_vertex_count: usize,
    /// Non-fatal conditions met while solving.
    pub warnings: Vec<PostmanWarning>,
}

impl PostmanSolution {
    /// Returns `true` if a circuit was found.
    pub fn is_feasible(&self) -> bool {
        !self.circuit.is_empty()
    }

    /// Length added by the duplicated edges.
    pub fn extra_distance(&self, graph: &Graph) -> f64 {
        self.duplicated_edges
            .iter()
            .map(|&e| graph.edge(e).length())
            .sum()
    }
}

/// Finds a closed walk from the depot that traverses every street at least
/// once.
///
/// The caller's graph is never modified; augmentation happens on a copy.
///
/// # Errors
///
/// * [`RoutingError::EmptyGraph`] if the graph has no vertex.
/// * [`RoutingError::OddVertexCount`] if the number of odd-degree vertices
///   is odd.
///
/// # Examples
///
/// ```
/// use waste_routing::config::SolverConfig;
/// use waste_routing::models::{Graph, Vertex};
/// use waste_routing::circuit::solve_postman;
///
/// // A dead-end street A - B - C: both ends are odd.
/// let (a, b, c) = (Vertex::new("A", "Depot"), Vertex::new("B", "B"), Vertex::new("C", "C"));
/// let mut graph = Graph::new();
/// graph.add_edge(&a, &b, 1.0);
/// graph.add_edge(&b, &c, 1.0);
///
/// let solution = solve_postman(&graph, &SolverConfig::default()).unwrap();
/// assert_eq!(solution.odd_vertex_count, 2);
/// assert_eq!(solution.duplicated_edges.len(), 2);
/// assert!((solution.total_distance - 4.0).abs() < 1e-10);
/// assert_eq!(graph.format_walk(&solution.circuit), "A -> B -> C -> B -> A");
/// ```
pub fn solve_postman(graph: &Graph, config: &SolverConfig) -> RoutingResult<PostmanSolution> {
    let depot = graph.depot().ok_or(RoutingError::EmptyGraph)?;

    let odd = graph.odd_degree_vertices();
    config.log(&format!("postman: {} odd-degree vertices", odd.len()));
    if odd.len() % 2 != 0 {
        config.log("postman: odd number of odd-degree vertices, aborting");
        return Err(RoutingError::OddVertexCount { count: odd.len() });
    }

    let mut warnings = Vec::new();
    if graph.has_one_way_streets() {
        config.log("postman: one-way streets present, result may be sub-optimal or infeasible");
        warnings.push(PostmanWarning::OneWayStreets);
    }

    let mut augmented = graph.clone();
    let mut duplicated_edges = Vec::new();

    for pair in odd.chunks_exact(2) {
        let (from, to) = (pair[0], pair[1]);
        let path = shortest_edge_path(graph, from, to);
        if path.is_empty() {
            config.log(&format!(
                "postman: no path between {} and {}, pair skipped",
                graph.vertex(from).key(),
                graph.vertex(to).key()
            ));
            warnings.push(PostmanWarning::UnpairedOddVertices { from, to });
            continue;
        }
        for edge in path {
            augmented.duplicate_edge(edge);
            duplicated_edges.push(edge);
        }
    }
    if !duplicated_edges.is_empty() {
        config.log(&format!("postman: {} edges duplicated", duplicated_edges.len()));
    }

    let walk = eulerian_walk(&augmented, depot);
    if walk.is_empty() {
        config.log("postman: no Eulerian circuit even after duplication");
    }
    let total_distance = walk.edges.iter().map(|&e| augmented.edge(e).length()).sum();

    Ok(PostmanSolution {
        circuit: walk.vertices,
        total_distance,
        duplicated_edges,
        odd_vertex_count: odd.len(),
        warnings,
    })
}
