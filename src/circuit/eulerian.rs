//! Eulerian circuit construction (Hierholzer).
//!
//! # Algorithm
//!
//! Keeps a private "used" mask over the edges; the input graph is never
//! modified. A stack walk starts at the given vertex and repeatedly takes
//! the first unused edge usable from the vertex on top of the stack (in
//! insertion order), pushing the opposite endpoint. When the top vertex has
//! no unused edge left it is popped onto the circuit. The popped sequence,
//! reversed, is the circuit; sub-tours found later are spliced in
//! automatically by the stack.
//!
//! The circuit is returned only if every edge was used, the walk closes on
//! the start vertex and each step is joined by the edge recorded for it.
//! On a graph without an Eulerian circuit the stack splice can jump between
//! unconnected vertices; such walks are rejected and the result is empty,
//! never a partial or undrivable tour.
//!
//! # Complexity
//!
//! O(V + E).
//!
//! # Reference
//!
//! Hierholzer, C. & Wiener, C. (1873). "Ueber die Möglichkeit, einen
//! Linienzug ohne Wiederholung und ohne Unterbrechung zu umfahren",
//! *Mathematische Annalen* 6, 30-32.

use crate::models::{EdgeId, Graph, VertexId};

/// Walk produced by the circuit builder: vertices and the edges between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EulerianWalk {
    /// Visited vertices, start vertex first and last.
    pub vertices: Vec<VertexId>,
    /// Traversed edges; `edges[i]` joins `vertices[i]` and `vertices[i + 1]`.
    pub edges: Vec<EdgeId>,
}

impl EulerianWalk {
    /// Returns `true` if no circuit was found.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Builds an Eulerian circuit starting and ending at `start`.
///
/// Returns the vertex sequence (`edge count + 1` entries), or an empty
/// vector when the graph does not admit such a circuit from `start`.
///
/// # Examples
///
/// ```
/// use waste_routing::models::{Graph, Vertex};
/// use waste_routing::circuit::eulerian_circuit;
///
/// let keys = ["A", "B", "C", "D"];
/// let mut graph = Graph::new();
/// for (i, key) in keys.iter().enumerate() {
///     let next = keys[(i + 1) % keys.len()];
///     graph.add_edge(&Vertex::new(*key, *key), &Vertex::new(next, next), 1.0);
/// }
///
/// let depot = graph.depot().unwrap();
/// let circuit = eulerian_circuit(&graph, depot);
/// assert_eq!(graph.format_walk(&circuit), "A -> B -> C -> D -> A");
/// ```
pub fn eulerian_circuit(graph: &Graph, start: VertexId) -> Vec<VertexId> {
    eulerian_walk(graph, start).vertices
}

/// Same as [`eulerian_circuit`], also reporting which edge each step uses.
///
/// Needed when parallel edges of different lengths join the same vertices.
pub fn eulerian_walk(graph: &Graph, start: VertexId) -> EulerianWalk {
    if start.index() >= graph.num_vertices() {
        return EulerianWalk::default();
    }

    let mut used = vec![false; graph.num_edges()];
    let mut cursor = vec![0usize; graph.num_vertices()];
    let mut stack: Vec<(VertexId, Option<EdgeId>)> = vec![(start, None)];
    let mut vertices = Vec::with_capacity(graph.num_edges() + 1);
    let mut edges = Vec::with_capacity(graph.num_edges());

    while let Some(&(v, _)) = stack.last() {
        let incident = graph.incident_edges(v);
        let pos = &mut cursor[v.index()];
        while *pos < incident.len() && used[incident[*pos].index()] {
            *pos += 1;
        }

        if let Some(&next) = incident.get(*pos) {
            used[next.index()] = true;
            stack.push((graph.edge(next).opposite(v), Some(next)));
        } else if let Some((vertex, via)) = stack.pop() {
            vertices.push(vertex);
            edges.extend(via);
        }
    }

    vertices.reverse();
    edges.reverse();

    let all_used = used.iter().all(|&u| u);
    let closed = vertices.first() == Some(&start) && vertices.last() == Some(&start);
    let joined = edges.len() + 1 == vertices.len()
        && edges
            .iter()
            .zip(vertices.windows(2))
            .all(|(&e, step)| graph.edge(e).connects(step[0], step[1]));
    if !all_used || !closed || !joined {
        return EulerianWalk::default();
    }

    EulerianWalk { vertices, edges }
}
