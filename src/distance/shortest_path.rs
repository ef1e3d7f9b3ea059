//! Single-source shortest paths (Dijkstra).
//!
//! # Algorithm
//!
//! Label-setting search with a binary-heap frontier keyed by tentative
//! distance. Edges are relaxed only in the directions the graph permits
//! (outgoing edges, plus incoming two-way edges). Every successful
//! relaxation records the predecessor vertex and the exact edge used, so
//! paths are rebuilt by walking predecessors back from the target.
//!
//! Frontier ties are broken by vertex insertion index, edges are relaxed in
//! insertion order, and a predecessor only changes on a strict improvement:
//! repeated runs on the same graph produce the same paths.
//!
//! Edge lengths are non-negative by construction (see
//! [`Graph::add_edge`](crate::models::Graph::add_edge)).
//!
//! # Complexity
//!
//! O((V + E) log V) per source.
//!
//! # Reference
//!
//! Dijkstra, E.W. (1959). "A note on two problems in connexion with graphs",
//! *Numerische Mathematik* 1, 269-271.

use crate::models::{EdgeId, Graph, VertexId};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Frontier entry; ordered so that the max-heap pops the smallest distance,
/// then the smallest vertex index.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: f64,
    vertex: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest distances and predecessors from one source vertex.
///
/// Unreachable vertices report `f64::INFINITY` and empty paths.
///
/// # Examples
///
/// ```
/// use waste_routing::models::{Graph, Vertex};
/// use waste_routing::distance::ShortestPathTree;
///
/// let (a, b, c) = (Vertex::new("A", "Depot"), Vertex::new("B", "B"), Vertex::new("C", "C"));
/// let mut graph = Graph::new();
/// graph.add_edge(&a, &b, 1.0);
/// graph.add_edge(&b, &c, 2.0);
/// graph.add_edge(&a, &c, 5.0);
///
/// let ia = graph.vertex_id("A").unwrap();
/// let ic = graph.vertex_id("C").unwrap();
/// let tree = ShortestPathTree::build(&graph, ia);
/// assert!((tree.distance_to(ic) - 3.0).abs() < 1e-10);
/// assert_eq!(graph.format_walk(&tree.path_to(ic)), "A -> B -> C");
/// ```
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: VertexId,
    distances: Vec<f64>,
    predecessors: Vec<Option<(VertexId, EdgeId)>>,
}

impl ShortestPathTree {
    /// Runs Dijkstra from `source` over the whole graph.
    ///
    /// An unknown source yields a tree where every vertex is unreachable.
    pub fn build(graph: &Graph, source: VertexId) -> Self {
        let n = graph.num_vertices();
        let mut distances = vec![f64::INFINITY; n];
        let mut predecessors = vec![None; n];

        if source.index() >= n {
            return Self {
                source,
                distances,
                predecessors,
            };
        }

        let mut settled = vec![false; n];
        let mut frontier = BinaryHeap::new();
        distances[source.index()] = 0.0;
        frontier.push(Frontier {
            distance: 0.0,
            vertex: source.index(),
        });

        while let Some(Frontier { distance, vertex }) = frontier.pop() {
            if settled[vertex] {
                continue;
            }
            settled[vertex] = true;

            let u = VertexId(vertex);
            for &edge_id in graph.incident_edges(u) {
                let edge = graph.edge(edge_id);
                let w = edge.opposite(u).index();
                let candidate = distance + edge.length();
                if candidate < distances[w] {
                    distances[w] = candidate;
                    predecessors[w] = Some((u, edge_id));
                    frontier.push(Frontier {
                        distance: candidate,
                        vertex: w,
                    });
                }
            }
        }

        Self {
            source,
            distances,
            predecessors,
        }
    }

    /// Vertex the tree was grown from.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Shortest distance to `target`, or `f64::INFINITY` if unreachable.
    pub fn distance_to(&self, target: VertexId) -> f64 {
        self.distances
            .get(target.index())
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Returns `true` if `target` has a finite distance.
    pub fn is_reachable(&self, target: VertexId) -> bool {
        self.distance_to(target).is_finite()
    }

    /// Vertex sequence from the source to `target`, both included.
    ///
    /// `[source]` when `target == source`; empty when unreachable.
    pub fn path_to(&self, target: VertexId) -> Vec<VertexId> {
        if !self.is_reachable(target) {
            return Vec::new();
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some((prev, _)) = self.predecessors[current.index()] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        path
    }

    /// Edges traversed from the source to `target`, in travel order.
    ///
    /// Empty when `target` is the source or unreachable.
    pub fn edge_path_to(&self, target: VertexId) -> Vec<EdgeId> {
        if !self.is_reachable(target) {
            return Vec::new();
        }
        let mut edges = Vec::new();
        let mut current = target;
        while let Some((prev, edge)) = self.predecessors[current.index()] {
            edges.push(edge);
            current = prev;
        }
        edges.reverse();
        edges
    }
}

/// Shortest distance from `from` to `to`, or `f64::INFINITY` if unreachable.
///
/// Zero when `from == to`.
pub fn shortest_distance(graph: &Graph, from: VertexId, to: VertexId) -> f64 {
    if from == to {
        return 0.0;
    }
    ShortestPathTree::build(graph, from).distance_to(to)
}

/// Shortest vertex sequence from `from` to `to`.
///
/// Returns `[from]` when `from == to` and an empty vector when `to` is
/// unreachable; callers must check before using the path.
pub fn shortest_path(graph: &Graph, from: VertexId, to: VertexId) -> Vec<VertexId> {
    if from == to {
        return vec![from];
    }
    ShortestPathTree::build(graph, from).path_to(to)
}

/// Edges of the shortest path from `from` to `to`, in travel order.
pub fn shortest_edge_path(graph: &Graph, from: VertexId, to: VertexId) -> Vec<EdgeId> {
    if from == to {
        return Vec::new();
    }
    ShortestPathTree::build(graph, from).edge_path_to(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, Vertex};
    use proptest::prelude::*;

    fn v(key: &str) -> Vertex {
        Vertex::new(key, key)
    }

    fn id(g: &Graph, key: &str) -> VertexId {
        g.vertex_id(key).expect("vertex exists")
    }

    /// A-B 1, B-C 1, C-D 1, D-A 1, A-C 5, plus one-way D -> E 2.
    fn sample() -> Graph {
        let mut g = Graph::new();
        g.add_edge(&v("A"), &v("B"), 1.0);
        g.add_edge(&v("B"), &v("C"), 1.0);
        g.add_edge(&v("C"), &v("D"), 1.0);
        g.add_edge(&v("D"), &v("A"), 1.0);
        g.add_edge(&v("A"), &v("C"), 5.0);
        g.add_edge_with(&v("D"), &v("E"), 2.0, Direction::OneWay);
        g
    }

    #[test]
    fn test_distances_from_depot() {
        let g = sample();
        let tree = ShortestPathTree::build(&g, id(&g, "A"));
        assert_eq!(tree.distance_to(id(&g, "A")), 0.0);
        assert!((tree.distance_to(id(&g, "B")) - 1.0).abs() < 1e-10);
        assert!((tree.distance_to(id(&g, "C")) - 2.0).abs() < 1e-10);
        assert!((tree.distance_to(id(&g, "E")) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_one_way_blocks_reverse() {
        let g = sample();
        let (a, e) = (id(&g, "A"), id(&g, "E"));
        assert!(shortest_distance(&g, e, a).is_infinite());
        assert!(shortest_path(&g, e, a).is_empty());
        assert!(shortest_edge_path(&g, e, a).is_empty());
    }

    #[test]
    fn test_same_vertex() {
        let g = sample();
        let c = id(&g, "C");
        assert_eq!(shortest_distance(&g, c, c), 0.0);
        assert_eq!(shortest_path(&g, c, c), vec![c]);
        assert!(shortest_edge_path(&g, c, c).is_empty());
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        // A -> C has two equal routes: via B (inserted first) and via D.
        let g = sample();
        let path = shortest_path(&g, id(&g, "A"), id(&g, "C"));
        assert_eq!(g.format_walk(&path), "A -> B -> C");
        for _ in 0..5 {
            assert_eq!(shortest_path(&g, id(&g, "A"), id(&g, "C")), path);
        }
    }

    #[test]
    fn test_edge_path_matches_vertex_path() {
        let g = sample();
        let (a, e) = (id(&g, "A"), id(&g, "E"));
        let tree = ShortestPathTree::build(&g, a);
        let vertices = tree.path_to(e);
        let edges = tree.edge_path_to(e);
        assert_eq!(g.format_walk(&vertices), "A -> D -> E");
        assert_eq!(edges.len(), vertices.len() - 1);
        let total: f64 = edges.iter().map(|&x| g.edge(x).length()).sum();
        assert!((total - tree.distance_to(e)).abs() < 1e-10);
    }

    #[test]
    fn test_parallel_edges_use_shortest() {
        let mut g = Graph::new();
        g.add_edge(&v("A"), &v("B"), 4.0);
        let short = g.add_edge(&v("A"), &v("B"), 1.5).expect("valid");
        let (a, b) = (id(&g, "A"), id(&g, "B"));
        assert!((shortest_distance(&g, a, b) - 1.5).abs() < 1e-10);
        assert_eq!(shortest_edge_path(&g, a, b), vec![short]);
    }

    #[test]
    fn test_unknown_source() {
        let g = sample();
        let tree = ShortestPathTree::build(&g, VertexId(99));
        assert!(tree.distance_to(id(&g, "A")).is_infinite());
        assert!(tree.path_to(id(&g, "A")).is_empty());
    }

    #[test]
    fn test_isolated_vertex() {
        let mut g = sample();
        let z = g.add_vertex(v("Z"));
        assert!(shortest_distance(&g, id(&g, "A"), z).is_infinite());
        assert!(shortest_path(&g, z, id(&g, "A")).is_empty());
    }

    fn arb_graph() -> impl Strategy<Value = Graph> {
        (2usize..8).prop_flat_map(|n| {
            prop::collection::vec((0..n, 0..n, 0u8..10, any::<bool>()), 0..16).prop_map(move |edges| {
                let mut g = Graph::new();
                for i in 0..n {
                    g.add_vertex(v(&format!("V{i}")));
                }
                for (t, h, len, two_way) in edges {
                    let direction = if two_way { Direction::TwoWay } else { Direction::OneWay };
                    g.add_edge_between(VertexId(t), VertexId(h), f64::from(len), direction);
                }
                g
            })
        })
    }

    proptest! {
        #[test]
        fn prop_distance_equals_path_length(g in arb_graph()) {
            for s in g.vertex_ids() {
                let tree = ShortestPathTree::build(&g, s);
                for t in g.vertex_ids() {
                    let d = shortest_distance(&g, s, t);
                    prop_assert_eq!(d, tree.distance_to(t));
                    let path = shortest_path(&g, s, t);
                    if d.is_finite() {
                        prop_assert_eq!(path.first().copied(), Some(s));
                        prop_assert_eq!(path.last().copied(), Some(t));
                        let edges = tree.edge_path_to(t);
                        let mut total = 0.0;
                        for (step, &e) in edges.iter().enumerate() {
                            prop_assert!(g.edge(e).connects(path[step], path[step + 1]));
                            total += g.edge(e).length();
                        }
                        prop_assert!((total - d).abs() < 1e-9);
                    } else {
                        prop_assert!(path.is_empty());
                    }
                }
            }
        }

        #[test]
        fn prop_self_distance_is_zero(g in arb_graph()) {
            for s in g.vertex_ids() {
                prop_assert_eq!(shortest_distance(&g, s, s), 0.0);
                prop_assert_eq!(shortest_path(&g, s, s), vec![s]);
            }
        }
    }
}
