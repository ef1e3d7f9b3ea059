//! Road-network graph with direction-aware adjacency.

use super::{Direction, Edge, EdgeId, Vertex, VertexId};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Key of the vertex preferred as depot.
pub const DEPOT_KEY: &str = "A";

/// An insertion-ordered road network.
///
/// Vertices live in an arena indexed by [`VertexId`]; edges in an arena
/// indexed by [`EdgeId`]. For each vertex the graph keeps the list of edges
/// usable *from* it (outgoing edges plus incoming two-way edges), updated on
/// every insertion, so neighbor and degree queries cost O(degree).
///
/// No query fails: unknown ids and absent connections yield empty results
/// or `None`.
///
/// # Examples
///
/// ```
/// use waste_routing::models::{Direction, Graph, Vertex};
///
/// let a = Vertex::new("A", "Depot");
/// let b = Vertex::collection_point("B", "Town hall", 4.8);
/// let c = Vertex::collection_point("C", "School", 3.2);
///
/// let mut graph = Graph::new();
/// graph.add_edge(&a, &b, 1.5);
/// graph.add_edge_with(&b, &c, 1.0, Direction::OneWay);
///
/// let (ia, ib, ic) = (graph.vertex_id("A").unwrap(), graph.vertex_id("B").unwrap(), graph.vertex_id("C").unwrap());
/// assert_eq!(graph.depot(), Some(ia));
/// assert_eq!(graph.degree(ib), 2);
/// assert!(graph.edge_between(ib, ic).is_some());
/// assert!(graph.edge_between(ic, ib).is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    label: String,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: HashMap<String, VertexId>,
    #[serde(skip)]
    adjacency: Vec<Vec<EdgeId>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a human-readable description of the network.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Description of the network (empty if unset).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Adds a vertex unless one with the same key exists.
    ///
    /// Returns the id of the stored vertex; an existing vertex is kept as is.
    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        if let Some(&id) = self.index.get(vertex.key()) {
            return id;
        }
        let id = VertexId(self.vertices.len());
        self.index.insert(vertex.key().to_string(), id);
        self.vertices.push(vertex);
        self.adjacency.push(Vec::new());
        id
    }

    /// Adds a two-way street, registering both endpoints.
    ///
    /// Returns `None` (and leaves the graph unchanged) if `length` is
    /// negative or not finite.
    pub fn add_edge(&mut self, tail: &Vertex, head: &Vertex, length: f64) -> Option<EdgeId> {
        self.add_edge_with(tail, head, length, Direction::TwoWay)
    }

    /// Adds a street with the given direction, registering both endpoints.
    pub fn add_edge_with(
        &mut self,
        tail: &Vertex,
        head: &Vertex,
        length: f64,
        direction: Direction,
    ) -> Option<EdgeId> {
        if !length.is_finite() || length < 0.0 {
            return None;
        }
        let tail = self.add_vertex(tail.clone());
        let head = self.add_vertex(head.clone());
        self.add_edge_between(tail, head, length, direction)
    }

    /// Adds a street between two registered vertices.
    ///
    /// Returns `None` if either id is unknown or the length is invalid.
    pub fn add_edge_between(
        &mut self,
        tail: VertexId,
        head: VertexId,
        length: f64,
        direction: Direction,
    ) -> Option<EdgeId> {
        if tail.0 >= self.vertices.len() || head.0 >= self.vertices.len() {
            return None;
        }
        let edge = Edge::new(tail, head, length, direction)?;
        let id = EdgeId(self.edges.len());
        self.adjacency[tail.0].push(id);
        if edge.is_bidirectional() {
            self.adjacency[head.0].push(id);
        }
        self.edges.push(edge);
        Some(id)
    }

    /// Appends a copy of an existing edge (same endpoints, length, direction).
    pub fn duplicate_edge(&mut self, edge: EdgeId) -> Option<EdgeId> {
        let original = self.edges.get(edge.0)?.clone();
        self.add_edge_between(
            original.tail(),
            original.head(),
            original.length(),
            original.direction(),
        )
    }

    /// Returns the vertex with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this graph.
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    /// Returns the edge with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this graph.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Looks a vertex up by key: exact match first, then case-insensitive.
    pub fn vertex_id(&self, key: &str) -> Option<VertexId> {
        if let Some(&id) = self.index.get(key) {
            return Some(id);
        }
        self.vertices
            .iter()
            .position(|v| v.key().eq_ignore_ascii_case(key))
            .map(VertexId)
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Ids of all vertices in insertion order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(VertexId)
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no vertex.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex keyed "A" if present, else the first inserted vertex.
    pub fn depot(&self) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|v| v.key().eq_ignore_ascii_case(DEPOT_KEY))
            .map(VertexId)
            .or_else(|| (!self.vertices.is_empty()).then_some(VertexId(0)))
    }

    /// First edge, in insertion order, traversable from `from` to `to`.
    pub fn edge_between(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.incident_edges(from)
            .iter()
            .copied()
            .filter(|&id| self.edges[id.0].connects(from, to))
            .min()
    }

    /// Edges usable from `v`, in insertion order.
    pub fn incident_edges(&self, v: VertexId) -> &[EdgeId] {
        self.adjacency.get(v.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vertices reachable from `v` in one step, one entry per usable edge.
    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.incident_edges(v)
            .iter()
            .map(|&id| self.edges[id.0].opposite(v))
            .collect()
    }

    /// Outgoing edges plus incoming two-way edges.
    pub fn degree(&self, v: VertexId) -> usize {
        self.incident_edges(v).len()
    }

    /// Vertices with an odd degree, in insertion order.
    pub fn odd_degree_vertices(&self) -> Vec<VertexId> {
        self.vertex_ids().filter(|&v| self.degree(v) % 2 != 0).collect()
    }

    /// Returns `true` if every vertex is reachable from every other when
    /// directions are ignored. An empty graph is not connected.
    pub fn is_connected(&self) -> bool {
        let n = self.vertices.len();
        if n == 0 {
            return false;
        }

        let mut undirected = vec![Vec::new(); n];
        for edge in &self.edges {
            undirected[edge.tail().0].push(edge.head().0);
            undirected[edge.head().0].push(edge.tail().0);
        }

        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(u) = queue.pop_front() {
            for &w in &undirected[u] {
                if !seen[w] {
                    seen[w] = true;
                    reached += 1;
                    queue.push_back(w);
                }
            }
        }
        reached == n
    }

    /// Connected (undirected relaxation) and every degree is even.
    pub fn is_eulerian(&self) -> bool {
        self.is_connected() && self.vertex_ids().all(|v| self.degree(v) % 2 == 0)
    }

    /// Returns `true` if at least one street is one-way.
    pub fn has_one_way_streets(&self) -> bool {
        self.edges.iter().any(|e| !e.is_bidirectional())
    }

    /// Sum of all street lengths.
    pub fn total_length(&self) -> f64 {
        self.edges.iter().map(Edge::length).sum()
    }

    /// Keys of the given vertices, joined by `" -> "`.
    pub fn format_walk(&self, walk: &[VertexId]) -> String {
        walk.iter()
            .map(|&v| self.vertex(v).key())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
