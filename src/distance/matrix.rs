//! Dense distance matrix over a subset of graph vertices.

use super::ShortestPathTree;
use crate::models::{Graph, VertexId};

/// A dense n×n matrix of shortest-path distances stored in row-major order.
///
/// Row/column `i` corresponds to `locations()[i]`; by convention index 0 is
/// the depot. Unreachable pairs hold `f64::INFINITY`. The matrix may be
/// asymmetric when the network has one-way streets.
///
/// # Examples
///
/// ```
/// use waste_routing::models::{Direction, Graph, Vertex};
/// use waste_routing::distance::DistanceMatrix;
///
/// let (a, b, c) = (Vertex::new("A", "Depot"), Vertex::new("B", "B"), Vertex::new("C", "C"));
/// let mut graph = Graph::new();
/// graph.add_edge(&a, &b, 3.0);
/// graph.add_edge_with(&b, &c, 4.0, Direction::OneWay);
///
/// let ids: Vec<_> = graph.vertex_ids().collect();
/// let dm = DistanceMatrix::from_graph(&graph, &ids);
/// assert!((dm.get(0, 2) - 7.0).abs() < 1e-10);
/// assert!(dm.get(2, 0).is_infinite());
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
    locations: Vec<VertexId>,
}

impl DistanceMatrix {
    /// Creates a matrix over `locations`, initialized to zero.
    pub fn new(locations: Vec<VertexId>) -> Self {
        let size = locations.len();
        Self {
            data: vec![0.0; size * size],
            size,
            locations,
        }
    }

    /// Computes shortest-path distances between every pair of `locations`.
    ///
    /// Runs one Dijkstra search per location.
    pub fn from_graph(graph: &Graph, locations: &[VertexId]) -> Self {
        let mut dm = Self::new(locations.to_vec());
        for (i, &from) in locations.iter().enumerate() {
            let tree = ShortestPathTree::build(graph, from);
            for (j, &to) in locations.iter().enumerate() {
                let d = if i == j { 0.0 } else { tree.distance_to(to) };
                dm.set(i, j, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `locations.len()²`.
    pub fn from_data(locations: Vec<VertexId>, data: Vec<f64>) -> Option<Self> {
        let size = locations.len();
        if data.len() != size * size {
            return None;
        }
        Some(Self {
            data,
            size,
            locations,
        })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Graph vertex behind matrix index `i`.
    pub fn location(&self, i: usize) -> VertexId {
        self.locations[i]
    }

    /// Graph vertices in matrix order.
    pub fn locations(&self) -> &[VertexId] {
        &self.locations
    }

    /// Matrix index of a graph vertex, if present.
    pub fn index_of(&self, vertex: VertexId) -> Option<usize> {
        self.locations.iter().position(|&v| v == vertex)
    }

    /// Returns `true` if `to` can be reached from `from`.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }

    /// Returns the nearest reachable neighbor of `from` among `candidates`.
    ///
    /// Ties go to the earliest candidate. Returns `None` if no candidate is
    /// reachable.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            if d.is_finite() && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((c, d));
            }
        }
        best.map(|(c, _)| c)
    }
}
