//! Route and visit types.

use super::VertexId;
use serde::Serialize;

/// A single stop at a collection point within a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    /// Vertex being visited.
    pub vertex: VertexId,
    /// Quantity collected at this stop.
    pub quantity: f64,
    /// Shortest-path distance from the previous stop (or the depot).
    pub leg_distance: f64,
    /// Cumulative load after this visit.
    pub load_after: f64,
}

/// One truck tour: depot, an ordered sequence of stops, back to depot.
///
/// The depot is not stored in `visits`. Routes are built incrementally by a
/// route constructor and are read-only once returned.
///
/// # Examples
///
/// ```
/// use waste_routing::models::{Graph, Route, Vertex};
///
/// let mut graph = Graph::new();
/// let depot = graph.add_vertex(Vertex::new("A", "Depot"));
/// let school = graph.add_vertex(Vertex::collection_point("C", "School", 3.2));
///
/// let mut route = Route::new(1, depot);
/// route.push_visit(school, 3.2, 1.8);
/// route.close(1.8);
/// assert_eq!(route.len(), 1);
/// assert!((route.total_distance() - 3.6).abs() < 1e-10);
/// assert!((route.total_load() - 3.2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    number: usize,
    depot: VertexId,
    visits: Vec<Visit>,
    total_distance: f64,
    total_load: f64,
    return_distance: Option<f64>,
}

impl Route {
    /// Creates an empty route with the given sequence number.
    pub fn new(number: usize, depot: VertexId) -> Self {
        Self {
            number,
            depot,
            visits: Vec::new(),
            total_distance: 0.0,
            total_load: 0.0,
            return_distance: None,
        }
    }

    /// Appends a stop, adding `leg_distance` and `quantity` to the totals.
    pub fn push_visit(&mut self, vertex: VertexId, quantity: f64, leg_distance: f64) {
        self.total_load += quantity;
        self.total_distance += leg_distance;
        self.visits.push(Visit {
            vertex,
            quantity,
            leg_distance,
            load_after: self.total_load,
        });
    }

    /// Records the closing leg back to the depot.
    pub fn close(&mut self, return_distance: f64) {
        self.total_distance += return_distance;
        self.return_distance = Some(return_distance);
    }

    /// Sequence number (1-based).
    pub fn number(&self) -> usize {
        self.number
    }

    /// Start and end vertex.
    pub fn depot(&self) -> VertexId {
        self.depot
    }

    /// Ordered stops.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Number of stops (excluding depot).
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if the route has no stop.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Visited vertices in order.
    pub fn vertices(&self) -> Vec<VertexId> {
        self.visits.iter().map(|v| v.vertex).collect()
    }

    /// Distance of all legs recorded so far, closing leg included.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Quantity collected.
    pub fn total_load(&self) -> f64 {
        self.total_load
    }

    /// Closing leg, if the route has been closed.
    pub fn return_distance(&self) -> Option<f64> {
        self.return_distance
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.return_distance.is_some()
    }
}
