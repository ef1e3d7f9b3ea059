//! Route evaluator that materializes stop sequences and audits route plans.

use crate::distance::{shortest_distance, DistanceMatrix};
use crate::models::{Graph, Route, RoutePlan, VertexId, Violation, ViolationType};
use std::collections::HashSet;

/// Gap between recorded and recomputed route distance treated as a defect.
const DISTANCE_TOLERANCE: f64 = 1e-6;

/// Builds routes from sequences of matrix indices and checks plans against
/// capacity and the road network.
///
/// # Examples
///
/// ```
/// use waste_routing::models::{Graph, Vertex};
/// use waste_routing::distance::DistanceMatrix;
/// use waste_routing::evaluation::RouteEvaluator;
///
/// let mut graph = Graph::new();
/// let depot = Vertex::new("A", "Depot");
/// graph.add_edge(&depot, &Vertex::collection_point("B", "Market", 2.0), 3.0);
/// graph.add_edge(&depot, &Vertex::collection_point("C", "School", 1.5), 4.0);
///
/// let ids: Vec<_> = graph.vertex_ids().collect();
/// let dm = DistanceMatrix::from_graph(&graph, &ids);
///
/// let evaluator = RouteEvaluator::new(&graph, &dm, 10.0, 1e-9);
/// let (route, violations) = evaluator.build_route(1, &[1, 2]);
/// assert_eq!(route.len(), 2);
/// assert!((route.total_load() - 3.5).abs() < 1e-10);
/// assert!((route.total_distance() - 14.0).abs() < 1e-10);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    graph: &'a Graph,
    distances: &'a DistanceMatrix,
    capacity: f64,
    tolerance: f64,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator. Matrix index 0 must be the depot.
    pub fn new(graph: &'a Graph, distances: &'a DistanceMatrix, capacity: f64, tolerance: f64) -> Self {
        Self {
            graph,
            distances,
            capacity,
            tolerance,
        }
    }

    fn exceeds_capacity(&self, load: f64) -> bool {
        !(load <= self.capacity + self.tolerance)
    }

    /// Builds a closed route visiting the given matrix indices in order.
    ///
    /// Quantities come from the graph and legs from the matrix. Returns the
    /// route and any constraint violations found (`route_index` is 0).
    pub fn build_route(&self, number: usize, stops: &[usize]) -> (Route, Vec<Violation>) {
        let depot = self.distances.location(0);
        let mut route = Route::new(number, depot);
        let mut violations = Vec::new();
        let mut prev = 0;

        for &stop in stops {
            let leg = self.distances.get(prev, stop);
            let vertex = self.distances.location(stop);
            if leg.is_infinite() {
                violations.push(Violation::new(ViolationType::UnreachableLeg {
                    route_index: 0,
                    from: self.distances.location(prev),
                    to: vertex,
                }));
            }
            route.push_visit(vertex, self.graph.vertex(vertex).quantity(), leg);
            prev = stop;
        }

        let back = self.distances.get(prev, 0);
        if back.is_infinite() {
            violations.push(Violation::new(ViolationType::UnreachableLeg {
                route_index: 0,
                from: self.distances.location(prev),
                to: depot,
            }));
        }
        route.close(back);

        if self.exceeds_capacity(route.total_load()) {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: 0,
                load: route.total_load(),
                capacity: self.capacity,
            }));
        }

        (route, violations)
    }

    /// Shortest distance between two vertices, from the matrix when both
    /// are in it.
    fn leg(&self, from: VertexId, to: VertexId) -> f64 {
        match (self.distances.index_of(from), self.distances.index_of(to)) {
            (Some(i), Some(j)) => self.distances.get(i, j),
            _ => shortest_distance(self.graph, from, to),
        }
    }

    /// Audits a whole plan.
    ///
    /// Recomputes every leg from shortest paths and returns the recomputed
    /// total distance of the plan (unreachable legs excluded) with the
    /// violations found.
    pub fn evaluate(&self, plan: &RoutePlan) -> (f64, Vec<Violation>) {
        let mut total = 0.0;
        let mut violations = Vec::new();
        let mut served = HashSet::new();

        for (idx, route) in plan.routes().iter().enumerate() {
            let mut recomputed = 0.0;
            let mut complete = true;
            let mut prev = route.depot();

            let closing = route.is_closed().then_some(route.depot());
            let stops = route.visits().iter().map(|v| v.vertex).chain(closing);
            for to in stops {
                let d = self.leg(prev, to);
                if d.is_finite() {
                    recomputed += d;
                } else {
                    complete = false;
                    violations.push(Violation::new(ViolationType::UnreachableLeg {
                        route_index: idx,
                        from: prev,
                        to,
                    }));
                }
                prev = to;
            }

            for visit in route.visits() {
                if !served.insert(visit.vertex) {
                    violations.push(Violation::new(ViolationType::DuplicateVisit {
                        vertex: visit.vertex,
                    }));
                }
            }

            if complete && (recomputed - route.total_distance()).abs() > DISTANCE_TOLERANCE {
                violations.push(Violation::new(ViolationType::DistanceMismatch {
                    route_index: idx,
                    recorded: route.total_distance(),
                    recomputed,
                }));
            }

            if self.exceeds_capacity(route.total_load()) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index: idx,
                    load: route.total_load(),
                    capacity: self.capacity,
                }));
            }

            total += recomputed;
        }

        (total, violations)
    }
}
