//! Nearest-neighbor capacitated route construction.
//!
//! Builds routes greedily: starting from the depot, always drive to the
//! nearest unserved point that still fits in the truck. When nothing
//! reachable fits, return to the depot and start a new route.
//!
//! # Complexity
//!
//! O(n²) after the O(n · (V + E) log V) distance matrix, where n = number of
//! collection points.
//!
//! # Reference
//!
//! The simplest constructive heuristic for capacitated routing; a fast
//! baseline rather than a near-optimal plan.

use super::collection::{close_route, CollectionSet};
use crate::config::SolverConfig;
use crate::evaluation::RouteEvaluator;
use crate::models::{Graph, RoutePlan, UncollectableReason, VertexId};

/// Splits collection points into capacity-bounded routes, nearest point
/// first.
///
/// Only points whose quantity exceeds the configured collection threshold
/// are served. Points no truck can serve are reported in
/// [`RoutePlan::uncollectable`]. Distance ties go to the point listed first
/// in `points`.
///
/// # Arguments
///
/// * `graph` — Road network
/// * `depot` — Start and end of every route
/// * `points` — Candidate collection points
/// * `capacity` — Truck capacity, in the unit of vertex quantities
/// * `config` — Threshold, tolerance and logger
///
/// # Examples
///
/// ```
/// use waste_routing::config::SolverConfig;
/// use waste_routing::models::{Graph, Vertex};
/// use waste_routing::constructive::nearest_neighbor_routes;
///
/// let depot = Vertex::new("A", "Depot");
/// let mut graph = Graph::new();
/// for (key, len) in [("B", 1.0), ("C", 2.0), ("D", 3.0)] {
///     graph.add_edge(&depot, &Vertex::collection_point(key, key, 3.0), len);
/// }
/// let depot = graph.depot().unwrap();
/// let points: Vec<_> = graph.vertex_ids().collect();
///
/// let plan = nearest_neighbor_routes(&graph, depot, &points, 6.0, &SolverConfig::default());
/// assert_eq!(plan.num_routes(), 2);
/// assert_eq!(plan.num_served(), 3);
/// assert!(plan.routes().iter().all(|r| r.total_load() <= 6.0));
/// ```
pub fn nearest_neighbor_routes(
    graph: &Graph,
    depot: VertexId,
    points: &[VertexId],
    capacity: f64,
    config: &SolverConfig,
) -> RoutePlan {
    let Some(CollectionSet {
        matrix,
        collectable,
        mut plan,
    }) = CollectionSet::prepare(graph, depot, points, capacity, config)
    else {
        return RoutePlan::new();
    };

    let tolerance = config.capacity_tolerance();
    let evaluator = RouteEvaluator::new(graph, &matrix, capacity, tolerance);
    let quantity = |i: usize| graph.vertex(matrix.location(i)).quantity();

    let mut remaining = collectable;
    while !remaining.is_empty() {
        let mut current = 0;
        let mut load = 0.0;
        let mut stops = Vec::new();

        loop {
            // Nearest reachable unserved point that fits capacity
            let fitting: Vec<usize> = remaining
                .iter()
                .copied()
                .filter(|&c| load + quantity(c) <= capacity + tolerance)
                .collect();

            match matrix.nearest_neighbor(current, &fitting) {
                Some(next) => {
                    remaining.retain(|&c| c != next);
                    load += quantity(next);
                    stops.push(next);
                    current = next;
                }
                None => break,
            }
        }

        if stops.is_empty() {
            // unreachable from the depot on an empty truck: never retried
            for &c in &remaining {
                plan.add_uncollectable(matrix.location(c), UncollectableReason::Unreachable);
            }
            break;
        }

        close_route(&evaluator, &mut plan, &stops, config, "nearest neighbor");
    }

    plan
}
