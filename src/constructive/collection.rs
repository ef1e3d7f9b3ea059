//! Point filtering shared by the route constructors.

use crate::config::SolverConfig;
use crate::distance::DistanceMatrix;
use crate::evaluation::RouteEvaluator;
use crate::models::{Graph, RoutePlan, UncollectableReason, VertexId};

/// Collection points ready for routing.
///
/// Matrix index 0 is the depot; `collectable` lists the matrix indices a
/// truck can serve, in input order. Points that no route can serve are
/// already recorded in `plan`.
pub(crate) struct CollectionSet {
    pub(crate) matrix: DistanceMatrix,
    pub(crate) collectable: Vec<usize>,
    pub(crate) plan: RoutePlan,
}

impl CollectionSet {
    /// Filters `points` and classifies them against the depot.
    ///
    /// Drops the depot, unknown ids, duplicates and points at or below the
    /// collection threshold. Returns `None` if the depot is not a vertex of
    /// `graph`.
    pub(crate) fn prepare(
        graph: &Graph,
        depot: VertexId,
        points: &[VertexId],
        capacity: f64,
        config: &SolverConfig,
    ) -> Option<Self> {
        if depot.index() >= graph.num_vertices() {
            return None;
        }

        let threshold = config.collection_threshold();
        let mut locations = vec![depot];
        for &p in points {
            if p.index() < graph.num_vertices()
                && graph.vertex(p).is_collection_point(threshold)
                && !locations.contains(&p)
            {
                locations.push(p);
            }
        }

        let matrix = DistanceMatrix::from_graph(graph, &locations);
        let mut plan = RoutePlan::new();
        let mut collectable = Vec::with_capacity(locations.len() - 1);

        for (i, &vertex) in locations.iter().enumerate().skip(1) {
            let quantity = graph.vertex(vertex).quantity();
            let reason = if !matrix.is_reachable(0, i) || !matrix.is_reachable(i, 0) {
                Some(UncollectableReason::Unreachable)
            } else if !(quantity <= capacity + config.capacity_tolerance()) {
                Some(UncollectableReason::ExceedsCapacity)
            } else {
                None
            };

            match reason {
                Some(reason) => {
                    config.log(&format!(
                        "point {} is uncollectable: {:?}",
                        graph.vertex(vertex).key(),
                        reason
                    ));
                    plan.add_uncollectable(vertex, reason);
                }
                None => collectable.push(i),
            }
        }

        Some(Self {
            matrix,
            collectable,
            plan,
        })
    }
}

/// Materializes `stops` as the next route of `plan` and logs it under
/// `heuristic`. Violations reported by the evaluator are logged too.
pub(crate) fn close_route(
    evaluator: &RouteEvaluator<'_>,
    plan: &mut RoutePlan,
    stops: &[usize],
    config: &SolverConfig,
    heuristic: &str,
) {
    if stops.is_empty() {
        return;
    }
    let (route, violations) = evaluator.build_route(plan.num_routes() + 1, stops);
    config.log(&format!(
        "{heuristic}: route {} closed with {} stops, load {:.2}, distance {:.2}",
        route.number(),
        route.len(),
        route.total_load(),
        route.total_distance()
    ));
    for violation in &violations {
        config.log(&format!(
            "{heuristic}: route {} violates {:?}",
            route.number(),
            violation.kind
        ));
    }
    plan.add_route(route);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::capturing_config;
    use crate::models::{Direction, Vertex};

    #[test]
    fn test_prepare_filters_and_classifies() {
        let mut g = Graph::new();
        let a = Vertex::new("A", "Depot");
        g.add_edge(&a, &Vertex::collection_point("B", "B", 2.0), 1.0);
        g.add_edge(&a, &Vertex::collection_point("C", "C", 9.0), 1.0);
        g.add_edge(&a, &Vertex::collection_point("D", "D", 0.005), 1.0);
        g.add_edge_with(&a, &Vertex::collection_point("E", "E", 1.0), 1.0, Direction::OneWay);
        g.add_vertex(Vertex::collection_point("F", "F", 1.0));

        let all: Vec<_> = g.vertex_ids().collect();
        let mut points = all.clone();
        points.push(all[1]);

        let set = CollectionSet::prepare(&g, all[0], &points, 5.0, &SolverConfig::default())
            .expect("valid depot");
        // locations: A, B, C, E, F
        assert_eq!(set.matrix.size(), 5);
        assert_eq!(set.collectable, vec![1]);
        let reasons: Vec<_> = set.plan.uncollectable().iter().map(|u| (u.vertex, u.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (all[2], UncollectableReason::ExceedsCapacity),
                (all[4], UncollectableReason::Unreachable),
                (all[5], UncollectableReason::Unreachable),
            ]
        );
    }

    #[test]
    fn test_prepare_invalid_depot() {
        let g = Graph::new();
        assert!(CollectionSet::prepare(&g, VertexId(0), &[], 5.0, &SolverConfig::default()).is_none());
    }

    #[test]
    fn test_nan_capacity_collects_nothing() {
        let mut g = Graph::new();
        g.add_edge(&Vertex::new("A", "Depot"), &Vertex::collection_point("B", "B", 1.0), 1.0);
        let all: Vec<_> = g.vertex_ids().collect();
        let set = CollectionSet::prepare(&g, all[0], &all, f64::NAN, &SolverConfig::default())
            .expect("valid depot");
        assert!(set.collectable.is_empty());
        assert_eq!(set.plan.num_uncollectable(), 1);
    }

    #[test]
    fn test_close_route_logs_violations() {
        let mut g = Graph::new();
        let a = Vertex::new("A", "Depot");
        g.add_edge(&a, &Vertex::collection_point("B", "B", 3.0), 1.0);
        g.add_edge(&a, &Vertex::collection_point("C", "C", 3.0), 1.0);
        let all: Vec<_> = g.vertex_ids().collect();

        let (config, messages) = capturing_config();
        let set = CollectionSet::prepare(&g, all[0], &all, 5.0, &config).expect("valid depot");
        let evaluator = RouteEvaluator::new(&g, &set.matrix, 5.0, config.capacity_tolerance());
        let mut plan = set.plan;

        close_route(&evaluator, &mut plan, &[], &config, "test");
        assert_eq!(plan.num_routes(), 0);

        close_route(&evaluator, &mut plan, &set.collectable, &config, "test");
        assert_eq!(plan.num_routes(), 1);
        let messages = messages.lock().expect("lock");
        assert!(messages.iter().any(|m| m.starts_with("test: route 1 closed with 2 stops")));
        assert!(messages
            .iter()
            .any(|m| m.starts_with("test: route 1 violates CapacityExceeded")));
    }
}
