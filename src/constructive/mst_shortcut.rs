//! Spanning-tree preorder with shortcutting, split by capacity.
//!
//! # Algorithm
//!
//! 1. Complete graph over depot + collection points, weighted by shortest
//!    distance (the shorter direction on one-way networks).
//! 2. Kruskal minimum spanning tree.
//! 3. Depth-first walk of the tree from the depot, recording backtrack
//!    revisits; children are explored in tree-acceptance order.
//! 4. Shortcut: keep the first occurrence of each point, drop the depot.
//! 5. Cut the sequence into routes: a point that would overflow the truck,
//!    or that the current position cannot reach, closes the route and
//!    opens a new one from the depot.
//!
//! # Complexity
//!
//! O(n² log n) for the spanning tree, O(n) for walk and split.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An analysis of
//! several heuristics for the traveling salesman problem", *SIAM J. Comput.*
//! 6(3), 563-581 (tree doubling, 2-approximation for metric tours).

use super::collection::{close_route, CollectionSet};
use super::spanning_tree::kruskal;
use crate::config::SolverConfig;
use crate::distance::DistanceMatrix;
use crate::evaluation::RouteEvaluator;
use crate::models::{Graph, RoutePlan, VertexId};

/// Splits collection points into capacity-bounded routes following the
/// shortcut preorder of a minimum spanning tree.
///
/// Filtering and uncollectable reporting are the same as
/// [`nearest_neighbor_routes`](super::nearest_neighbor_routes).
///
/// # Examples
///
/// ```
/// use waste_routing::config::SolverConfig;
/// use waste_routing::models::{Graph, Vertex};
/// use waste_routing::constructive::mst_routes;
///
/// let keys = ["A", "B", "C", "D"];
/// let mut graph = Graph::new();
/// for pair in keys.windows(2) {
///     let tail = Vertex::collection_point(pair[0], pair[0], if pair[0] == "A" { 0.0 } else { 2.0 });
///     graph.add_edge(&tail, &Vertex::collection_point(pair[1], pair[1], 2.0), 1.0);
/// }
/// let depot = graph.depot().unwrap();
/// let points: Vec<_> = graph.vertex_ids().collect();
///
/// let plan = mst_routes(&graph, depot, &points, 4.0, &SolverConfig::default());
/// assert_eq!(plan.num_routes(), 2);
/// assert_eq!(graph.format_walk(&plan.routes()[0].vertices()), "B -> C");
/// assert_eq!(graph.format_walk(&plan.routes()[1].vertices()), "D");
/// ```
pub fn mst_routes(
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
    if collectable.is_empty() {
        return plan;
    }

    let order = shortcut_preorder(&matrix, &collectable);
    config.log(&format!("mst: visiting order over {} points", order.len()));

    let tolerance = config.capacity_tolerance();
    let evaluator = RouteEvaluator::new(graph, &matrix, capacity, tolerance);
    let quantity = |i: usize| graph.vertex(matrix.location(i)).quantity();

    let mut stops: Vec<usize> = Vec::new();
    let mut current = 0;
    let mut load = 0.0;
    for next in order {
        let q = quantity(next);
        let overflow = load + q > capacity + tolerance;
        let unreachable = !matrix.is_reachable(current, next);
        if !stops.is_empty() && (overflow || unreachable) {
            close_route(&evaluator, &mut plan, &stops, config, "mst");
            stops.clear();
            load = 0.0;
        }
        stops.push(next);
        load += q;
        current = next;
    }
    close_route(&evaluator, &mut plan, &stops, config, "mst");

    plan
}

/// Depot-rooted tree walk reduced to first visits, depot excluded.
fn shortcut_preorder(matrix: &DistanceMatrix, collectable: &[usize]) -> Vec<usize> {
    let mut nodes = Vec::with_capacity(collectable.len() + 1);
    nodes.push(0);
    nodes.extend_from_slice(collectable);

    let mut children = vec![Vec::new(); matrix.size()];
    for (a, b) in kruskal(matrix, &nodes) {
        children[a].push(b);
        children[b].push(a);
    }

    // full walk with backtrack revisits
    let mut walk = vec![0];
    let mut seen = vec![false; matrix.size()];
    seen[0] = true;
    let mut stack = vec![(0usize, 0usize)];
    while let Some(top) = stack.last_mut() {
        let (node, cursor) = *top;
        match children[node][cursor..].iter().position(|&c| !seen[c]) {
            Some(offset) => {
                let child = children[node][cursor + offset];
                top.1 = cursor + offset + 1;
                seen[child] = true;
                walk.push(child);
                stack.push((child, 0));
            }
            None => {
                stack.pop();
                if let Some(&(parent, _)) = stack.last() {
                    walk.push(parent);
                }
            }
        }
    }

    let mut first = vec![false; matrix.size()];
    first[0] = true;
    walk.into_iter()
        .filter(|&n| !std::mem::replace(&mut first[n], true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::capturing_config;
    use crate::models::{Direction, UncollectableReason, Vertex};
    use proptest::prelude::*;

    fn run(g: &Graph, points: &[VertexId], capacity: f64) -> RoutePlan {
        let depot = g.depot().expect("depot");
        mst_routes(g, depot, points, capacity, &SolverConfig::default())
    }

    /// Depot with three 3 t points on spokes of length 1, 2, 3.
    fn star() -> (Graph, Vec<VertexId>) {
        let depot = Vertex::new("A", "Depot");
        let mut g = Graph::new();
        for (key, len) in [("B", 1.0), ("C", 2.0), ("D", 3.0)] {
            g.add_edge(&depot, &Vertex::collection_point(key, key, 3.0), len);
        }
        let ids = g.vertex_ids().collect();
        (g, ids)
    }

    /// Depot A with branches A-B-C and A-D, unit lengths, 1 t per point.
    fn branches() -> (Graph, Vec<VertexId>) {
        let mut g = Graph::new();
        let a = Vertex::new("A", "Depot");
        let b = Vertex::collection_point("B", "B", 1.0);
        let c = Vertex::collection_point("C", "C", 1.0);
        let d = Vertex::collection_point("D", "D", 1.0);
        g.add_edge(&a, &b, 1.0);
        g.add_edge(&b, &c, 1.0);
        g.add_edge(&a, &d, 1.5);
        let ids = g.vertex_ids().collect();
        (g, ids)
    }

    #[test]
    fn test_preorder_walk() {
        let (g, ids) = branches();
        let dm = DistanceMatrix::from_graph(&g, &ids);
        // tree edges in acceptance order: A-B (1), B-C (1), A-D (1.5)
        assert_eq!(shortcut_preorder(&dm, &[1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_single_route() {
        let (g, ids) = branches();
        let plan = run(&g, &ids, 10.0);
        assert_eq!(plan.num_routes(), 1);
        assert_eq!(g.format_walk(&plan.routes()[0].vertices()), "B -> C -> D");
        // 1 + 1 + (C -> D = 3.5) + 1.5
        assert!((plan.total_distance() - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_split_by_capacity() {
        let (g, ids) = branches();
        let plan = run(&g, &ids, 1.0);
        assert_eq!(plan.num_routes(), 3);
        for (route, expected) in plan.routes().iter().zip(["B", "C", "D"]) {
            assert_eq!(g.format_walk(&route.vertices()), expected);
            assert_eq!(route.visits()[0].leg_distance, route.return_distance().expect("closed"));
        }
    }

    #[test]
    fn test_capacity_five_and_six() {
        let (g, ids) = star();
        assert_eq!(run(&g, &ids, 5.0).num_routes(), 3);
        let plan = run(&g, &ids, 6.0);
        assert_eq!(plan.num_routes(), 2);
        assert!(plan.routes().iter().all(|r| r.total_load() <= 6.0 + 1e-9));
    }

    #[test]
    fn test_island_is_uncollectable() {
        let mut g = Graph::new();
        let a = Vertex::new("A", "Depot");
        let b = Vertex::collection_point("B", "B", 1.0);
        let c = Vertex::collection_point("C", "C", 1.0);
        let x = Vertex::collection_point("X", "Island", 1.0);
        g.add_edge(&a, &b, 1.0);
        g.add_edge(&a, &c, 2.0);
        g.add_vertex(x);
        let ids: Vec<_> = g.vertex_ids().collect();
        let plan = run(&g, &ids, 10.0);
        assert_eq!(plan.num_routes(), 1);
        assert_eq!(plan.num_uncollectable(), 1);
        assert_eq!(plan.uncollectable()[0].reason, UncollectableReason::Unreachable);
    }

    #[test]
    fn test_one_way_detour_stays_on_route() {
        // B -> C is one-way only, C reaches B only through the depot.
        let mut g = Graph::new();
        let a = Vertex::new("A", "Depot");
        let b = Vertex::collection_point("B", "B", 1.0);
        let c = Vertex::collection_point("C", "C", 1.0);
        let e = Vertex::collection_point("E", "E", 1.0);
        g.add_edge(&a, &b, 5.0);
        g.add_edge(&a, &c, 5.0);
        g.add_edge_with(&c, &b, 1.0, Direction::OneWay);
        g.add_edge(&c, &e, 1.0);
        let ids: Vec<_> = g.vertex_ids().collect();
        let dm = DistanceMatrix::from_graph(&g, &ids);
        // B-C weight 1 (C -> B), C-E 1, then A-B/A-C at 5
        assert_eq!(shortcut_preorder(&dm, &[1, 2, 3]), vec![1, 2, 3]);
        let plan = run(&g, &ids, 10.0);
        // B -> C costs 5 + 5 via the depot, still reachable: one route.
        assert_eq!(plan.num_routes(), 1);
        assert!((plan.total_distance() - (5.0 + 10.0 + 1.0 + 6.0)).abs() < 1e-10);
    }

    #[test]
    fn test_empty_and_logging() {
        let (g, ids) = star();
        assert!(run(&g, &ids[..1], 5.0).is_empty());

        let (config, messages) = capturing_config();
        let plan = mst_routes(&g, ids[0], &ids, 6.0, &config);
        assert_eq!(plan.num_routes(), 2);
        let messages = messages.lock().expect("lock");
        assert!(messages.iter().any(|m| m == "mst: visiting order over 3 points"));
        assert!(messages.iter().any(|m| m.starts_with("mst: route 2 closed")));
    }

    fn arb_town() -> impl Strategy<Value = (Graph, f64)> {
        (
            prop::collection::vec(0u8..5, 7),
            prop::collection::vec((0usize..8, 0usize..8, 1u8..10, any::<bool>()), 6..16),
            3u8..8,
        )
            .prop_map(|(quantities, streets, capacity)| {
                let mut g = Graph::new();
                g.add_vertex(Vertex::new("A", "Depot"));
                for (i, q) in quantities.into_iter().enumerate() {
                    g.add_vertex(Vertex::collection_point(format!("P{i}"), "point", f64::from(q)));
                }
                for (t, h, len, one_way) in streets {
                    let direction = if one_way { Direction::OneWay } else { Direction::TwoWay };
                    g.add_edge_between(VertexId(t), VertexId(h), f64::from(len), direction);
                }
                (g, f64::from(capacity))
            })
    }

    proptest! {
        #[test]
        fn prop_mst_respects_capacity_and_covers_points((g, capacity) in arb_town()) {
            let ids: Vec<VertexId> = g.vertex_ids().collect();
            let plan = run(&g, &ids, capacity);

            for route in plan.routes() {
                prop_assert!(!route.is_empty());
                prop_assert!(route.total_load() <= capacity + 1e-9);
                prop_assert!(route.total_distance().is_finite());
            }

            let mut covered: Vec<VertexId> = plan.served();
            covered.extend(plan.uncollectable().iter().map(|u| u.vertex));
            covered.sort();
            let mut expected: Vec<VertexId> = ids[1..]
                .iter()
                .copied()
                .filter(|&v| g.vertex(v).quantity() > 0.01)
                .collect();
            expected.sort();
            prop_assert_eq!(covered, expected);

            let dm = DistanceMatrix::from_graph(&g, &ids);
            let evaluator = RouteEvaluator::new(&g, &dm, capacity, 1e-9);
            let (_, violations) = evaluator.evaluate(&plan);
            prop_assert!(violations.is_empty());
        }
    }
}
