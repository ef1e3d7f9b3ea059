//! Held-Karp exact tour over a handful of collection points.
//!
//! # Algorithm
//!
//! Builds an (n+1)×(n+1) shortest-path distance matrix, index 0 being the
//! depot. `cost[S][j]` is the cheapest walk that leaves the depot, visits
//! exactly the points of subset `S` and ends at point `j ∈ S`:
//!
//! ```text
//! cost[{j}][j] = d(0, j)
//! cost[S][j]   = min over i ∈ S \ {j} of cost[S \ {j}][i] + d(i, j)
//! tour         = min over j of cost[all][j] + d(j, 0)
//! ```
//!
//! The best predecessor of every state is kept, and the tour is rebuilt by
//! walking them back from the best last point. Unreachable pairs carry
//! `f64::INFINITY` and never produce a state.
//!
//! The matrix may be asymmetric (one-way streets); the recurrence does not
//! assume symmetry.
//!
//! # Complexity
//!
//! O(2ⁿ · n²) time, O(2ⁿ · n) memory. The caller bounds n; see
//! [`Planner::exact_tour`](crate::fleet::Planner::exact_tour).
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1962). "A dynamic programming approach to
//! sequencing problems", *J. SIAM* 10(1), 196-210.

use crate::distance::{shortest_path, DistanceMatrix};
use crate::models::{Graph, VertexId};
use serde::Serialize;

/// Optimal closed tour from the depot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourSolution {
    /// Depot first, then the points in visiting order. The return to the
    /// depot is implied. Empty when no tour exists.
    pub circuit: Vec<VertexId>,
    /// Tour length including the return leg; 0 when `circuit` is empty.
    pub total_distance: f64,
}

impl TourSolution {
    fn infeasible() -> Self {
        Self {
            circuit: Vec::new(),
            total_distance: 0.0,
        }
    }

    /// Returns `true` if a tour was found.
    pub fn is_feasible(&self) -> bool {
        !self.circuit.is_empty()
    }

    /// Expands the tour into the street-level walk, depot to depot.
    ///
    /// Returns an empty walk if the tour is infeasible.
    pub fn street_path(&self, graph: &Graph) -> Vec<VertexId> {
        let Some(&depot) = self.circuit.first() else {
            return Vec::new();
        };
        let mut walk = vec![depot];
        let stops = self.circuit.iter().skip(1).chain(std::iter::once(&depot));
        let mut from = depot;
        for &to in stops {
            if to == from {
                continue;
            }
            let leg = shortest_path(graph, from, to);
            if leg.is_empty() {
                return Vec::new();
            }
            walk.extend_from_slice(&leg[1..]);
            from = to;
        }
        walk
    }
}

/// Finds the shortest closed tour from `depot` through every point.
///
/// Duplicate points and the depot itself are ignored in `points`. With no
/// point left the tour is `[depot]` at distance 0. If some point cannot be
/// fitted into any closed tour the result is empty (see
/// [`TourSolution::is_feasible`]).
///
/// Memory grows as 2ⁿ; keep `points` small.
///
/// # Examples
///
/// ```
/// use waste_routing::models::{Graph, Vertex};
/// use waste_routing::exact::solve_exact_tour;
///
/// let keys = ["A", "B", "C", "D"];
/// let mut graph = Graph::new();
/// for (i, key) in keys.iter().enumerate() {
///     let next = keys[(i + 1) % keys.len()];
///     graph.add_edge(&Vertex::new(*key, *key), &Vertex::new(next, next), 1.0);
/// }
///
/// let depot = graph.depot().unwrap();
/// let points: Vec<_> = ["C", "B", "D"].iter().map(|k| graph.vertex_id(k).unwrap()).collect();
///
/// let tour = solve_exact_tour(&graph, depot, &points);
/// assert_eq!(tour.circuit.len(), 4);
/// assert!((tour.total_distance - 4.0).abs() < 1e-10);
/// ```
pub fn solve_exact_tour(graph: &Graph, depot: VertexId, points: &[VertexId]) -> TourSolution {
    if depot.index() >= graph.num_vertices() {
        return TourSolution::infeasible();
    }

    let mut locations = vec![depot];
    for &p in points {
        if p.index() < graph.num_vertices() && !locations.contains(&p) {
            locations.push(p);
        }
    }
    if locations.len() == 1 {
        return TourSolution {
            circuit: locations,
            total_distance: 0.0,
        };
    }

    let dm = DistanceMatrix::from_graph(graph, &locations);
    match held_karp(&dm) {
        Some((order, total_distance)) => TourSolution {
            circuit: order.into_iter().map(|i| dm.location(i)).collect(),
            total_distance,
        },
        None => TourSolution::infeasible(),
    }
}

/// Runs the subset recurrence on a matrix whose index 0 is the depot.
///
/// Returns the matrix indices in visiting order (starting with 0) and the
/// tour length, or `None` if no finite tour exists.
fn held_karp(dm: &DistanceMatrix) -> Option<(Vec<usize>, f64)> {
    let n = dm.size() - 1;
    let width = n + 1;
    let full = (1usize << n) - 1;
    let bit = |j: usize| 1usize << (j - 1);

    let mut cost = vec![f64::INFINITY; (full + 1) * width];
    // 0 means "came straight from the depot"
    let mut pred = vec![0usize; (full + 1) * width];

    for j in 1..=n {
        cost[bit(j) * width + j] = dm.get(0, j);
    }

    for mask in 1..=full {
        for last in 1..=n {
            if mask & bit(last) == 0 {
                continue;
            }
            let here = cost[mask * width + last];
            if !here.is_finite() {
                continue;
            }
            for next in 1..=n {
                if mask & bit(next) != 0 {
                    continue;
                }
                let candidate = here + dm.get(last, next);
                let slot = (mask | bit(next)) * width + next;
                if candidate < cost[slot] {
                    cost[slot] = candidate;
                    pred[slot] = last;
                }
            }
        }
    }

    let mut best: Option<(usize, f64)> = None;
    for last in 1..=n {
        let total = cost[full * width + last] + dm.get(last, 0);
        if total.is_finite() && best.map_or(true, |(_, b)| total < b) {
            best = Some((last, total));
        }
    }
    let (mut current, total) = best?;

    let mut order = Vec::with_capacity(width);
    let mut mask = full;
    while current != 0 {
        order.push(current);
        let previous = pred[mask * width + current];
        mask &= !bit(current);
        current = previous;
    }
    order.push(0);
    order.reverse();
    Some((order, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, Vertex};
    use proptest::prelude::*;

    fn v(key: &str) -> Vertex {
        Vertex::new(key, key)
    }

    fn ids(g: &Graph, keys: &[&str]) -> Vec<VertexId> {
        keys.iter().map(|k| g.vertex_id(k).expect("vertex exists")).collect()
    }

    fn square() -> Graph {
        let mut g = Graph::new();
        g.add_edge(&v("A"), &v("B"), 1.0);
        g.add_edge(&v("B"), &v("C"), 1.0);
        g.add_edge(&v("C"), &v("D"), 1.0);
        g.add_edge(&v("D"), &v("A"), 1.0);
        g
    }

    #[test]
    fn test_empty_points() {
        let g = square();
        let depot = g.depot().expect("depot");
        let tour = solve_exact_tour(&g, depot, &[]);
        assert_eq!(tour.circuit, vec![depot]);
        assert_eq!(tour.total_distance, 0.0);
        assert!(tour.is_feasible());
        assert_eq!(tour.street_path(&g), vec![depot]);
    }

    #[test]
    fn test_square_tour() {
        let g = square();
        let depot = g.depot().expect("depot");
        let tour = solve_exact_tour(&g, depot, &ids(&g, &["B", "C", "D"]));
        assert_eq!(tour.circuit.len(), 4);
        assert_eq!(tour.circuit[0], depot);
        assert!((tour.total_distance - 4.0).abs() < 1e-10);
        let mut rest = tour.circuit[1..].to_vec();
        rest.sort();
        assert_eq!(rest, ids(&g, &["B", "C", "D"]));
    }

    #[test]
    fn test_single_point_round_trip() {
        let mut g = Graph::new();
        g.add_edge(&v("A"), &v("B"), 2.0);
        g.add_edge(&v("B"), &v("C"), 3.0);
        let depot = g.depot().expect("depot");
        let c = g.vertex_id("C").expect("C");
        let tour = solve_exact_tour(&g, depot, &[c]);
        assert_eq!(tour.circuit, vec![depot, c]);
        assert!((tour.total_distance - 10.0).abs() < 1e-10);
        assert_eq!(g.format_walk(&tour.street_path(&g)), "A -> B -> C -> B -> A");
    }

    #[test]
    fn test_one_way_order() {
        let mut g = Graph::new();
        g.add_edge_with(&v("A"), &v("B"), 1.0, Direction::OneWay);
        g.add_edge_with(&v("B"), &v("C"), 1.0, Direction::OneWay);
        g.add_edge_with(&v("C"), &v("A"), 1.0, Direction::OneWay);
        let depot = g.depot().expect("depot");
        let tour = solve_exact_tour(&g, depot, &ids(&g, &["C", "B"]));
        assert_eq!(g.format_walk(&tour.circuit), "A -> B -> C");
        assert!((tour.total_distance - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_picks_shorter_direction() {
        // A-B-C-D-A with a long side D-A
        let mut g = Graph::new();
        g.add_edge(&v("A"), &v("B"), 1.0);
        g.add_edge(&v("B"), &v("C"), 1.0);
        g.add_edge(&v("C"), &v("D"), 1.0);
        g.add_edge(&v("D"), &v("A"), 10.0);
        g.add_edge(&v("A"), &v("C"), 1.5);
        let depot = g.depot().expect("depot");
        let tour = solve_exact_tour(&g, depot, &ids(&g, &["B", "D"]));
        // A -> B -> D (via C, 2) -> A (via C, 2.5) = 5.5
        assert!((tour.total_distance - 5.5).abs() < 1e-10);
    }

    #[test]
    fn test_unreachable_point_is_infeasible() {
        let mut g = square();
        let z = g.add_vertex(v("Z"));
        let depot = g.depot().expect("depot");
        let tour = solve_exact_tour(&g, depot, &[z]);
        assert!(!tour.is_feasible());
        assert_eq!(tour.total_distance, 0.0);
        assert!(tour.street_path(&g).is_empty());
    }

    #[test]
    fn test_one_way_dead_end_is_infeasible() {
        let mut g = Graph::new();
        g.add_edge(&v("A"), &v("B"), 1.0);
        g.add_edge_with(&v("B"), &v("C"), 1.0, Direction::OneWay);
        let depot = g.depot().expect("depot");
        let tour = solve_exact_tour(&g, depot, &ids(&g, &["B", "C"]));
        assert!(!tour.is_feasible());
    }

    #[test]
    fn test_duplicates_and_depot_ignored() {
        let g = square();
        let depot = g.depot().expect("depot");
        let b = g.vertex_id("B").expect("B");
        let tour = solve_exact_tour(&g, depot, &[b, depot, b]);
        assert_eq!(tour.circuit, vec![depot, b]);
        assert!((tour.total_distance - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_depot() {
        let g = square();
        let tour = solve_exact_tour(&g, VertexId(42), &[]);
        assert!(!tour.is_feasible());
    }

    /// Exhaustive search over every visiting order.
    fn brute_force(dm: &DistanceMatrix) -> f64 {
        fn search(dm: &DistanceMatrix, last: usize, left: &mut Vec<usize>, acc: f64) -> f64 {
            if left.is_empty() {
                return acc + dm.get(last, 0);
            }
            let mut best = f64::INFINITY;
            for k in 0..left.len() {
                let next = left.remove(k);
                best = best.min(search(dm, next, left, acc + dm.get(last, next)));
                left.insert(k, next);
            }
            best
        }
        let mut left: Vec<usize> = (1..dm.size()).collect();
        search(dm, 0, &mut left, 0.0)
    }

    fn arb_network() -> impl Strategy<Value = Graph> {
        prop::collection::vec((0usize..6, 0usize..6, 1u8..20, any::<bool>()), 5..14).prop_map(
            |streets| {
                let mut g = Graph::new();
                for i in 0..6 {
                    g.add_vertex(v(&format!("V{i}")));
                }
                for (t, h, len, one_way) in streets {
                    let direction = if one_way { Direction::OneWay } else { Direction::TwoWay };
                    g.add_edge_between(VertexId(t), VertexId(h), f64::from(len), direction);
                }
                g
            },
        )
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(g in arb_network()) {
            let locations: Vec<VertexId> = g.vertex_ids().collect();
            let dm = DistanceMatrix::from_graph(&g, &locations);
            let expected = brute_force(&dm);
            let tour = solve_exact_tour(&g, VertexId(0), &locations[1..]);
            if expected.is_finite() {
                prop_assert!(tour.is_feasible());
                prop_assert!((tour.total_distance - expected).abs() < 1e-9);
                prop_assert_eq!(tour.circuit.len(), locations.len());
                // Recorded length matches the visiting order.
                let mut walked = 0.0;
                for w in tour.circuit.windows(2) {
                    walked += dm.get(w[0].index(), w[1].index());
                }
                walked += dm.get(tour.circuit[tour.circuit.len() - 1].index(), 0);
                prop_assert!((walked - tour.total_distance).abs() < 1e-9);
            } else {
                prop_assert!(!tour.is_feasible());
            }
        }
    }
}
