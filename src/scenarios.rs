//! Demonstration road networks.
//!
//! A fixed catalog of small networks that exercise each solver's edge cases
//! (two-way, one-way and mixed streets; even and odd degrees; dead ends;
//! disconnected parts), plus a seeded random generator for larger trials.

use crate::models::{Direction, Graph, Vertex};
use rand::Rng;
use std::fmt;

const TWO: Direction = Direction::TwoWay;
const ONE: Direction = Direction::OneWay;

/// `(key, name, quantity)`
type VertexRow = (&'static str, &'static str, f64);
/// `(tail, head, length, direction)`
type StreetRow = (&'static str, &'static str, f64, Direction);

/// A named demonstration network.
///
/// # Examples
///
/// ```
/// use waste_routing::scenarios::Scenario;
///
/// let graph = Scenario::EulerianLoop.build();
/// assert!(graph.is_eulerian());
/// assert_eq!(Scenario::from_name("eulerian-loop"), Some(Scenario::EulerianLoop));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Scenario {
    /// One two-way street.
    TwoWaySimple,
    /// Two-way triangle, every degree even.
    TwoWayEvenDegrees,
    /// Two-way dead end, two odd vertices.
    TwoWayTwoOdd,
    /// Two-way town with no parity constraint.
    TwoWayGeneral,
    /// One one-way street.
    OneWaySimple,
    /// One-way triangle.
    OneWayEvenDegrees,
    /// One-way dead end.
    OneWayTwoOdd,
    /// One-way town with no parity constraint.
    OneWayGeneral,
    /// A two-way street followed by a one-way street.
    MixedSimple,
    /// Triangle with one one-way side.
    MixedEvenDegrees,
    /// Dead end whose last street is one-way.
    MixedTwoOdd,
    /// Mixed town with no parity constraint.
    MixedGeneral,
    /// Five-vertex town with a few one-way streets.
    SmallTown,
    /// Twelve-vertex town with a one-way ring.
    LargeTown,
    /// Two-way square; every degree even.
    EulerianLoop,
    /// Two-way line of five vertices.
    DeadEnd,
    /// One-way square.
    OneWayLoop,
    /// Two connected vertices plus an isolated one.
    Disconnected,
}

impl Scenario {
    /// Every scenario, in menu order.
    pub const ALL: [Scenario; 18] = [
        Scenario::TwoWaySimple,
        Scenario::TwoWayEvenDegrees,
        Scenario::TwoWayTwoOdd,
        Scenario::TwoWayGeneral,
        Scenario::OneWaySimple,
        Scenario::OneWayEvenDegrees,
        Scenario::OneWayTwoOdd,
        Scenario::OneWayGeneral,
        Scenario::MixedSimple,
        Scenario::MixedEvenDegrees,
        Scenario::MixedTwoOdd,
        Scenario::MixedGeneral,
        Scenario::SmallTown,
        Scenario::LargeTown,
        Scenario::EulerianLoop,
        Scenario::DeadEnd,
        Scenario::OneWayLoop,
        Scenario::Disconnected,
    ];

    /// Kebab-case identifier, as accepted by [`from_name`](Self::from_name).
    pub fn name(self) -> &'static str {
        match self {
            Scenario::TwoWaySimple => "two-way-simple",
            Scenario::TwoWayEvenDegrees => "two-way-even-degrees",
            Scenario::TwoWayTwoOdd => "two-way-two-odd",
            Scenario::TwoWayGeneral => "two-way-general",
            Scenario::OneWaySimple => "one-way-simple",
            Scenario::OneWayEvenDegrees => "one-way-even-degrees",
            Scenario::OneWayTwoOdd => "one-way-two-odd",
            Scenario::OneWayGeneral => "one-way-general",
            Scenario::MixedSimple => "mixed-simple",
            Scenario::MixedEvenDegrees => "mixed-even-degrees",
            Scenario::MixedTwoOdd => "mixed-two-odd",
            Scenario::MixedGeneral => "mixed-general",
            Scenario::SmallTown => "small-town",
            Scenario::LargeTown => "large-town",
            Scenario::EulerianLoop => "eulerian-loop",
            Scenario::DeadEnd => "dead-end",
            Scenario::OneWayLoop => "one-way-loop",
            Scenario::Disconnected => "disconnected",
        }
    }

    /// Looks a scenario up by its [`name`](Self::name), ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Human-readable description, also used as the graph label.
    pub fn label(self) -> &'static str {
        match self {
            Scenario::TwoWaySimple => "Two-way: single street",
            Scenario::TwoWayEvenDegrees => "Two-way: all degrees even",
            Scenario::TwoWayTwoOdd => "Two-way: two odd-degree vertices",
            Scenario::TwoWayGeneral => "Two-way: no parity constraint",
            Scenario::OneWaySimple => "One-way: single street",
            Scenario::OneWayEvenDegrees => "One-way: triangle",
            Scenario::OneWayTwoOdd => "One-way: two-street dead end",
            Scenario::OneWayGeneral => "One-way: no parity constraint",
            Scenario::MixedSimple => "Mixed: single street each way",
            Scenario::MixedEvenDegrees => "Mixed: triangle with one one-way side",
            Scenario::MixedTwoOdd => "Mixed: dead end ending one-way",
            Scenario::MixedGeneral => "Mixed: no parity constraint",
            Scenario::SmallTown => "Small town (mixed)",
            Scenario::LargeTown => "Large town (12 vertices, mixed)",
            Scenario::EulerianLoop => "Perfect Eulerian loop (all degrees even)",
            Scenario::DeadEnd => "Dead-end line (two odd-degree vertices)",
            Scenario::OneWayLoop => "Strong one-way loop",
            Scenario::Disconnected => "Disconnected network",
        }
    }

    /// Builds a fresh copy of the network.
    pub fn build(self) -> Graph {
        let (vertices, streets) = self.rows();
        network(self.label(), vertices, streets)
    }

    fn rows(self) -> (&'static [VertexRow], &'static [StreetRow]) {
        match self {
            Scenario::TwoWaySimple => (
                &[("A", "Depot", 0.0), ("B", "Point B", 2.0)],
                &[("A", "B", 2.0, TWO)],
            ),
            Scenario::TwoWayEvenDegrees => (
                &[("A", "Depot", 0.0), ("B", "Point B", 3.0), ("C", "Point C", 2.3)],
                &[("A", "B", 1.0, TWO), ("B", "C", 1.0, TWO), ("C", "A", 1.0, TWO)],
            ),
            Scenario::TwoWayTwoOdd => (
                &[("A", "Depot", 0.0), ("B", "Point B", 4.0), ("C", "Point C", 6.0)],
                &[("A", "B", 1.0, TWO), ("B", "C", 1.0, TWO)],
            ),
            Scenario::TwoWayGeneral => (
                TOWN_WITH_STATION,
                &[
                    ("A", "B", 1.0, TWO),
                    ("B", "C", 1.0, TWO),
                    ("C", "D", 1.0, TWO),
                    ("D", "E", 2.0, TWO),
                    ("E", "A", 3.0, TWO),
                    ("B", "E", 2.0, TWO),
                    ("A", "F", 1.0, TWO),
                ],
            ),
            Scenario::OneWaySimple => (
                &[("A", "Depot", 0.0), ("B", "Point B", 4.0)],
                &[("A", "B", 2.0, ONE)],
            ),
            Scenario::OneWayEvenDegrees => (
                &[("A", "Depot", 0.0), ("B", "Point B", 3.2), ("C", "Point C", 2.1)],
                &[("A", "B", 1.0, ONE), ("B", "C", 1.0, ONE), ("C", "A", 1.0, ONE)],
            ),
            Scenario::OneWayTwoOdd => (
                &[("A", "Depot", 0.0), ("B", "Point B", 1.5), ("C", "Point C", 3.7)],
                &[("A", "B", 1.0, ONE), ("B", "C", 1.0, ONE)],
            ),
            Scenario::OneWayGeneral => (
                TOWN_WITH_STATION,
                &[
                    ("A", "B", 1.5, ONE),
                    ("B", "C", 1.0, ONE),
                    ("C", "D", 1.2, ONE),
                    ("D", "E", 2.3, ONE),
                    ("E", "A", 3.1, ONE),
                    ("B", "E", 2.0, ONE),
                    ("B", "F", 1.8, ONE),
                    ("F", "A", 1.8, ONE),
                ],
            ),
            Scenario::MixedSimple => (
                &[("A", "Depot", 0.0), ("B", "Point B", 2.0), ("C", "Point C", 1.2)],
                &[("A", "B", 2.0, TWO), ("B", "C", 2.0, ONE)],
            ),
            Scenario::MixedEvenDegrees => (
                &[("A", "Depot", 0.0), ("B", "Point B", 3.0), ("C", "Point C", 2.3)],
                &[("A", "B", 1.0, TWO), ("B", "C", 1.0, ONE), ("C", "A", 1.0, TWO)],
            ),
            Scenario::MixedTwoOdd => (
                &[("A", "Depot", 0.0), ("B", "Point B", 4.0), ("C", "Point C", 6.0)],
                &[("A", "B", 1.0, TWO), ("B", "C", 1.0, ONE)],
            ),
            Scenario::MixedGeneral => (
                TOWN,
                &[
                    ("A", "B", 1.0, TWO),
                    ("B", "C", 1.0, TWO),
                    ("C", "D", 1.0, TWO),
                    ("D", "E", 2.0, ONE),
                    ("E", "A", 3.0, ONE),
                    ("B", "E", 2.0, TWO),
                    ("C", "A", 1.0, ONE),
                ],
            ),
            Scenario::SmallTown => (
                TOWN,
                &[
                    ("A", "B", 1.5, TWO),
                    ("B", "C", 1.0, TWO),
                    ("C", "D", 1.2, TWO),
                    ("D", "E", 2.3, ONE),
                    ("E", "A", 3.1, ONE),
                    ("B", "E", 2.0, TWO),
                    ("C", "A", 1.8, ONE),
                ],
            ),
            Scenario::LargeTown => (
                &[
                    ("A", "Central depot", 0.0),
                    ("B", "Town hall", 4.8),
                    ("C", "Primary school", 3.2),
                    ("D", "Hospital", 5.1),
                    ("E", "Shopping centre", 7.9),
                    ("F", "Gymnasium", 2.6),
                    ("G", "Library", 1.8),
                    ("H", "Market", 4.3),
                    ("I", "Park", 2.7),
                    ("J", "Station", 3.9),
                    ("K", "Residences", 4.1),
                    ("L", "Industrial zone", 5.4),
                ],
                &[
                    ("A", "B", 1.5, TWO),
                    ("B", "C", 1.0, TWO),
                    ("C", "D", 1.2, ONE),
                    ("D", "E", 2.3, ONE),
                    ("E", "A", 3.1, ONE),
                    ("B", "E", 2.0, TWO),
                    ("A", "F", 1.8, ONE),
                    ("F", "B", 1.1, TWO),
                    ("F", "G", 1.4, TWO),
                    ("G", "H", 1.6, TWO),
                    ("H", "I", 2.0, TWO),
                    ("I", "J", 1.5, TWO),
                    ("J", "K", 1.8, TWO),
                    ("K", "L", 2.2, TWO),
                    ("L", "A", 2.5, TWO),
                    ("C", "F", 1.9, ONE),
                    ("D", "J", 2.4, ONE),
                    ("E", "K", 2.1, ONE),
                ],
            ),
            Scenario::EulerianLoop => (
                &[
                    ("A", "Depot", 0.0),
                    ("B", "Point B", 3.6),
                    ("C", "Point C", 1.6),
                    ("D", "Point D", 4.7),
                ],
                &[("A", "B", 1.0, TWO), ("B", "C", 1.0, TWO), ("C", "D", 1.0, TWO), ("D", "A", 1.0, TWO)],
            ),
            Scenario::DeadEnd => (
                &[
                    ("A", "Start", 0.0),
                    ("B", "Point 1", 3.0),
                    ("C", "Point 2", 4.5),
                    ("D", "Point 3", 2.8),
                    ("E", "End", 5.2),
                ],
                &[("A", "B", 2.0, TWO), ("B", "C", 1.5, TWO), ("C", "D", 3.0, TWO), ("D", "E", 2.5, TWO)],
            ),
            Scenario::OneWayLoop => (
                &[
                    ("A", "Depot", 0.0),
                    ("B", "Town hall", 4.8),
                    ("C", "School", 3.5),
                    ("D", "Hospital", 1.7),
                ],
                &[("A", "B", 1.0, ONE), ("B", "C", 1.0, ONE), ("C", "D", 1.0, ONE), ("D", "A", 1.0, ONE)],
            ),
            Scenario::Disconnected => (
                &[
                    ("A", "Depot", 0.0),
                    ("B", "Islet 1", 5.0),
                    ("C", "Islet 2", 4.0),
                    ("D", "Isolated islet", 2.4),
                ],
                &[("A", "B", 1.0, TWO), ("B", "C", 1.5, TWO)],
            ),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<22} {}", self.name(), self.label())
    }
}

const TOWN: &[VertexRow] = &[
    ("A", "Central depot", 0.0),
    ("B", "Town hall", 4.8),
    ("C", "School", 3.2),
    ("D", "Hospital", 5.1),
    ("E", "Shopping centre", 7.9),
];

const TOWN_WITH_STATION: &[VertexRow] = &[
    ("A", "Central depot", 0.0),
    ("B", "Town hall", 4.8),
    ("C", "School", 3.2),
    ("D", "Hospital", 5.1),
    ("E", "Shopping centre", 7.9),
    ("F", "Station", 2.6),
];

fn network(label: &str, vertices: &[VertexRow], streets: &[StreetRow]) -> Graph {
    let mut graph = Graph::new().with_label(label);
    for &(key, name, quantity) in vertices {
        graph.add_vertex(Vertex::collection_point(key, name, quantity));
    }
    for &(tail, head, length, direction) in streets {
        if let (Some(t), Some(h)) = (graph.vertex_id(tail), graph.vertex_id(head)) {
            graph.add_edge_between(t, h, length, direction);
        }
    }
    graph
}

/// Spreadsheet-style key for the `i`-th vertex: `A`..`Z`, `AA`, `AB`, …
pub fn vertex_key(mut i: usize) -> String {
    let mut key = Vec::new();
    loop {
        key.push(b'A' + (i % 26) as u8);
        if i < 26 {
            break;
        }
        i = i / 26 - 1;
    }
    key.reverse();
    String::from_utf8_lossy(&key).into_owned()
}

fn tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Generates a connected random town.
///
/// A random two-way spanning tree keeps every vertex reachable both ways
/// from the depot; `extra_streets` further streets are then added between
/// random distinct vertices, each one-way with probability `one_way_share`.
/// Lengths fall in `[0.5, 3.0]`, quantities in `[0.5, 8.0]` (depot 0), both
/// rounded to one decimal.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use waste_routing::scenarios::random_network;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let graph = random_network(&mut rng, 10, 5, 0.2);
/// assert_eq!(graph.num_vertices(), 10);
/// assert_eq!(graph.num_edges(), 14);
/// assert!(graph.is_connected());
/// ```
pub fn random_network<R: Rng>(rng: &mut R, vertices: usize, extra_streets: usize, one_way_share: f64) -> Graph {
    let mut graph = Graph::new().with_label(format!("Random network ({vertices} vertices)"));
    if vertices == 0 {
        return graph;
    }

    let mut ids = Vec::with_capacity(vertices);
    ids.push(graph.add_vertex(Vertex::new(vertex_key(0), "Depot")));
    for i in 1..vertices {
        let key = vertex_key(i);
        let quantity = tenth(rng.random_range(0.5..=8.0));
        ids.push(graph.add_vertex(Vertex::collection_point(key.clone(), format!("Point {key}"), quantity)));
    }

    for i in 1..vertices {
        let parent = rng.random_range(0..i);
        let length = tenth(rng.random_range(0.5..=3.0));
        graph.add_edge_between(ids[parent], ids[i], length, Direction::TwoWay);
    }

    if vertices < 2 {
        return graph;
    }
    let share = if one_way_share.is_nan() { 0.0 } else { one_way_share.clamp(0.0, 1.0) };
    for _ in 0..extra_streets {
        let tail = rng.random_range(0..vertices);
        let mut head = rng.random_range(0..vertices - 1);
        if head >= tail {
            head += 1;
        }
        let length = tenth(rng.random_range(0.5..=3.0));
        let direction = if rng.random_bool(share) { Direction::OneWay } else { Direction::TwoWay };
        graph.add_edge_between(ids[tail], ids[head], length, direction);
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::solve_postman;
    use crate::config::SolverConfig;
    use crate::error::RoutingError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_scenario_builds() {
        for scenario in Scenario::ALL {
            let g = scenario.build();
            assert!(!g.is_empty(), "{scenario:?}");
            assert!(g.num_edges() > 0, "{scenario:?}");
            assert_eq!(g.label(), scenario.label());
            assert_eq!(g.vertex(g.depot().expect("depot")).key(), "A");
            assert_eq!(Scenario::from_name(scenario.name()), Some(scenario));
        }
        assert_eq!(Scenario::from_name(" Small-Town "), Some(Scenario::SmallTown));
        assert_eq!(Scenario::from_name("nowhere"), None);
    }

    #[test]
    fn test_catalog_shapes() {
        assert!(Scenario::EulerianLoop.build().is_eulerian());
        assert!(Scenario::TwoWayEvenDegrees.build().is_eulerian());
        assert_eq!(Scenario::TwoWayTwoOdd.build().odd_degree_vertices().len(), 2);
        assert_eq!(Scenario::DeadEnd.build().odd_degree_vertices().len(), 2);
        assert!(Scenario::OneWayLoop.build().has_one_way_streets());
        assert!(!Scenario::TwoWayGeneral.build().has_one_way_streets());

        let small = Scenario::SmallTown.build();
        assert_eq!((small.num_vertices(), small.num_edges()), (5, 7));

        let large = Scenario::LargeTown.build();
        assert_eq!((large.num_vertices(), large.num_edges()), (12, 18));
        assert!(large.is_connected());

        let split = Scenario::Disconnected.build();
        assert_eq!(split.num_vertices(), 4);
        assert!(!split.is_connected());
        assert!(!split.is_eulerian());
    }

    #[test]
    fn test_postman_on_catalog() {
        let config = SolverConfig::default();

        let sol = solve_postman(&Scenario::DeadEnd.build(), &config).expect("solvable");
        assert!(sol.is_feasible());
        assert!((sol.total_distance - 18.0).abs() < 1e-10);

        let sol = solve_postman(&Scenario::EulerianLoop.build(), &config).expect("solvable");
        assert!((sol.total_distance - 4.0).abs() < 1e-10);

        // one-way triangle: every vertex has one outgoing street
        let err = solve_postman(&Scenario::OneWayEvenDegrees.build(), &config).expect_err("odd");
        assert_eq!(err, RoutingError::OddVertexCount { count: 3 });
    }

    #[test]
    fn test_vertex_key() {
        assert_eq!(vertex_key(0), "A");
        assert_eq!(vertex_key(25), "Z");
        assert_eq!(vertex_key(26), "AA");
        assert_eq!(vertex_key(27), "AB");
        assert_eq!(vertex_key(26 * 27), "AAA");
    }

    #[test]
    fn test_random_network_is_seeded() {
        let a = random_network(&mut StdRng::seed_from_u64(42), 20, 10, 0.3);
        let b = random_network(&mut StdRng::seed_from_u64(42), 20, 10, 0.3);
        assert_eq!(a.num_edges(), 29);
        assert!(a.is_connected());
        assert_eq!(a.total_length(), b.total_length());
        let qa: Vec<f64> = a.vertices().iter().map(|v| v.quantity()).collect();
        let qb: Vec<f64> = b.vertices().iter().map(|v| v.quantity()).collect();
        assert_eq!(qa, qb);
        assert_eq!(qa[0], 0.0);
        assert!(qa[1..].iter().all(|&q| (0.5..=8.0).contains(&q)));
    }

    #[test]
    fn test_random_network_edge_cases() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_network(&mut rng, 0, 3, 0.5).is_empty());
        let single = random_network(&mut rng, 1, 3, 0.5);
        assert_eq!((single.num_vertices(), single.num_edges()), (1, 0));
        let two_way = random_network(&mut rng, 8, 6, 0.0);
        assert!(!two_way.has_one_way_streets());
    }
}
