//! Route plan and violation types.

use super::{Route, VertexId};
use serde::Serialize;

/// A type of defect found when auditing a route plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViolationType {
    /// Truck capacity exceeded.
    CapacityExceeded {
        /// Route index in the plan.
        route_index: usize,
        /// Load that exceeded capacity.
        load: f64,
        /// Truck capacity.
        capacity: f64,
    },
    /// A leg of the route has no path in the road network.
    UnreachableLeg {
        /// Route index in the plan.
        route_index: usize,
        /// Leg start.
        from: VertexId,
        /// Leg end.
        to: VertexId,
    },
    /// Recorded route distance disagrees with the recomputed one.
    DistanceMismatch {
        /// Route index in the plan.
        route_index: usize,
        /// Distance stored in the route.
        recorded: f64,
        /// Distance recomputed from shortest paths.
        recomputed: f64,
    },
    /// A collection point is served by more than one stop.
    DuplicateVisit {
        /// Vertex visited twice.
        vertex: VertexId,
    },
}

/// A defect in a route plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Why a collection point was left out of every route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UncollectableReason {
    /// No round trip between the depot and the point exists.
    Unreachable,
    /// The point's quantity alone exceeds the truck capacity.
    ExceedsCapacity,
}

/// A collection point no route could serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Uncollectable {
    /// The point left out.
    pub vertex: VertexId,
    /// Why it was left out.
    pub reason: UncollectableReason,
}

/// The output of a capacitated route constructor.
///
/// Contains the routes and the collection points no route could serve.
///
/// # Examples
///
/// ```
/// use waste_routing::models::{Graph, Route, RoutePlan, Vertex};
///
/// let mut graph = Graph::new();
/// let depot = graph.add_vertex(Vertex::new("A", "Depot"));
///
/// let mut plan = RoutePlan::new();
/// plan.add_route(Route::new(1, depot));
/// assert_eq!(plan.num_routes(), 1);
/// assert_eq!(plan.num_uncollectable(), 0);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoutePlan {
    routes: Vec<Route>,
    uncollectable: Vec<Uncollectable>,
}

impl RoutePlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route to this plan.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a point as uncollectable.
    pub fn add_uncollectable(&mut self, vertex: VertexId, reason: UncollectableReason) {
        self.uncollectable.push(Uncollectable { vertex, reason });
    }

    /// Returns the routes in this plan.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes (trucks dispatched).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns the points no route serves.
    pub fn uncollectable(&self) -> &[Uncollectable] {
        &self.uncollectable
    }

    /// Returns the number of uncollectable points.
    pub fn num_uncollectable(&self) -> usize {
        self.uncollectable.len()
    }

    /// Returns `true` if the plan has neither routes nor uncollectable points.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.uncollectable.is_empty()
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.total_distance()).sum()
    }

    /// Total quantity collected across all routes.
    pub fn total_load(&self) -> f64 {
        self.routes.iter().map(|r| r.total_load()).sum()
    }

    /// Total number of points served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Every served vertex, route by route.
    pub fn served(&self) -> Vec<VertexId> {
        self.routes.iter().flat_map(|r| r.vertices()).collect()
    }
}
