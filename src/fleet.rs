//! Actors and the planner that drives the solvers for them.
//!
//! The [`Planner`] owns the current road network. Loading a new network
//! pushes it to every [`PlanSubscriber`] (the municipality managing the
//! streets, the company running the trucks). All solver calls go through
//! the planner, which resolves vertex keys, enforces the exact-solver bound
//! and validates truck capacities.

use crate::circuit::{solve_postman, PostmanSolution};
use crate::config::SolverConfig;
use crate::constructive::{mst_routes, nearest_neighbor_routes};
use crate::distance::ShortestPathTree;
use crate::error::{RoutingError, RoutingResult};
use crate::exact::{solve_exact_tour, TourSolution};
use crate::models::{Graph, RoutePlan, VertexId};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

/// Receives the road network whenever the planner loads a new one.
pub trait PlanSubscriber {
    /// Display name.
    fn name(&self) -> &str;

    /// One-line presentation of the actor.
    fn describe(&self) -> String;

    /// Called with the new network after [`Planner::load_plan`].
    fn on_plan_updated(&mut self, plan: &Graph, config: &SolverConfig);
}

/// Local authority managing the streets.
#[derive(Debug, Clone, Default)]
pub struct Municipality {
    name: String,
    roadworks: Vec<String>,
    time_constraints: BTreeMap<String, String>,
    plan: Option<Graph>,
}

impl Municipality {
    /// Creates a municipality with no roadworks or constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Records roadworks on a street.
    pub fn report_roadworks(&mut self, street: impl Into<String>) {
        self.roadworks.push(street.into());
    }

    /// Sets the collection hours allowed in a sector.
    pub fn set_time_constraint(&mut self, sector: impl Into<String>, hours: impl Into<String>) {
        self.time_constraints.insert(sector.into(), hours.into());
    }

    /// Streets under roadworks, in reporting order.
    pub fn roadworks(&self) -> &[String] {
        &self.roadworks
    }

    /// Collection hours for `sector`, if constrained.
    pub fn time_constraint(&self, sector: &str) -> Option<&str> {
        self.time_constraints.get(sector).map(String::as_str)
    }

    /// The last network received.
    pub fn plan(&self) -> Option<&Graph> {
        self.plan.as_ref()
    }
}

impl PlanSubscriber for Municipality {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        format!(
            "Municipality {}: {} roadworks, {} constrained sectors",
            self.name,
            self.roadworks.len(),
            self.time_constraints.len()
        )
    }

    fn on_plan_updated(&mut self, plan: &Graph, config: &SolverConfig) {
        config.log(&format!("municipality {} validates plan '{}'", self.name, plan.label()));
        self.plan = Some(plan.clone());
    }
}

/// Company operating the collection trucks.
#[derive(Debug, Clone)]
pub struct CollectionCompany {
    name: String,
    trucks: usize,
    truck_capacity: f64,
    plan: Option<Graph>,
}

impl CollectionCompany {
    /// Creates a company with `trucks` trucks of `truck_capacity` tonnes.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidCapacity`] if the capacity is not positive and
    /// finite.
    pub fn new(name: impl Into<String>, trucks: usize, truck_capacity: f64) -> RoutingResult<Self> {
        validate_capacity(truck_capacity)?;
        Ok(Self {
            name: name.into(),
            trucks,
            truck_capacity,
            plan: None,
        })
    }

    /// Number of trucks.
    pub fn trucks(&self) -> usize {
        self.trucks
    }

    /// Capacity of each truck.
    pub fn truck_capacity(&self) -> f64 {
        self.truck_capacity
    }

    /// The last network received.
    pub fn plan(&self) -> Option<&Graph> {
        self.plan.as_ref()
    }
}

impl PlanSubscriber for CollectionCompany {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        format!(
            "Company {}: {} trucks of {:.1} t",
            self.name, self.trucks, self.truck_capacity
        )
    }

    fn on_plan_updated(&mut self, plan: &Graph, config: &SolverConfig) {
        config.log(&format!("company {} takes plan '{}' into account", self.name, plan.label()));
        self.plan = Some(plan.clone());
    }
}

/// A bulky-item pickup requested at an address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickupRequest {
    id: String,
    address: VertexId,
    description: String,
    handled: bool,
}

impl PickupRequest {
    /// Creates a pending request with a random 8-hex-digit id.
    pub fn new<R: Rng>(rng: &mut R, address: VertexId, description: impl Into<String>) -> Self {
        Self {
            id: format!("{:08x}", rng.random::<u32>()),
            address,
            description: description.into(),
            handled: false,
        }
    }

    /// Short identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Vertex where the item waits.
    pub fn address(&self) -> VertexId {
        self.address
    }

    /// What to pick up.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `true` once a planned tour covers the request.
    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

/// Shortest path from the depot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepotPath {
    /// Depot first; empty if the destination is unreachable.
    pub path: Vec<VertexId>,
    /// Path length, `f64::INFINITY` if unreachable.
    pub distance: f64,
}

/// Capacitated route construction heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RouteMethod {
    /// [`nearest_neighbor_routes`]
    NearestNeighbor,
    /// [`mst_routes`]
    Mst,
}

fn validate_capacity(capacity: f64) -> RoutingResult<()> {
    if capacity > 0.0 && capacity.is_finite() {
        Ok(())
    } else {
        Err(RoutingError::InvalidCapacity(capacity))
    }
}

/// Orchestrates the solvers over the current road network.
///
/// # Examples
///
/// ```
/// use waste_routing::config::SolverConfig;
/// use waste_routing::fleet::{CollectionCompany, Municipality, Planner, RouteMethod};
/// use waste_routing::scenarios::Scenario;
///
/// let mut planner = Planner::new(SolverConfig::default());
/// planner.subscribe(Box::new(Municipality::new("Greenville")));
/// planner.subscribe(Box::new(CollectionCompany::new("CleanCo", 3, 12.0).unwrap()));
/// planner.load_plan(Scenario::SmallTown.build());
///
/// let path = planner.path_from_depot("D").unwrap();
/// assert!((path.distance - 3.7).abs() < 1e-10);
///
/// let plan = planner.routes(RouteMethod::NearestNeighbor, 12.0).unwrap();
/// assert_eq!(plan.num_served(), 4);
/// ```
#[derive(Default)]
pub struct Planner {
    graph: Graph,
    depot: Option<VertexId>,
    config: SolverConfig,
    subscribers: Vec<Box<dyn PlanSubscriber>>,
    requests: Vec<PickupRequest>,
}

impl Planner {
    /// Creates a planner with an empty network.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Registers an actor; it immediately receives the current network if
    /// one is loaded.
    pub fn subscribe(&mut self, mut subscriber: Box<dyn PlanSubscriber>) {
        if !self.graph.is_empty() {
            subscriber.on_plan_updated(&self.graph, &self.config);
        }
        self.subscribers.push(subscriber);
    }

    /// Registered actors.
    pub fn subscribers(&self) -> &[Box<dyn PlanSubscriber>] {
        &self.subscribers
    }

    /// Replaces the road network and notifies every subscriber.
    ///
    /// Pickup requests refer to vertices of the previous network and are
    /// dropped.
    pub fn load_plan(&mut self, graph: Graph) {
        if !self.requests.is_empty() {
            self.config.log(&format!(
                "planner: {} pickup requests dropped with the previous plan",
                self.requests.len()
            ));
            self.requests.clear();
        }
        self.graph = graph;
        self.depot = self.graph.depot();
        for subscriber in &mut self.subscribers {
            subscriber.on_plan_updated(&self.graph, &self.config);
        }
        self.config.log(&format!(
            "planner: plan '{}' applied ({} vertices, {} streets)",
            self.graph.label(),
            self.graph.num_vertices(),
            self.graph.num_edges()
        ));
    }

    /// Current network.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Current depot, `None` while the network is empty.
    pub fn depot(&self) -> Option<VertexId> {
        self.depot
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn require_depot(&self) -> RoutingResult<VertexId> {
        self.depot.ok_or(RoutingError::EmptyGraph)
    }

    /// Resolves a vertex key (exact, then case-insensitive).
    pub fn resolve(&self, key: &str) -> RoutingResult<VertexId> {
        self.graph
            .vertex_id(key)
            .ok_or_else(|| RoutingError::UnknownVertex(key.to_string()))
    }

    /// Shortest path from the depot to the vertex keyed `destination`.
    pub fn path_from_depot(&self, destination: &str) -> RoutingResult<DepotPath> {
        let depot = self.require_depot()?;
        let target = self.resolve(destination)?;
        let tree = ShortestPathTree::build(&self.graph, depot);
        Ok(DepotPath {
            path: tree.path_to(target),
            distance: tree.distance_to(target),
        })
    }

    /// Exact tour from the depot through the vertices keyed `points`.
    ///
    /// # Errors
    ///
    /// [`RoutingError::TooManyPoints`] if more distinct points than
    /// [`SolverConfig::max_exact_points`] are requested.
    pub fn exact_tour(&self, points: &[&str]) -> RoutingResult<TourSolution> {
        let ids = points
            .iter()
            .map(|key| self.resolve(key))
            .collect::<RoutingResult<Vec<_>>>()?;
        self.exact_tour_over(&ids)
    }

    fn exact_tour_over(&self, points: &[VertexId]) -> RoutingResult<TourSolution> {
        let depot = self.require_depot()?;
        let mut distinct: Vec<VertexId> = points.iter().copied().filter(|&p| p != depot).collect();
        distinct.sort_unstable();
        distinct.dedup();

        let limit = self.config.max_exact_points();
        if distinct.len() > limit {
            return Err(RoutingError::TooManyPoints {
                requested: distinct.len(),
                limit,
            });
        }

        let tour = solve_exact_tour(&self.graph, depot, points);
        if tour.is_feasible() {
            self.config.log(&format!(
                "planner: exact tour over {} points, distance {:.2}",
                distinct.len(),
                tour.total_distance
            ));
        } else {
            self.config.log("planner: no closed tour covers every point");
        }
        Ok(tour)
    }

    /// Records a bulky-item pickup at the vertex keyed `address` and
    /// returns its id.
    pub fn submit_pickup<R: Rng>(
        &mut self,
        rng: &mut R,
        address: &str,
        description: &str,
    ) -> RoutingResult<String> {
        let vertex = self.resolve(address)?;
        let request = PickupRequest::new(rng, vertex, description);
        let id = request.id().to_string();
        self.config.log(&format!(
            "planner: pickup #{id} '{description}' at {}",
            self.graph.vertex(vertex)
        ));
        self.requests.push(request);
        Ok(id)
    }

    /// Every pickup request, handled or not.
    pub fn pickups(&self) -> &[PickupRequest] {
        &self.requests
    }

    /// Pickup requests still waiting for a tour.
    pub fn pending_pickups(&self) -> impl Iterator<Item = &PickupRequest> + '_ {
        self.requests.iter().filter(|r| !r.handled)
    }

    /// Plans one exact tour over every pending pickup address.
    ///
    /// The requests are marked handled only if the tour is feasible.
    pub fn plan_pickups(&mut self) -> RoutingResult<TourSolution> {
        let addresses: Vec<VertexId> = self.pending_pickups().map(|r| r.address).collect();
        let tour = self.exact_tour_over(&addresses)?;
        if tour.is_feasible() {
            for request in self.requests.iter_mut().filter(|r| !r.handled) {
                request.handled = true;
            }
        }
        Ok(tour)
    }

    /// Street-sweeping circuit over the whole network.
    pub fn postman(&self) -> RoutingResult<PostmanSolution> {
        solve_postman(&self.graph, &self.config)
    }

    /// Capacitated routes over every collection point of the network.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidCapacity`] for a non-positive or non-finite
    /// capacity, [`RoutingError::EmptyGraph`] without a network.
    pub fn routes(&self, method: RouteMethod, capacity: f64) -> RoutingResult<RoutePlan> {
        validate_capacity(capacity)?;
        let depot = self.require_depot()?;
        let points: Vec<VertexId> = self.graph.vertex_ids().collect();
        let plan = match method {
            RouteMethod::NearestNeighbor => {
                nearest_neighbor_routes(&self.graph, depot, &points, capacity, &self.config)
            }
            RouteMethod::Mst => mst_routes(&self.graph, depot, &points, capacity, &self.config),
        };
        Ok(plan)
    }
}
