use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;
use waste_routing::config::{SolverConfig, DEFAULT_MAX_EXACT_POINTS};
use waste_routing::fleet::{CollectionCompany, Municipality, Planner, RouteMethod};
use waste_routing::models::{Graph, RoutePlan, UncollectableReason};
use waste_routing::scenarios::{random_network, Scenario};

#[derive(Parser)]
#[command(name = "waste-routing", version, about = "Waste collection routing over small road networks")]
struct Args {
    /// Demonstration network to load
    #[arg(short, long, value_enum, default_value_t = Scenario::SmallTown, global = true)]
    scenario: Scenario,

    /// Use a random network with this many vertices instead of a scenario
    #[arg(long, global = true)]
    random: Option<usize>,

    /// Seed for the random network and pickup ids
    #[arg(long, default_value_t = 1, global = true)]
    seed: u64,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log solver decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the demonstration networks
    Scenarios,
    /// Print the loaded network
    Show,
    /// Shortest path from the depot
    Path {
        /// Destination vertex key
        destination: String,
    },
    /// Street-sweeping circuit covering every street
    Postman,
    /// Exact tour from the depot through the given points
    Tour {
        /// Vertex keys to visit
        #[arg(required = true)]
        points: Vec<String>,

        /// Largest point set accepted
        #[arg(long, default_value_t = DEFAULT_MAX_EXACT_POINTS)]
        max_points: usize,
    },
    /// Capacitated collection routes over every collection point
    Routes {
        /// Construction heuristic
        #[arg(short, long, value_enum, default_value_t = RouteMethod::NearestNeighbor)]
        method: RouteMethod,

        /// Truck capacity in tonnes
        #[arg(short, long, default_value_t = 10.0)]
        capacity: f64,

        /// Quantity a vertex must exceed to be collected
        #[arg(long)]
        threshold: Option<f64>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = SolverConfig::default();
    if args.verbose {
        config = config.with_logger(Arc::new(|msg: &str| eprintln!("[info] {msg}")));
    }
    if let Command::Tour { max_points, .. } = &args.command {
        config = config.with_max_exact_points(*max_points);
    }
    if let Command::Routes { threshold: Some(t), .. } = &args.command {
        config = config.with_collection_threshold(*t);
    }

    if let Command::Scenarios = args.command {
        for scenario in Scenario::ALL {
            println!("{scenario}");
        }
        return Ok(());
    }

    let graph = match args.random {
        Some(n) => {
            if n == 0 {
                bail!("a random network needs at least one vertex");
            }
            let mut rng = StdRng::seed_from_u64(args.seed);
            random_network(&mut rng, n, n / 2, 0.2)
        }
        None => args.scenario.build(),
    };

    let mut planner = Planner::new(config);
    planner.subscribe(Box::new(Municipality::new("Municipality")));
    planner.subscribe(Box::new(CollectionCompany::new("Collection company", 3, 10.0)?));
    planner.load_plan(graph);
    let graph = planner.graph();

    match &args.command {
        Command::Scenarios => {}
        Command::Show => {
            if args.json {
                emit(graph)?;
            } else {
                print_network(graph);
            }
        }
        Command::Path { destination } => {
            let path = planner
                .path_from_depot(destination)
                .with_context(|| format!("cannot route to '{destination}'"))?;
            if args.json {
                emit(&json!({ "vertices": keys(graph), "result": path }))?;
            } else if path.path.is_empty() {
                println!("{destination} is unreachable from the depot");
            } else {
                println!("{}", graph.format_walk(&path.path));
                println!("distance: {:.2}", path.distance);
            }
        }
        Command::Postman => {
            let solution = planner.postman().context("postman circuit failed")?;
            if args.json {
                emit(&json!({ "vertices": keys(graph), "result": solution }))?;
            } else {
                println!("odd-degree vertices: {}", solution.odd_vertex_count);
                println!("duplicated streets: {}", solution.duplicated_edges.len());
                for warning in &solution.warnings {
                    println!("warning: {warning:?}");
                }
                if solution.is_feasible() {
                    println!("{}", graph.format_walk(&solution.circuit));
                    println!(
                        "distance: {:.2} (extra {:.2})",
                        solution.total_distance,
                        solution.extra_distance(graph)
                    );
                } else {
                    println!("no circuit covers every street");
                }
            }
        }
        Command::Tour { points, .. } => {
            let keys_in: Vec<&str> = points.iter().map(String::as_str).collect();
            let tour = planner.exact_tour(&keys_in).context("exact tour failed")?;
            if args.json {
                emit(&json!({ "vertices": keys(graph), "result": tour }))?;
            } else if tour.is_feasible() {
                println!("tour:    {}", graph.format_walk(&tour.circuit));
                println!("streets: {}", graph.format_walk(&tour.street_path(graph)));
                println!("distance: {:.2}", tour.total_distance);
            } else {
                println!("no closed tour visits every point");
            }
        }
        Command::Routes { method, capacity, .. } => {
            let plan = planner
                .routes(*method, *capacity)
                .context("route construction failed")?;
            if args.json {
                emit(&json!({ "vertices": keys(graph), "result": plan }))?;
            } else {
                print_plan(graph, &plan);
            }
        }
    }

    Ok(())
}

fn emit<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn keys(graph: &Graph) -> Vec<&str> {
    graph.vertices().iter().map(|v| v.key()).collect()
}

fn print_network(graph: &Graph) {
    println!("{}", graph.label());
    for id in graph.vertex_ids() {
        println!("  {}  degree {}", graph.vertex(id), graph.degree(id));
    }
    for edge in graph.edges() {
        let arrow = if edge.is_bidirectional() { "<->" } else { "->" };
        println!(
            "  {} {arrow} {}  {:.1}",
            graph.vertex(edge.tail()).key(),
            graph.vertex(edge.head()).key(),
            edge.length()
        );
    }
    println!(
        "{} vertices, {} streets, total length {:.1}, eulerian: {}",
        graph.num_vertices(),
        graph.num_edges(),
        graph.total_length(),
        graph.is_eulerian()
    );
}

fn print_plan(graph: &Graph, plan: &RoutePlan) {
    for route in plan.routes() {
        let stops: Vec<_> = std::iter::once(route.depot())
            .chain(route.vertices())
            .chain(std::iter::once(route.depot()))
            .collect();
        println!(
            "route {}: {}  load {:.1} t, distance {:.2}",
            route.number(),
            graph.format_walk(&stops),
            route.total_load(),
            route.total_distance()
        );
    }
    for point in plan.uncollectable() {
        let reason = match point.reason {
            UncollectableReason::Unreachable => "unreachable",
            UncollectableReason::ExceedsCapacity => "exceeds truck capacity",
        };
        println!("uncollectable: {} ({reason})", graph.vertex(point.vertex));
    }
    println!(
        "{} routes, {:.1} t collected, total distance {:.2}",
        plan.num_routes(),
        plan.total_load(),
        plan.total_distance()
    );
}
