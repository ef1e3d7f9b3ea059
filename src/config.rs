//! Solver configuration and logging hook.

use std::fmt;
use std::sync::Arc;

/// A logger callback receiving informational messages from solvers.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Default quantity below which a vertex is a pass-through intersection.
pub const DEFAULT_COLLECTION_THRESHOLD: f64 = 0.01;

/// Default slack allowed when comparing a load against capacity.
pub const DEFAULT_CAPACITY_TOLERANCE: f64 = 1e-9;

/// Default upper bound on the exact tour solver's point count.
pub const DEFAULT_MAX_EXACT_POINTS: usize = 15;

/// Tunables shared by the solvers.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use waste_routing::config::SolverConfig;
///
/// let messages = Arc::new(Mutex::new(Vec::new()));
/// let sink = messages.clone();
/// let config = SolverConfig::default()
///     .with_collection_threshold(0.5)
///     .with_logger(Arc::new(move |msg: &str| sink.lock().unwrap().push(msg.to_string())));
///
/// config.log("hello");
/// assert_eq!(config.collection_threshold(), 0.5);
/// assert_eq!(messages.lock().unwrap().len(), 1);
/// ```
#[derive(Clone)]
pub struct SolverConfig {
    collection_threshold: f64,
    capacity_tolerance: f64,
    max_exact_points: usize,
    logger: InfoLogger,
}

impl SolverConfig {
    /// Sets the quantity a vertex must exceed to be a collection point.
    pub fn with_collection_threshold(mut self, threshold: f64) -> Self {
        self.collection_threshold = threshold;
        self
    }

    /// Sets the slack allowed above capacity (floating-point noise).
    pub fn with_capacity_tolerance(mut self, tolerance: f64) -> Self {
        self.capacity_tolerance = tolerance;
        self
    }

    /// Sets the maximum number of points accepted by the exact tour solver.
    pub fn with_max_exact_points(mut self, limit: usize) -> Self {
        self.max_exact_points = limit;
        self
    }

    /// Sets logger.
    pub fn with_logger(mut self, logger: InfoLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Quantity a vertex must exceed to be a collection point.
    pub fn collection_threshold(&self) -> f64 {
        self.collection_threshold
    }

    /// Slack allowed above capacity.
    pub fn capacity_tolerance(&self) -> f64 {
        self.capacity_tolerance
    }

    /// Maximum point count for the exact tour solver.
    pub fn max_exact_points(&self) -> usize {
        self.max_exact_points
    }

    /// Returns the logger.
    pub fn logger(&self) -> &InfoLogger {
        &self.logger
    }

    /// Sends a message to the logger.
    pub fn log(&self, message: &str) {
        (self.logger)(message)
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            collection_threshold: DEFAULT_COLLECTION_THRESHOLD,
            capacity_tolerance: DEFAULT_CAPACITY_TOLERANCE,
            max_exact_points: DEFAULT_MAX_EXACT_POINTS,
            logger: Arc::new(|_: &str| {}),
        }
    }
}

impl fmt::Debug for SolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverConfig")
            .field("collection_threshold", &self.collection_threshold)
            .field("capacity_tolerance", &self.capacity_tolerance)
            .field("max_exact_points", &self.max_exact_points)
            .finish_non_exhaustive()
    }
}
