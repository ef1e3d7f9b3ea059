//! Route materialization and plan auditing.

mod evaluator;

pub use evaluator::RouteEvaluator;
