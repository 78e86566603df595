//! Search engine and the entry points built on it.
//!
//! - [`SearchConfig`] — Construction and improvement strategy, budgets
//! - [`solve`] — Construction followed by optional local search
//! - [`decode`] — Stop sequences to depot-anchored [`Route`](crate::models::Route)s
//! - [`plan_routes`] — Located stops in, [`Solution`](crate::models::Solution) out

mod config;
mod decoder;
mod engine;
mod planner;

pub use config::{FirstSolutionStrategy, ImprovementStrategy, SearchConfig};
pub use decoder::decode;
pub use engine::solve;
pub use planner::plan_routes;
