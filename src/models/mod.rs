//! Domain model types for capacitated delivery routing.
//!
//! Provides the core abstractions: located nodes and caller stops with
//! demands, a homogeneous fleet, depot-anchored routes, solutions, and the
//! routing graph model that ties everything together.

mod problem;
mod route;
mod solution;
mod stop;
mod vehicle;

pub use problem::RoutingModel;
pub use route::Route;
pub use solution::{SearchStatus, Solution, Violation, ViolationType};
pub use stop::{nodes_from_stops, Coordinate, Node, Stop};
pub use vehicle::{Fleet, Vehicle};
