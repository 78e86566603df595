//! # u-delivery
//!
//! Capacitated delivery route planning: given a depot, stops with integer
//! demands and a fleet of identical vehicles, assign stops to vehicles and
//! order each vehicle's visits to minimize total great-circle distance
//! without exceeding capacity.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Coordinate, Stop, Route, Solution, RoutingModel)
//! - [`distance`] — Great-circle distance matrix in whole meters
//! - [`evaluation`] — Capacity dimension and route evaluation
//! - [`constructive`] — Constructive heuristics (cheapest insertion, path cheapest arc)
//! - [`local_search`] — Local search operators (2-opt, Or-opt, relocate, swap)
//! - [`search`] — Search configuration, engine and decoder
//! - [`error`] — Input and solve errors
//!
//! ## Example
//!
//! ```
//! use u_delivery::models::{Coordinate, Fleet, Stop};
//! use u_delivery::search::{plan_routes, SearchConfig};
//!
//! let depot = Coordinate::new(41.0082, 28.9784);
//! let stops = vec![
//!     Stop::new(Coordinate::new(41.0151, 28.9795), 4, "Eminonu"),
//!     Stop::new(Coordinate::new(41.0369, 28.9850), 3, "Taksim"),
//!     Stop::new(Coordinate::new(40.9909, 29.0302), 5, "Kadikoy"),
//! ];
//!
//! let solution = plan_routes(depot, &stops, Fleet::new(2, 8), &SearchConfig::default()).unwrap();
//! assert_eq!(solution.num_served(), 3);
//! assert!(solution.routes().iter().all(|r| r.total_demand() <= 8));
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod search;
