//! Entry point for located stops.

use super::{solve, SearchConfig};
use crate::error::SolveError;
use crate::models::{nodes_from_stops, Coordinate, Fleet, RoutingModel, Solution, Stop};

/// Plans delivery routes from a depot location, a list of stops and a fleet.
///
/// Validates the coordinates and demands, builds the great-circle distance
/// matrix and solves. Route node `i >= 1` refers to `stops[i - 1]`; use
/// [`Solution::stops_of`] to recover the stops of a route with their
/// payloads.
///
/// # Examples
///
/// ```
/// use u_delivery::models::{Coordinate, Fleet, Stop};
/// use u_delivery::search::{plan_routes, SearchConfig};
///
/// let depot = Coordinate::new(0.0, 0.0);
/// let stops = vec![
///     Stop::new(Coordinate::new(0.0, 1.0), 2, "bakery"),
///     Stop::new(Coordinate::new(0.0, 2.0), 3, "market"),
/// ];
///
/// let solution = plan_routes(depot, &stops, Fleet::new(1, 10), &SearchConfig::default()).unwrap();
/// let route = &solution.routes()[0];
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.total_demand(), 5);
///
/// let labels: Vec<_> = solution.stops_of(route, &stops).iter().map(|s| s.payload).collect();
/// assert_eq!(labels.len(), 2);
/// ```
pub fn plan_routes<P>(
    depot: Coordinate,
    stops: &[Stop<P>],
    fleet: Fleet,
    config: &SearchConfig,
) -> Result<Solution, SolveError> {
    let nodes = nodes_from_stops(depot, stops);
    let model = RoutingModel::from_nodes(&nodes, fleet)?;
    solve(&model, config)
}
