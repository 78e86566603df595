//! Solution decoder: per-vehicle stop sequences to depot-anchored routes.

use crate::evaluation::RouteEvaluator;
use crate::models::{Route, RoutingModel};

/// Decodes one stop sequence per vehicle into [`Route`]s.
///
/// Each route starts and ends at the depot; a vehicle with no stops decodes
/// to `[depot, depot]` with zero distance. Decoding is pure: the same input
/// always yields identical routes.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::models::RoutingModel;
/// use u_delivery::search::decode;
///
/// let dm = DistanceMatrix::from_data(3, vec![0, 4, 6, 4, 0, 3, 6, 3, 0]).unwrap();
/// let model = RoutingModel::new(dm, vec![0, 2, 3], 2, 10).unwrap();
///
/// let routes = decode(&model, &[vec![1, 2], vec![]]);
/// assert_eq!(routes[0].nodes(), &[0, 1, 2, 0]);
/// assert_eq!(routes[0].total_distance(), 13);
/// assert_eq!(routes[1].nodes(), &[0, 0]);
/// ```
pub fn decode(model: &RoutingModel, routes: &[Vec<usize>]) -> Vec<Route> {
    let evaluator = RouteEvaluator::new(model);
    routes
        .iter()
        .enumerate()
        .map(|(vehicle_id, stops)| evaluator.build_route(vehicle_id, stops).0)
        .collect()
}
