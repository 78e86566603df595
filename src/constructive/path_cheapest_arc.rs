//! Path-cheapest-arc constructive heuristic.
//!
//! Builds routes greedily, one vehicle at a time: starting from the depot,
//! always extend the path with the cheapest arc to an unvisited node that
//! still fits the vehicle. When nothing fits, move on to the next vehicle.
//!
//! # Complexity
//!
//! O(n²) where n = number of stops.

use super::Construction;
use crate::evaluation::CapacityDimension;
use crate::models::RoutingModel;

/// Constructs routes by extending each vehicle's path along its cheapest arc.
///
/// Candidates must be reachable from the current node and able to return to
/// the depot. Ties go to the lowest node id.
///
/// # Examples
///
/// ```
/// use u_delivery::constructive::path_cheapest_arc;
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::evaluation::CapacityDimension;
/// use u_delivery::models::RoutingModel;
///
/// let dm = DistanceMatrix::from_data(4, vec![
///     0, 1, 2, 3,
///     1, 0, 1, 2,
///     2, 1, 0, 1,
///     3, 2, 1, 0,
/// ]).unwrap();
/// let model = RoutingModel::new(dm, vec![0, 1, 1, 1], 2, 2).unwrap();
/// let capacity = CapacityDimension::new(&model);
///
/// let construction = path_cheapest_arc(&model, &capacity);
/// assert_eq!(construction.routes, vec![vec![1, 2], vec![3]]);
/// ```
pub fn path_cheapest_arc(model: &RoutingModel, capacity: &CapacityDimension<'_>) -> Construction {
    let depot = model.depot();
    let mut visited = vec![false; model.num_nodes()];
    visited[depot] = true;

    let mut routes = Vec::with_capacity(model.num_vehicles());

    for _ in model.vehicles() {
        let mut route = Vec::new();
        let mut current = depot;
        let mut load = 0;

        loop {
            let candidates: Vec<usize> = model
                .stops()
                .filter(|&n| !visited[n] && capacity.can_accept(load, n))
                .filter(|&n| model.arc_cost(n, depot).is_some())
                .collect();

            match model.distances().nearest_neighbor(current, &candidates) {
                Some(next) => {
                    visited[next] = true;
                    route.push(next);
                    load += capacity.transit(next);
                    current = next;
                }
                None => break,
            }
        }

        routes.push(route);
    }

    let unplaced = model.stops().filter(|&n| !visited[n]).collect();
    Construction { routes, unplaced }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    fn line_model(demands: Vec<i32>, vehicles: usize, capacity: i32) -> RoutingModel {
        let n = demands.len() as i64;
        let data = (0..n)
            .flat_map(|a| (0..n).map(move |b| (a - b).abs() * 10))
            .collect();
        let dm = DistanceMatrix::from_data(n as usize, data).expect("valid");
        RoutingModel::new(dm, demands, vehicles, capacity).expect("valid")
    }

    #[test]
    fn test_all_on_one_route() {
        let model = line_model(vec![0, 10, 10, 10], 1, 100);
        let cap = CapacityDimension::new(&model);
        let c = path_cheapest_arc(&model, &cap);
        assert!(c.is_complete());
        // nearest each time
        assert_eq!(c.routes, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_split_routes() {
        let model = line_model(vec![0, 10, 10, 10], 2, 20);
        let cap = CapacityDimension::new(&model);
        let c = path_cheapest_arc(&model, &cap);
        assert_eq!(c.routes, vec![vec![1, 2], vec![3]]);
        assert!(c.unplaced.is_empty());
    }

    #[test]
    fn test_insufficient_vehicles() {
        let model = line_model(vec![0, 10, 10, 10], 1, 15);
        let cap = CapacityDimension::new(&model);
        let c = path_cheapest_arc(&model, &cap);
        assert_eq!(c.routes, vec![vec![1]]);
        assert_eq!(c.unplaced, vec![2, 3]);
    }

    #[test]
    fn test_depot_only() {
        let model = line_model(vec![0], 2, 10);
        let cap = CapacityDimension::new(&model);
        let c = path_cheapest_arc(&model, &cap);
        assert!(c.is_complete());
        assert_eq!(c.routes, vec![Vec::<usize>::new(), Vec::new()]);
    }

    #[test]
    fn test_skips_heavy_node_for_lighter_one() {
        // stop 2 is next along the line but no longer fits after stop 1
        let model = line_model(vec![0, 8, 3, 1], 2, 10);
        let cap = CapacityDimension::new(&model);
        let c = path_cheapest_arc(&model, &cap);
        assert_eq!(c.routes, vec![vec![1, 3], vec![2]]);
    }
}
