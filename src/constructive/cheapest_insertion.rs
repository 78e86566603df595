//! Global cheapest insertion.
//!
//! # Algorithm
//!
//! Every vehicle starts with the empty route `depot → depot`. At each step the
//! unassigned node with the lowest marginal cost
//!
//! ```text
//! delta = d(p, n) + d(n, q) - d(p, q)
//! ```
//!
//! over every vehicle with room for it and every position `(p, q)` of that
//! vehicle's route is inserted. Ties go to the lowest node id, then the
//! lowest vehicle id, then the earliest position.
//!
//! # Complexity
//!
//! O(n³) where n = number of stops (n insertions, each scanning n nodes over
//! O(n) positions in total).

use super::Construction;
use crate::evaluation::CapacityDimension;
use crate::models::RoutingModel;

/// A candidate placement of one node.
#[derive(Debug, Clone, PartialEq)]
struct Insertion {
    node: usize,
    vehicle: usize,
    position: usize,
    delta: i64,
}

/// Builds routes by repeated cheapest insertion under the capacity dimension.
///
/// Stops when every node is placed or no remaining node fits anywhere; the
/// latter are returned in [`Construction::unplaced`].
///
/// # Examples
///
/// ```
/// use u_delivery::constructive::cheapest_insertion;
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::evaluation::CapacityDimension;
/// use u_delivery::models::RoutingModel;
///
/// // depot and three stops on a line: 0, 1, 2, 3
/// let dm = DistanceMatrix::from_data(4, vec![
///     0, 1, 2, 3,
///     1, 0, 1, 2,
///     2, 1, 0, 1,
///     3, 2, 1, 0,
/// ]).unwrap();
/// let model = RoutingModel::new(dm, vec![0, 1, 1, 1], 1, 10).unwrap();
/// let capacity = CapacityDimension::new(&model);
///
/// let construction = cheapest_insertion(&model, &capacity);
/// assert!(construction.is_complete());
/// assert_eq!(construction.routes, vec![vec![3, 2, 1]]);
/// ```
pub fn cheapest_insertion(model: &RoutingModel, capacity: &CapacityDimension<'_>) -> Construction {
    let mut routes = vec![Vec::new(); model.num_vehicles()];
    let mut loads = vec![0i64; model.num_vehicles()];
    let mut unassigned: Vec<usize> = model.stops().collect();

    while let Some(best) = best_insertion(model, capacity, &routes, &loads, &unassigned) {
        routes[best.vehicle].insert(best.position, best.node);
        loads[best.vehicle] += capacity.transit(best.node);
        unassigned.retain(|&n| n != best.node);
    }

    Construction {
        routes,
        unplaced: unassigned,
    }
}

/// Finds the cheapest feasible insertion among all unassigned nodes.
fn best_insertion(
    model: &RoutingModel,
    capacity: &CapacityDimension<'_>,
    routes: &[Vec<usize>],
    loads: &[i64],
    unassigned: &[usize],
) -> Option<Insertion> {
    let mut best: Option<Insertion> = None;

    for &node in unassigned {
        for (vehicle, route) in routes.iter().enumerate() {
            if !capacity.can_accept(loads[vehicle], node) {
                continue;
            }
            for position in 0..=route.len() {
                let Some(delta) = insertion_delta(model, route, position, node) else {
                    continue;
                };
                if best.as_ref().is_none_or(|b| delta < b.delta) {
                    best = Some(Insertion {
                        node,
                        vehicle,
                        position,
                        delta,
                    });
                }
            }
        }
    }

    best
}

/// Marginal cost of inserting `node` before `route[position]`.
///
/// `None` if the insertion would use an unreachable arc.
pub(crate) fn insertion_delta(
    model: &RoutingModel,
    route: &[usize],
    position: usize,
    node: usize,
) -> Option<i64> {
    let depot = model.depot();
    let prev = if position == 0 { depot } else { route[position - 1] };
    let next = route.get(position).copied().unwrap_or(depot);

    let added = model.arc_cost(prev, node)? + model.arc_cost(node, next)?;
    Some(added - model.arc_cost(prev, next)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceMatrix, UNREACHABLE};

    fn line_model(demands: Vec<i32>, vehicles: usize, capacity: i32) -> RoutingModel {
        let n = demands.len() as i64;
        let data = (0..n)
            .flat_map(|a| (0..n).map(move |b| (a - b).abs() * 100))
            .collect();
        let dm = DistanceMatrix::from_data(n as usize, data).expect("valid");
        RoutingModel::new(dm, demands, vehicles, capacity).expect("valid")
    }

    #[test]
    fn test_all_on_one_route() {
        let model = line_model(vec![0, 1, 1, 1], 2, 10);
        let cap = CapacityDimension::new(&model);
        let c = cheapest_insertion(&model, &cap);
        assert!(c.unplaced.is_empty());
        // ties on the line resolve to the earliest position
        assert_eq!(c.routes, vec![vec![3, 2, 1], vec![]]);
    }

    #[test]
    fn test_splits_on_capacity() {
        let model = line_model(vec![0, 5, 5, 5], 2, 10);
        let cap = CapacityDimension::new(&model);
        let c = cheapest_insertion(&model, &cap);
        assert!(c.is_complete());
        for route in &c.routes {
            assert!(cap.is_feasible(route));
        }
        let mut served: Vec<usize> = c.routes.concat();
        served.sort_unstable();
        assert_eq!(served, vec![1, 2, 3]);
    }

    #[test]
    fn test_reports_unplaced() {
        let model = line_model(vec![0, 3, 3], 1, 4);
        let cap = CapacityDimension::new(&model);
        let c = cheapest_insertion(&model, &cap);
        assert!(!c.is_complete());
        // stop 1 is cheapest (closest), stop 2 no longer fits
        assert_eq!(c.routes, vec![vec![1]]);
        assert_eq!(c.unplaced, vec![2]);
    }

    #[test]
    fn test_oversized_demand_is_unplaced() {
        let model = line_model(vec![0, 11, 1], 3, 10);
        let cap = CapacityDimension::new(&model);
        let c = cheapest_insertion(&model, &cap);
        assert_eq!(c.unplaced, vec![1]);
    }

    #[test]
    fn test_unreachable_stop_is_unplaced() {
        let mut dm = DistanceMatrix::from_data(3, vec![0, 1, 1, 1, 0, 1, 1, 1, 0]).expect("valid");
        for other in 0..3 {
            if other != 2 {
                dm.set(other, 2, UNREACHABLE);
                dm.set(2, other, UNREACHABLE);
            }
        }
        let model = RoutingModel::new(dm, vec![0, 1, 1], 2, 10).expect("valid");
        let cap = CapacityDimension::new(&model);
        let c = cheapest_insertion(&model, &cap);
        assert_eq!(c.unplaced, vec![2]);
        assert_eq!(c.routes[0], vec![1]);
    }

    #[test]
    fn test_tie_breaks_lowest_node() {
        // stops 1 and 2 are symmetric around the depot
        let dm = DistanceMatrix::from_data(3, vec![0, 5, 5, 5, 0, 10, 5, 10, 0]).expect("valid");
        let model = RoutingModel::new(dm, vec![0, 1, 1], 2, 1).expect("valid");
        let cap = CapacityDimension::new(&model);
        let c = cheapest_insertion(&model, &cap);
        assert_eq!(c.routes, vec![vec![1], vec![2]]);
    }

    #[test]
    fn test_insertion_delta() {
        let model = line_model(vec![0, 1, 1, 1], 1, 10);
        // inserting 2 between 1 and 3 on a line costs nothing
        assert_eq!(insertion_delta(&model, &[1, 3], 1, 2), Some(0));
        // visiting 3 before 1 doubles back
        assert_eq!(insertion_delta(&model, &[1], 0, 3), Some(400));
        assert_eq!(insertion_delta(&model, &[], 0, 2), Some(400));
    }

    #[test]
    fn test_deterministic() {
        let model = line_model(vec![0, 2, 3, 1, 4, 2], 3, 5);
        let cap = CapacityDimension::new(&model);
        assert_eq!(
            cheapest_insertion(&model, &cap),
            cheapest_insertion(&model, &cap)
        );
    }
}
