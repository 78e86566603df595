//! Inter-route stop exchange.
//!
//! # Algorithm
//!
//! For every pair of stops `x ∈ A`, `y ∈ B` on different routes, put `y` in
//! the place of `x` and vice versa. Accepted only if both routes stay within
//! capacity after the exchange:
//!
//! ```text
//! load(A) - q(x) + q(y) <= C  and  load(B) - q(y) + q(x) <= C
//! ```
//!
//! # Complexity
//!
//! O(n²) per scan where n = stops.

use super::{at_or_depot, keep_better, prev_of, Move};
use crate::evaluation::CapacityDimension;
use crate::models::RoutingModel;

/// Finds the best improving exchange of two stops between routes.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::evaluation::CapacityDimension;
/// use u_delivery::local_search::best_swap;
/// use u_delivery::models::RoutingModel;
///
/// // 1 and 3 are close to each other, as are 2 and 4
/// let dm = DistanceMatrix::from_data(5, vec![
///     0, 5, 5, 5, 5,
///     5, 0, 9, 1, 9,
///     5, 9, 0, 9, 1,
///     5, 1, 9, 0, 9,
///     5, 9, 1, 9, 0,
/// ]).unwrap();
/// let model = RoutingModel::new(dm, vec![0, 1, 1, 1, 1], 2, 2).unwrap();
/// let capacity = CapacityDimension::new(&model);
///
/// let mut routes = vec![vec![1, 2], vec![3, 4]];
/// let mv = best_swap(&model, &capacity, &routes).unwrap();
/// mv.apply(&mut routes);
/// assert_eq!(routes, vec![vec![4, 2], vec![3, 1]]);
/// ```
pub fn best_swap(
    model: &RoutingModel,
    capacity: &CapacityDimension<'_>,
    routes: &[Vec<usize>],
) -> Option<Move> {
    let loads: Vec<i64> = routes.iter().map(|r| capacity.load(r)).collect();
    let mut best = None;

    for route_a in 0..routes.len() {
        for route_b in (route_a + 1)..routes.len() {
            for pos_a in 0..routes[route_a].len() {
                for pos_b in 0..routes[route_b].len() {
                    let x = routes[route_a][pos_a];
                    let y = routes[route_b][pos_b];
                    let shift = capacity.transit(y) - capacity.transit(x);
                    if loads[route_a] + shift > capacity.capacity()
                        || loads[route_b] - shift > capacity.capacity()
                    {
                        continue;
                    }

                    let Some(delta_a) = replace_delta(model, &routes[route_a], pos_a, y) else {
                        continue;
                    };
                    let Some(delta_b) = replace_delta(model, &routes[route_b], pos_b, x) else {
                        continue;
                    };

                    keep_better(
                        &mut best,
                        Move::Swap {
                            route_a,
                            pos_a,
                            route_b,
                            pos_b,
                            delta: delta_a + delta_b,
                        },
                    );
                }
            }
        }
    }

    best
}

/// Distance change from putting `node` in place of `route[pos]`.
fn replace_delta(model: &RoutingModel, route: &[usize], pos: usize, node: usize) -> Option<i64> {
    let depot = model.depot();
    let prev = prev_of(route, pos, depot);
    let next = at_or_depot(route, pos + 1, depot);
    let old = route[pos];
    let added = model.arc_cost(prev, node)? + model.arc_cost(node, next)?;
    let removed = model.arc_cost(prev, old)? + model.arc_cost(old, next)?;
    Some(added - removed)
}
