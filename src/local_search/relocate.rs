//! Inter-route stop relocation.
//!
//! # Algorithm
//!
//! Tries moving each stop from its current route to every insertion position
//! of every other route (including unused vehicles) whose load leaves room
//! for its demand.
//!
//! # Complexity
//!
//! O(n² × R) per scan where n = stops, R = number of routes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::{keep_better, removal_gain, Move};
use crate::constructive::insertion_delta;
use crate::evaluation::CapacityDimension;
use crate::models::RoutingModel;

/// Finds the best improving move of one stop to another route.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::evaluation::CapacityDimension;
/// use u_delivery::local_search::best_relocate;
/// use u_delivery::models::RoutingModel;
///
/// // stop 2 sits next to stop 1 but rides with far-away stop 3
/// let dm = DistanceMatrix::from_data(4, vec![
///     0, 5, 5, 9,
///     5, 0, 1, 9,
///     5, 1, 0, 9,
///     9, 9, 9, 0,
/// ]).unwrap();
/// let model = RoutingModel::new(dm, vec![0, 1, 1, 1], 2, 2).unwrap();
/// let capacity = CapacityDimension::new(&model);
///
/// let mut routes = vec![vec![1], vec![3, 2]];
/// let mv = best_relocate(&model, &capacity, &routes).unwrap();
/// mv.apply(&mut routes);
/// assert_eq!(routes, vec![vec![2, 1], vec![3]]);
/// ```
pub fn best_relocate(
    model: &RoutingModel,
    capacity: &CapacityDimension<'_>,
    routes: &[Vec<usize>],
) -> Option<Move> {
    let loads: Vec<i64> = routes.iter().map(|r| capacity.load(r)).collect();
    let mut best = None;

    for (from_route, source) in routes.iter().enumerate() {
        for from_pos in 0..source.len() {
            let node = source[from_pos];
            let Some(gain) = removal_gain(model, source, from_pos) else {
                continue;
            };

            for (to_route, target) in routes.iter().enumerate() {
                if to_route == from_route || !capacity.can_accept(loads[to_route], node) {
                    continue;
                }
                for to_pos in 0..=target.len() {
                    if let Some(cost) = insertion_delta(model, target, to_pos, node) {
                        keep_better(
                            &mut best,
                            Move::Relocate {
                                from_route,
                                from_pos,
                                to_route,
                                to_pos,
                                delta: cost - gain,
                            },
                        );
                    }
                }
            }
        }
    }

    best
}
