//! Intra-route 2-opt.
//!
//! # Algorithm
//!
//! For each pair of positions `i < j` in a route, reversing `r[i..=j]`
//! replaces the edges `(p, r[i])` and `(r[j], q)` with `(p, r[j])` and
//! `(r[i], q)`:
//!
//! ```text
//! delta = d(p, r[j]) + d(r[i], q) - d(p, r[i]) - d(r[j], q)
//! ```
//!
//! plus, for asymmetric costs, the difference between the segment driven
//! backwards and forwards. Load is unchanged, so capacity is never at stake.
//!
//! # Complexity
//!
//! O(n³) per scan (O(n²) pairs, O(n) segment cost each).
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::{at_or_depot, keep_better, prev_of, Move};
use crate::models::RoutingModel;

/// Finds the best improving segment reversal over all routes.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::local_search::{best_two_opt, total_cost};
/// use u_delivery::models::RoutingModel;
///
/// let dm = DistanceMatrix::from_data(4, vec![
///     0, 1, 2, 3,
///     1, 0, 1, 2,
///     2, 1, 0, 1,
///     3, 2, 1, 0,
/// ]).unwrap();
/// let model = RoutingModel::new(dm, vec![0, 1, 1, 1], 1, 10).unwrap();
///
/// let mut routes = vec![vec![2, 1, 3]];
/// let mv = best_two_opt(&model, &routes).unwrap();
/// mv.apply(&mut routes);
/// assert_eq!(total_cost(&model, &routes), Some(6));
/// ```
pub fn best_two_opt(model: &RoutingModel, routes: &[Vec<usize>]) -> Option<Move> {
    let mut best = None;

    for (r, route) in routes.iter().enumerate() {
        for start in 0..route.len() {
            for end in (start + 1)..route.len() {
                if let Some(delta) = reversal_delta(model, route, start, end) {
                    keep_better(
                        &mut best,
                        Move::TwoOpt {
                            route: r,
                            start,
                            end,
                            delta,
                        },
                    );
                }
            }
        }
    }

    best
}

/// Distance change from reversing `route[start..=end]`.
fn reversal_delta(model: &RoutingModel, route: &[usize], start: usize, end: usize) -> Option<i64> {
    let depot = model.depot();
    let prev = prev_of(route, start, depot);
    let next = at_or_depot(route, end + 1, depot);

    let old_edges = model.arc_cost(prev, route[start])? + model.arc_cost(route[end], next)?;
    let new_edges = model.arc_cost(prev, route[end])? + model.arc_cost(route[start], next)?;

    let mut forward = 0;
    let mut backward = 0;
    for w in route[start..=end].windows(2) {
        forward += model.arc_cost(w[0], w[1])?;
        backward += model.arc_cost(w[1], w[0])?;
    }

    Some(new_edges - old_edges + backward - forward)
}
