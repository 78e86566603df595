//! Intra-route Or-opt.
//!
//! # Algorithm
//!
//! Cuts a segment of 1, 2, or 3 consecutive stops out of a route and
//! reinserts it, keeping its direction, at every other position of the same
//! route. Load is unchanged.
//!
//! # Complexity
//!
//! O(n²) per scan.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::{at_or_depot, keep_better, prev_of, Move};
use crate::models::RoutingModel;

/// Longest segment moved by Or-opt.
const MAX_SEGMENT: usize = 3;

/// Finds the best improving segment relocation within a route.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::local_search::{best_or_opt, total_cost};
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
/// let mut routes = vec![vec![3, 1, 2]];
/// let before = total_cost(&model, &routes).unwrap();
/// let mv = best_or_opt(&model, &routes).unwrap();
/// mv.apply(&mut routes);
/// assert_eq!(total_cost(&model, &routes).unwrap(), before + mv.delta());
/// ```
pub fn best_or_opt(model: &RoutingModel, routes: &[Vec<usize>]) -> Option<Move> {
    let mut best = None;

    for (r, route) in routes.iter().enumerate() {
        let n = route.len();
        for len in 1..=MAX_SEGMENT.min(n.saturating_sub(1)) {
            for from in 0..=(n - len) {
                let Some(gain) = segment_removal_gain(model, route, from, len) else {
                    continue;
                };
                let rest: Vec<usize> = route[..from]
                    .iter()
                    .chain(&route[from + len..])
                    .copied()
                    .collect();
                let segment = &route[from..from + len];

                for to in 0..=rest.len() {
                    if to == from {
                        continue;
                    }
                    if let Some(cost) = segment_insertion_cost(model, &rest, to, segment) {
                        keep_better(
                            &mut best,
                            Move::OrOpt {
                                route: r,
                                from,
                                len,
                                to,
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

/// Saving from cutting `route[from..from + len]` and joining its neighbors.
fn segment_removal_gain(
    model: &RoutingModel,
    route: &[usize],
    from: usize,
    len: usize,
) -> Option<i64> {
    let depot = model.depot();
    let prev = prev_of(route, from, depot);
    let next = at_or_depot(route, from + len, depot);
    let (first, last) = (route[from], route[from + len - 1]);
    Some(model.arc_cost(prev, first)? + model.arc_cost(last, next)? - model.arc_cost(prev, next)?)
}

/// Cost of placing `segment` before `route[to]`.
fn segment_insertion_cost(
    model: &RoutingModel,
    route: &[usize],
    to: usize,
    segment: &[usize],
) -> Option<i64> {
    let depot = model.depot();
    let prev = prev_of(route, to, depot);
    let next = at_or_depot(route, to, depot);
    let (first, last) = (segment[0], segment[segment.len() - 1]);
    Some(model.arc_cost(prev, first)? + model.arc_cost(last, next)? - model.arc_cost(prev, next)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::test_support::plane_model;
    use crate::local_search::total_cost;

    fn line_model() -> RoutingModel {
        plane_model(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)],
            vec![0, 1, 1, 1, 1],
            1,
            10,
        )
    }

    #[test]
    fn test_moves_misplaced_stop() {
        let model = line_model();
        let mut routes = vec![vec![1, 4, 2, 3]];
        let before = total_cost(&model, &routes).expect("reachable");
        let mv = best_or_opt(&model, &routes).expect("improving move");
        mv.apply(&mut routes);
        let after = total_cost(&model, &routes).expect("reachable");
        assert_eq!(after - before, mv.delta());
        assert_eq!(after, 800);
    }

    #[test]
    fn test_moves_segment() {
        let model = line_model();
        // segment [3, 4] belongs at the end
        let mut routes = vec![vec![3, 4, 1, 2]];
        let mv = best_or_opt(&model, &routes).expect("improving move");
        assert!(mv.delta() < 0);
        mv.apply(&mut routes);
        let mut served = routes[0].clone();
        served.sort_unstable();
        assert_eq!(served, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_optimal_route_has_no_move() {
        let model = line_model();
        assert_eq!(best_or_opt(&model, &[vec![1, 2, 3, 4]]), None);
    }

    #[test]
    fn test_single_stop_route() {
        let model = line_model();
        assert_eq!(best_or_opt(&model, &[vec![2]]), None);
    }
}
