//! Local search operators for improving a feasible assignment.
//!
//! - [`best_two_opt`] — Intra-route segment reversal
//! - [`best_or_opt`] — Intra-route relocation of 1–3 consecutive stops
//! - [`best_relocate`] — Inter-route stop relocation
//! - [`best_swap`] — Inter-route stop exchange
//!
//! Every operator scans its neighborhood in index order and returns the move
//! with the most negative delta (first found on ties), or `None` if no move
//! strictly decreases total distance. Inter-route operators only return moves
//! that keep both routes within the capacity dimension.

mod or_opt;
mod relocate;
mod swap;
mod two_opt;

pub use or_opt::best_or_opt;
pub use relocate::best_relocate;
pub use swap::best_swap;
pub use two_opt::best_two_opt;

use crate::models::RoutingModel;

/// An improving change to a set of per-vehicle stop sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// Reverse `routes[route][start..=end]`.
    TwoOpt {
        /// Route index.
        route: usize,
        /// First reversed position.
        start: usize,
        /// Last reversed position.
        end: usize,
        /// Change in total distance.
        delta: i64,
    },
    /// Cut `len` stops starting at `from` and reinsert them, in order, at
    /// position `to` of the shortened route.
    OrOpt {
        /// Route index.
        route: usize,
        /// First moved position.
        from: usize,
        /// Segment length.
        len: usize,
        /// Insertion position after removal.
        to: usize,
        /// Change in total distance.
        delta: i64,
    },
    /// Move one stop to another route.
    Relocate {
        /// Source route.
        from_route: usize,
        /// Position in the source route.
        from_pos: usize,
        /// Target route.
        to_route: usize,
        /// Insertion position in the target route.
        to_pos: usize,
        /// Change in total distance.
        delta: i64,
    },
    /// Exchange two stops between routes.
    Swap {
        /// First route.
        route_a: usize,
        /// Position in the first route.
        pos_a: usize,
        /// Second route.
        route_b: usize,
        /// Position in the second route.
        pos_b: usize,
        /// Change in total distance.
        delta: i64,
    },
}

impl Move {
    /// Change in total distance if applied (negative = improvement).
    pub fn delta(&self) -> i64 {
        match *self {
            Move::TwoOpt { delta, .. }
            | Move::OrOpt { delta, .. }
            | Move::Relocate { delta, .. }
            | Move::Swap { delta, .. } => delta,
        }
    }

    /// Operator name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Move::TwoOpt { .. } => "two_opt",
            Move::OrOpt { .. } => "or_opt",
            Move::Relocate { .. } => "relocate",
            Move::Swap { .. } => "swap",
        }
    }

    /// Applies this move to the stop sequences it was computed on.
    pub fn apply(&self, routes: &mut [Vec<usize>]) {
        match *self {
            Move::TwoOpt { route, start, end, .. } => routes[route][start..=end].reverse(),
            Move::OrOpt {
                route,
                from,
                len,
                to,
                ..
            } => {
                let segment: Vec<usize> = routes[route].drain(from..from + len).collect();
                routes[route].splice(to..to, segment);
            }
            Move::Relocate {
                from_route,
                from_pos,
                to_route,
                to_pos,
                ..
            } => {
                let node = routes[from_route].remove(from_pos);
                routes[to_route].insert(to_pos, node);
            }
            Move::Swap {
                route_a,
                pos_a,
                route_b,
                pos_b,
                ..
            } => {
                let a = routes[route_a][pos_a];
                routes[route_a][pos_a] = routes[route_b][pos_b];
                routes[route_b][pos_b] = a;
            }
        }
    }
}

/// Node before position `pos` (the depot at the start).
fn prev_of(route: &[usize], pos: usize, depot: usize) -> usize {
    if pos == 0 {
        depot
    } else {
        route[pos - 1]
    }
}

/// Node at position `pos` (the depot past the end).
fn at_or_depot(route: &[usize], pos: usize, depot: usize) -> usize {
    route.get(pos).copied().unwrap_or(depot)
}

/// Saving from cutting `route[pos]` out: `d(p, n) + d(n, q) - d(p, q)`.
fn removal_gain(model: &RoutingModel, route: &[usize], pos: usize) -> Option<i64> {
    let depot = model.depot();
    let prev = prev_of(route, pos, depot);
    let next = at_or_depot(route, pos + 1, depot);
    let node = route[pos];
    Some(model.arc_cost(prev, node)? + model.arc_cost(node, next)? - model.arc_cost(prev, next)?)
}

/// Keeps the more improving of two candidate moves, the earlier one on ties.
fn keep_better(best: &mut Option<Move>, candidate: Move) {
    if candidate.delta() < 0 && best.as_ref().is_none_or(|b| candidate.delta() < b.delta()) {
        *best = Some(candidate);
    }
}

/// Total distance of a set of stop sequences, `None` if any arc is unreachable.
pub fn total_cost(model: &RoutingModel, routes: &[Vec<usize>]) -> Option<i64> {
    routes.iter().map(|r| model.route_cost(r)).sum()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::distance::DistanceMatrix;
    use crate::models::RoutingModel;

    /// Model over points on a plane, Euclidean distance ×100 truncated.
    pub fn plane_model(
        points: &[(f64, f64)],
        demands: Vec<i32>,
        vehicles: usize,
        capacity: i32,
    ) -> RoutingModel {
        let n = points.len();
        let mut dm = DistanceMatrix::new(n);
        for (i, a) in points.iter().enumerate() {
            for (j, b) in points.iter().enumerate() {
                let d = ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt();
                dm.set(i, j, (d * 100.0) as i64);
            }
        }
        RoutingModel::new(dm, demands, vehicles, capacity).expect("valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_two_opt() {
        let mut routes = vec![vec![1, 2, 3, 4]];
        Move::TwoOpt {
            route: 0,
            start: 1,
            end: 3,
            delta: -1,
        }
        .apply(&mut routes);
        assert_eq!(routes, vec![vec![1, 4, 3, 2]]);
    }

    #[test]
    fn test_apply_or_opt() {
        let mut routes = vec![vec![1, 2, 3, 4, 5]];
        Move::OrOpt {
            route: 0,
            from: 0,
            len: 2,
            to: 2,
            delta: -1,
        }
        .apply(&mut routes);
        assert_eq!(routes, vec![vec![3, 4, 1, 2, 5]]);
    }

    #[test]
    fn test_apply_relocate_and_swap() {
        let mut routes = vec![vec![1, 2], vec![3]];
        Move::Relocate {
            from_route: 0,
            from_pos: 0,
            to_route: 1,
            to_pos: 1,
            delta: -1,
        }
        .apply(&mut routes);
        assert_eq!(routes, vec![vec![2], vec![3, 1]]);

        Move::Swap {
            route_a: 0,
            pos_a: 0,
            route_b: 1,
            pos_b: 0,
            delta: -1,
        }
        .apply(&mut routes);
        assert_eq!(routes, vec![vec![3], vec![2, 1]]);
    }

    #[test]
    fn test_keep_better_ignores_non_improving() {
        let mut best = None;
        keep_better(
            &mut best,
            Move::TwoOpt {
                route: 0,
                start: 0,
                end: 1,
                delta: 0,
            },
        );
        assert!(best.is_none());
        keep_better(
            &mut best,
            Move::TwoOpt {
                route: 0,
                start: 0,
                end: 1,
                delta: -5,
            },
        );
        keep_better(
            &mut best,
            Move::TwoOpt {
                route: 0,
                start: 1,
                end: 2,
                delta: -5,
            },
        );
        assert_eq!(
            best,
            Some(Move::TwoOpt {
                route: 0,
                start: 0,
                end: 1,
                delta: -5,
            })
        );
    }

    #[test]
    fn test_total_cost() {
        let model = test_support::plane_model(
            &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
            vec![0, 1, 1],
            2,
            5,
        );
        assert_eq!(total_cost(&model, &[vec![1], vec![2]]), Some(400));
        assert_eq!(total_cost(&model, &[vec![], vec![]]), Some(0));
    }
}
