//! Two-phase search: construction, then capacity-aware local search.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use super::{decode, FirstSolutionStrategy, ImprovementStrategy, SearchConfig};
use crate::constructive::{capacity_packing, cheapest_insertion, path_cheapest_arc};
use crate::error::SolveError;
use crate::evaluation::{CapacityDimension, RouteEvaluator};
use crate::local_search::{best_or_opt, best_relocate, best_swap, best_two_opt, Move};
use crate::models::{RoutingModel, SearchStatus, Solution};

/// Solves a routing model under the given configuration.
///
/// Construction places every stop or fails with
/// [`SolveError::Infeasible`]. When the configured heuristic strands a stop
/// although the fleet has room for the total demand, stops are packed by
/// demand with [`capacity_packing`] before giving up.
///
/// The improvement phase only applies moves that strictly reduce total
/// distance and keep every route within capacity, so the returned distance
/// never exceeds the construction distance.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::models::{RoutingModel, SearchStatus};
/// use u_delivery::search::{solve, SearchConfig};
///
/// let dm = DistanceMatrix::from_data(3, vec![0, 4, 6, 4, 0, 3, 6, 3, 0]).unwrap();
/// let model = RoutingModel::new(dm, vec![0, 2, 3], 1, 10).unwrap();
///
/// let solution = solve(&model, &SearchConfig::default()).unwrap();
/// assert_eq!(solution.total_distance(), 13);
/// assert_eq!(solution.status(), SearchStatus::LocalOptimum);
/// ```
#[instrument(
    skip_all,
    fields(
        stops = model.num_stops(),
        vehicles = model.num_vehicles(),
        capacity = model.capacity(),
        strategy = ?config.first_solution,
    )
)]
pub fn solve(model: &RoutingModel, config: &SearchConfig) -> Result<Solution, SolveError> {
    let capacity = CapacityDimension::new(model);

    let mut construction = match config.first_solution {
        FirstSolutionStrategy::CheapestInsertion => cheapest_insertion(model, &capacity),
        FirstSolutionStrategy::PathCheapestArc => path_cheapest_arc(model, &capacity),
    };
    let fleet_capacity = capacity.capacity().saturating_mul(model.num_vehicles() as i64);
    if !construction.is_complete() && model.total_demand() <= fleet_capacity {
        debug!(
            unplaced = ?construction.unplaced,
            "greedy construction stranded stops, packing by demand"
        );
        let packed = capacity_packing(model, &capacity);
        if packed.unplaced.len() < construction.unplaced.len() {
            construction = packed;
        }
    }
    if !construction.is_complete() {
        warn!(
            unplaced = ?construction.unplaced,
            total_demand = model.total_demand(),
            "construction could not place every stop"
        );
        return Err(SolveError::Infeasible {
            unplaced: construction.unplaced,
        });
    }

    let evaluator = RouteEvaluator::new(model);
    let mut routes = construction.routes;
    let (construction_distance, _) = evaluator.evaluate_solution(&routes);
    debug!(distance = construction_distance, "construction finished");

    let (iterations, status) = match config.improvement {
        ImprovementStrategy::ConstructionOnly => (0, SearchStatus::ConstructionOnly),
        ImprovementStrategy::LocalSearch { max_iterations } => improve(
            model,
            &capacity,
            &mut routes,
            construction_distance,
            max_iterations,
            config.time_limit(),
        ),
    };

    let (_, violations) = evaluator.evaluate_solution(&routes);
    debug_assert!(violations.is_empty(), "search produced {violations:?}");

    let solution = Solution::new(
        decode(model, &routes),
        construction_distance,
        iterations,
        status,
    );
    info!(
        distance = solution.total_distance(),
        construction_distance,
        iterations,
        ?status,
        "search finished"
    );
    Ok(solution)
}

/// Applies best improving moves until none remains or a ceiling is hit.
fn improve(
    model: &RoutingModel,
    capacity: &CapacityDimension<'_>,
    routes: &mut [Vec<usize>],
    mut cost: i64,
    max_iterations: usize,
    time_limit: Option<Duration>,
) -> (usize, SearchStatus) {
    let started = Instant::now();
    let mut iterations = 0;

    loop {
        if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
            debug!(iterations, "time limit reached");
            return (iterations, SearchStatus::BudgetExhausted);
        }
        let Some(mv) = next_move(model, capacity, routes) else {
            return (iterations, SearchStatus::LocalOptimum);
        };
        if iterations >= max_iterations {
            debug!(iterations, "iteration budget reached");
            return (iterations, SearchStatus::BudgetExhausted);
        }

        mv.apply(routes);
        cost += mv.delta();
        iterations += 1;
        debug!(
            iteration = iterations,
            operator = mv.name(),
            delta = mv.delta(),
            cost,
            "applied move"
        );
    }
}

/// Best move of the first operator, in fixed order, that can improve.
fn next_move(
    model: &RoutingModel,
    capacity: &CapacityDimension<'_>,
    routes: &[Vec<usize>],
) -> Option<Move> {
    best_two_opt(model, routes)
        .or_else(|| best_or_opt(model, routes))
        .or_else(|| best_relocate(model, capacity, routes))
        .or_else(|| best_swap(model, capacity, routes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::local_search::test_support::plane_model;

    /// Greedy path extension visits 1, 2, 3 (cost 15); the best tour is
    /// 1, 3, 2 (cost 9).
    fn greedy_trap() -> RoutingModel {
        let dm = DistanceMatrix::from_data(
            4,
            vec![
                0, 1, 3, 10, //
                1, 0, 2, 3, //
                3, 2, 0, 2, //
                10, 3, 2, 0,
            ],
        )
        .expect("valid");
        RoutingModel::new(dm, vec![0, 1, 1, 1], 1, 10).expect("valid")
    }

    fn greedy_config() -> SearchConfig {
        SearchConfig::default().with_first_solution(FirstSolutionStrategy::PathCheapestArc)
    }

    #[test]
    fn test_construction_only() {
        let model = greedy_trap();
        let config = SearchConfig::construction_only()
            .with_first_solution(FirstSolutionStrategy::PathCheapestArc);
        let sol = solve(&model, &config).expect("feasible");
        assert_eq!(sol.status(), SearchStatus::ConstructionOnly);
        assert_eq!(sol.iterations(), 0);
        assert_eq!(sol.total_distance(), 15);
        assert_eq!(sol.construction_distance(), 15);
        assert_eq!(sol.routes()[0].nodes(), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_local_search_reaches_optimum() {
        let model = greedy_trap();
        let sol = solve(&model, &greedy_config()).expect("feasible");
        assert_eq!(sol.status(), SearchStatus::LocalOptimum);
        assert_eq!(sol.construction_distance(), 15);
        assert_eq!(sol.total_distance(), 9);
        assert!(sol.iterations() >= 1);
    }

    #[test]
    fn test_zero_budget_is_flagged() {
        let model = greedy_trap();
        let sol = solve(&model, &greedy_config().with_max_iterations(0)).expect("feasible");
        assert_eq!(sol.status(), SearchStatus::BudgetExhausted);
        assert!(sol.is_budget_exhausted());
        assert_eq!(sol.total_distance(), 15);
    }

    #[test]
    fn test_zero_time_limit_is_flagged() {
        let model = greedy_trap();
        let sol = solve(&model, &greedy_config().with_time_limit_ms(0)).expect("feasible");
        assert_eq!(sol.status(), SearchStatus::BudgetExhausted);
        assert_eq!(sol.iterations(), 0);
    }

    #[test]
    fn test_optimal_construction_is_local_optimum_without_budget() {
        let model = plane_model(&[(0.0, 0.0), (1.0, 0.0)], vec![0, 1], 1, 10);
        let config = SearchConfig::default().with_max_iterations(0);
        let sol = solve(&model, &config).expect("feasible");
        assert_eq!(sol.status(), SearchStatus::LocalOptimum);
        assert_eq!(sol.total_distance(), 200);
    }

    #[test]
    fn test_infeasible_reports_unplaced() {
        let model = plane_model(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)],
            vec![0, 3, 3],
            1,
            4,
        );
        let err = solve(&model, &SearchConfig::default()).expect_err("over capacity");
        assert_eq!(err.unplaced().map(<[usize]>::len), Some(1));
    }

    #[test]
    fn test_unreachable_stop_is_infeasible() {
        let dm = DistanceMatrix::from_meters(
            3,
            vec![
                0.0,
                5.0,
                f64::INFINITY,
                5.0,
                0.0,
                f64::INFINITY,
                f64::INFINITY,
                f64::INFINITY,
                0.0,
            ],
        )
        .expect("valid");
        let model = RoutingModel::new(dm, vec![0, 1, 1], 2, 10).expect("valid");
        for strategy in [
            FirstSolutionStrategy::CheapestInsertion,
            FirstSolutionStrategy::PathCheapestArc,
        ] {
            let config = SearchConfig::default().with_first_solution(strategy);
            let err = solve(&model, &config).expect_err("disconnected");
            assert_eq!(err, SolveError::Infeasible { unplaced: vec![2] });
        }
    }

    /// Distance-driven construction fills vehicle 0 with stops 2 and 3 (load
    /// 9), vehicle 1 with stop 1 (load 6) and strands stop 4; {1, 2} and
    /// {3, 4} fit exactly.
    fn stranding_model() -> RoutingModel {
        plane_model(
            &[(0.0, 0.0), (-5.0, 0.0), (1.0, 0.0), (2.0, 0.0), (-6.0, 0.0)],
            vec![0, 6, 4, 5, 5],
            2,
            10,
        )
    }

    #[test]
    fn test_greedy_strand_is_repacked() {
        let model = stranding_model();
        let capacity = CapacityDimension::new(&model);
        assert_eq!(cheapest_insertion(&model, &capacity).unplaced, vec![4]);
        assert_eq!(path_cheapest_arc(&model, &capacity).unplaced, vec![4]);

        for strategy in [
            FirstSolutionStrategy::CheapestInsertion,
            FirstSolutionStrategy::PathCheapestArc,
        ] {
            let config = SearchConfig::default().with_first_solution(strategy);
            let sol = solve(&model, &config).expect("fits in two vehicles");
            assert_eq!(sol.num_served(), 4);
            assert_eq!(sol.total_demand(), 20);
            assert!(sol.routes().iter().all(|r| r.total_demand() <= 10));
        }
    }

    #[test]
    fn test_unpackable_demand_stays_infeasible() {
        // 18 <= 20 but no two of the three stops share a vehicle
        let model = plane_model(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)],
            vec![0, 6, 6, 6],
            2,
            10,
        );
        let err = solve(&model, &SearchConfig::default()).expect_err("three loads of 6");
        assert_eq!(err.unplaced().map(<[usize]>::len), Some(1));
    }

    #[test]
    fn test_no_stops() {
        let model = plane_model(&[(0.0, 0.0)], vec![0], 2, 5);
        let sol = solve(&model, &SearchConfig::default()).expect("trivially feasible");
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.total_distance(), 0);
        assert!(sol.routes().iter().all(|r| r.nodes() == [0, 0]));
    }

    #[test]
    fn test_deterministic() {
        let model = plane_model(
            &[(0.0, 0.0), (3.0, 1.0), (-2.0, 4.0), (5.0, -3.0), (1.0, 1.0), (-4.0, -2.0)],
            vec![0, 2, 3, 1, 4, 2],
            3,
            5,
        );
        let config = SearchConfig::default();
        assert_eq!(solve(&model, &config), solve(&model, &config));
    }
}
