//! Solution, search status, and violation types.

use serde::{Deserialize, Serialize};

use super::{Route, Stop};

/// A reason a set of routes is not a feasible solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Cumulative demand exceeds the vehicle capacity.
    CapacityExceeded {
        /// Vehicle (route) index.
        route_index: usize,
        /// Load carried by the route.
        load: i64,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A stop is visited more than once across all routes.
    DuplicateVisit {
        /// Node visited twice.
        node: usize,
    },
    /// A stop is not visited by any route.
    MissingStop {
        /// Node left out.
        node: usize,
    },
    /// The depot appears in the interior of a route.
    DepotInsideRoute {
        /// Vehicle (route) index.
        route_index: usize,
    },
    /// The route does not start and end at the depot.
    NotAnchored {
        /// Vehicle (route) index.
        route_index: usize,
    },
    /// The route uses an arc with no finite distance.
    UnreachableArc {
        /// Arc origin.
        from: usize,
        /// Arc destination.
        to: usize,
    },
    /// A node id outside the model.
    UnknownNode {
        /// Offending id.
        node: usize,
    },
}

/// A constraint violation in a route set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// How the improvement phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// No improvement phase was configured.
    ConstructionOnly,
    /// No improving move remained.
    LocalOptimum,
    /// The iteration or time ceiling stopped the search early. The solution
    /// is feasible but may not be locally optimal.
    BudgetExhausted,
}

/// A feasible plan: one route per vehicle.
///
/// # Examples
///
/// ```
/// use u_delivery::models::{Route, SearchStatus, Solution};
///
/// let sol = Solution::new(
///     vec![Route::new(0, vec![0, 1, 0], 200, 4), Route::empty(1, 0)],
///     200,
///     0,
///     SearchStatus::LocalOptimum,
/// );
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 1);
/// assert_eq!(sol.total_distance(), 200);
/// assert!(!sol.is_budget_exhausted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    total_distance: i64,
    construction_distance: i64,
    iterations: usize,
    status: SearchStatus,
}

impl Solution {
    /// Creates a solution. `construction_distance` is the cost before improvement.
    pub fn new(
        routes: Vec<Route>,
        construction_distance: i64,
        iterations: usize,
        status: SearchStatus,
    ) -> Self {
        let total_distance = routes.iter().map(Route::total_distance).sum();
        Self {
            routes,
            total_distance,
            construction_distance,
            iterations,
            status,
        }
    }

    /// Routes, indexed by vehicle id.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes (one per vehicle, used or not).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of vehicles with at least one stop.
    pub fn num_used_vehicles(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Total number of stops served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Total distance across all routes, in meters.
    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    /// Total distance right after construction, before any improvement.
    pub fn construction_distance(&self) -> i64 {
        self.construction_distance
    }

    /// Total demand delivered across all routes.
    pub fn total_demand(&self) -> i64 {
        self.routes.iter().map(Route::total_demand).sum()
    }

    /// Improving moves applied after construction.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// How the search ended.
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Returns `true` if a budget ceiling cut the improvement phase short.
    pub fn is_budget_exhausted(&self) -> bool {
        self.status == SearchStatus::BudgetExhausted
    }

    /// Returns the caller's stops of a route in visit order.
    ///
    /// Node `i` maps to `stops[i - 1]`; ids outside `stops` are skipped.
    pub fn stops_of<'a, P>(&self, route: &Route, stops: &'a [Stop<P>]) -> Vec<&'a Stop<P>> {
        route
            .stops()
            .iter()
            .filter_map(|&node| node.checked_sub(1).and_then(|i| stops.get(i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn sample() -> Solution {
        Solution::new(
            vec![
                Route::new(0, vec![0, 2, 0], 50, 10),
                Route::new(1, vec![0, 1, 3, 0], 80, 15),
                Route::empty(2, 0),
            ],
            160,
            3,
            SearchStatus::BudgetExhausted,
        )
    }

    #[test]
    fn test_solution_totals() {
        let sol = sample();
        assert_eq!(sol.num_routes(), 3);
        assert_eq!(sol.num_used_vehicles(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.total_distance(), 130);
        assert_eq!(sol.construction_distance(), 160);
        assert_eq!(sol.total_demand(), 25);
        assert_eq!(sol.iterations(), 3);
        assert!(sol.is_budget_exhausted());
    }

    #[test]
    fn test_stops_of_maps_payloads() {
        let sol = sample();
        let stops: Vec<Stop<&str>> = ["a", "b", "c"]
            .iter()
            .map(|&p| Stop::new(Coordinate::new(0.0, 0.0), 1, p))
            .collect();
        let labels: Vec<&str> = sol
            .stops_of(&sol.routes()[1], &stops)
            .iter()
            .map(|s| s.payload)
            .collect();
        assert_eq!(labels, vec!["a", "c"]);
        assert!(sol.stops_of(&sol.routes()[2], &stops).is_empty());
    }

    #[test]
    fn test_violation_types() {
        let v = Violation::new(ViolationType::CapacityExceeded {
            route_index: 0,
            load: 250,
            capacity: 200,
        });
        assert!(matches!(
            v.kind,
            ViolationType::CapacityExceeded { load: 250, .. }
        ));
    }
}
