//! Route evaluator that computes distance, load, and feasibility.

use super::CapacityDimension;
use crate::models::{Route, RoutingModel, Violation, ViolationType};

/// Evaluates stop sequences against a routing model: travel distance,
/// cumulative load, and constraint checks (capacity, coverage, anchoring,
/// reachability).
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::evaluation::RouteEvaluator;
/// use u_delivery::models::RoutingModel;
///
/// let dm = DistanceMatrix::from_data(3, vec![0, 4, 6, 4, 0, 3, 6, 3, 0]).unwrap();
/// let model = RoutingModel::new(dm, vec![0, 2, 3], 1, 10).unwrap();
///
/// let evaluator = RouteEvaluator::new(&model);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert_eq!(route.nodes(), &[0, 1, 2, 0]);
/// assert_eq!(route.total_distance(), 13);
/// assert_eq!(route.total_demand(), 5);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    model: &'a RoutingModel,
    capacity: CapacityDimension<'a>,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given model.
    pub fn new(model: &'a RoutingModel) -> Self {
        Self {
            model,
            capacity: CapacityDimension::new(model),
        }
    }

    /// Builds a depot-anchored route from a stop sequence (depot excluded).
    ///
    /// Returns the route and any violations local to it. Unreachable arcs
    /// contribute nothing to the distance.
    pub fn build_route(&self, vehicle_id: usize, stops: &[usize]) -> (Route, Vec<Violation>) {
        let depot = self.model.depot();
        let n = self.model.num_nodes();
        let mut violations = Vec::new();
        let mut total_distance = 0;
        let mut load = 0;
        let mut prev = depot;

        for &node in stops {
            if node >= n {
                violations.push(Violation::new(ViolationType::UnknownNode { node }));
                continue;
            }
            if node == depot {
                violations.push(Violation::new(ViolationType::DepotInsideRoute {
                    route_index: vehicle_id,
                }));
                continue;
            }
            total_distance += self.arc(prev, node, &mut violations);
            load += self.capacity.transit(node);
            prev = node;
        }
        if prev != depot {
            total_distance += self.arc(prev, depot, &mut violations);
        }

        if load > self.capacity.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: vehicle_id,
                load,
                capacity: self.model.capacity(),
            }));
        }

        let mut nodes = Vec::with_capacity(stops.len() + 2);
        nodes.push(depot);
        nodes.extend_from_slice(stops);
        nodes.push(depot);

        (Route::new(vehicle_id, nodes, total_distance, load), violations)
    }

    /// Evaluates one stop sequence per vehicle, returning the routes and all
    /// violations including coverage (missing or duplicated stops).
    pub fn evaluate_routes(&self, routes: &[Vec<usize>]) -> (Vec<Route>, Vec<Violation>) {
        let mut built = Vec::with_capacity(routes.len());
        let mut violations = Vec::new();
        let mut visits = vec![0usize; self.model.num_nodes()];

        for (vehicle_id, stops) in routes.iter().enumerate() {
            let (route, mut route_violations) = self.build_route(vehicle_id, stops);
            for &node in stops {
                if let Some(count) = visits.get_mut(node) {
                    *count += 1;
                }
            }
            built.push(route);
            violations.append(&mut route_violations);
        }

        for node in self.model.stops() {
            match visits[node] {
                0 => violations.push(Violation::new(ViolationType::MissingStop { node })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::DuplicateVisit { node })),
            }
        }

        (built, violations)
    }

    /// Evaluates a caller-supplied plan of full node sequences, each expected
    /// to start and end at the depot (e.g. a pre-assigned dispatch).
    pub fn evaluate_plan(&self, plan: &[Vec<usize>]) -> (Vec<Route>, Vec<Violation>) {
        let depot = self.model.depot();
        let mut anchoring = Vec::new();
        let stops: Vec<Vec<usize>> = plan
            .iter()
            .enumerate()
            .map(|(route_index, nodes)| match nodes.as_slice() {
                [first, inner @ .., last] if *first == depot && *last == depot => inner.to_vec(),
                _ => {
                    anchoring.push(Violation::new(ViolationType::NotAnchored { route_index }));
                    nodes.iter().copied().filter(|&n| n != depot).collect()
                }
            })
            .collect();

        let (routes, mut violations) = self.evaluate_routes(&stops);
        anchoring.append(&mut violations);
        (routes, anchoring)
    }

    /// Total distance of a route set and whether it is a feasible solution.
    pub fn evaluate_solution(&self, routes: &[Vec<usize>]) -> (i64, Vec<Violation>) {
        let (built, violations) = self.evaluate_routes(routes);
        (built.iter().map(Route::total_distance).sum(), violations)
    }

    fn arc(&self, from: usize, to: usize, violations: &mut Vec<Violation>) -> i64 {
        self.model.arc_cost(from, to).unwrap_or_else(|| {
            violations.push(Violation::new(ViolationType::UnreachableArc { from, to }));
            0
        })
    }
}
