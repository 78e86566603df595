//! Routing graph model.

use std::ops::Range;

use super::{Fleet, Node, Vehicle};
use crate::distance::DistanceMatrix;
use crate::error::InputError;

/// A capacitated routing problem over nodes `{depot, stops}`.
///
/// Node 0 is the depot; every vehicle starts and ends there. The model owns
/// its distance matrix for the lifetime of one solve.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::models::RoutingModel;
///
/// let dm = DistanceMatrix::from_data(3, vec![0, 4, 6, 4, 0, 3, 6, 3, 0]).unwrap();
/// let model = RoutingModel::new(dm, vec![0, 2, 3], 1, 10).unwrap();
/// assert_eq!(model.num_stops(), 2);
/// assert_eq!(model.arc_cost(1, 2), Some(3));
/// assert_eq!(model.route_cost(&[1, 2]), Some(13));
/// ```
#[derive(Debug, Clone)]
pub struct RoutingModel {
    distances: DistanceMatrix,
    demands: Vec<i32>,
    vehicles: Vec<Vehicle>,
    capacity: i32,
}

impl RoutingModel {
    /// Validates the inputs and builds the model.
    ///
    /// A capacity smaller than some demand is accepted here; the search
    /// reports it as infeasible.
    pub fn new(
        distances: DistanceMatrix,
        demands: Vec<i32>,
        vehicle_count: usize,
        capacity: i32,
    ) -> Result<Self, InputError> {
        if vehicle_count == 0 {
            return Err(InputError::NoVehicles);
        }
        if capacity <= 0 {
            return Err(InputError::NonPositiveCapacity(capacity));
        }
        if demands.len() != distances.size() {
            return Err(InputError::LengthMismatch {
                expected: distances.size(),
                actual: demands.len(),
            });
        }
        match demands.first() {
            None => return Err(InputError::EmptyInput),
            Some(&d) if d != 0 => return Err(InputError::DepotDemand(d)),
            Some(_) => {}
        }
        if let Some((node, &demand)) = demands.iter().enumerate().find(|(_, &d)| d < 0) {
            return Err(InputError::NegativeDemand { node, demand });
        }

        let vehicles = (0..vehicle_count).map(|id| Vehicle::new(id, capacity)).collect();
        Ok(Self {
            distances,
            demands,
            vehicles,
            capacity,
        })
    }

    /// Builds the model from located nodes (depot first) and a fleet.
    pub fn from_nodes(nodes: &[Node], fleet: Fleet) -> Result<Self, InputError> {
        let coordinates: Vec<_> = nodes.iter().map(Node::coordinate).collect();
        let distances = DistanceMatrix::from_coordinates(&coordinates)?;
        let demands = nodes.iter().map(Node::demand).collect();
        Self::new(distances, demands, fleet.vehicles, fleet.capacity)
    }

    /// The depot node id.
    pub fn depot(&self) -> usize {
        0
    }

    /// Number of nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.demands.len()
    }

    /// Number of stops (excluding depot).
    pub fn num_stops(&self) -> usize {
        self.num_nodes() - 1
    }

    /// Stop node ids, ascending.
    pub fn stops(&self) -> Range<usize> {
        1..self.num_nodes()
    }

    /// The fleet, indexed by vehicle id.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Uniform vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Demand of a node.
    pub fn demand(&self, node: usize) -> i32 {
        self.demands[node]
    }

    /// Demands aligned with node ids.
    pub fn demands(&self) -> &[i32] {
        &self.demands
    }

    /// Sum of all stop demands.
    pub fn total_demand(&self) -> i64 {
        self.demands.iter().map(|&d| i64::from(d)).sum()
    }

    /// The underlying distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Cost of travelling from `from` to `to`, `None` if unreachable.
    pub fn arc_cost(&self, from: usize, to: usize) -> Option<i64> {
        self.distances.arc(from, to)
    }

    /// Cost of `depot → stops[0] → … → stops[n-1] → depot`.
    ///
    /// Returns `Some(0)` for an empty sequence and `None` if any arc is unreachable.
    pub fn route_cost(&self, stops: &[usize]) -> Option<i64> {
        let (Some(&first), Some(&last)) = (stops.first(), stops.last()) else {
            return Some(0);
        };
        let depot = self.depot();
        let mut cost = self.arc_cost(depot, first)?;
        for w in stops.windows(2) {
            cost += self.arc_cost(w[0], w[1])?;
        }
        cost += self.arc_cost(last, depot)?;
        Some(cost)
    }
}
