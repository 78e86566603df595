//! Depot-anchored vehicle route.

use serde::{Deserialize, Serialize};

/// An ordered sequence of node ids driven by a single vehicle.
///
/// The sequence always begins and ends at the depot; an unused vehicle has
/// the route `[depot, depot]`.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Route;
///
/// let route = Route::new(1, vec![0, 4, 2, 0], 1_500, 7);
/// assert_eq!(route.vehicle_id(), 1);
/// assert_eq!(route.stops(), &[4, 2]);
/// assert_eq!(route.len(), 2);
/// assert!(!route.is_empty());
///
/// let idle = Route::empty(0, 0);
/// assert_eq!(idle.nodes(), &[0, 0]);
/// assert!(idle.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    nodes: Vec<usize>,
    total_distance: i64,
    total_demand: i64,
}

impl Route {
    /// Creates a route from a full depot-anchored node sequence.
    pub fn new(
        vehicle_id: usize,
        nodes: Vec<usize>,
        total_distance: i64,
        total_demand: i64,
    ) -> Self {
        Self {
            vehicle_id,
            nodes,
            total_distance,
            total_demand,
        }
    }

    /// Creates the depot-to-depot route of an unused vehicle.
    pub fn empty(vehicle_id: usize, depot: usize) -> Self {
        Self::new(vehicle_id, vec![depot, depot], 0, 0)
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Full node sequence including the depot at both ends.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Stops in visit order, without the depot endpoints.
    pub fn stops(&self) -> &[usize] {
        if self.nodes.len() < 2 {
            return &[];
        }
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Number of stops visited.
    pub fn len(&self) -> usize {
        self.stops().len()
    }

    /// Returns `true` if the vehicle is unused.
    pub fn is_empty(&self) -> bool {
        self.stops().is_empty()
    }

    /// Travel distance from depot back to depot, in meters.
    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    /// Sum of the demands delivered on this route.
    pub fn total_demand(&self) -> i64 {
        self.total_demand
    }
}
