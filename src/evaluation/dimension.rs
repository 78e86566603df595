//! Capacity dimension: cumulative demand along a route.

use crate::models::RoutingModel;

/// Accumulated-quantity constraint for every vehicle of a model.
///
/// The cumul starts at 0 at the depot and grows by `demand[node]` at each
/// visit; it must stay within the vehicle capacity at every node. Demands
/// are non-negative, so the cumul is monotonic and the final load bounds it.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::evaluation::CapacityDimension;
/// use u_delivery::models::RoutingModel;
///
/// let dm = DistanceMatrix::new(4);
/// let model = RoutingModel::new(dm, vec![0, 2, 3, 4], 2, 6).unwrap();
/// let capacity = CapacityDimension::new(&model);
///
/// assert_eq!(capacity.cumuls(&[1, 2]), vec![0, 2, 5, 5]);
/// assert!(capacity.is_feasible(&[1, 2]));
/// assert!(!capacity.is_feasible(&[2, 3]));
/// assert!(capacity.can_accept(2, 3));
/// assert!(!capacity.can_accept(5, 1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CapacityDimension<'a> {
    demands: &'a [i32],
    capacity: i64,
}

impl<'a> CapacityDimension<'a> {
    /// Declares the dimension over the model's demands and fleet capacity.
    pub fn new(model: &'a RoutingModel) -> Self {
        Self {
            demands: model.demands(),
            capacity: i64::from(model.capacity()),
        }
    }

    /// Upper bound of the cumul at every node.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Quantity added when visiting `node`.
    pub fn transit(&self, node: usize) -> i64 {
        i64::from(self.demands[node])
    }

    /// Cumul at the start depot, after each stop, and at the end depot.
    pub fn cumuls(&self, stops: &[usize]) -> Vec<i64> {
        let mut cumuls = Vec::with_capacity(stops.len() + 2);
        let mut load = 0;
        cumuls.push(load);
        for &node in stops {
            load += self.transit(node);
            cumuls.push(load);
        }
        cumuls.push(load);
        cumuls
    }

    /// Total quantity delivered by a stop sequence.
    pub fn load(&self, stops: &[usize]) -> i64 {
        stops.iter().map(|&n| self.transit(n)).sum()
    }

    /// Returns `true` if the cumul never exceeds capacity along the route.
    pub fn is_feasible(&self, stops: &[usize]) -> bool {
        self.cumuls(stops).iter().all(|&c| c <= self.capacity)
    }

    /// Returns `true` if a route carrying `load` can also serve `node`.
    pub fn can_accept(&self, load: i64, node: usize) -> bool {
        load + self.transit(node) <= self.capacity
    }

    /// Remaining room on a route carrying `load`.
    pub fn slack(&self, load: i64) -> i64 {
        self.capacity - load
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    fn model() -> RoutingModel {
        RoutingModel::new(DistanceMatrix::new(4), vec![0, 3, 4, 5], 2, 8).expect("valid")
    }

    #[test]
    fn test_empty_route() {
        let m = model();
        let dim = CapacityDimension::new(&m);
        assert_eq!(dim.cumuls(&[]), vec![0, 0]);
        assert_eq!(dim.load(&[]), 0);
        assert!(dim.is_feasible(&[]));
        assert_eq!(dim.slack(0), 8);
    }

    #[test]
    fn test_cumuls_are_monotonic() {
        let m = model();
        let dim = CapacityDimension::new(&m);
        let cumuls = dim.cumuls(&[3, 1, 2]);
        assert_eq!(cumuls, vec![0, 5, 8, 12, 12]);
        assert!(cumuls.windows(2).all(|w| w[0] <= w[1]));
        assert!(!dim.is_feasible(&[3, 1, 2]));
    }

    #[test]
    fn test_boundary_is_feasible() {
        let m = model();
        let dim = CapacityDimension::new(&m);
        assert!(dim.is_feasible(&[1, 3]));
        assert_eq!(dim.load(&[1, 3]), 8);
        assert_eq!(dim.slack(8), 0);
        assert!(!dim.can_accept(8, 1));
    }

    #[test]
    fn test_depot_transit_is_zero() {
        let m = model();
        let dim = CapacityDimension::new(&m);
        assert_eq!(dim.transit(0), 0);
        assert_eq!(dim.capacity(), 8);
    }
}
