//! Demand-first packing.
//!
//! # Algorithm
//!
//! Greedy constructions decide placement by distance and can fill vehicles
//! in a way that strands a stop although the fleet has room for everything.
//! This construction decides placement by demand instead:
//!
//! 1. Stops without a finite arc to and from the depot are unplaced.
//! 2. The remaining stops, heaviest first, are assigned to vehicles by a
//!    depth-first search over vehicle loads. Vehicles with equal load are
//!    interchangeable, so only the first of them is tried. A branch is cut as
//!    soon as the remaining demand exceeds the remaining slack.
//! 3. If the search runs out of steps, first-fit decreasing is used instead
//!    and whatever does not fit is unplaced.
//! 4. Each vehicle orders its stops by cheapest insertion.
//!
//! # Complexity
//!
//! Exponential in the worst case, capped at [`MAX_STEPS`] search nodes, plus
//! O(k³) ordering per vehicle with k stops.

use super::{insertion_delta, Construction};
use crate::evaluation::CapacityDimension;
use crate::models::RoutingModel;

/// Search nodes explored before falling back to first-fit decreasing.
pub const MAX_STEPS: usize = 200_000;

/// Assigns stops to vehicles by demand, then orders each vehicle's stops.
///
/// Finds a complete assignment whenever one exists and the search fits in
/// [`MAX_STEPS`].
///
/// # Examples
///
/// ```
/// use u_delivery::constructive::capacity_packing;
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::evaluation::CapacityDimension;
/// use u_delivery::models::RoutingModel;
///
/// let dm = DistanceMatrix::from_data(4, vec![
///     0, 1, 1, 1,
///     1, 0, 1, 1,
///     1, 1, 0, 1,
///     1, 1, 1, 0,
/// ]).unwrap();
/// // 4 + 5 + 6 over two vehicles of 10
/// let model = RoutingModel::new(dm, vec![0, 4, 5, 6], 2, 10).unwrap();
/// let capacity = CapacityDimension::new(&model);
///
/// let construction = capacity_packing(&model, &capacity);
/// assert!(construction.is_complete());
/// assert_eq!(construction.routes, vec![vec![3, 1], vec![2]]);
/// ```
pub fn capacity_packing(model: &RoutingModel, capacity: &CapacityDimension<'_>) -> Construction {
    let depot = model.depot();
    let (mut items, mut unplaced): (Vec<usize>, Vec<usize>) = model.stops().partition(|&n| {
        model.arc_cost(depot, n).is_some() && model.arc_cost(n, depot).is_some()
    });
    items.sort_by_key(|&n| (std::cmp::Reverse(capacity.transit(n)), n));

    let mut packing = Packing {
        demands: items.iter().map(|&n| capacity.transit(n)).collect(),
        capacity: capacity.capacity(),
        loads: vec![0; model.num_vehicles()],
        bins: vec![0; items.len()],
        steps: 0,
    };
    let remaining = packing.demands.iter().sum();

    let mut assigned: Vec<Vec<usize>> = vec![Vec::new(); model.num_vehicles()];
    if packing.place(0, remaining) {
        for (&node, &bin) in items.iter().zip(&packing.bins) {
            assigned[bin].push(node);
        }
    } else {
        let mut loads = vec![0i64; model.num_vehicles()];
        for &node in &items {
            match (0..loads.len()).find(|&v| capacity.can_accept(loads[v], node)) {
                Some(v) => {
                    loads[v] += capacity.transit(node);
                    assigned[v].push(node);
                }
                None => unplaced.push(node),
            }
        }
    }

    let routes = assigned
        .into_iter()
        .map(|nodes| {
            let (route, mut stranded) = order_stops(model, nodes);
            unplaced.append(&mut stranded);
            route
        })
        .collect();

    unplaced.sort_unstable();
    Construction { routes, unplaced }
}

/// Depth-first assignment of demands (heaviest first) to vehicles.
struct Packing {
    demands: Vec<i64>,
    capacity: i64,
    loads: Vec<i64>,
    bins: Vec<usize>,
    steps: usize,
}

impl Packing {
    /// Places items `item..` given their total `remaining` demand.
    fn place(&mut self, item: usize, remaining: i64) -> bool {
        if item == self.demands.len() {
            return true;
        }
        self.steps += 1;
        if self.steps > MAX_STEPS {
            return false;
        }
        let slack: i64 = self.loads.iter().map(|l| self.capacity - l).sum();
        if remaining > slack {
            return false;
        }

        let demand = self.demands[item];
        for bin in 0..self.loads.len() {
            let load = self.loads[bin];
            if load + demand > self.capacity || self.loads[..bin].contains(&load) {
                continue;
            }
            self.loads[bin] += demand;
            self.bins[item] = bin;
            if self.place(item + 1, remaining - demand) {
                return true;
            }
            self.loads[bin] -= demand;
            if self.steps > MAX_STEPS {
                return false;
            }
        }
        false
    }
}

/// Orders one vehicle's stops by cheapest insertion. Returns the route and
/// the stops that no reachable position accepts.
fn order_stops(model: &RoutingModel, mut nodes: Vec<usize>) -> (Vec<usize>, Vec<usize>) {
    nodes.sort_unstable();
    let mut route = Vec::with_capacity(nodes.len());

    loop {
        let mut best: Option<(i64, usize, usize)> = None;
        for (k, &node) in nodes.iter().enumerate() {
            for position in 0..=route.len() {
                if let Some(delta) = insertion_delta(model, &route, position, node) {
                    if best.is_none_or(|(d, _, _)| delta < d) {
                        best = Some((delta, k, position));
                    }
                }
            }
        }
        let Some((_, k, position)) = best else {
            return (route, nodes);
        };
        route.insert(position, nodes.remove(k));
    }
}
