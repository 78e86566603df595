//! Vehicle and fleet types.

use serde::{Deserialize, Serialize};

/// A vehicle whose route starts and ends at the depot.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Vehicle;
///
/// let v = Vehicle::new(0, 200);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 200);
/// assert_eq!(v.start(), 0);
/// assert_eq!(v.end(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
    depot_id: usize,
}

impl Vehicle {
    /// Creates a vehicle anchored at depot 0.
    pub fn new(id: usize, capacity: i32) -> Self {
        Self {
            id,
            capacity,
            depot_id: 0,
        }
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Node where the route starts.
    pub fn start(&self) -> usize {
        self.depot_id
    }

    /// Node where the route ends.
    pub fn end(&self) -> usize {
        self.depot_id
    }
}

/// A homogeneous fleet: `vehicles` identical vehicles of `capacity` each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    /// Number of vehicles.
    pub vehicles: usize,
    /// Capacity of every vehicle.
    pub capacity: i32,
}

impl Fleet {
    /// Creates a fleet description.
    pub fn new(vehicles: usize, capacity: i32) -> Self {
        Self { vehicles, capacity }
    }

    /// Total quantity the fleet can carry in one dispatch.
    pub fn total_capacity(&self) -> i64 {
        self.vehicles as i64 * i64::from(self.capacity)
    }
}
