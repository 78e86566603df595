//! Coordinates, graph nodes, and delivery stops.

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Coordinate;
///
/// let ankara = Coordinate::new(39.9208, 32.8541);
/// assert!(ankara.is_valid());
/// assert!(!Coordinate::new(91.0, 0.0).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lon: f64,
}

impl Coordinate {
    /// Creates a coordinate. Range is checked by [`Coordinate::is_valid`].
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns `true` if both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Great-circle distance to another coordinate, in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let haversine = Haversine;
        haversine.distance(Point::from(*self), Point::from(*other))
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Self {
        Point::new(c.lon, c.lat)
    }
}

/// A vertex of the routing graph: the depot (id 0) or a stop (1..=N).
///
/// # Examples
///
/// ```
/// use u_delivery::models::{Coordinate, Node};
///
/// let depot = Node::depot(Coordinate::new(39.92, 32.85));
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.demand(), 0);
/// assert!(depot.is_depot());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    id: usize,
    coordinate: Coordinate,
    demand: i32,
}

impl Node {
    /// Creates a node.
    pub fn new(id: usize, coordinate: Coordinate, demand: i32) -> Self {
        Self {
            id,
            coordinate,
            demand,
        }
    }

    /// Creates the depot node (id=0, demand=0).
    pub fn depot(coordinate: Coordinate) -> Self {
        Self::new(0, coordinate, 0)
    }

    /// Node id (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Position of this node.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Quantity consumed from the serving vehicle.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.id == 0
    }
}

/// A delivery location as supplied by the caller.
///
/// `payload` is opaque to the optimizer (address, product label, display-only
/// shift or time window) and is handed back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop<P> {
    /// Delivery position.
    pub coordinate: Coordinate,
    /// Quantity to deliver.
    pub demand: i32,
    /// Caller data carried through the plan.
    pub payload: P,
}

impl<P> Stop<P> {
    /// Creates a stop.
    pub fn new(coordinate: Coordinate, demand: i32, payload: P) -> Self {
        Self {
            coordinate,
            demand,
            payload,
        }
    }
}

/// Builds the node list for a depot and its stops (stop `i` becomes node `i + 1`).
pub fn nodes_from_stops<P>(depot: Coordinate, stops: &[Stop<P>]) -> Vec<Node> {
    std::iter::once(Node::depot(depot))
        .chain(
            stops
                .iter()
                .enumerate()
                .map(|(i, s)| Node::new(i + 1, s.coordinate, s.demand)),
        )
        .collect()
}
