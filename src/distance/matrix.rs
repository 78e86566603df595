//! Dense integer distance matrix.

use crate::error::InputError;
use crate::models::Coordinate;

/// Cost stored for an arc that cannot be travelled.
pub const UNREACHABLE: i64 = i64::MAX;

/// A dense n×n matrix of travel costs in whole meters, stored in row-major order.
///
/// Costs are integers so that repeated runs on identical input accumulate
/// identical totals. Fractional meters are truncated.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Coordinate;
/// use u_delivery::distance::DistanceMatrix;
///
/// let locations = vec![
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.0, 1.0),
///     Coordinate::new(0.0, 2.0),
/// ];
/// let dm = DistanceMatrix::from_coordinates(&locations).unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(0, 0), 0);
/// assert_eq!(dm.get(0, 1), dm.get(1, 0));
/// assert!(dm.get(0, 2) > dm.get(0, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Computes a great-circle matrix from coordinates, depot first.
    ///
    /// Fails with [`InputError::EmptyInput`] if `locations` is empty and with
    /// [`InputError::InvalidCoordinate`] for the first out-of-range entry.
    pub fn from_coordinates(locations: &[Coordinate]) -> Result<Self, InputError> {
        if locations.is_empty() {
            return Err(InputError::EmptyInput);
        }
        if let Some((index, c)) = locations.iter().enumerate().find(|(_, c)| !c.is_valid()) {
            return Err(InputError::InvalidCoordinate {
                index,
                lat: c.lat,
                lon: c.lon,
            });
        }

        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = to_cost(locations[i].distance_to(&locations[j]));
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        Ok(dm)
    }

    /// Creates a matrix from an explicit n×n grid of meters.
    ///
    /// `+inf` marks an unreachable arc. NaN, negative values and finite
    /// values above [`DistanceMatrix::max_cost`] are rejected.
    pub fn from_meters(size: usize, data: Vec<f64>) -> Result<Self, InputError> {
        check_len(size, data.len())?;
        let max = Self::max_cost(size);
        let mut dm = Self::new(size);
        for (k, &d) in data.iter().enumerate() {
            let (from, to) = (k / size, k % size);
            if d.is_nan() {
                return Err(InputError::NonFiniteDistance { from, to });
            }
            if d < 0.0 {
                return Err(InputError::NegativeDistance { from, to });
            }
            if d.is_finite() && d.trunc() > max as f64 {
                return Err(InputError::DistanceTooLarge { from, to, max });
            }
            let cost = if d.is_infinite() { UNREACHABLE } else { to_cost(d) };
            dm.set(from, to, cost);
        }
        Ok(dm)
    }

    /// Creates a matrix from an explicit n×n grid of integer costs.
    ///
    /// [`UNREACHABLE`] marks a missing arc; other costs must lie in
    /// `0..=max_cost(size)`.
    pub fn from_data(size: usize, data: Vec<i64>) -> Result<Self, InputError> {
        check_len(size, data.len())?;
        let max = Self::max_cost(size);
        for (k, &d) in data.iter().enumerate() {
            let (from, to) = (k / size, k % size);
            if d < 0 {
                return Err(InputError::NegativeDistance { from, to });
            }
            if d != UNREACHABLE && d > max {
                return Err(InputError::DistanceTooLarge { from, to, max });
            }
        }
        Ok(Self { data, size })
    }

    /// Largest finite arc cost accepted for a matrix of `size` locations.
    ///
    /// Any set of routes over the matrix uses at most `2 * (size + 1)` arcs, so
    /// totals and move deltas stay within `i64`.
    pub fn max_cost(size: usize) -> i64 {
        let arcs = i64::try_from(size).unwrap_or(i64::MAX).saturating_add(1).saturating_mul(2);
        i64::MAX / arcs
    }

    /// Returns the cost from `from` to `to` ([`UNREACHABLE`] if none).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Returns the cost of a travelable arc, `None` if unreachable.
    pub fn arc(&self, from: usize, to: usize) -> Option<i64> {
        let d = self.get(from, to);
        (d != UNREACHABLE).then_some(d)
    }

    /// Sets the cost from `from` to `to`.
    ///
    /// Finite costs above [`DistanceMatrix::max_cost`] are the caller's
    /// responsibility.
    pub fn set(&mut self, from: usize, to: usize, cost: i64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `d(i, j) == d(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Returns the reachable candidate nearest to `from`, lowest index on ties.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .filter_map(|c| self.arc(from, c).map(|d| (d, c)))
            .min()
            .map(|(_, c)| c)
    }
}

fn to_cost(meters: f64) -> i64 {
    meters.trunc() as i64
}

fn check_len(size: usize, actual: usize) -> Result<(), InputError> {
    let expected = size * size;
    if actual != expected {
        return Err(InputError::LengthMismatch { expected, actual });
    }
    Ok(())
}
