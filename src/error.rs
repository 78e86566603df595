//! Error types for input validation and search outcomes.

use thiserror::Error;

/// A violated precondition, detected before any search work starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// No locations were supplied (the depot is required).
    #[error("no locations supplied, the depot is required")]
    EmptyInput,
    /// Latitude or longitude out of range or not finite.
    #[error("invalid coordinate at index {index}: ({lat}, {lon})")]
    InvalidCoordinate {
        /// Location index (0 = depot).
        index: usize,
        /// Offending latitude.
        lat: f64,
        /// Offending longitude.
        lon: f64,
    },
    /// A stop demands a negative quantity.
    #[error("negative demand {demand} at node {node}")]
    NegativeDemand {
        /// Node index.
        node: usize,
        /// Offending demand.
        demand: i32,
    },
    /// The depot was given a non-zero demand.
    #[error("depot demand must be 0, got {0}")]
    DepotDemand(i32),
    /// The fleet is empty.
    #[error("vehicle count must be at least 1")]
    NoVehicles,
    /// Vehicle capacity is zero or negative.
    #[error("vehicle capacity must be positive, got {0}")]
    NonPositiveCapacity(i32),
    /// Two inputs that must be aligned have different lengths.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// A supplied distance is NaN.
    #[error("distance from {from} to {to} is not a number")]
    NonFiniteDistance {
        /// Origin node.
        from: usize,
        /// Destination node.
        to: usize,
    },
    /// A supplied distance is negative.
    #[error("negative distance from {from} to {to}")]
    NegativeDistance {
        /// Origin node.
        from: usize,
        /// Destination node.
        to: usize,
    },
    /// A supplied finite distance is so large that route totals could overflow.
    #[error("distance from {from} to {to} exceeds {max}")]
    DistanceTooLarge {
        /// Origin node.
        from: usize,
        /// Destination node.
        to: usize,
        /// Largest accepted finite cost for this matrix size.
        max: i64,
    },
}

/// Terminal outcome of a solve call that did not produce a solution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The inputs violate a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    /// Construction could not place every stop within the fleet's capacity.
    #[error("infeasible: {} stop(s) could not be placed: {unplaced:?}", unplaced.len())]
    Infeasible {
        /// Node ids left unassigned, ascending.
        unplaced: Vec<usize>,
    },
}

impl SolveError {
    /// Returns the unplaced node ids if this is an infeasibility.
    pub fn unplaced(&self) -> Option<&[usize]> {
        match self {
            SolveError::Infeasible { unplaced } => Some(unplaced),
            SolveError::InvalidInput(_) => None,
        }
    }
}
