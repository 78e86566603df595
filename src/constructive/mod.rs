//! Constructive heuristics for building an initial feasible assignment.
//!
//! - [`cheapest_insertion`] — Global cheapest insertion over all vehicles, O(n³)
//! - [`path_cheapest_arc`] — Per-vehicle greedy path extension, O(n²)
//! - [`capacity_packing`] — Demand-first assignment, used when the greedy ones strand a stop

mod capacity_packing;
mod cheapest_insertion;
mod path_cheapest_arc;

pub use capacity_packing::{capacity_packing, MAX_STEPS};
pub use cheapest_insertion::cheapest_insertion;
pub use path_cheapest_arc::path_cheapest_arc;

pub(crate) use cheapest_insertion::insertion_delta;

/// Result of a construction heuristic: one stop sequence per vehicle
/// (depot excluded) and the nodes that could not be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construction {
    /// Stop sequences indexed by vehicle id.
    pub routes: Vec<Vec<usize>>,
    /// Nodes left unassigned, ascending.
    pub unplaced: Vec<usize>,
}

impl Construction {
    /// Returns `true` if every stop was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}
