//! Capacity tracking and route evaluation.
//!
//! - [`CapacityDimension`] — cumulative demand bound, checked by every search move
//! - [`RouteEvaluator`] — distance, load, and violation reporting for route sets

mod dimension;
mod evaluator;

pub use dimension::CapacityDimension;
pub use evaluator::RouteEvaluator;
