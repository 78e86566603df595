//! Travel cost matrices.
//!
//! Great-circle distances between depot and stops, in whole meters.

mod matrix;

pub use matrix::{DistanceMatrix, UNREACHABLE};
