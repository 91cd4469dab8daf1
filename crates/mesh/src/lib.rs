//! Reductions over the two-dimensional Brillouin zone.
//!
//! The zone `[-π, π) × [-π, π)` is sampled on a uniform [`Square`] mesh.
//! [`reduce`] maps a worker function over every mesh point on a pool of
//! threads and folds the results with a [`Reducer`]:
//!
//! - [`Average`]: compensated mean
//! - [`Minimum`] and [`Maximum`]
//! - [`Histogram`]: weighted delta functions binned by a [`DeltaBinner`]
//!
//! Points are handed to workers in no particular order, so every reducer must
//! be associative and commutative.
//!
//! The [`traversal`] module walks k-space paths (a quadrant of the zone, a
//! parametrised curve, the high-symmetry lines) for sequential scans.

mod histogram;
mod reduce;
mod reducers;
mod square;

pub mod traversal;

pub use histogram::{BinError, DeltaBinner, Histogram, delta_bin};
pub use reduce::{Reducer, reduce};
pub use reducers::{Average, Maximum, Minimum, average, maximum, minimum};
pub use square::{Points, Square};
