//! Core traits and types for polecalc.
//!
//! This crate defines the shared abstractions that the solvers, the mesh
//! reductions, and the physics crates build on:
//!
//! - [`Equation`]: a scalar self-consistency equation bound to one field of a
//!   parameter state
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`Vector2`]: a point in the two-dimensional Brillouin zone
//! - [`KahanSum`]: compensated running summation
//! - [`numeric`]: machine-epsilon comparisons and evenly spaced ranges

mod equation;
mod observer;
mod sum;
mod vector;

pub mod numeric;

pub use equation::Equation;
pub use observer::Observer;
pub use sum::KahanSum;
pub use vector::Vector2;
