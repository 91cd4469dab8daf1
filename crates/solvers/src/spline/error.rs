use thiserror::Error;

use super::TridiagonalError;

/// Errors that can occur while building or using a cubic spline.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("xs has {xs} points but ys has {ys}")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("a cubic spline needs at least 3 points, got {len}")]
    TooFewPoints { len: usize },

    #[error("xs must be strictly ascending, but xs[{index}] does not exceed its predecessor")]
    NotAscending { index: usize },

    #[error("{x} is outside the spline range [{min}, {max}]")]
    OutOfRange { x: f64, min: f64, max: f64 },

    #[error(transparent)]
    Tridiagonal(#[from] TridiagonalError),
}
