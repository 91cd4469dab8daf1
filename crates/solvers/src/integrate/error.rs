use std::error::Error as StdError;

use thiserror::Error;

use crate::spline;

/// Errors that can occur while computing a principal-value integral.
#[derive(Debug, Error)]
pub enum Error {
    #[error("pole at {pole} lies on a boundary of [{a}, {b}]")]
    PoleTooCloseToBoundary { a: f64, b: f64, pole: f64 },

    #[error(transparent)]
    Spline(#[from] spline::Error),

    #[error("integrand error: {0}")]
    Integrand(#[source] Box<dyn StdError + Send + Sync>),
}
