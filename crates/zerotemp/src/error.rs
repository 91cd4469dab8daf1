use std::io;

use polecalc_mesh::BinError;
use polecalc_solvers::{integrate, self_consistent, spline};
use thiserror::Error;

/// Errors from the zero-temperature physics and pole search.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read or write environment: {0}")]
    Io(#[from] io::Error),

    #[error("invalid environment JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid histogram bins: {0}")]
    Bins(#[from] BinError),

    #[error(transparent)]
    Spline(#[from] spline::Error),

    #[error(transparent)]
    Integrate(#[from] integrate::Error),

    #[error(transparent)]
    Solve(#[from] self_consistent::Error),

    #[error(transparent)]
    Plot(#[from] polecalc_plot::Error),
}

impl Error {
    /// Returns `true` if a root search found no sign change.
    ///
    /// Pole scans skip such k-points rather than failing.
    #[must_use]
    pub fn is_no_bracket(&self) -> bool {
        matches!(self, Error::Solve(error) if error.is_no_bracket())
    }
}
