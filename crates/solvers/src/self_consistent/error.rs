use std::error::Error as StdError;

use thiserror::Error;

use crate::roots;

/// Errors that can occur while solving self-consistent equations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Root(#[from] roots::Error),

    #[error("equation error: {0}")]
    Equation(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Returns `true` if no bracket could be found for a root.
    #[must_use]
    pub fn is_no_bracket(&self) -> bool {
        matches!(self, Error::Root(roots::Error::NoBracket { .. }))
    }
}
