use thiserror::Error;

/// Errors that can occur while bracketing or bisecting a root.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("no root bracketed in [{left}, {right}]")]
    NoBracket { left: f64, right: f64 },

    #[error("interval has zero width: left and right are both {value}")]
    ZeroWidth { value: f64 },

    #[error("interval contains non-finite value: {value}")]
    NonFinite { value: f64 },
}
