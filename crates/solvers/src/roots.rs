//! Scalar root finding.
//!
//! # Bisection
//!
//! - [`bisect`] halves a bracketing interval until its half-width drops below
//!   a requested tolerance.
//! - [`bisect_full_precision`] keeps halving until the midpoint can no longer
//!   be distinguished from an endpoint, giving the root to the limit of `f64`.
//!
//! # Bracket search
//!
//! Bisection needs an interval over which the function changes sign.
//! [`find_bracket`] and [`find_all_brackets`] find such intervals by scanning
//! a search range on a grid that is refined until a sign change appears.
//!
//! Sign comparisons treat zero as compatible with both signs (see
//! [`same_sign`]), so a sample that is exactly zero is only detected by the
//! explicit zero check, never as a sign change.

mod bisection;
mod bracket;
mod error;

pub use bisection::{bisect, bisect_full_precision, bisect_iterate};
pub use bracket::{
    INITIAL_BRACKET_STEPS, MAX_BRACKET_STEPS, find_all_brackets, find_bracket, same_sign,
};
pub use error::Error;
