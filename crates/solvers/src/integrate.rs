//! Principal-value integrals and Kramers–Kronig transforms.
//!
//! [`principal_value`] integrates a function across a (possibly fictitious)
//! simple pole by cutting a symmetric window of half-width `eps` around it and
//! integrating the remaining pieces with cubic splines. The Kramers–Kronig
//! helpers build on it to recover one part of a causal response function from
//! the other.

mod error;
mod kramers_kronig;
mod principal_value;

pub use error::Error;
pub use kramers_kronig::{imaginary_from_real, real_from_imaginary};
pub use principal_value::{EPS_DROP_FACTOR, principal_value};
