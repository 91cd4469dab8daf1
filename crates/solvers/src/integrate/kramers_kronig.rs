use std::error::Error as StdError;
use std::f64::consts::PI;

use super::{Error, principal_value};

/// Returns the real part of a causal response function given its imaginary
/// part.
///
/// The returned closure evaluates
/// `Re f(ω) = (1/π) P∫ Im f(ω') / (ω' - ω) dω'` over `[left, right]`, which
/// stand in for the infinite limits. `eps` and `num_points` are passed on to
/// [`principal_value`].
pub fn real_from_imaginary<F, E>(
    imaginary: F,
    left: f64,
    right: f64,
    eps: f64,
    num_points: usize,
) -> impl Fn(f64) -> Result<f64, Error>
where
    F: Fn(f64) -> Result<f64, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    move |omega| {
        principal_value(
            |omega_prime| imaginary(omega_prime).map(|im| im / (PI * (omega_prime - omega))),
            left,
            right,
            omega,
            eps,
            num_points,
        )
    }
}

/// Returns the imaginary part of a causal response function given its real
/// part.
///
/// Identical to [`real_from_imaginary`] up to an overall minus sign.
pub fn imaginary_from_real<F, E>(
    real: F,
    left: f64,
    right: f64,
    eps: f64,
    num_points: usize,
) -> impl Fn(f64) -> Result<f64, Error>
where
    F: Fn(f64) -> Result<f64, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    let transform = real_from_imaginary(real, left, right, eps, num_points);
    move |omega| transform(omega).map(|value| -value)
}
