//! Natural cubic spline interpolation and integration.
//!
//! A [`CubicSpline`] is built once from sampled `(x, y)` pairs and is
//! immutable afterwards. Evaluation and integration are exact for the
//! interpolant: the definite integral uses the analytic antiderivative of
//! each cubic segment, summed with [`KahanSum`] across segments.
//!
//! Both operations accept arguments a little outside the knot range (up to
//! [`SPLINE_EXTRAPOLATION_DISTANCE`]) so that endpoints produced by
//! floating-point arithmetic do not spuriously fail.
//!
//! [`KahanSum`]: polecalc_core::KahanSum

mod cubic;
mod error;
mod tridiagonal;

pub use cubic::CubicSpline;
pub use error::Error;
pub use tridiagonal::{TridiagonalError, solve_tridiagonal};

/// How far outside its knot range a spline may be evaluated or integrated.
pub const SPLINE_EXTRAPOLATION_DISTANCE: f64 = 1e-10;

/// Integrates the cubic spline through `(xs, ys)` from `left` to `right`.
///
/// Convenience for building a [`CubicSpline`] and calling
/// [`CubicSpline::integrate`] once.
///
/// # Errors
///
/// Returns an error if the spline cannot be built or the bounds lie outside
/// its range.
pub fn spline_integral(xs: &[f64], ys: &[f64], left: f64, right: f64) -> Result<f64, Error> {
    CubicSpline::new(xs, ys)?.integrate(left, right)
}
