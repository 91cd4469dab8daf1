use std::error::Error as StdError;

use polecalc_core::numeric::{fuzzy_equal, make_range};

use super::Error;
use crate::spline::CubicSpline;

/// Factor by which the excluded window shrinks when the pole is closer than
/// `eps` to an integration boundary.
pub const EPS_DROP_FACTOR: f64 = 10.0;

/// Computes the principal value of the integral of `f` from `a` to `b`, with a
/// pole at `pole`.
///
/// If the pole lies inside the interval, the window `(pole - eps, pole + eps)`
/// is excluded and each remaining side is sampled on `num_points` points and
/// integrated as a cubic spline. A side whose width vanishes contributes zero.
/// If the pole lies outside the interval, the whole interval is sampled on
/// `2 * num_points` points instead.
///
/// When the pole sits closer than `eps` to a boundary, `eps` is reduced to
/// that distance divided by [`EPS_DROP_FACTOR`], so the window never crosses
/// the boundary. Reversed bounds give the negated integral.
///
/// # Errors
///
/// - [`Error::PoleTooCloseToBoundary`] if `pole` equals `a` or `b`.
/// - [`Error::Integrand`] if `f` fails at any sample point.
/// - [`Error::Spline`] if a sampled side cannot be splined, e.g. because
///   `num_points` is less than 3.
pub fn principal_value<F, E>(
    mut f: F,
    a: f64,
    b: f64,
    pole: f64,
    eps: f64,
    num_points: usize,
) -> Result<f64, Error>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    if a == pole || b == pole {
        return Err(Error::PoleTooCloseToBoundary { a, b, pole });
    }

    let (sign, a, b) = if a > b { (-1.0, b, a) } else { (1.0, a, b) };

    let mut eps = eps;
    if pole > a && pole - a < eps {
        eps = (pole - a) / EPS_DROP_FACTOR;
    }
    if b > pole && b - pole < eps {
        eps = (b - pole) / EPS_DROP_FACTOR;
    }

    let integral = if a < pole && pole < b {
        let (window_left, window_right) = (pole - eps, pole + eps);

        let left = if window_left <= a || fuzzy_equal(window_left - a, 0.0) {
            0.0
        } else {
            sampled_integral(&mut f, a, window_left, num_points)?
        };
        let right = if window_right >= b || fuzzy_equal(b - window_right, 0.0) {
            0.0
        } else {
            sampled_integral(&mut f, window_right, b, num_points)?
        };

        left + right
    } else {
        sampled_integral(&mut f, a, b, 2 * num_points)?
    };

    Ok(sign * integral)
}

/// Samples `f` on `num` evenly spaced points and integrates the spline.
fn sampled_integral<F, E>(f: &mut F, left: f64, right: f64, num: usize) -> Result<f64, Error>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    let xs = make_range(left, right, num);
    let ys = xs
        .iter()
        .map(|&x| f(x).map_err(|error| Error::Integrand(error.into())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CubicSpline::new(&xs, &ys)?.integrate(left, right)?)
}
