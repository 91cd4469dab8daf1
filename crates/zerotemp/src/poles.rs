//! Poles of the dressed Green's function.
//!
//! At fixed `k` a pole is a frequency where `1 - ε_k Re Gc0(k, ω) = 0`. Every
//! sign change of that residual inside `[-10 T, 10 T]` is refined to a pole.
//! Scans walk a set of k-points and collect the poles at each, skipping
//! points where the residual never changes sign.

use std::fmt;

use log::{info, warn};
use polecalc_core::{Equation, Vector2};
use polecalc_mesh::traversal;
use polecalc_solvers::self_consistent::multi_solve;

use crate::{
    Environment, Error, GreenCache,
    greens::re_gc0,
    spectrum::electron_energy,
};

/// The state searched by [`GreenPoleEquation`]: a fixed environment and the
/// trial frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreenState {
    pub env: Environment,
    pub omega: f64,
}

/// Pole condition for the dressed Green's function at one k-point.
#[derive(Debug, Clone, Copy)]
pub struct GreenPoleEquation<'c> {
    pub k: Vector2,
    pub cache: &'c GreenCache,
}

impl Equation<GreenState> for GreenPoleEquation<'_> {
    type Error = Error;

    fn abs_error(&self, state: &GreenState) -> Result<f64, Error> {
        let re = re_gc0(&state.env, self.k, state.omega, self.cache)?;
        Ok(1.0 - electron_energy(&state.env, self.k) * re)
    }

    fn set_argument(&self, value: f64, state: &GreenState) -> GreenState {
        GreenState {
            omega: value,
            ..*state
        }
    }

    fn range(&self, state: &GreenState) -> Result<(f64, f64), Error> {
        let t = state.env.t;
        Ok((-10.0 * t, 10.0 * t))
    }
}

/// A pole of the dressed Green's function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreenPole {
    pub k: Vector2,
    pub omega: f64,
}

impl fmt::Display for GreenPole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k: {}; omega: {:.6}", self.k, self.omega)
    }
}

/// Every pole frequency at `k`, in ascending order.
///
/// # Errors
///
/// Returns an error if the residual cannot be evaluated or no sign change is
/// found; the latter satisfies [`Error::is_no_bracket`].
pub fn pole_point(env: &Environment, k: Vector2, cache: &GreenCache) -> Result<Vec<f64>, Error> {
    let equation = GreenPoleEquation { k, cache };
    let start = GreenState {
        env: *env,
        omega: 0.0,
    };
    let solved = multi_solve(&equation, &start)?;
    Ok(solved.into_iter().map(|state| state.omega).collect())
}

/// Collects the poles at every point of `points`.
///
/// Points without a sign change are logged and skipped.
///
/// # Errors
///
/// Stops at the first error other than a missing bracket.
pub fn scan_poles<I>(
    env: &Environment,
    points: I,
    cache: &GreenCache,
) -> Result<Vec<GreenPole>, Error>
where
    I: IntoIterator<Item = Vector2>,
{
    let mut poles = Vec::new();
    let mut skipped = 0_usize;

    for k in points {
        match pole_point(env, k, cache) {
            Ok(omegas) => {
                for omega in omegas {
                    let pole = GreenPole { k, omega };
                    info!("found pole {pole}");
                    poles.push(pole);
                }
            }
            Err(error) if error.is_no_bracket() => {
                warn!("no pole bracket at k = {k}");
                skipped += 1;
            }
            Err(error) => return Err(error),
        }
    }

    info!("pole scan found {} poles, skipped {skipped} k-points", poles.len());
    Ok(poles)
}

/// Scans the third quadrant of the zone on a `points_per_side²` grid.
///
/// # Errors
///
/// Same as [`scan_poles`].
pub fn scan_plane(
    env: &Environment,
    points_per_side: u32,
    cache: &GreenCache,
) -> Result<Vec<GreenPole>, Error> {
    scan_poles(env, traversal::third_quadrant(points_per_side), cache)
}

/// Scans `num_points` points along `curve`, which maps `[0, 1]` into k-space.
///
/// # Errors
///
/// Same as [`scan_poles`].
pub fn scan_curve<C>(
    env: &Environment,
    curve: C,
    num_points: usize,
    cache: &GreenCache,
) -> Result<Vec<GreenPole>, Error>
where
    C: Fn(f64) -> Vector2,
{
    scan_poles(env, traversal::curve(curve, num_points), cache)
}
