//! The bare Green's function of the physical electron and its dressed real
//! part.
//!
//! The imaginary part of the bare function is a sum of delta functions over
//! the mesh, one group per point `q`, which [`im_gc0`] smooths into a
//! histogram. A cubic spline through that histogram is memoized in a
//! [`GreenCache`] and drives both [`im_gc0_at`] and, through the
//! Kramers–Kronig relation, [`re_gc0`].

use std::{f64::consts::PI, sync::Arc};

use polecalc_core::Vector2;
use polecalc_mesh::{DeltaBinner, delta_bin, maximum};
use polecalc_solvers::{integrate::real_from_imaginary, spline::CubicSpline};

use crate::{
    Environment, Error, GreenCache,
    spectrum::{electron_energy, fermi, omega, pair_energy, xi},
};

/// Delta functions contributed by mesh point `q` to `Im Gc0(k, ω)`.
///
/// Returns `(position, weight)` pairs: four in the superconducting state, two
/// otherwise. The Bose occupation of the spinon is zero at zero temperature
/// and does not appear.
#[must_use]
pub fn delta_terms(env: &Environment, k: Vector2, q: Vector2) -> Vec<(f64, f64)> {
    let omega_q = omega(env, q);
    let e_h = pair_energy(env, q - k);
    let (lambda_p, lambda_m) = plus_minus(1.0, env.lambda() / omega_q);
    let (f_p, f_m) = plus_minus(0.0, fermi(e_h));

    if env.superconducting {
        let c = -0.25 * PI;
        let (xi_p, xi_m) = plus_minus(1.0, xi(env, q - k) / e_h);
        vec![
            (omega_q - e_h, c * lambda_p * xi_p * f_p),
            (omega_q + e_h, c * lambda_p * xi_m * (f_m + 1.0)),
            (-omega_q - e_h, -c * lambda_m * xi_p * (f_m + 1.0)),
            (-omega_q + e_h, -c * lambda_m * xi_m * f_p),
        ]
    } else {
        let c = -0.5 * PI;
        vec![
            (omega_q - e_h, c * lambda_p * f_p),
            (-omega_q - e_h, -c * lambda_m * (f_m + 1.0)),
        ]
    }
}

fn plus_minus(a: f64, b: f64) -> (f64, f64) {
    (a + b, a - b)
}

/// Frequency range that holds every delta function of `Im Gc0(k, ω)`.
///
/// The largest holon energy seen from `k` plus the spinon bandwidth, padded
/// by one on each side.
#[must_use]
pub fn im_gc0_range(env: &Environment, k: Vector2) -> (f64, f64) {
    let holon_max = if env.superconducting {
        maximum(env.square(), env.workers(), |q| pair_energy(env, q - k))
    } else {
        maximum(env.square(), env.workers(), |q| xi(env, q - k))
    };
    let max_abs_omega = env.lambda() + holon_max;
    (-max_abs_omega - 1.0, max_abs_omega + 1.0)
}

/// Histogram of `Im Gc0(k, ω)`.
///
/// Returns the bin centres and the binned weights, with
/// [`Environment::im_gc0_bins`] bins over [`im_gc0_range`].
///
/// # Errors
///
/// Returns [`Error::Bins`] if the range is not finite or there are no bins.
pub fn im_gc0(env: &Environment, k: Vector2) -> Result<(Vec<f64>, Vec<f64>), Error> {
    let (min, max) = im_gc0_range(env, k);
    let binner = DeltaBinner::new(min, max, env.im_gc0_bins)?;
    let weights = delta_bin(env.square(), env.workers(), binner, |q| {
        delta_terms(env, k, q)
    });
    Ok((binner.bin_values(), weights))
}

/// Cubic spline through the [`im_gc0`] histogram, built once per cache.
///
/// # Errors
///
/// Returns an error if the histogram or the spline cannot be built.
pub fn im_gc0_spline(
    env: &Environment,
    k: Vector2,
    cache: &GreenCache,
) -> Result<Arc<CubicSpline>, Error> {
    cache.get_or_try_insert_with(env, k, || -> Result<CubicSpline, Error> {
        let (omegas, weights) = im_gc0(env, k)?;
        Ok(CubicSpline::new(&omegas, &weights)?)
    })
}

/// `Im Gc0(k, ω)` interpolated from the cached spline.
///
/// Zero outside the spline's frequency range.
///
/// # Errors
///
/// Returns an error if the spline cannot be built.
pub fn im_gc0_at(
    env: &Environment,
    k: Vector2,
    omega: f64,
    cache: &GreenCache,
) -> Result<f64, Error> {
    let spline = im_gc0_spline(env, k, cache)?;
    let (min, max) = spline.range();
    if min <= omega && omega <= max {
        Ok(spline.at(omega)?)
    } else {
        Ok(0.0)
    }
}

/// `Re Gc0(k, ω)` from the Kramers–Kronig relation.
///
/// The principal-value integral runs over the spline's frequency range with
/// [`Environment::re_gc0_points`] samples per side and an excluded window of
/// half-width [`Environment::re_gc0_dw`].
///
/// # Errors
///
/// Returns an error if the spline cannot be built or the integral fails,
/// including when `omega` falls exactly on the edge of the range.
pub fn re_gc0(
    env: &Environment,
    k: Vector2,
    omega: f64,
    cache: &GreenCache,
) -> Result<f64, Error> {
    let spline = im_gc0_spline(env, k, cache)?;
    let (min, max) = spline.range();
    let real = real_from_imaginary(
        |omega_prime| spline.at(omega_prime),
        min,
        max,
        env.re_gc0_dw,
        env.re_gc0_points,
    );
    Ok(real(omega)?)
}

/// Real part of the dressed Green's function `1 / (1/Gc0 - ε_k)`.
///
/// NaN where both parts of `Gc0` vanish.
///
/// # Errors
///
/// Returns an error if either part of `Gc0` cannot be computed.
pub fn full_re_gc(
    env: &Environment,
    k: Vector2,
    omega: f64,
    cache: &GreenCache,
) -> Result<f64, Error> {
    let re = re_gc0(env, k, omega, cache)?;
    let im = im_gc0_at(env, k, omega, cache)?;
    let magnitude = re * re + im * im;
    let shifted = re - magnitude * electron_energy(env, k);
    Ok(magnitude * shifted / (shifted * shifted + im * im))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use polecalc_core::KahanSum;

    use super::*;

    fn env(superconducting: bool) -> Environment {
        let mut env = Environment {
            grid_length: 8,
            num_procs: 2,
            im_gc0_bins: 32,
            re_gc0_points: 64,
            re_gc0_dw: 1e-3,
            init_d1: 0.05,
            init_mu: -0.2,
            init_f0: 0.1,
            alpha: -1,
            t: 0.2,
            t0: 1.0,
            tz: 0.1,
            thp: 0.1,
            x: 0.1,
            delta_s: 0.1,
            cs: 0.1,
            superconducting,
            ..Environment::default()
        };
        env.initialize();
        env
    }

    #[test]
    fn term_counts_follow_superconductivity() {
        let k = Vector2::new(0.3, -0.4);
        let q = Vector2::new(-1.0, 2.0);
        assert_eq!(delta_terms(&env(true), k, q).len(), 4);
        assert_eq!(delta_terms(&env(false), k, q).len(), 2);
    }

    #[test]
    fn normal_state_terms() {
        let env = env(false);
        let (k, q) = (Vector2::new(0.3, -0.4), Vector2::new(-1.0, 2.0));
        let omega_q = omega(&env, q);
        let e_h = pair_energy(&env, q - k);
        assert!(e_h > 0.0);

        let terms = delta_terms(&env, k, q);
        // Empty holon states contribute only the second term.
        assert_eq!(terms[0], (omega_q - e_h, 0.0));
        assert_relative_eq!(terms[1].0, -omega_q - e_h);
        assert_relative_eq!(
            terms[1].1,
            0.5 * PI * (1.0 - env.lambda() / omega_q),
            max_relative = 1e-12
        );
    }

    #[test]
    fn histogram_spans_range_and_carries_weight() {
        let env = env(true);
        let k = Vector2::new(-0.5, -0.5);
        let (omegas, weights) = im_gc0(&env, k).unwrap();
        assert_eq!(omegas.len(), 32);
        assert_eq!(weights.len(), 32);

        let (min, max) = im_gc0_range(&env, k);
        assert!(min < omegas[0] && omegas[31] < max);
        assert_relative_eq!(min, -max);

        // Every delta lies inside the range, so the bins hold the mesh mean
        // of the summed weights.
        let mut expected = KahanSum::new();
        for q in env.square() {
            expected.extend(delta_terms(&env, k, q).into_iter().map(|(_, w)| w));
        }
        let total: f64 = weights.iter().sum();
        assert_relative_eq!(total, expected.value() / 64.0, max_relative = 1e-10);
    }

    #[test]
    fn im_part_vanishes_outside_range() {
        let env = env(true);
        let cache = GreenCache::new();
        let k = Vector2::new(-0.5, -0.5);
        let (min, max) = im_gc0_spline(&env, k, &cache).unwrap().range();
        assert_eq!(im_gc0_at(&env, k, min - 0.5, &cache).unwrap(), 0.0);
        assert_eq!(im_gc0_at(&env, k, max + 0.5, &cache).unwrap(), 0.0);
        assert!(im_gc0_at(&env, k, 0.5 * (min + max), &cache).unwrap().is_finite());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn real_part_reuses_cached_spline() {
        let env = env(true);
        let cache = GreenCache::new();
        let k = Vector2::new(-1.0, -2.0);

        let first = re_gc0(&env, k, 0.05, &cache).unwrap();
        assert!(first.is_finite());
        assert_eq!(cache.len(), 1);
        assert_eq!(re_gc0(&env, k, 0.05, &cache).unwrap(), first);
        assert_eq!(cache.len(), 1);

        re_gc0(&env, Vector2::new(-1.0, -1.0), 0.05, &cache).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn real_part_rejects_pole_on_range_edge() {
        let env = env(false);
        let cache = GreenCache::new();
        let k = Vector2::new(-1.0, -2.0);
        let (min, _) = im_gc0_spline(&env, k, &cache).unwrap().range();
        let error = re_gc0(&env, k, min, &cache).unwrap_err();
        assert!(matches!(error, Error::Integrate(_)), "{error}");
    }

    #[test]
    fn full_real_part_reduces_to_bare_without_hopping() {
        // With T = 0 the electron energy vanishes and 1/(1/Gc0) = Gc0.
        let env = Environment { t: 0.0, ..env(true) };
        let cache = GreenCache::new();
        let k = Vector2::new(-1.0, -2.0);
        let re = re_gc0(&env, k, 0.05, &cache).unwrap();
        let full = full_re_gc(&env, k, 0.05, &cache).unwrap();
        assert_relative_eq!(full, re, max_relative = 1e-10);
    }

    #[test]
    fn too_few_bins_is_an_error() {
        let env = Environment { im_gc0_bins: 0, ..env(true) };
        let error = im_gc0(&env, Vector2::default()).unwrap_err();
        assert!(matches!(error, Error::Bins(_)), "{error}");

        let env = Environment { im_gc0_bins: 2, ..env };
        let error = im_gc0_spline(&env, Vector2::default(), &GreenCache::new()).unwrap_err();
        assert!(matches!(error, Error::Spline(_)), "{error}");
    }
}
