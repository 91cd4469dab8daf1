//! Dispersions and energy scales of the zero-temperature model.
//!
//! Every function takes the environment it is evaluated in and a point of the
//! Brillouin zone. Functions ending in a mesh reduction (`epsilon_min`, `gap`)
//! run on the environment's worker pool.

use polecalc_core::Vector2;
use polecalc_mesh::minimum;

use crate::Environment;

/// Bare holon dispersion, before the shift by its minimum.
#[must_use]
pub fn epsilon_bar(env: &Environment, k: Vector2) -> f64 {
    let (sx, sy) = (k.x.sin(), k.y.sin());
    let sum = sx + sy;
    2.0 * env.th() * (sum * sum - 1.0) + 4.0 * (env.d1 * env.t0 - env.thp) * sx * sy
}

/// Minimum of [`epsilon_bar`] over the mesh.
#[must_use]
pub fn epsilon_min(env: &Environment) -> f64 {
    minimum(env.square(), env.workers(), |k| epsilon_bar(env, k))
}

/// Holon dispersion shifted so that its minimum over the mesh is zero.
#[must_use]
pub fn epsilon(env: &Environment, k: Vector2) -> f64 {
    epsilon_bar(env, k) - env.epsilon_min
}

/// Holon dispersion measured from the chemical potential.
#[must_use]
pub fn xi(env: &Environment, k: Vector2) -> f64 {
    epsilon(env, k) - env.mu
}

/// Pairing gap function `4 F0 (T0 + Tz)(sin kx + Alpha sin ky)`.
#[must_use]
pub fn delta(env: &Environment, k: Vector2) -> f64 {
    4.0 * env.f0 * (env.t0 + env.tz) * (k.x.sin() + f64::from(env.alpha) * k.y.sin())
}

/// Quasiparticle energy of the paired holons, `sqrt(xi² + delta²)`.
#[must_use]
pub fn pair_energy(env: &Environment, k: Vector2) -> f64 {
    let (xi, delta) = (xi(env, k), delta(env, k));
    (xi * xi + delta * delta).sqrt()
}

/// Spinon dispersion.
///
/// Bounded above by [`Environment::lambda`], which it reaches where
/// `sin kx = -sin ky`.
#[must_use]
pub fn omega(env: &Environment, k: Vector2) -> f64 {
    let sum = k.x.sin() + k.y.sin();
    (env.delta_s * env.delta_s + env.cs * env.cs * (2.0 - 0.5 * sum * sum)).sqrt()
}

/// Bare electron dispersion `-2 T (cos kx + cos ky)`.
#[must_use]
pub fn electron_energy(env: &Environment, k: Vector2) -> f64 {
    -2.0 * env.t * (k.x.cos() + k.y.cos())
}

/// Zero-temperature Fermi occupation: one for `energy <= 0`, zero above.
#[must_use]
pub fn fermi(energy: f64) -> f64 {
    if energy <= 0.0 { 1.0 } else { 0.0 }
}

/// Smallest excitation gap seen by an electron at `k`.
///
/// The minimum over the mesh of `|omega(q) - pair_energy(q - k)|`.
#[must_use]
pub fn gap(env: &Environment, k: Vector2) -> f64 {
    minimum(env.square(), env.workers(), |q| {
        (omega(env, q) - pair_energy(env, q - k)).abs()
    })
}
