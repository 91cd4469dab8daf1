//! The zero-temperature self-consistent equations for `D1`, `Mu`, and `F0`.

use std::convert::Infallible;

use polecalc_core::{Equation, numeric::MACHINE_EPSILON};
use polecalc_mesh::average;
use polecalc_solvers::self_consistent::System;

use crate::{
    Environment,
    spectrum::{epsilon_min, pair_energy, xi},
};

/// The self-consistent system solved at zero temperature.
///
/// Equations are ordered `D1`, `Mu`, `F0`, each with the matching entry of
/// `tolerances`.
#[must_use]
pub fn zero_temp_system(tolerances: [f64; 3]) -> System<'static, Environment, Infallible> {
    let [d1, mu, f0] = tolerances;
    System::new()
        .with(D1Equation, d1)
        .with(MuEquation, mu)
        .with(F0Equation, f0)
}

/// Hopping renormalisation `D1 = <-½ (1 - xi/E) sin kx sin ky>`.
///
/// Setting `D1` changes the bare dispersion, so its minimum is recomputed.
#[derive(Debug, Clone, Copy, Default)]
pub struct D1Equation;

impl Equation<Environment> for D1Equation {
    type Error = Infallible;

    fn abs_error(&self, env: &Environment) -> Result<f64, Infallible> {
        let rhs = average(env.square(), env.workers(), |k| {
            let paired = 1.0 - xi(env, k) / pair_energy(env, k);
            -0.5 * paired * k.x.sin() * k.y.sin()
        });
        Ok(env.d1 - rhs)
    }

    fn set_argument(&self, value: f64, env: &Environment) -> Environment {
        let mut env = Environment { d1: value, ..*env };
        env.epsilon_min = epsilon_min(&env);
        env
    }

    fn range(&self, _env: &Environment) -> Result<(f64, f64), Infallible> {
        Ok((0.0, 1.0))
    }
}

/// Doping constraint `X = <½ (1 - xi/E)>`, solved for the chemical potential.
#[derive(Debug, Clone, Copy, Default)]
pub struct MuEquation;

impl Equation<Environment> for MuEquation {
    type Error = Infallible;

    fn abs_error(&self, env: &Environment) -> Result<f64, Infallible> {
        let rhs = average(env.square(), env.workers(), |k| {
            0.5 * (1.0 - xi(env, k) / pair_energy(env, k))
        });
        Ok(env.x - rhs)
    }

    fn set_argument(&self, value: f64, env: &Environment) -> Environment {
        Environment { mu: value, ..*env }
    }

    /// The chemical potential is strictly negative and no deeper than `-2 T0`.
    fn range(&self, env: &Environment) -> Result<(f64, f64), Infallible> {
        Ok((-2.0 * env.t0, -MACHINE_EPSILON))
    }
}

/// Gap equation `1/(T0 + Tz) = <(sin kx + Alpha sin ky)² / E>`, solved for `F0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct F0Equation;

impl Equation<Environment> for F0Equation {
    type Error = Infallible;

    fn abs_error(&self, env: &Environment) -> Result<f64, Infallible> {
        let alpha = f64::from(env.alpha);
        let rhs = average(env.square(), env.workers(), |k| {
            let form = k.x.sin() + alpha * k.y.sin();
            form * form / pair_energy(env, k)
        });
        Ok(1.0 / (env.t0 + env.tz) - rhs)
    }

    fn set_argument(&self, value: f64, env: &Environment) -> Environment {
        Environment { f0: value, ..*env }
    }

    fn range(&self, _env: &Environment) -> Result<(f64, f64), Infallible> {
        Ok((0.0, 1.0))
    }
}
