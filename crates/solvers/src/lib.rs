//! Numerical kernels for polecalc.
//!
//! - [`roots`]: bisection and automatic bracket search for scalar roots
//! - [`spline`]: natural cubic splines with analytic integration
//! - [`integrate`]: principal-value integrals and Kramers–Kronig transforms
//! - [`self_consistent`]: drives systems of coupled [`Equation`]s to a joint
//!   fixed point
//!
//! [`Equation`]: polecalc_core::Equation

pub mod integrate;
pub mod roots;
pub mod self_consistent;
pub mod spline;
