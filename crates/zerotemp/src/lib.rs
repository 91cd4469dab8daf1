//! Zero-temperature self-consistent solution and Green's-function poles.
//!
//! An [`Environment`] holds the model parameters. [`zero_temp_system`]
//! solves the coupled `D1`, `Mu`, and `F0` equations for it, after which the
//! [`greens`] and [`poles`] modules locate the poles of the dressed electron
//! Green's function in k-space:
//!
//! ```no_run
//! use polecalc_solvers::self_consistent::Config;
//! use polecalc_zerotemp::{Environment, GreenCache, poles::scan_plane, zero_temp_system};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut env = Environment::from_file("environment.json")?;
//! env.initialize();
//!
//! let solution = zero_temp_system([1e-6; 3]).solve_unobserved(env, &Config::default())?;
//! let cache = GreenCache::new();
//! for pole in scan_plane(&solution.state, 16, &cache)? {
//!     println!("{pole}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Spline lookups go through a [`GreenCache`] owned by the caller, so one
//! cache can serve a whole scan and be dropped when the scan ends.

mod cache;
mod environment;
mod error;
mod system;

pub mod greens;
pub mod plots;
pub mod poles;
pub mod spectrum;

pub use cache::{GreenCache, GreenKey};
pub use environment::Environment;
pub use error::Error;
pub use system::{D1Equation, F0Equation, MuEquation, zero_temp_system};
