//! Self-consistent equation solving.
//!
//! # Single equations
//!
//! [`solve`] drives one [`Equation`] to a root: it searches the equation's
//! [`range`] for a bracket with [`find_bracket`], refines the root with
//! [`bisect_full_precision`], and returns the state with that root applied.
//! [`multi_solve`] does the same for every bracket [`find_all_brackets`]
//! finds, returning one state per root.
//!
//! # Systems
//!
//! A [`System`] is an ordered list of coupled equations, each with its own
//! tolerance. Solving proceeds one equation at a time, starting at the first:
//!
//! 1. If every equation is within tolerance, the system is solved.
//! 2. Otherwise solve the current equation alone.
//! 3. If the current equation and all those before it are now within
//!    tolerance, advance to the next equation. Otherwise the new value has
//!    disturbed an earlier equation, so restart from the first.
//!
//! This restart-on-regression sweep need not terminate for a badly coupled
//! system, so [`Config::max_steps`] bounds the number of single-equation
//! solves.
//!
//! # Observer Events
//!
//! [`System::solve`] emits one [`Event`] after every single-equation solve.
//! Observers can return [`Action::StopEarly`] to halt with the current state.
//!
//! [`Equation`]: polecalc_core::Equation
//! [`range`]: polecalc_core::Equation::range
//! [`find_bracket`]: crate::roots::find_bracket
//! [`find_all_brackets`]: crate::roots::find_all_brackets
//! [`bisect_full_precision`]: crate::roots::bisect_full_precision

mod config;
mod error;
mod event;
mod single;
mod solution;
mod system;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::Error;
pub use event::{Action, Event, Outcome};
pub use single::{multi_solve, solve};
pub use solution::{Solution, Status};
pub use system::System;
