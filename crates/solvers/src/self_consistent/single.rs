use log::trace;
use polecalc_core::Equation;

use super::Error;
use crate::roots::{bisect_full_precision, find_all_brackets, find_bracket};

/// Solves `equation` for `state`, returning the state with the root applied.
///
/// # Errors
///
/// - [`Error::Equation`] if the equation fails to report its range or
///   residual.
/// - [`Error::Root`] if no bracket is found in the equation's range.
pub fn solve<S, Q>(equation: &Q, state: &S) -> Result<S, Error>
where
    Q: Equation<S> + ?Sized,
{
    let (low, high) = equation.range(state).map_err(boxed)?;
    let mut residual = Residual::new(equation, state);

    let bracket = find_bracket(|x| residual.at(x), low, high);
    residual.check()?;
    let (left, right) = bracket?;

    let root = bisect_full_precision(|x| residual.at(x), left, right);
    residual.check()?;
    let root = root?;

    trace!("solved equation in [{low}, {high}]: root {root}");
    Ok(equation.set_argument(root, state))
}

/// Solves `equation` for `state` at every root found in its range.
///
/// Returns one state per root, in ascending order of the root.
///
/// # Errors
///
/// Same as [`solve`].
pub fn multi_solve<S, Q>(equation: &Q, state: &S) -> Result<Vec<S>, Error>
where
    Q: Equation<S> + ?Sized,
{
    let (low, high) = equation.range(state).map_err(boxed)?;
    let mut residual = Residual::new(equation, state);

    let brackets = find_all_brackets(|x| residual.at(x), low, high);
    residual.check()?;

    let mut solutions = Vec::new();
    for (left, right) in brackets? {
        let root = bisect_full_precision(|x| residual.at(x), left, right);
        residual.check()?;
        solutions.push(equation.set_argument(root?, state));
    }
    Ok(solutions)
}

/// The residual of an equation as a plain `f64 -> f64` function.
///
/// Root finders cannot propagate errors from the function they search, so the
/// first equation error is stored and every later evaluation returns NaN.
/// Callers must call [`Residual::check`] after each search.
struct Residual<'a, S, Q: Equation<S> + ?Sized> {
    equation: &'a Q,
    state: &'a S,
    error: Option<Q::Error>,
}

impl<'a, S, Q: Equation<S> + ?Sized> Residual<'a, S, Q> {
    fn new(equation: &'a Q, state: &'a S) -> Self {
        Self {
            equation,
            state,
            error: None,
        }
    }

    fn at(&mut self, x: f64) -> f64 {
        if self.error.is_some() {
            return f64::NAN;
        }
        let trial = self.equation.set_argument(x, self.state);
        match self.equation.abs_error(&trial) {
            Ok(value) => value,
            Err(error) => {
                self.error = Some(error);
                f64::NAN
            }
        }
    }

    fn check(&mut self) -> Result<(), Error> {
        match self.error.take() {
            Some(error) => Err(boxed(error)),
            None => Ok(()),
        }
    }
}

fn boxed<E: std::error::Error + Send + Sync + 'static>(error: E) -> Error {
    Error::Equation(Box::new(error))
}
