/// A scalar self-consistency equation over a parameter state `S`.
///
/// Each equation binds to exactly one scalar field of the state. A solver
/// proposes a value for that field through [`set_argument`], then measures
/// how far the proposed state is from satisfying the equation through
/// [`abs_error`]. The equation is solved when the error vanishes.
///
/// States are treated as values: `set_argument` returns a modified copy and
/// never mutates the state it was given, so a solver can try a value and
/// discard it.
///
/// [`set_argument`]: Equation::set_argument
/// [`abs_error`]: Equation::abs_error
pub trait Equation<S> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the signed residual of the equation for `state`.
    ///
    /// The name follows the physics convention of "absolute error": the
    /// residual is not relative to any scale, but it does carry a sign so
    /// that roots can be bracketed.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residual cannot be computed.
    fn abs_error(&self, state: &S) -> Result<f64, Self::Error>;

    /// Returns a copy of `state` with the bound field set to `value`.
    ///
    /// Implementations also refresh any fields derived from the bound one.
    #[must_use]
    fn set_argument(&self, value: f64, state: &S) -> S;

    /// Returns the interval `(low, high)` searched for a root.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no valid search interval can be determined
    /// for `state`.
    fn range(&self, state: &S) -> Result<(f64, f64), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Pair {
        a: f64,
        b: f64,
    }

    /// Residual `a - target`, bound to `a`.
    struct TargetA(f64);

    impl Equation<Pair> for TargetA {
        type Error = Infallible;

        fn abs_error(&self, state: &Pair) -> Result<f64, Self::Error> {
            Ok(state.a - self.0)
        }

        fn set_argument(&self, value: f64, state: &Pair) -> Pair {
            Pair { a: value, ..*state }
        }

        fn range(&self, _state: &Pair) -> Result<(f64, f64), Self::Error> {
            Ok((-10.0, 10.0))
        }
    }

    #[test]
    fn set_argument_leaves_original_untouched() {
        let eq = TargetA(2.0);
        let original = Pair { a: 0.0, b: 5.0 };

        let updated = eq.set_argument(2.0, &original);

        assert_eq!(original, Pair { a: 0.0, b: 5.0 });
        assert_eq!(updated, Pair { a: 2.0, b: 5.0 });
        assert_eq!(eq.abs_error(&updated), Ok(0.0));
    }

    #[test]
    fn equations_work_as_trait_objects() {
        let equations: Vec<Box<dyn Equation<Pair, Error = Infallible>>> =
            vec![Box::new(TargetA(1.0)), Box::new(TargetA(-1.0))];
        let state = Pair { a: 0.0, b: 0.0 };

        let residuals: Vec<f64> = equations
            .iter()
            .map(|eq| eq.abs_error(&state).unwrap_or(f64::NAN))
            .collect();

        assert_eq!(residuals, vec![-1.0, 1.0]);
    }
}
