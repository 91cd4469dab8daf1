use log::debug;
use polecalc_core::{Equation, Observer};

use super::{Action, Config, Error, Event, Outcome, Solution, Status, single};

/// An ordered group of coupled equations that must all be solved together.
///
/// Each equation is paired with the tolerance its residual must meet.
/// All equations share the state type `S` and error type `E`.
pub struct System<'a, S, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    equations: Vec<(Box<dyn Equation<S, Error = E> + 'a>, f64)>,
}

impl<S, E> Default for System<'_, S, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn default() -> Self {
        Self {
            equations: Vec::new(),
        }
    }
}

impl<'a, S, E> System<'a, S, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// Creates an empty system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an equation with the given tolerance.
    #[must_use]
    pub fn with<Q>(mut self, equation: Q, tolerance: f64) -> Self
    where
        Q: Equation<S, Error = E> + 'a,
    {
        self.push(equation, tolerance);
        self
    }

    /// Appends an equation with the given tolerance.
    pub fn push<Q>(&mut self, equation: Q, tolerance: f64)
    where
        Q: Equation<S, Error = E> + 'a,
    {
        self.equations.push((Box::new(equation), tolerance));
    }

    /// Returns the number of equations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    /// Returns `true` if the system has no equations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Returns `true` if every equation is within tolerance for `state`.
    ///
    /// An empty system is always solved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Equation`] if a residual cannot be computed.
    pub fn is_solved(&self, state: &S) -> Result<bool, Error> {
        self.within_tolerance(state, self.equations.len())
    }

    /// Returns `true` if equations `0..=index` are within tolerance for
    /// `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Equation`] if a residual cannot be computed.
    pub fn solved_up_to(&self, state: &S, index: usize) -> Result<bool, Error> {
        self.within_tolerance(state, index + 1)
    }

    fn within_tolerance(&self, state: &S, count: usize) -> Result<bool, Error> {
        for (equation, tolerance) in self.equations.iter().take(count) {
            let residual = equation
                .abs_error(state)
                .map_err(|error| Error::Equation(Box::new(error)))?;
            if !(residual.abs() <= *tolerance) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Solves the system starting from `state`, without observation.
    ///
    /// # Errors
    ///
    /// Same as [`System::solve`].
    pub fn solve_unobserved(&self, state: S, config: &Config) -> Result<Solution<S>, Error> {
        self.solve(state, config, ())
    }

    /// Solves the system starting from `state`.
    ///
    /// # Errors
    ///
    /// Returns the first error from solving a single equation or evaluating a
    /// residual.
    ///
    /// # Panics
    ///
    /// Panics if the equation index overruns the system, which indicates a
    /// broken advance/restart invariant rather than bad input.
    pub fn solve<Obs>(
        &self,
        state: S,
        config: &Config,
        mut observer: Obs,
    ) -> Result<Solution<S>, Error>
    where
        Obs: for<'e> Observer<Event<'e, S>, Action>,
    {
        let mut state = state;
        let mut index = 0;
        let mut steps = 0;

        loop {
            // Reaching the end means the last step just checked every
            // equation, so the residuals are not evaluated again.
            if index == self.equations.len() || self.is_solved(&state)? {
                debug!("self-consistent system converged after {steps} steps");
                return Ok(Solution {
                    status: Status::Converged,
                    state,
                    steps,
                });
            }

            assert!(
                index < self.equations.len(),
                "self-consistent solver overran its {} equations",
                self.equations.len()
            );

            if config.max_steps.is_some_and(|max| steps >= max) {
                debug!("self-consistent system hit the step limit of {steps}");
                return Ok(Solution {
                    status: Status::MaxSteps,
                    state,
                    steps,
                });
            }

            let (equation, _) = &self.equations[index];
            state = single::solve(equation.as_ref(), &state)?;
            steps += 1;

            let solved_index = index;
            let outcome = if self.solved_up_to(&state, index)? {
                index += 1;
                Outcome::Advanced
            } else {
                index = 0;
                Outcome::Restarted
            };
            debug!("step {steps}: solved equation {solved_index}, {outcome:?}");

            let event = Event {
                step: steps,
                index: solved_index,
                state: &state,
                outcome,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Ok(Solution {
                    status: Status::StoppedByObserver,
                    state,
                    steps,
                });
            }
        }
    }
}
