use std::cell::Cell;

use approx::assert_relative_eq;
use polecalc_core::Equation;
use thiserror::Error;

use super::{Action, Config, Error, Event, Outcome, Status, System, multi_solve, solve};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

#[derive(Debug, Error)]
#[error("equation failed")]
struct Failure;

#[derive(Debug, Clone, Copy)]
enum Field {
    X,
    Y,
}

/// An equation bound to one field of `Point`, with a fixed residual.
struct Residual {
    field: Field,
    residual: fn(&Point) -> f64,
}

impl Residual {
    fn x(residual: fn(&Point) -> f64) -> Self {
        Self {
            field: Field::X,
            residual,
        }
    }

    fn y(residual: fn(&Point) -> f64) -> Self {
        Self {
            field: Field::Y,
            residual,
        }
    }
}

impl Equation<Point> for Residual {
    type Error = Failure;

    fn abs_error(&self, state: &Point) -> Result<f64, Self::Error> {
        Ok((self.residual)(state))
    }

    fn set_argument(&self, value: f64, state: &Point) -> Point {
        match self.field {
            Field::X => Point { x: value, ..*state },
            Field::Y => Point { y: value, ..*state },
        }
    }

    fn range(&self, _state: &Point) -> Result<(f64, f64), Self::Error> {
        Ok((-10.0, 10.0))
    }
}

/// Fails to evaluate its residual above `x = 0.5`, short of its root.
struct Fragile;

impl Equation<Point> for Fragile {
    type Error = Failure;

    fn abs_error(&self, state: &Point) -> Result<f64, Self::Error> {
        if state.x > 0.5 { Err(Failure) } else { Ok(state.x - 0.75) }
    }

    fn set_argument(&self, value: f64, state: &Point) -> Point {
        Point { x: value, ..*state }
    }

    fn range(&self, _state: &Point) -> Result<(f64, f64), Self::Error> {
        Ok((-1.0, 1.0))
    }
}

/// Has no valid search range.
struct Rangeless;

impl Equation<Point> for Rangeless {
    type Error = Failure;

    fn abs_error(&self, _state: &Point) -> Result<f64, Self::Error> {
        Ok(1.0)
    }

    fn set_argument(&self, _value: f64, state: &Point) -> Point {
        *state
    }

    fn range(&self, _state: &Point) -> Result<(f64, f64), Self::Error> {
        Err(Failure)
    }
}

/// x = 1 + y/2 and y = x/4, with fixed point (8/7, 2/7).
fn coupled<'a>() -> System<'a, Point, Failure> {
    System::new()
        .with(Residual::x(|p| p.x - 0.5 * p.y - 1.0), 1e-10)
        .with(Residual::y(|p| p.y - 0.25 * p.x), 1e-10)
}

#[test]
fn solves_single_equation() {
    let state = solve(&Residual::x(|p| 1.5 - p.x), &ORIGIN).unwrap();
    assert_relative_eq!(state.x, 1.5, max_relative = 1e-15);
    assert_eq!(state.y, 0.0);
}

#[test]
fn multi_solve_finds_every_root() {
    let equation = Residual::x(|p| (p.x - 1.0) * (p.x + 2.0) * (p.x - 3.0));
    let states = multi_solve(&equation, &ORIGIN).unwrap();

    let roots: Vec<f64> = states.iter().map(|s| s.x).collect();
    assert_eq!(roots.len(), 3, "{roots:?}");
    for (root, expected) in roots.into_iter().zip([-2.0, 1.0, 3.0]) {
        assert_relative_eq!(root, expected, epsilon = 1e-12);
    }
}

#[test]
fn missing_root_is_no_bracket() {
    let error = solve(&Residual::x(|p| p.x * p.x + 1.0), &ORIGIN).unwrap_err();
    assert!(error.is_no_bracket(), "{error}");
}

#[test]
fn range_errors_propagate() {
    let error = solve(&Rangeless, &ORIGIN).unwrap_err();
    assert!(matches!(error, Error::Equation(_)));
    assert!(!error.is_no_bracket());
}

#[test]
fn residual_errors_during_search_propagate() {
    let error = solve(&Fragile, &ORIGIN).unwrap_err();
    assert!(matches!(error, Error::Equation(_)), "{error}");
}

#[test]
fn decoupled_equations_converge() {
    let system = System::new()
        .with(Residual::x(|p| 1.5 - p.x), 1e-12)
        .with(Residual::y(|p| -2.25 - p.y), 1e-12);

    let solution = system.solve_unobserved(ORIGIN, &Config::default()).unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.steps, 2);
    assert_relative_eq!(solution.state.x, 1.5, epsilon = 1e-12);
    assert_relative_eq!(solution.state.y, -2.25, epsilon = 1e-12);
}

#[test]
fn coupled_equations_reach_fixed_point() {
    let system = coupled();
    let mut restarts = 0;

    let solution = system
        .solve(ORIGIN, &Config::default(), |event: &Event<'_, Point>| -> Option<Action> {
            if event.outcome == Outcome::Restarted {
                restarts += 1;
            }
            None
        })
        .unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert!(restarts > 0);
    assert!(system.is_solved(&solution.state).unwrap());
    assert_relative_eq!(solution.state.x, 8.0 / 7.0, epsilon = 1e-9);
    assert_relative_eq!(solution.state.y, 2.0 / 7.0, epsilon = 1e-9);
}

#[test]
fn already_solved_state_takes_no_steps() {
    let system = coupled();
    let start = Point {
        x: 8.0 / 7.0,
        y: 2.0 / 7.0,
    };

    let solution = system.solve_unobserved(start, &Config::default()).unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.steps, 0);
    assert_eq!(solution.state, start);
}

#[test]
fn empty_system_is_solved() {
    let system: System<'_, Point, Failure> = System::new();
    assert!(system.is_empty());

    let solution = system.solve_unobserved(ORIGIN, &Config::default()).unwrap();
    assert_eq!(solution.status, Status::Converged);
}

#[test]
fn stops_at_step_limit() {
    let config = Config { max_steps: Some(1) };
    let solution = coupled().solve_unobserved(ORIGIN, &config).unwrap();

    assert_eq!(solution.status, Status::MaxSteps);
    assert_eq!(solution.steps, 1);
    assert_relative_eq!(solution.state.x, 1.0, epsilon = 1e-15);
}

#[test]
fn observer_can_stop_early() {
    let mut seen = Vec::new();

    let solution = coupled()
        .solve(ORIGIN, &Config::unbounded(), |event: &Event<'_, Point>| {
            seen.push((event.step, event.index, event.outcome));
            (event.step == 2).then_some(Action::StopEarly)
        })
        .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.steps, 2);
    assert_eq!(
        seen,
        vec![(1, 0, Outcome::Advanced), (2, 1, Outcome::Restarted)]
    );
}

#[test]
fn solved_up_to_checks_prefix_only() {
    let system = coupled();
    let state = Point { x: 1.0, y: 0.0 };

    assert!(system.solved_up_to(&state, 0).unwrap());
    assert!(!system.solved_up_to(&state, 1).unwrap());
    assert!(!system.is_solved(&state).unwrap());
}

/// Residual `x - 1` until `drifted` is set, then never within tolerance.
struct Drifting<'a> {
    drifted: &'a Cell<bool>,
}

impl Equation<Point> for Drifting<'_> {
    type Error = Failure;

    fn abs_error(&self, state: &Point) -> Result<f64, Self::Error> {
        if self.drifted.get() { Ok(1.0) } else { Ok(state.x - 1.0) }
    }

    fn set_argument(&self, value: f64, state: &Point) -> Point {
        Point { x: value, ..*state }
    }

    fn range(&self, _state: &Point) -> Result<(f64, f64), Self::Error> {
        Ok((-10.0, 10.0))
    }
}

#[test]
fn last_advance_converges_without_rechecking() {
    let drifted = Cell::new(false);
    let system = System::new().with(Drifting { drifted: &drifted }, 1e-12);

    // A residual that reads differently on a second evaluation must not
    // undo the advance past the last equation.
    let solution = system
        .solve(ORIGIN, &Config::default(), |event: &Event<'_, Point>| -> Option<Action> {
            if event.outcome == Outcome::Advanced {
                drifted.set(true);
            }
            None
        })
        .unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.steps, 1);
    assert_relative_eq!(solution.state.x, 1.0, epsilon = 1e-12);
}
