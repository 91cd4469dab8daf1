/// Indicates why solving a system finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every equation is within its tolerance.
    Converged,

    /// Reached the configured step limit without converging.
    MaxSteps,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of solving a self-consistent system.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    /// Final solver status.
    pub status: Status,

    /// State when the solver finished.
    pub state: S,

    /// Number of single-equation solves performed.
    pub steps: usize,
}
