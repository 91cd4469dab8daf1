/// What the solver did after solving one equation of a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The solved equation and all before it are within tolerance; the solver
    /// moves on to the next equation.
    Advanced,

    /// Solving the equation disturbed an earlier one; the solver restarts from
    /// the first equation.
    Restarted,
}

/// Emitted after each single-equation solve within a system.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, S> {
    /// Number of single-equation solves so far, including this one.
    pub step: usize,

    /// Index of the equation that was just solved.
    pub index: usize,

    /// State after applying the root of that equation.
    pub state: &'a S,

    /// Whether the solver advanced or restarted.
    pub outcome: Outcome,
}

/// Actions an observer can take while a system is being solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop immediately and return the current state.
    StopEarly,
}
