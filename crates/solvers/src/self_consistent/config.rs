/// Configuration for solving a self-consistent [`System`](super::System).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of single-equation solves, or `None` for no limit.
    pub max_steps: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_steps: Some(1000),
        }
    }
}

impl Config {
    /// A config with no step limit.
    #[must_use]
    pub fn unbounded() -> Self {
        Self { max_steps: None }
    }
}
