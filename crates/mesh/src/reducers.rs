use polecalc_core::{KahanSum, Vector2};

use crate::{Reducer, Square, reduce};

/// Compensated mean of the absorbed values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Average {
    sum: KahanSum,
    count: u64,
}

impl Reducer for Average {
    type Value = f64;
    type Output = f64;

    fn absorb(&mut self, value: f64) {
        self.sum.add(value);
        self.count += 1;
    }

    fn merge(&mut self, other: Self) {
        self.sum.merge(&other.sum);
        self.count += other.count;
    }

    /// Returns NaN if nothing was absorbed.
    #[allow(clippy::cast_precision_loss)]
    fn result(self) -> f64 {
        self.sum.value() / self.count as f64
    }
}

/// Smallest absorbed value, or `+∞` if nothing was absorbed.
///
/// NaN values are ignored.
#[derive(Debug, Clone, Copy)]
pub struct Minimum(f64);

impl Default for Minimum {
    fn default() -> Self {
        Self(f64::INFINITY)
    }
}

impl Reducer for Minimum {
    type Value = f64;
    type Output = f64;

    fn absorb(&mut self, value: f64) {
        self.0 = self.0.min(value);
    }

    fn merge(&mut self, other: Self) {
        self.absorb(other.0);
    }

    fn result(self) -> f64 {
        self.0
    }
}

/// Largest absorbed value, or `-∞` if nothing was absorbed.
///
/// NaN values are ignored.
#[derive(Debug, Clone, Copy)]
pub struct Maximum(f64);

impl Default for Maximum {
    fn default() -> Self {
        Self(f64::NEG_INFINITY)
    }
}

impl Reducer for Maximum {
    type Value = f64;
    type Output = f64;

    fn absorb(&mut self, value: f64) {
        self.0 = self.0.max(value);
    }

    fn merge(&mut self, other: Self) {
        self.absorb(other.0);
    }

    fn result(self) -> f64 {
        self.0
    }
}

/// Average of `worker` over every point of `square`.
pub fn average<W>(square: Square, workers: usize, worker: W) -> f64
where
    W: Fn(Vector2) -> f64 + Sync,
{
    reduce(square, workers, worker, Average::default)
}

/// Minimum of `worker` over every point of `square`.
pub fn minimum<W>(square: Square, workers: usize, worker: W) -> f64
where
    W: Fn(Vector2) -> f64 + Sync,
{
    reduce(square, workers, worker, Minimum::default)
}

/// Maximum of `worker` over every point of `square`.
pub fn maximum<W>(square: Square, workers: usize, worker: W) -> f64
where
    W: Fn(Vector2) -> f64 + Sync,
{
    reduce(square, workers, worker, Maximum::default)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn average_of_constant() {
        assert_relative_eq!(average(Square::new(10), 3, |_| 2.5), 2.5);
    }

    #[test]
    fn average_of_empty_mesh_is_nan() {
        assert!(average(Square::new(0), 1, |_| 1.0).is_nan());
    }

    #[test]
    fn extremes_of_coordinates() {
        let square = Square::new(8);
        let step = square.step();

        assert_relative_eq!(minimum(square, 2, |k| k.x + k.y), -2.0 * std::f64::consts::PI);
        assert_relative_eq!(
            maximum(square, 2, |k| k.x + k.y),
            2.0 * (std::f64::consts::PI - step),
            epsilon = 1e-12
        );
    }

    #[test]
    fn extremes_ignore_nan() {
        let mut min = Minimum::default();
        let mut max = Maximum::default();
        for value in [1.0, f64::NAN, -3.0] {
            min.absorb(value);
            max.absorb(value);
        }
        assert_eq!(min.result(), -3.0);
        assert_eq!(max.result(), 1.0);
    }

    #[test]
    fn merged_average_weights_by_count() {
        let mut left = Average::default();
        left.absorb(1.0);
        let mut right = Average::default();
        right.absorb(4.0);
        right.absorb(7.0);

        left.merge(right);
        assert_relative_eq!(left.result(), 4.0);
    }
}
