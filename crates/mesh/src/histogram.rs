use std::marker::PhantomData;

use polecalc_core::{KahanSum, Vector2};
use thiserror::Error;

use crate::{Reducer, Square, reduce};

/// Errors from constructing a [`DeltaBinner`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BinError {
    #[error("bin range [{min}, {max}] must be finite and non-empty")]
    InvalidRange { min: f64, max: f64 },

    #[error("at least one bin is required")]
    NoBins,
}

/// Divides `[min, max]` into equal-width bins.
///
/// Used to smooth a sum of Dirac delta functions onto a discrete axis: each
/// delta at `x` with weight `w` adds `w` to the bin containing `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaBinner {
    min: f64,
    max: f64,
    num_bins: usize,
}

impl DeltaBinner {
    /// Creates `num_bins` bins spanning `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty or not finite, or if
    /// `num_bins` is zero.
    pub fn new(min: f64, max: f64, num_bins: usize) -> Result<Self, BinError> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(BinError::InvalidRange { min, max });
        }
        if num_bins == 0 {
            return Err(BinError::NoBins);
        }
        Ok(Self { min, max, num_bins })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Width of each bin.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn step(&self) -> f64 {
        (self.max - self.min) / self.num_bins as f64
    }

    /// Returns the bin containing `x`, or `None` if `x` lies outside
    /// `[min, max]`.
    ///
    /// Bins are closed on the left; `max` itself belongs to the last bin.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn bin_index(&self, x: f64) -> Option<usize> {
        if !(self.min <= x && x <= self.max) {
            return None;
        }
        let index = ((x - self.min) / self.step()).floor() as usize;
        Some(index.min(self.num_bins - 1))
    }

    /// Returns the centre of every bin.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bin_values(&self) -> Vec<f64> {
        let step = self.step();
        (0..self.num_bins)
            .map(|i| self.min + (i as f64 + 0.5) * step)
            .collect()
    }
}

/// Accumulates weighted delta functions into the bins of a [`DeltaBinner`].
///
/// Each absorbed value is a collection of `(position, weight)` pairs produced
/// at one mesh point. Weights are summed per bin with compensated summation;
/// pairs outside the binner's range are dropped. The result divides every bin
/// by the number of mesh points absorbed.
#[derive(Debug, Clone)]
pub struct Histogram<T> {
    binner: DeltaBinner,
    bins: Vec<KahanSum>,
    points: u64,
    terms: PhantomData<fn(T)>,
}

impl<T> Histogram<T> {
    /// Creates an empty histogram over the bins of `binner`.
    #[must_use]
    pub fn new(binner: DeltaBinner) -> Self {
        Self {
            binner,
            bins: vec![KahanSum::new(); binner.num_bins()],
            points: 0,
            terms: PhantomData,
        }
    }
}

impl<T> Reducer for Histogram<T>
where
    T: IntoIterator<Item = (f64, f64)>,
{
    type Value = T;
    type Output = Vec<f64>;

    fn absorb(&mut self, terms: T) {
        for (position, weight) in terms {
            if let Some(index) = self.binner.bin_index(position) {
                self.bins[index].add(weight);
            }
        }
        self.points += 1;
    }

    fn merge(&mut self, other: Self) {
        for (bin, other) in self.bins.iter_mut().zip(&other.bins) {
            bin.merge(other);
        }
        self.points += other.points;
    }

    #[allow(clippy::cast_precision_loss)]
    fn result(self) -> Vec<f64> {
        let points = self.points as f64;
        self.bins.iter().map(|bin| bin.value() / points).collect()
    }
}

/// Bins the delta terms produced at every point of `square`.
///
/// `terms` returns the `(position, weight)` pairs for one mesh point. The
/// result holds, for each bin of `binner`, the summed weight divided by the
/// number of mesh points.
pub fn delta_bin<T, W>(square: Square, workers: usize, binner: DeltaBinner, terms: W) -> Vec<f64>
where
    T: IntoIterator<Item = (f64, f64)>,
    W: Fn(Vector2) -> T + Sync,
{
    reduce(square, workers, terms, || Histogram::new(binner))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn rejects_bad_bins() {
        assert!(matches!(
            DeltaBinner::new(1.0, 1.0, 4),
            Err(BinError::InvalidRange { .. })
        ));
        assert!(matches!(
            DeltaBinner::new(0.0, f64::INFINITY, 4),
            Err(BinError::InvalidRange { .. })
        ));
        assert_eq!(DeltaBinner::new(0.0, 1.0, 0), Err(BinError::NoBins));
    }

    #[test]
    fn bin_index_edges() {
        let binner = DeltaBinner::new(0.0, 4.0, 4).unwrap();

        assert_eq!(binner.bin_index(0.0), Some(0));
        assert_eq!(binner.bin_index(0.999), Some(0));
        assert_eq!(binner.bin_index(1.0), Some(1));
        assert_eq!(binner.bin_index(4.0), Some(3));
        assert_eq!(binner.bin_index(4.001), None);
        assert_eq!(binner.bin_index(-0.001), None);
        assert_eq!(binner.bin_index(f64::NAN), None);
    }

    #[test]
    fn bin_values_are_centres() {
        let binner = DeltaBinner::new(-1.0, 1.0, 4).unwrap();
        let values = binner.bin_values();
        for (value, expected) in values.into_iter().zip([-0.75, -0.25, 0.25, 0.75]) {
            assert_relative_eq!(value, expected);
        }
    }

    #[test]
    fn two_fixed_deltas_fill_their_bins() {
        let binner = DeltaBinner::new(0.0, 15.0, 64).unwrap();
        let positions = [5.5, 10.5];

        for workers in [1, 4] {
            let result = delta_bin(Square::new(64), workers, binner, |_| {
                positions.map(|position| (position, 1.0))
            });

            assert_eq!(result.len(), 64);
            for position in positions {
                let index = binner.bin_index(position).unwrap();
                assert_relative_eq!(result[index], 1.0, epsilon = f64::EPSILON);
            }
            let total: f64 = result.iter().sum();
            assert_relative_eq!(total, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn out_of_range_terms_are_dropped() {
        let binner = DeltaBinner::new(0.0, 1.0, 2).unwrap();
        let result = delta_bin(Square::new(4), 2, binner, |_| vec![(0.25, 2.0), (7.0, 1.0)]);
        assert_eq!(result, vec![2.0, 0.0]);
    }
}
