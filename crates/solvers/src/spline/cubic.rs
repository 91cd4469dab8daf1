use polecalc_core::KahanSum;

use super::{Error, SPLINE_EXTRAPOLATION_DISTANCE, solve_tridiagonal};

/// A natural cubic spline through a set of strictly ascending knots.
///
/// On segment `i`, with `dx = x - xs[i]`, the interpolant is
/// `a[i] dx³ + b[i] dx² + c[i] dx + d[i]`. The second derivative vanishes at
/// both ends of the range.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    xs: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

impl CubicSpline {
    /// Builds the natural cubic spline interpolating `ys` at the knots `xs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices differ in length, hold fewer than three
    /// points, or `xs` is not strictly ascending.
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, Error> {
        if xs.len() != ys.len() {
            return Err(Error::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.len() < 3 {
            return Err(Error::TooFewPoints { len: xs.len() });
        }
        if let Some(index) = xs.windows(2).position(|w| !(w[0] < w[1])) {
            return Err(Error::NotAscending { index: index + 1 });
        }

        let n = xs.len();
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let slope: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

        // Second derivatives at the interior knots.
        let sub = &h[1..n - 2];
        let diag: Vec<f64> = h.windows(2).map(|w| 2.0 * (w[0] + w[1])).collect();
        let rhs: Vec<f64> = slope.windows(2).map(|s| 6.0 * (s[1] - s[0])).collect();
        let interior = solve_tridiagonal(sub, &diag, sub, &rhs)?;

        let mut m = Vec::with_capacity(n);
        m.push(0.0);
        m.extend(interior);
        m.push(0.0);

        let a = (0..n - 1).map(|i| (m[i + 1] - m[i]) / (6.0 * h[i])).collect();
        let b = m[..n - 1].iter().map(|m| 0.5 * m).collect();
        let c = (0..n - 1)
            .map(|i| slope[i] - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0)
            .collect();
        let d = ys[..n - 1].to_vec();

        Ok(Self {
            xs: xs.to_vec(),
            a,
            b,
            c,
            d,
        })
    }

    /// Returns the first and last knot.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Returns the knots.
    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.xs
    }

    /// Evaluates the spline at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `x` lies further than
    /// [`SPLINE_EXTRAPOLATION_DISTANCE`] outside the knot range.
    pub fn at(&self, x: f64) -> Result<f64, Error> {
        self.check_range(x)?;
        let i = self.index_of(x);
        let dx = x - self.xs[i];
        Ok(((self.a[i] * dx + self.b[i]) * dx + self.c[i]) * dx + self.d[i])
    }

    /// Integrates the spline from `left` to `right`.
    ///
    /// Reversed bounds give the negated integral.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either bound lies further than
    /// [`SPLINE_EXTRAPOLATION_DISTANCE`] outside the knot range.
    pub fn integrate(&self, left: f64, right: f64) -> Result<f64, Error> {
        if left > right {
            return self.integrate(right, left).map(|value| -value);
        }
        self.check_range(left)?;
        self.check_range(right)?;

        let first = self.index_of(left);
        let last = self.index_of(right);
        if first == last {
            return Ok(self.antiderivative(first, right) - self.antiderivative(first, left));
        }

        let mut sum = KahanSum::new();
        sum.add(self.antiderivative(first, self.xs[first + 1]) - self.antiderivative(first, left));
        for i in first + 1..last {
            sum.add(self.antiderivative(i, self.xs[i + 1]));
        }
        sum.add(self.antiderivative(last, right));
        Ok(sum.value())
    }

    /// Antiderivative of segment `i`, zero at its left knot.
    fn antiderivative(&self, i: usize, x: f64) -> f64 {
        let dx = x - self.xs[i];
        (((0.25 * self.a[i] * dx + self.b[i] / 3.0) * dx + 0.5 * self.c[i]) * dx + self.d[i]) * dx
    }

    /// Index of the segment owning `x`, clamped to the valid segments.
    fn index_of(&self, x: f64) -> usize {
        let segments = self.xs.len() - 1;
        self.xs
            .partition_point(|&knot| knot <= x)
            .saturating_sub(1)
            .min(segments - 1)
    }

    fn check_range(&self, x: f64) -> Result<(), Error> {
        let (min, max) = self.range();
        if min - x > SPLINE_EXTRAPOLATION_DISTANCE
            || x - max > SPLINE_EXTRAPOLATION_DISTANCE
            || x.is_nan()
        {
            return Err(Error::OutOfRange { x, min, max });
        }
        Ok(())
    }
}
