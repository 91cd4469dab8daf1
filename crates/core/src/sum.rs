/// Compensated (Kahan) running sum.
///
/// Tracks the low-order bits lost by each addition and feeds them back into
/// the next one, so error does not grow with the number of terms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    /// Creates an empty sum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the running sum.
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// Folds another partial sum into this one, keeping its correction term.
    pub fn merge(&mut self, other: &KahanSum) {
        self.add(other.sum);
        self.add(-other.compensation);
    }

    /// Returns the current value of the sum.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.sum
    }
}

impl Extend<f64> for KahanSum {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<f64> for KahanSum {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut sum = Self::new();
        sum.extend(iter);
        sum
    }
}
