//! Floating-point helpers shared across the solvers.

/// Upper bound on the relative rounding error of an `f64` operation (2⁻⁵³).
pub const MACHINE_EPSILON: f64 = f64::EPSILON / 2.0;

/// Returns true if `x` and `y` are within [`MACHINE_EPSILON`] of one another.
#[must_use]
pub fn fuzzy_equal(x: f64, y: f64) -> bool {
    (x - y).abs() < MACHINE_EPSILON
}

/// Returns true if `x` and `y` are within 64 × [`MACHINE_EPSILON`] of one another.
#[must_use]
pub fn fuzzier_equal(x: f64, y: f64) -> bool {
    (x - y).abs() < 64.0 * MACHINE_EPSILON
}

/// Returns `num` evenly spaced points from `left` to `right`, inclusive.
///
/// Points are computed as `left + i * step` rather than by repeated addition,
/// so the count is exact. A single point yields `[left]`; zero points yield an
/// empty vector.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn make_range(left: f64, right: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![left],
        _ => {
            let step = (right - left) / (num - 1) as f64;
            (0..num).map(|i| left + i as f64 * step).collect()
        }
    }
}
