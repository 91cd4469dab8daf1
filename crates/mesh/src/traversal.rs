//! Sequential walks through k-space.

use std::f64::consts::PI;

use polecalc_core::{Vector2, numeric::make_range};

/// The zone centre, Γ = (0, 0).
pub const GAMMA: Vector2 = Vector2::new(0.0, 0.0);

/// The zone-edge midpoint X = (π, 0).
pub const X: Vector2 = Vector2::new(PI, 0.0);

/// The zone corner M = (π, π).
pub const M: Vector2 = Vector2::new(PI, PI);

/// Points on a uniform grid over the third quadrant `[-π, 0) × [-π, 0)`.
///
/// Yields `points_per_side²` points in row-major order with `x` varying
/// fastest.
pub fn third_quadrant(points_per_side: u32) -> impl Iterator<Item = Vector2> {
    let step = PI / f64::from(points_per_side);
    (0..points_per_side).flat_map(move |j| {
        (0..points_per_side).map(move |i| {
            Vector2::new(-PI + f64::from(i) * step, -PI + f64::from(j) * step)
        })
    })
}

/// Points along a parametrised curve.
///
/// `curve` maps `t ∈ [0, 1]` to k-space; it is sampled at `num_points` evenly
/// spaced values of `t`, both ends included.
pub fn curve<C>(curve: C, num_points: usize) -> impl Iterator<Item = Vector2>
where
    C: Fn(f64) -> Vector2,
{
    make_range(0.0, 1.0, num_points).into_iter().map(curve)
}

/// Points along the high-symmetry path Γ → X → M → Γ.
///
/// Each of the three lines contributes `points_per_line` evenly spaced points
/// starting at its first corner, and the path closes with a final Γ, for
/// `3 * points_per_line + 1` points in total.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn symmetry_lines(points_per_line: usize) -> Vec<Vector2> {
    let mut points = Vec::with_capacity(3 * points_per_line + 1);
    for (start, end) in [(GAMMA, X), (X, M), (M, GAMMA)] {
        let step = (end - start) * (1.0 / points_per_line as f64);
        points.extend((0..points_per_line).map(|i| start + step * i as f64));
    }
    points.push(GAMMA);
    points
}
