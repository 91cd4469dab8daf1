use std::f64::consts::PI;

use polecalc_core::Vector2;

/// A uniform mesh over the Brillouin zone `[-π, π) × [-π, π)`.
///
/// Point `(i, j)` sits at `(-π + i·2π/L, -π + j·2π/L)` for a mesh with `L`
/// points per side. Points are numbered in row-major order with `x` varying
/// fastest, so index `n` maps to `i = n mod L`, `j = n div L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    points_per_side: u32,
}

impl Square {
    /// Creates a mesh with `points_per_side` points along each axis.
    #[must_use]
    pub const fn new(points_per_side: u32) -> Self {
        Self { points_per_side }
    }

    /// Returns the number of points along each axis.
    #[must_use]
    pub const fn points_per_side(&self) -> u32 {
        self.points_per_side
    }

    /// Returns the total number of points, `L²`.
    #[must_use]
    pub const fn len(&self) -> u64 {
        let side = self.points_per_side as u64;
        side * side
    }

    /// Returns `true` if the mesh has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points_per_side == 0
    }

    /// Returns the spacing between neighbouring points.
    #[must_use]
    pub fn step(&self) -> f64 {
        2.0 * PI / f64::from(self.points_per_side)
    }

    /// Returns the point with the given row-major index, or `None` if the
    /// index is out of range.
    #[must_use]
    pub fn point(&self, index: u64) -> Option<Vector2> {
        if index >= self.len() {
            return None;
        }
        let side = u64::from(self.points_per_side);
        let (i, j) = (index % side, index / side);
        Some(self.coordinate(i, j))
    }

    /// Returns an iterator over every point in row-major order.
    #[must_use]
    pub fn iter(&self) -> Points {
        Points {
            square: *self,
            next: 0,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn coordinate(&self, i: u64, j: u64) -> Vector2 {
        let step = self.step();
        Vector2::new(-PI + i as f64 * step, -PI + j as f64 * step)
    }
}

impl IntoIterator for Square {
    type Item = Vector2;
    type IntoIter = Points;

    fn into_iter(self) -> Points {
        self.iter()
    }
}

/// Iterator over the points of a [`Square`].
#[derive(Debug, Clone)]
pub struct Points {
    square: Square,
    next: u64,
}

impl Iterator for Points {
    type Item = Vector2;

    fn next(&mut self) -> Option<Vector2> {
        let point = self.square.point(self.next)?;
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.square.len() - self.next).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}
