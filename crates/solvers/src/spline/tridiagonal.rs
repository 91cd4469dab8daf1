use thiserror::Error;

/// Errors from [`solve_tridiagonal`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TridiagonalError {
    #[error("diagonal has {diag} entries; expected {expected} off-diagonal and {diag} right-hand-side entries")]
    DimensionMismatch { diag: usize, expected: usize },

    #[error("zero pivot in row {row}")]
    ZeroPivot { row: usize },
}

/// Solves the tridiagonal system `A x = rhs`.
///
/// `diag` is the main diagonal of `A` (length `n`). `sub` and `sup` are the
/// diagonals below and above it (length `n - 1`): `sub[i]` sits in row
/// `i + 1`, `sup[i]` in row `i`.
///
/// Uses the Thomas algorithm: a forward elimination pass followed by back
/// substitution. No pivoting is performed, so the matrix should be
/// diagonally dominant.
///
/// # Errors
///
/// Returns an error if the slice lengths are inconsistent or elimination hits
/// a zero pivot.
pub fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, TridiagonalError> {
    let n = diag.len();
    let expected = n.saturating_sub(1);
    if sub.len() != expected || sup.len() != expected || rhs.len() != n {
        return Err(TridiagonalError::DimensionMismatch { diag: n, expected });
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    // Modified super-diagonal and right-hand side.
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    let mut pivot = diag[0];
    for row in 0..n {
        if row > 0 {
            pivot = diag[row] - sub[row - 1] * c[row - 1];
        }
        if pivot == 0.0 {
            return Err(TridiagonalError::ZeroPivot { row });
        }
        if row + 1 < n {
            c[row] = sup[row] / pivot;
        }
        d[row] = if row > 0 {
            (rhs[row] - sub[row - 1] * d[row - 1]) / pivot
        } else {
            rhs[0] / pivot
        };
    }

    let mut x = d;
    for row in (0..n - 1).rev() {
        x[row] -= c[row] * x[row + 1];
    }
    Ok(x)
}
