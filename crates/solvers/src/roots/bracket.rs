use polecalc_core::numeric::{fuzzy_equal, make_range};

use super::Error;

/// Number of subintervals in the first bracket-search pass.
pub const INITIAL_BRACKET_STEPS: usize = 32;

/// Largest number of subintervals tried before giving up on a bracket search.
pub const MAX_BRACKET_STEPS: usize = 8192;

/// Returns `true` if `a` and `b` are both non-negative or both non-positive.
///
/// Zero is compatible with either sign, so `same_sign(0.0, -1.0)` is `true`.
/// NaN has no sign and is never the same sign as anything.
#[must_use]
pub fn same_sign(a: f64, b: f64) -> bool {
    (a >= 0.0 && b >= 0.0) || (a <= 0.0 && b <= 0.0)
}

/// Finds the first interval in `[left, right]` over which `f` changes sign.
///
/// The range is sampled on a uniform grid of [`INITIAL_BRACKET_STEPS`]
/// subintervals, doubling up to [`MAX_BRACKET_STEPS`] until a bracket
/// appears. A sample that is exactly zero is widened by one grid step so that
/// it lies strictly inside the returned bracket.
///
/// # Errors
///
/// - [`Error::ZeroWidth`] if `left == right`.
/// - [`Error::NonFinite`] if either endpoint is infinite or NaN.
/// - [`Error::NoBracket`] if no bracket is found at the finest grid.
pub fn find_bracket<F>(f: F, left: f64, right: f64) -> Result<(f64, f64), Error>
where
    F: FnMut(f64) -> f64,
{
    let brackets = scan(f, left, right, Mode::First)?;
    brackets
        .first()
        .copied()
        .ok_or(Error::NoBracket { left, right })
}

/// Finds every interval in `[left, right]` over which `f` changes sign.
///
/// Behaves like [`find_bracket`] but collects all brackets found on the
/// first grid that has any. Samples within machine epsilon of zero count as
/// roots and are widened by one grid step on the right. The grid point that
/// follows such a root does not start a new bracket.
///
/// # Errors
///
/// Same as [`find_bracket`].
pub fn find_all_brackets<F>(f: F, left: f64, right: f64) -> Result<Vec<(f64, f64)>, Error>
where
    F: FnMut(f64) -> f64,
{
    scan(f, left, right, Mode::All)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    First,
    All,
}

impl Mode {
    fn is_root(self, value: f64) -> bool {
        match self {
            Mode::First => value == 0.0,
            Mode::All => fuzzy_equal(value, 0.0),
        }
    }
}

fn scan<F>(mut f: F, left: f64, right: f64, mode: Mode) -> Result<Vec<(f64, f64)>, Error>
where
    F: FnMut(f64) -> f64,
{
    if !left.is_finite() {
        return Err(Error::NonFinite { value: left });
    }
    if !right.is_finite() {
        return Err(Error::NonFinite { value: right });
    }
    if left == right {
        return Err(Error::ZeroWidth { value: left });
    }
    let (left, right) = if left < right {
        (left, right)
    } else {
        (right, left)
    };

    let mut steps = INITIAL_BRACKET_STEPS;
    loop {
        let brackets = scan_grid(&mut f, &make_range(left, right, steps + 1), mode);
        if !brackets.is_empty() {
            return Ok(brackets);
        }
        if steps >= MAX_BRACKET_STEPS {
            return Err(Error::NoBracket { left, right });
        }
        steps *= 2;
    }
}

/// Scans one grid, evaluating `f` once per grid point.
fn scan_grid<F>(f: &mut F, xs: &[f64], mode: Mode) -> Vec<(f64, f64)>
where
    F: FnMut(f64) -> f64,
{
    let scale = xs[1] - xs[0];
    let mut brackets = Vec::new();
    let mut f_a = f(xs[0]);
    let mut skip = false;

    for pair in xs.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let f_b = f(b);

        if skip {
            skip = false;
        } else if mode.is_root(f_b) {
            brackets.push((a, b + scale));
            skip = true;
        } else if mode.is_root(f_a) {
            brackets.push((a - scale, b));
        } else if !same_sign(f_a, f_b) {
            brackets.push((a, b));
        }

        if mode == Mode::First && !brackets.is_empty() {
            break;
        }
        f_a = f_b;
    }

    brackets
}
