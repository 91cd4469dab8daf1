use super::Error;

/// Finds a root of `f` in `[left, right]` to within `epsilon`.
///
/// The interval is halved until it is no wider than `2 * epsilon`, and the
/// midpoint of the final interval is returned. The endpoints may be given in
/// either order.
///
/// # Errors
///
/// Returns [`Error::NoBracket`] if `f(left)` and `f(right)` are nonzero and
/// share a sign, either initially or for any interval reached while halving.
pub fn bisect<F>(mut f: F, left: f64, right: f64, epsilon: f64) -> Result<f64, Error>
where
    F: FnMut(f64) -> f64,
{
    let (mut left, mut right) = ordered(left, right)?;

    while right - left > 2.0 * epsilon {
        let (next_left, next_right) = bisect_iterate(&mut f, left, right)?;

        // Halving can stall once the endpoints are adjacent floats.
        if next_left == left && next_right == right {
            break;
        }

        left = next_left;
        right = next_right;
    }

    Ok(0.5 * (left + right))
}

/// Performs a single bisection step on `[left, right]`.
///
/// Returns the half of the interval that still brackets the root. If an
/// endpoint or the midpoint is exactly a root, the degenerate interval
/// `(root, root)` is returned instead.
///
/// # Errors
///
/// Returns [`Error::NoBracket`] if `f(left)` and `f(right)` are nonzero and
/// share a sign.
pub fn bisect_iterate<F>(f: &mut F, left: f64, right: f64) -> Result<(f64, f64), Error>
where
    F: FnMut(f64) -> f64,
{
    let f_left = f(left);
    let f_right = f(right);

    if !brackets_sign_change(f_left, f_right) {
        return Err(Error::NoBracket { left, right });
    }
    if f_left == 0.0 {
        return Ok((left, left));
    }
    if f_right == 0.0 {
        return Ok((right, right));
    }

    let mid = 0.5 * (left + right);
    let f_mid = f(mid);

    if strictly_opposite(f_left, f_mid) {
        Ok((left, mid))
    } else if strictly_opposite(f_mid, f_right) {
        Ok((mid, right))
    } else {
        Ok((mid, mid))
    }
}

/// Finds a root of `f` in `[left, right]` to the full precision of `f64`.
///
/// Halving continues until the midpoint rounds to one of the endpoints, so the
/// result is within a unit in the last place of a true sign change of `f`.
///
/// # Errors
///
/// Returns [`Error::NoBracket`] if `f(left)` and `f(right)` are nonzero and
/// share a sign.
pub fn bisect_full_precision<F>(mut f: F, left: f64, right: f64) -> Result<f64, Error>
where
    F: FnMut(f64) -> f64,
{
    let f_left = f(left);
    if f_left == 0.0 {
        return Ok(left);
    }
    let f_right = f(right);
    if f_right == 0.0 {
        return Ok(right);
    }
    if !brackets_sign_change(f_left, f_right) {
        return Err(Error::NoBracket { left, right });
    }

    // Orient so that f(lo) < 0 < f(hi) regardless of endpoint order.
    let (mut lo, mut hi) = if f_left < 0.0 {
        (left, right)
    } else {
        (right, left)
    };

    loop {
        let mid = lo + 0.5 * (hi - lo);
        if mid == lo || mid == hi {
            return Ok(mid);
        }
        if f(mid) <= 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
}

/// Returns `true` if one value is non-positive and the other non-negative.
///
/// Signs are compared directly, since the product of two tiny residuals can
/// underflow to zero. NaN never brackets a sign change.
fn brackets_sign_change(a: f64, b: f64) -> bool {
    (a <= 0.0 && b >= 0.0) || (a >= 0.0 && b <= 0.0)
}

fn strictly_opposite(a: f64, b: f64) -> bool {
    (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0)
}

/// Validates and orders an interval.
fn ordered(left: f64, right: f64) -> Result<(f64, f64), Error> {
    if !left.is_finite() {
        return Err(Error::NonFinite { value: left });
    }
    if !right.is_finite() {
        return Err(Error::NonFinite { value: right });
    }
    if left <= right {
        Ok((left, right))
    } else {
        Ok((right, left))
    }
}
