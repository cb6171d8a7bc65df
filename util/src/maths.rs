//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::{Float, FloatConst};

/// Normalise an angle into the range (-pi, pi].
///
/// Non-finite inputs are returned unchanged.
pub fn norm_pi_pi<T>(value: T) -> T
where
    T: Float + FloatConst
{
    let pi_t = T::PI();
    let tau_t = pi_t + pi_t;

    if !value.is_finite() {
        return value;
    }

    let r = rem_euclid(value + pi_t, tau_t) - pi_t;

    // rem_euclid gives [-pi, pi), fold the lower bound over onto pi. Round-off
    // in rem_euclid can also land exactly on pi, which is in range.
    if r <= -pi_t {
        pi_t
    }
    else {
        r
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

/// Arithmetic mean of a slice, or `None` if the slice is empty.
pub fn mean<T>(values: &[T]) -> Option<T>
where
    T: Float
{
    if values.is_empty() {
        return None;
    }

    let sum = values.iter().fold(T::zero(), |acc, v| acc + *v);

    Some(sum / T::from(values.len())?)
}
