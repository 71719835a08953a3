//! Widened fixed-point arithmetic primitives.
//!
//! Every price and share computation in the engine routes through
//! [`mul_div`]: the full 128-bit product is formed before the division, so
//! precision loss and overflow are controlled in exactly one place.

use crate::error::AmmError;

/// Full 128-bit product of two u64 operands. Cannot overflow.
#[inline]
pub fn widening_mul(a: u64, b: u64) -> u128 {
    a as u128 * b as u128
}

/// `floor(a * b / denom)` with a 128-bit intermediate.
///
/// Errors with a division-by-zero condition when `denom == 0` and an
/// overflow condition when the final quotient exceeds the u64 range.
pub fn mul_div(a: u64, b: u64, denom: u64) -> Result<u64, AmmError> {
    if denom == 0 {
        return Err(AmmError::DivisionByZero("mul_div"));
    }
    let wide = widening_mul(a, b) / denom as u128;
    u64::try_from(wide).map_err(|_| AmmError::Overflow("mul_div"))
}

/// Floor integer square root of a double-width value, via Newton's method.
///
/// Exact for perfect squares, floor otherwise. The result of a u128 input
/// always fits in u64.
pub fn sqrt(value: u128) -> u64 {
    if value == 0 {
        return 0;
    }
    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x as u64
}
