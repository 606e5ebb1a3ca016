//! Widening multiply-then-divide.
//!
//! The pool contracts compute ratios like `reserve * shares / supply` with a
//! 256-bit intermediate (`Uint128::full_mul`) and floor the quotient. Doing
//! the same here keeps off-chain previews bit-for-bit equal to on-chain
//! results even when the 128-bit product would overflow.

use primitive_types::U256;

use crate::domain::{Amount, Rounding};
use crate::error::SwapError;

/// Computes `a * b / denominator` with a 256-bit intermediate product.
///
/// # Errors
///
/// - [`SwapError::DivisionByZero`] if `denominator` is zero.
/// - [`SwapError::Overflow`] if the quotient does not fit in 128 bits.
///
/// # Examples
///
/// ```
/// use swap_market::domain::{Amount, Rounding};
/// use swap_market::math::mul_div;
///
/// // u128::MAX * 2 / 4 overflows u128 in the product but not in the result.
/// let r = mul_div(Amount::MAX, Amount::new(2), Amount::new(4), Rounding::Down);
/// assert_eq!(r, Ok(Amount::new(u128::MAX / 2)));
/// ```
pub fn mul_div(
    a: Amount,
    b: Amount,
    denominator: Amount,
    rounding: Rounding,
) -> Result<Amount, SwapError> {
    if denominator.is_zero() {
        return Err(SwapError::DivisionByZero);
    }
    let product = full_mul(a, b);
    let (mut q, r) = product.div_mod(U256::from(denominator.get()));
    if rounding.is_up() && !r.is_zero() {
        q += U256::one();
    }
    narrow(q).ok_or(SwapError::Overflow("mul_div result exceeds u128"))
}

/// `floor(sqrt(a * b))`, computed without overflow.
///
/// The pool contract mints its first shares this way.
pub fn isqrt_product(a: Amount, b: Amount) -> Amount {
    // sqrt of a value below 2^256 always fits in 128 bits.
    Amount::new(full_mul(a, b).integer_sqrt().low_u128())
}

fn full_mul(a: Amount, b: Amount) -> U256 {
    U256::from(a.get()) * U256::from(b.get())
}

fn narrow(value: U256) -> Option<Amount> {
    if value > U256::from(u128::MAX) {
        return None;
    }
    Some(Amount::new(value.low_u128()))
}
