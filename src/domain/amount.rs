//! Raw token amount with checked arithmetic.

use core::fmt;
use core::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use super::Rounding;
use crate::error::SwapError;

/// A raw token amount in the smallest unit (`usei`, `uusdc`, ...).
///
/// `Amount` never interprets decimals; that is a display concern handled by
/// the token directory. All `u128` values are valid amounts, which matches
/// the chain's `Uint128`.
///
/// On the wire an amount is a decimal string (`"1000000"`), exactly like
/// `Uint128` in CosmWasm JSON.
///
/// # Examples
///
/// ```
/// use swap_market::domain::{Amount, Rounding};
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_div(&a, Rounding::Down), Some(Amount::new(2)));
/// assert_eq!("42".parse::<Amount>(), Ok(Amount::new(42)));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Subtraction clamped at zero.
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Checked multiplication. Returns `None` on overflow.
    ///
    /// Prefer [`mul_div`](crate::math::mul_div) when the product is only an
    /// intermediate value: it widens to 256 bits the way the pool contracts
    /// do.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0 == 0 {
            return None;
        }
        let q = self.0 / divisor.0;
        let r = self.0 % divisor.0;
        // q + 1 cannot overflow when r != 0: q < u128::MAX in that case.
        match rounding {
            Rounding::Up if r != 0 => Some(Self(q + 1)),
            _ => Some(Self(q)),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SwapError::InvalidAmount("amount must be a decimal integer"));
        }
        s.parse::<u128>()
            .map(Self)
            .map_err(|_| SwapError::Overflow("amount exceeds u128"))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}
