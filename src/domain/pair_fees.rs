//! Maker and liquidity-provider fees of a pair.

use core::fmt;

use super::{Amount, BasisPoints, Rounding};
use crate::error::SwapError;
use crate::math::mul_div;

const BPS_DENOMINATOR: Amount = Amount::new(10_000);

/// Fee configuration of a pair, split into the maker's cut and the pool's
/// (liquidity providers') cut.
///
/// The total is always recomputed as `maker + pool` and is guaranteed to be
/// at most 100%.
///
/// # Examples
///
/// ```
/// use swap_market::domain::{Amount, BasisPoints, PairFees};
///
/// let fees = PairFees::new(BasisPoints::new(50), BasisPoints::new(50)).expect("valid fees");
/// assert_eq!(fees.total(), BasisPoints::new(100));
/// assert_eq!(fees.after_fees(Amount::new(10_000)).expect("no overflow"), Amount::new(9_900));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PairFees {
    maker: BasisPoints,
    pool: BasisPoints,
}

impl PairFees {
    /// Creates a fee configuration from its two components.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidFee`] if `maker + pool` exceeds 10 000 bp.
    pub fn new(maker: BasisPoints, pool: BasisPoints) -> crate::error::Result<Self> {
        let total = maker
            .checked_add(&pool)
            .ok_or(SwapError::InvalidFee("total fee overflows"))?;
        if !total.is_valid_percent() {
            return Err(SwapError::InvalidFee("total fee exceeds 100%"));
        }
        Ok(Self { maker, pool })
    }

    /// Builds fees from a pair config that reports `total_fee_bps` and
    /// `maker_fee_bps`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidFee`] if the maker fee exceeds the total
    /// or the total exceeds 100%.
    pub fn from_total(total: BasisPoints, maker: BasisPoints) -> crate::error::Result<Self> {
        if maker > total {
            return Err(SwapError::InvalidFee("maker fee exceeds total fee"));
        }
        Self::new(maker, BasisPoints::new(total.get() - maker.get()))
    }

    /// The maker's share of the fee.
    #[must_use]
    pub const fn maker(&self) -> BasisPoints {
        self.maker
    }

    /// The liquidity providers' share of the fee.
    #[must_use]
    pub const fn pool(&self) -> BasisPoints {
        self.pool
    }

    /// `maker + pool`.
    #[must_use]
    pub const fn total(&self) -> BasisPoints {
        BasisPoints::new(self.maker.get() + self.pool.get())
    }

    /// `amount * (10_000 - total) / 10_000`, floored, with a 256-bit
    /// intermediate product.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidFee`] if the total exceeds 100%.
    pub fn after_fees(&self, amount: Amount) -> crate::error::Result<Amount> {
        let keep = self
            .total()
            .complement()
            .ok_or(SwapError::InvalidFee("total fee exceeds 100%"))?;
        portion(amount, keep)
    }

    /// Total and maker fee charged on `amount`, both floored.
    ///
    /// # Errors
    ///
    /// Never fails for fees of at most 100%; the error is kept for parity
    /// with [`after_fees`](Self::after_fees).
    pub fn charged_on(&self, amount: Amount) -> crate::error::Result<(Amount, Amount)> {
        Ok((portion(amount, self.total())?, portion(amount, self.maker)?))
    }
}

fn portion(amount: Amount, bps: BasisPoints) -> crate::error::Result<Amount> {
    mul_div(
        amount,
        Amount::new(u128::from(bps.get())),
        BPS_DENOMINATOR,
        Rounding::Down,
    )
}

impl fmt::Display for PairFees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (maker {}, pool {})", self.total(), self.maker, self.pool)
    }
}
