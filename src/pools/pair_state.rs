//! Cached pool state and the constant-product accounting built on it.
//!
//! All amount math is integer only and matches the pair contract's
//! rounding: every division floors, and products that may exceed `u128`
//! are widened to 256 bits first.
//!
//! # Formulas
//!
//! With reserves `d0`, `d1` and share supply `S`:
//!
//! - exchange value (asset0 → asset1): `amount × d1 / d0`
//! - with fees: `amount × (10 000 − total_fee_bps) / 10 000` first
//! - first deposit: `1 000` placeholder shares
//! - later deposits: `min(a0 × S / d0, a1 × S / d1)` shares
//! - share value: `dᵢ × shares / S`

use crate::domain::{Amount, PairFees, Rounding};
use crate::error::SwapError;
use crate::math::{mul_div, CheckedArithmetic};

/// Shares reported for a deposit into an empty pool.
///
/// The contract actually mints `isqrt(a0 × a1)`; the estimate only needs a
/// placeholder since the depositor owns the whole pool either way.
pub const BOOTSTRAP_SHARES: Amount = Amount::new(1_000);

/// Point-in-time copy of a pair's reserves, share supply and fees.
///
/// `total_deposits` is index-aligned with the pair's listing order.
///
/// # Example
///
/// ```rust
/// use swap_market::domain::{Amount, BasisPoints, PairFees};
/// use swap_market::pools::PairState;
///
/// let fees = PairFees::new(BasisPoints::new(25), BasisPoints::new(75)).expect("valid fees");
/// let state = PairState::new([Amount::new(1_000), Amount::new(2_000)], Amount::new(1_000), fees);
///
/// assert_eq!(state.exchange_rate(false), 2.0);
/// assert_eq!(state.exchange_value(Amount::new(100), false, false), Ok(Amount::new(200)));
/// assert_eq!(state.exchange_value(Amount::new(100), false, true), Ok(Amount::new(198)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PairState {
    /// Reserves in listing order.
    pub total_deposits: [Amount; 2],
    /// Outstanding share supply.
    pub total_shares: Amount,
    /// Fee split.
    pub fees: PairFees,
}

impl PairState {
    /// Creates a state snapshot.
    #[must_use]
    pub const fn new(total_deposits: [Amount; 2], total_shares: Amount, fees: PairFees) -> Self {
        Self {
            total_deposits,
            total_shares,
            fees,
        }
    }

    /// Returns `true` if both reserves are empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_deposits[0].is_zero() && self.total_deposits[1].is_zero()
    }

    /// Display ratio of the reserves: `d1 / d0`, or `d0 / d1` when
    /// `inverse`.
    ///
    /// Not used for amounts. An empty reserve yields an infinite or `NaN`
    /// ratio.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn exchange_rate(&self, inverse: bool) -> f64 {
        let [d0, d1] = self.total_deposits;
        let (num, den) = if inverse { (d0, d1) } else { (d1, d0) };
        num.get() as f64 / den.get() as f64
    }

    /// Linear value of `amount` in the other asset at the current ratio.
    ///
    /// Converts asset0 into asset1, or asset1 into asset0 when `inverse`.
    /// With `include_fees` the pair's total fee is taken off the input
    /// first. Curve impact is ignored.
    ///
    /// # Errors
    ///
    /// - [`SwapError::ZeroReserve`] if the input side's reserve is empty.
    /// - [`SwapError::Overflow`] if the result does not fit in `u128`.
    pub fn exchange_value(
        &self,
        amount: Amount,
        inverse: bool,
        include_fees: bool,
    ) -> Result<Amount, SwapError> {
        let [d0, d1] = self.total_deposits;
        let (this_reserve, other_reserve) = if inverse { (d1, d0) } else { (d0, d1) };
        if this_reserve.is_zero() {
            return Err(SwapError::ZeroReserve);
        }
        let amount = if include_fees {
            self.fees.after_fees(amount)?
        } else {
            amount
        };
        mul_div(amount, other_reserve, this_reserve, Rounding::Down)
    }

    /// Shares minted for depositing `amounts` and their value right after
    /// the deposit, both in listing order.
    ///
    /// # Errors
    ///
    /// - [`SwapError::ZeroReserve`] if exactly one reserve is empty, or the
    ///   reserves are non-empty while no shares are outstanding.
    /// - [`SwapError::Overflow`] on arithmetic overflow.
    pub fn calculate_provide_liquidity(
        &self,
        amounts: [Amount; 2],
    ) -> Result<(Amount, [Amount; 2]), SwapError> {
        if self.is_empty() {
            return Ok((BOOTSTRAP_SHARES, amounts));
        }
        let [d0, d1] = self.total_deposits;
        let supply = self.total_shares;
        if d0.is_zero() || d1.is_zero() || supply.is_zero() {
            return Err(SwapError::ZeroReserve);
        }
        let new_shares = mul_div(amounts[0], supply, d0, Rounding::Down)?.min(mul_div(
            amounts[1],
            supply,
            d1,
            Rounding::Down,
        )?);
        let new_supply = supply.safe_add(&new_shares)?;
        let mut value = [Amount::ZERO; 2];
        for (i, slot) in value.iter_mut().enumerate() {
            let deposits = self.total_deposits[i].safe_add(&amounts[i])?;
            *slot = mul_div(deposits, new_shares, new_supply, Rounding::Down)?;
        }
        Ok((new_shares, value))
    }

    /// Reserve amounts owned by `shares`, in listing order.
    ///
    /// Zero for both when no shares are outstanding.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Overflow`] if a result does not fit in `u128`.
    pub fn share_value(&self, shares: Amount) -> Result<[Amount; 2], SwapError> {
        if self.total_shares.is_zero() {
            return Ok([Amount::ZERO; 2]);
        }
        Ok([
            mul_div(self.total_deposits[0], shares, self.total_shares, Rounding::Down)?,
            mul_div(self.total_deposits[1], shares, self.total_shares, Rounding::Down)?,
        ])
    }
}
