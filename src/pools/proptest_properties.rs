//! Property-based tests using `proptest` for the pair accounting.
//!
//! Covers five properties:
//!
//! 1. **Fees never help**: quoting with fees yields ≤ quoting without.
//! 2. **Round trip loses**: converting A→B→A at the cached ratio yields ≤
//!    the original amount.
//! 3. **Full supply**: `share_value(total_shares) == total_deposits`.
//! 4. **Deposit bounds**: minted shares are worth no more than deposited.
//! 5. **Proportional deposits**: depositing `k%` of each reserve mints
//!    `k%` of the supply.

use proptest::prelude::*;

use super::PairState;
use crate::domain::{Amount, BasisPoints, PairFees};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn make_state(d0: u128, d1: u128, shares: u128, maker: u32, pool: u32) -> PairState {
    let Ok(fees) = PairFees::new(BasisPoints::new(maker), BasisPoints::new(pool)) else {
        panic!("valid fees");
    };
    PairState::new([Amount::new(d0), Amount::new(d1)], Amount::new(shares), fees)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10^18].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000_000_000u128
}

/// Fee components that never sum above 100%.
fn fee_strategy() -> impl Strategy<Value = (u32, u32)> {
    (0u32..=5_000u32, 0u32..=5_000u32)
}

/// Amounts offered to the pool.
fn amount_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000_000_000_000_000u128
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fees_never_increase_value(
        d0 in reserve_strategy(),
        d1 in reserve_strategy(),
        (maker, pool) in fee_strategy(),
        amount in amount_strategy(),
        inverse in any::<bool>(),
    ) {
        let state = make_state(d0, d1, 1_000, maker, pool);
        let Ok(with_fee) = state.exchange_value(Amount::new(amount), inverse, true) else {
            return Ok(());
        };
        let Ok(without_fee) = state.exchange_value(Amount::new(amount), inverse, false) else {
            return Ok(());
        };
        prop_assert!(
            with_fee <= without_fee,
            "fee quote {} exceeds fee-free quote {}",
            with_fee, without_fee
        );
    }

    #[test]
    fn prop_round_trip_loses(
        d0 in reserve_strategy(),
        d1 in reserve_strategy(),
        amount in amount_strategy(),
    ) {
        let state = make_state(d0, d1, 1_000, 0, 0);
        let Ok(there) = state.exchange_value(Amount::new(amount), false, false) else {
            return Ok(());
        };
        let Ok(back) = state.exchange_value(there, true, false) else {
            return Ok(());
        };
        prop_assert!(back.get() <= amount, "round trip gained: {} > {}", back, amount);
    }

    #[test]
    fn prop_full_supply_is_worth_reserves(
        d0 in reserve_strategy(),
        d1 in reserve_strategy(),
        shares in 1u128..=u128::from(u64::MAX),
    ) {
        let state = make_state(d0, d1, shares, 0, 30);
        prop_assert_eq!(
            state.share_value(Amount::new(shares)),
            Ok([Amount::new(d0), Amount::new(d1)])
        );
    }

    #[test]
    fn prop_deposit_value_is_bounded(
        d0 in reserve_strategy(),
        d1 in reserve_strategy(),
        shares in 1_000u128..=u128::from(u64::MAX),
        a0 in amount_strategy(),
        a1 in amount_strategy(),
    ) {
        let state = make_state(d0, d1, shares, 0, 30);
        let Ok((_, value)) = state.calculate_provide_liquidity([Amount::new(a0), Amount::new(a1)]) else {
            return Ok(());
        };
        prop_assert!(value[0].get() <= a0, "asset0 value {} > deposit {}", value[0], a0);
        prop_assert!(value[1].get() <= a1, "asset1 value {} > deposit {}", value[1], a1);
    }

    #[test]
    fn prop_proportional_deposit(
        unit0 in 1u128..=1_000_000u128,
        unit1 in 1u128..=1_000_000u128,
        share_unit in 1u128..=1_000_000u128,
        pct in 1u128..=100u128,
    ) {
        // Reserves are multiples of 100 so a pct% deposit is exact.
        let state = make_state(unit0 * 100, unit1 * 100, share_unit * 100, 0, 0);
        let Ok((shares, value)) = state.calculate_provide_liquidity([
            Amount::new(unit0 * pct),
            Amount::new(unit1 * pct),
        ]) else {
            return Err(TestCaseError::fail("deposit into a funded pool"));
        };
        prop_assert_eq!(shares, Amount::new(share_unit * pct));
        prop_assert_eq!(value, [Amount::new(unit0 * pct), Amount::new(unit1 * pct)]);
    }
}
