//! Client-side model of the constant-product pair contracts.
//!
//! [`PairState`] is a plain snapshot of one pool (reserves, share supply,
//! fees) carrying all of the integer accounting. [`Pair`] wraps a snapshot
//! behind a lock together with the pool's identity, loads and refreshes it
//! through a [`ChainSession`](crate::session::ChainSession), and builds the
//! execute instructions for deposits, withdrawals and single-hop swaps.
//!
//! # Accounting
//!
//! | Operation | Formula |
//! |-----------|---------|
//! | [`exchange_rate`](PairState::exchange_rate) | `d1 / d0` (`f64`, display only) |
//! | [`exchange_value`](PairState::exchange_value) | `amount × d_out / d_in`, fee taken off the input first |
//! | [`calculate_provide_liquidity`](PairState::calculate_provide_liquidity) | `min(aᵢ × S / dᵢ)` shares |
//! | [`share_value`](PairState::share_value) | `dᵢ × shares / S` |

mod pair;
mod pair_state;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use pair::Pair;
pub use pair_state::{PairState, BOOTSTRAP_SHARES};
