//! Fundamental domain value types used throughout the swap market.
//!
//! This module contains the value types that model the market: assets
//! ([`Denom`]), ordered asset pairs and their registry keys, amounts, fees,
//! routes and share values. All types use newtypes or validated
//! constructors so that malformed chain data is rejected at the boundary.

mod addr;
mod amount;
mod basis_points;
mod coin;
mod denom;
mod denom_pair;
mod pair_fees;
mod rounding;
mod route;
mod share_value;
mod tx;

pub use addr::Addr;
pub use amount::Amount;
pub use basis_points::{BasisPoints, DecimalBps};
pub use coin::Coin;
pub use denom::{Denom, CW20_PREFIX};
pub use denom_pair::{DenomPair, PairKey};
pub use pair_fees::PairFees;
pub use rounding::Rounding;
pub use route::{Hop, Route};
pub use share_value::{ProvideLiquidityEstimate, ShareValue};
pub use tx::TxReceipt;
