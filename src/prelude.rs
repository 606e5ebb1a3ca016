//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use swap_market::prelude::*;
//! ```
//!
//! Brings the value types, the market entry points, configuration and the
//! error type into scope in one import.

pub use crate::config::{MarketConfig, TokenDirectory, TokenInfo};
pub use crate::domain::{
    Addr, Amount, BasisPoints, Coin, Denom, DenomPair, PairFees, Rounding, Route, ShareValue,
};
pub use crate::error::{Result, SwapError};
pub use crate::market::Market;
pub use crate::math::CheckedArithmetic;
pub use crate::msg::ExecuteInstruction;
pub use crate::pools::Pair;
pub use crate::quote::{SwapQuote, SwapQuoter};
pub use crate::session::ChainSession;
pub use crate::traits::ChainGateway;
