//! Market configuration.
//!
//! This module contains [`MarketConfig`], the declarative description of a
//! deployment (factory, router, tolerances, quote timing) and the token
//! metadata ([`TokenInfo`], [`TokenDirectory`]) used to name pairs.

mod market_config;
mod tokens;

pub use market_config::{
    check_slippage_tolerance, MarketConfig, DEFAULT_FACTORY_PAGE_SIZE, DEFAULT_QUOTE_DEBOUNCE_MS,
    DEFAULT_SLIPPAGE, DEFAULT_SLIPPAGE_WARNING, MAX_ALLOWED_TOLERANCE,
};
pub use tokens::{TokenDirectory, TokenInfo};
