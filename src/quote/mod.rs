//! Quoting swaps for interactive callers.
//!
//! [`SwapQuoter`] prices a swap by asking the router for the exact result
//! and comparing it with the market's linear estimate. [`RefreshLoop`]
//! debounces bursts of quote requests so only the newest input reaches the
//! chain.

mod refresh_loop;
mod swap_quote;

pub use refresh_loop::RefreshLoop;
pub use swap_quote::{SwapQuote, SwapQuoter};
