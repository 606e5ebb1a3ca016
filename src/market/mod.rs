//! The pair registry and route resolution.
//!
//! - [`Market`] discovers pairs through the factory, keeps them indexed by
//!   asset pair and display name, and builds router swaps across them.
//! - [`resolve_route`] is the fewest-hop search the market runs over its
//!   [`DirectTradeMap`].

mod registry;
mod route_resolver;

pub use registry::Market;
pub use route_resolver::{resolve_route, DirectTradeMap};
