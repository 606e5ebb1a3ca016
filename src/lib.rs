//! # Swap Market
//!
//! Off-chain SDK for a CosmWasm swap market made of two-asset
//! constant-product pairs, a factory that lists them and a router that
//! executes multi-hop swaps.
//!
//! The crate keeps a local registry of every listed pair with cached
//! reserves, share supply and fees, answers price and route questions from
//! that cache, and builds the contract messages a wallet signs. Anything
//! the cache cannot answer exactly (curve-accurate swap results, deposit
//! previews) is asked of the contracts through a [`ChainGateway`].
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `in-memory` | yes | [`gateway::InMemoryChain`], a chain simulated in process |
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "in-memory")]
//! # {
//! use swap_market::prelude::*;
//! use swap_market::gateway::InMemoryChain;
//!
//! # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
//! // 1. A chain with one usei/uusdc pair holding 1:2 reserves
//! let factory = Addr::new("sei1factory").expect("addr");
//! let router = Addr::new("sei1router").expect("addr");
//! let usei: Denom = "usei".parse().expect("denom");
//! let uusdc: Denom = "uusdc".parse().expect("denom");
//! let chain = InMemoryChain::new(factory.clone(), router.clone());
//! let pair = Addr::new("sei1pair").expect("addr");
//! let fees = PairFees::new(BasisPoints::new(10), BasisPoints::new(20)).expect("fees");
//! chain
//!     .add_pair(pair.clone(), DenomPair::new(usei.clone(), uusdc.clone()).expect("pair"), fees)
//!     .expect("listed");
//! chain
//!     .deposit(&pair, [Amount::new(1_000_000), Amount::new(2_000_000)])
//!     .expect("deposit");
//!
//! // 2. Discover the market
//! let session = ChainSession::new("pacific-1", chain, TokenDirectory::default());
//! let market = Market::new(factory, router).expect("market");
//! assert_eq!(market.refresh(&session).await.expect("refresh"), 1);
//!
//! // 3. Price and build a swap through the router
//! let offer = Coin::new(Amount::new(1_000), usei);
//! let value = market
//!     .exchange_value(offer.amount, &offer.denom, &uusdc, false)
//!     .expect("math");
//! assert_eq!(value, Some(Amount::new(2_000)));
//! let ix = market
//!     .build_swap_ixs(&offer, &uusdc, None, None, None)
//!     .expect("valid swap")
//!     .expect("reachable");
//! assert_eq!(ix.contract_address.as_str(), "sei1router");
//! # });
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  SwapQuoter   │  debounced quotes for interactive callers
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Market     │  pair registry, single-flight refresh, routing
//! └──────┬───────┘
//!        │ Arc<Pair>
//!        ▼
//! ┌──────────────┐
//! │     Pair      │  cached state, constant-product math, instructions
//! └──────┬───────┘
//!        │ ChainSession (typed queries)
//!        ▼
//! ┌──────────────┐
//! │ ChainGateway  │  raw smart queries
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Denom`](domain::Denom), [`Amount`](domain::Amount), [`DenomPair`](domain::DenomPair), [`Route`](domain::Route), etc. |
//! | [`traits`] | The [`ChainGateway`] seam |
//! | [`session`] | [`ChainSession`](session::ChainSession), typed contract queries |
//! | [`config`] | [`MarketConfig`](config::MarketConfig) and token metadata |
//! | [`pools`] | [`Pair`](pools::Pair) and its cached [`PairState`](pools::PairState) |
//! | [`market`] | The [`Market`](market::Market) registry and route search |
//! | [`quote`] | [`SwapQuoter`](quote::SwapQuoter) and its debounce loop |
//! | [`msg`] | Contract wire messages and [`ExecuteInstruction`](msg::ExecuteInstruction) |
//! | [`math`] | Checked and 256-bit widening arithmetic |
//! | [`error`] | [`SwapError`](error::SwapError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types |
//!
//! [`ChainGateway`]: traits::ChainGateway

pub mod config;
pub mod domain;
pub mod error;
#[cfg(feature = "in-memory")]
pub mod gateway;
pub mod market;
pub mod math;
pub mod msg;
pub mod pools;
pub mod prelude;
pub mod quote;
pub mod session;
pub mod traits;
