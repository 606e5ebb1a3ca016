//! The seam between the market core and the chain.
//!
//! Everything this crate learns about pools arrives through
//! [`ChainGateway::query_smart`]. Implementations wrap an RPC client, a
//! cached indexer, or (for tests) the in-memory chain behind the
//! `in-memory` feature. Typed queries are layered on top by
//! [`ChainSession`](crate::session::ChainSession).
//!
//! Gateways must not retry on their own: a rejected query is surfaced to
//! the caller as [`SwapError::Query`](crate::error::SwapError::Query).

use async_trait::async_trait;

use crate::domain::Addr;
use crate::error::Result;

/// Read access to CosmWasm contract state.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use swap_market::domain::Addr;
/// use swap_market::error::{Result, SwapError};
/// use swap_market::traits::ChainGateway;
///
/// struct Offline;
///
/// #[async_trait]
/// impl ChainGateway for Offline {
///     async fn query_smart(&self, contract: &Addr, _msg: serde_json::Value) -> Result<serde_json::Value> {
///         Err(SwapError::Query {
///             contract: contract.to_string(),
///             reason: "offline".to_owned(),
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Runs a smart query against `contract` and returns the raw JSON
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Query`](crate::error::SwapError::Query) if the
    /// node or the contract rejects the query.
    async fn query_smart(&self, contract: &Addr, msg: serde_json::Value)
        -> Result<serde_json::Value>;
}

#[async_trait]
impl<G: ChainGateway + ?Sized> ChainGateway for std::sync::Arc<G> {
    async fn query_smart(
        &self,
        contract: &Addr,
        msg: serde_json::Value,
    ) -> Result<serde_json::Value> {
        (**self).query_smart(contract, msg).await
    }
}
