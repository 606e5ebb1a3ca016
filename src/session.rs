//! Typed chain access.
//!
//! A [`ChainSession`] is passed explicitly to every operation that reaches
//! the chain. It pairs a [`ChainGateway`] with the chain id and the token
//! metadata used to name pairs, and turns the gateway's raw JSON queries
//! into the typed requests and responses of [`crate::msg`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use crate::config::TokenDirectory;
use crate::domain::{Addr, Amount, Coin};
use crate::error::{Result, SwapError};
use crate::msg::factory::{FactoryQueryMsg, PairListing};
use crate::msg::pair::{
    CalcNaiveSwapResult, CalcSwapResult, PairConfigResponse, PairQueryMsg,
    SimulateDepositResponse,
};
use crate::msg::router::{RouterQueryMsg, SimulateSwapsResponse};
use crate::traits::ChainGateway;

/// A connection to one chain.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "in-memory")]
/// # {
/// use swap_market::config::TokenDirectory;
/// use swap_market::domain::Addr;
/// use swap_market::gateway::InMemoryChain;
/// use swap_market::session::ChainSession;
///
/// let chain = InMemoryChain::new(
///     Addr::new("sei1factory").expect("addr"),
///     Addr::new("sei1router").expect("addr"),
/// );
/// let session = ChainSession::new("pacific-1", chain, TokenDirectory::default());
/// assert_eq!(session.chain_id(), "pacific-1");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChainSession<G> {
    chain_id: String,
    gateway: G,
    tokens: TokenDirectory,
}

impl<G: ChainGateway> ChainSession<G> {
    /// Creates a session.
    #[must_use]
    pub fn new(chain_id: impl Into<String>, gateway: G, tokens: TokenDirectory) -> Self {
        Self {
            chain_id: chain_id.into(),
            gateway,
            tokens,
        }
    }

    /// Chain identifier, e.g. `pacific-1`.
    #[must_use]
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// The underlying gateway.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Token metadata for this chain.
    #[must_use]
    pub const fn tokens(&self) -> &TokenDirectory {
        &self.tokens
    }

    /// Sends `msg` to `contract` and decodes the response as `R`.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Serialization`] if `msg` cannot be encoded.
    /// - [`SwapError::Query`] if the gateway rejects the query or the
    ///   response does not decode as `R`.
    pub async fn query<M, R>(&self, contract: &Addr, msg: &M) -> Result<R>
    where
        M: Serialize + Sync,
        R: DeserializeOwned,
    {
        let msg = serde_json::to_value(msg)?;
        trace!(contract = %contract, chain = %self.chain_id, query = %msg, "smart query");
        let raw = self.gateway.query_smart(contract, msg).await?;
        serde_json::from_value(raw).map_err(|e| SwapError::Query {
            contract: contract.to_string(),
            reason: format!("unexpected response: {e}"),
        })
    }

    /// One page of the factory's pair listing.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub async fn query_factory_pairs(
        &self,
        factory: &Addr,
        start_after: Option<[String; 2]>,
        limit: u32,
    ) -> Result<Vec<PairListing>> {
        self.query(
            factory,
            &FactoryQueryMsg::Pairs {
                start_after,
                limit: Some(limit),
            },
        )
        .await
    }

    /// Fee and admin settings of a pair.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub async fn query_pair_config(&self, pair: &Addr) -> Result<PairConfigResponse> {
        self.query(pair, &PairQueryMsg::Config).await
    }

    /// Outstanding shares of a pair.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub async fn query_total_shares(&self, pair: &Addr) -> Result<Amount> {
        self.query(pair, &PairQueryMsg::TotalShares).await
    }

    /// Denoms of a pair in listing order.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub async fn query_pair_denoms(&self, pair: &Addr) -> Result<[String; 2]> {
        self.query(pair, &PairQueryMsg::PairDenoms).await
    }

    /// Value of `amount` shares.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub async fn query_share_value(&self, pair: &Addr, amount: Amount) -> Result<[Coin; 2]> {
        self.query(pair, &PairQueryMsg::ShareValue { amount }).await
    }

    /// Curve-accurate single-pair swap preview.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub async fn query_simulate_swap(&self, pair: &Addr, offer: Coin) -> Result<CalcSwapResult> {
        self.query(pair, &PairQueryMsg::SimulateSwap { offer }).await
    }

    /// Single-pair swap preview at the current rate.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub async fn query_simulate_naive_swap(
        &self,
        pair: &Addr,
        offer: Coin,
    ) -> Result<CalcNaiveSwapResult> {
        self.query(pair, &PairQueryMsg::SimulateNaiveSwap { offer })
            .await
    }

    /// Deposit preview.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub async fn query_simulate_provide_liquidity(
        &self,
        pair: &Addr,
        offer: [Coin; 2],
    ) -> Result<SimulateDepositResponse> {
        self.query(pair, &PairQueryMsg::SimulateProvideLiquidity { offer })
            .await
    }

    /// Multi-hop preview through the router.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub async fn query_router_simulate_swaps(
        &self,
        router: &Addr,
        offer: Coin,
        swappers: Vec<Addr>,
    ) -> Result<SimulateSwapsResponse> {
        self.query(router, &RouterQueryMsg::SimulateSwaps { offer, swappers })
            .await
    }
}
