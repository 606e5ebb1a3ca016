//! One constant-product pool as seen from the client.
//!
//! A [`Pair`] caches the pool's reserves, share supply and fees in a
//! [`PairState`] behind a lock, so every holder of an `Arc<Pair>` observes
//! [`Pair::refresh`] in place. Quotes are computed synchronously from that
//! cache. Execute instructions are built for the pair contract and handed
//! to the external signing layer.

use std::sync::{PoisonError, RwLock};

use tracing::debug;

use super::PairState;
use crate::config::check_slippage_tolerance;
use crate::domain::{
    Addr, Amount, BasisPoints, Coin, Denom, DenomPair, ProvideLiquidityEstimate, ShareValue,
};
use crate::error::{Result, SwapError};
use crate::msg::cw20::Cw20ExecuteMsg;
use crate::msg::pair::{CalcNaiveSwapResult, CalcSwapResult, PairExecuteMsg};
use crate::msg::{offer_to_contract, ExecuteInstruction};
use crate::session::ChainSession;
use crate::traits::ChainGateway;

/// A liquidity pool between two assets.
///
/// # Example
///
/// ```rust
/// use swap_market::domain::{Addr, Amount, BasisPoints, Denom, DenomPair, PairFees};
/// use swap_market::pools::{Pair, PairState};
///
/// let sei: Denom = "usei".parse().expect("denom");
/// let usdc: Denom = "uusdc".parse().expect("denom");
/// let pair = Pair::from_parts(
///     Addr::new("sei1pair").expect("addr"),
///     DenomPair::new(sei, usdc).expect("distinct"),
///     "SEI-USDC",
///     PairState::new(
///         [Amount::new(1_000), Amount::new(2_000)],
///         Amount::new(1_000),
///         PairFees::new(BasisPoints::new(25), BasisPoints::new(75)).expect("fees"),
///     ),
/// );
///
/// assert_eq!(pair.shares_denom().to_string(), "factory/sei1pair/lp");
/// assert_eq!(pair.total_fee_bps(), BasisPoints::new(100));
/// let estimate = pair
///     .calculate_provide_liquidity(Amount::new(100), Amount::new(200))
///     .expect("deposit");
/// assert_eq!(estimate.new_shares, Amount::new(100));
/// ```
#[derive(Debug)]
pub struct Pair {
    contract: Addr,
    assets: DenomPair,
    name: String,
    shares_denom: Denom,
    state: RwLock<PairState>,
}

impl Pair {
    /// Assembles a pair from known state without touching the chain.
    #[must_use]
    pub fn from_parts(
        contract: Addr,
        assets: DenomPair,
        name: impl Into<String>,
        state: PairState,
    ) -> Self {
        let shares_denom = Denom::pair_shares(&contract);
        Self {
            contract,
            assets,
            name: name.into(),
            shares_denom,
            state: RwLock::new(state),
        }
    }

    /// Loads a listed pool.
    ///
    /// Queries fees, share supply and the pool's own denoms concurrently,
    /// checks the denoms against the listing, then reads the value of the
    /// whole supply to learn the reserves.
    ///
    /// # Errors
    ///
    /// - [`SwapError::PairMismatch`] if the pool reports other assets than
    ///   the listing.
    /// - Any query or decoding error.
    pub async fn load<G: ChainGateway>(
        session: &ChainSession<G>,
        contract: Addr,
        assets: DenomPair,
    ) -> Result<Self> {
        let (config, total_shares, denoms) = tokio::try_join!(
            session.query_pair_config(&contract),
            session.query_total_shares(&contract),
            session.query_pair_denoms(&contract),
        )?;
        let reported = DenomPair::parse(&denoms)?;
        if !(assets.contains(reported.first()) && assets.contains(reported.second())) {
            return Err(SwapError::PairMismatch {
                contract: contract.to_string(),
            });
        }
        let fees = config.fees()?;
        let value = session.query_share_value(&contract, total_shares).await?;
        let total_deposits = align_to(&assets, &contract, &value)?;

        let tokens = session.tokens();
        let name = format!(
            "{}-{}",
            tokens.symbol(assets.first()),
            tokens.symbol(assets.second())
        );
        debug!(pair = %assets, contract = %contract, %name, "pair loaded");
        Ok(Self::from_parts(
            contract,
            assets,
            name,
            PairState::new(total_deposits, total_shares, fees),
        ))
    }

    /// Re-reads fees, share supply and reserves, overwriting the cache.
    ///
    /// # Errors
    ///
    /// Any query or decoding error. The cache is left untouched on error.
    pub async fn refresh<G: ChainGateway>(&self, session: &ChainSession<G>) -> Result<()> {
        let (config, total_shares) = tokio::try_join!(
            session.query_pair_config(&self.contract),
            session.query_total_shares(&self.contract),
        )?;
        let fees = config.fees()?;
        let value = session
            .query_share_value(&self.contract, total_shares)
            .await?;
        let total_deposits = align_to(&self.assets, &self.contract, &value)?;
        *self.state.write().unwrap_or_else(PoisonError::into_inner) =
            PairState::new(total_deposits, total_shares, fees);
        debug!(pair = %self.assets, contract = %self.contract, "pair refreshed");
        Ok(())
    }

    // -- Accessors ----------------------------------------------------------

    /// Pool contract.
    #[must_use]
    pub const fn contract(&self) -> &Addr {
        &self.contract
    }

    /// Both assets in listing order.
    #[must_use]
    pub const fn assets(&self) -> &DenomPair {
        &self.assets
    }

    /// Display name, symbols joined by `-`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Denom of this pool's liquidity shares.
    #[must_use]
    pub const fn shares_denom(&self) -> &Denom {
        &self.shares_denom
    }

    /// Copy of the cached state.
    #[must_use]
    pub fn snapshot(&self) -> PairState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached reserves in listing order.
    #[must_use]
    pub fn total_deposits(&self) -> [Amount; 2] {
        self.snapshot().total_deposits
    }

    /// Cached share supply.
    #[must_use]
    pub fn total_shares(&self) -> Amount {
        self.snapshot().total_shares
    }

    /// Maker plus pool fee.
    #[must_use]
    pub fn total_fee_bps(&self) -> BasisPoints {
        self.snapshot().fees.total()
    }

    /// Fee paid to the market maker.
    #[must_use]
    pub fn maker_fee_bps(&self) -> BasisPoints {
        self.snapshot().fees.maker()
    }

    /// Fee left in the pool for liquidity providers.
    #[must_use]
    pub fn pool_fee_bps(&self) -> BasisPoints {
        self.snapshot().fees.pool()
    }

    // -- Math ---------------------------------------------------------------

    /// See [`PairState::exchange_rate`].
    #[must_use]
    pub fn exchange_rate(&self, inverse: bool) -> f64 {
        self.snapshot().exchange_rate(inverse)
    }

    /// See [`PairState::exchange_value`].
    ///
    /// # Errors
    ///
    /// See [`PairState::exchange_value`].
    pub fn exchange_value(
        &self,
        amount: Amount,
        inverse: bool,
        include_fees: bool,
    ) -> Result<Amount> {
        self.snapshot()
            .exchange_value(amount, inverse, include_fees)
    }

    /// Previews a deposit of `amount0` of the first asset and `amount1` of
    /// the second.
    ///
    /// # Errors
    ///
    /// See [`PairState::calculate_provide_liquidity`].
    pub fn calculate_provide_liquidity(
        &self,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<ProvideLiquidityEstimate> {
        let (new_shares, value) = self
            .snapshot()
            .calculate_provide_liquidity([amount0, amount1])?;
        Ok(ProvideLiquidityEstimate {
            new_shares,
            new_share_value: self.value_coins(value),
        })
    }

    /// What `shares` are worth at the cached reserves.
    ///
    /// # Errors
    ///
    /// See [`PairState::share_value`].
    pub fn share_value(&self, shares: Amount) -> Result<ShareValue> {
        let value = self.snapshot().share_value(shares)?;
        Ok(self.value_coins(value))
    }

    fn value_coins(&self, [a0, a1]: [Amount; 2]) -> ShareValue {
        ShareValue::new([
            Coin::new(a0, self.assets.first().clone()),
            Coin::new(a1, self.assets.second().clone()),
        ])
    }

    // -- Instructions -------------------------------------------------------

    /// Instructions depositing `amount0` and `amount1`.
    ///
    /// Native assets are attached as funds. Each CW20 asset is preceded by
    /// an allowance for the pool to pull it.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidAmount`] if both amounts are zero.
    /// - [`SwapError::InvalidConfiguration`] for an excessive tolerance.
    pub fn build_provide_liquidity_ixs(
        &self,
        amount0: Amount,
        amount1: Amount,
        slippage_tolerance: Option<BasisPoints>,
        receiver: Option<Addr>,
    ) -> Result<Vec<ExecuteInstruction>> {
        if amount0.is_zero() && amount1.is_zero() {
            return Err(SwapError::InvalidAmount("deposit must not be empty"));
        }
        if let Some(tolerance) = slippage_tolerance {
            check_slippage_tolerance(tolerance)?;
        }
        let mut ixs = Vec::with_capacity(3);
        let mut funds = Vec::with_capacity(2);
        for (denom, amount) in self.assets.as_array().iter().zip([amount0, amount1]) {
            match denom {
                Denom::Native(_) => funds.push(Coin::new(amount, denom.clone())),
                Denom::Cw20(token) if !amount.is_zero() => ixs.push(ExecuteInstruction::new(
                    token.clone(),
                    &Cw20ExecuteMsg::IncreaseAllowance {
                        spender: self.contract.clone(),
                        amount,
                    },
                    Vec::new(),
                )?),
                Denom::Cw20(_) => {}
            }
        }
        ixs.push(ExecuteInstruction::new(
            self.contract.clone(),
            &PairExecuteMsg::ProvideLiquidity {
                slippage_tolerance,
                receiver,
                receiver_payload: None,
            },
            funds,
        )?);
        Ok(ixs)
    }

    /// Instructions burning `shares` for their value.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidAmount`] if `shares` is zero.
    pub fn build_withdraw_liquidity_ixs(
        &self,
        shares: Amount,
        receiver: Option<Addr>,
    ) -> Result<Vec<ExecuteInstruction>> {
        if shares.is_zero() {
            return Err(SwapError::InvalidAmount("no shares to withdraw"));
        }
        Ok(vec![ExecuteInstruction::new(
            self.contract.clone(),
            &PairExecuteMsg::WithdrawLiquidity {
                receiver,
                receiver_payload: None,
            },
            vec![Coin::new(shares, self.shares_denom.clone())],
        )?])
    }

    /// Instruction swapping `offer` for the other asset of this pair.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidDenom`] if `offer` is not one of the assets.
    /// - [`SwapError::InvalidAmount`] if `offer` is zero.
    /// - [`SwapError::InvalidConfiguration`] for an excessive tolerance.
    pub fn build_swap_ixs(
        &self,
        offer: &Coin,
        slippage_tolerance: Option<BasisPoints>,
        expected_result: Option<Amount>,
        receiver: Option<Addr>,
    ) -> Result<ExecuteInstruction> {
        self.check_offer(offer)?;
        if let Some(tolerance) = slippage_tolerance {
            check_slippage_tolerance(tolerance)?;
        }
        offer_to_contract(
            &self.contract,
            &PairExecuteMsg::Swap {
                expected_result,
                slippage_tolerance,
                receiver,
                receiver_payload: None,
            },
            offer,
        )
    }

    // -- Simulations --------------------------------------------------------

    /// Asks the pool for a curve-accurate swap preview.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidDenom`] if `offer` is not one of the assets.
    /// - Any query or decoding error.
    pub async fn simulate_swap<G: ChainGateway>(
        &self,
        session: &ChainSession<G>,
        offer: Coin,
    ) -> Result<CalcSwapResult> {
        self.check_offer(&offer)?;
        session.query_simulate_swap(&self.contract, offer).await
    }

    /// Asks the pool for a swap preview at the current rate.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidDenom`] if `offer` is not one of the assets.
    /// - Any query or decoding error.
    pub async fn simulate_naive_swap<G: ChainGateway>(
        &self,
        session: &ChainSession<G>,
        offer: Coin,
    ) -> Result<CalcNaiveSwapResult> {
        self.check_offer(&offer)?;
        session
            .query_simulate_naive_swap(&self.contract, offer)
            .await
    }

    /// Asks the pool to preview a deposit.
    ///
    /// # Errors
    ///
    /// Any query or decoding error, or [`SwapError::PairMismatch`] if the
    /// response names other assets.
    pub async fn simulate_provide_liquidity<G: ChainGateway>(
        &self,
        session: &ChainSession<G>,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<ProvideLiquidityEstimate> {
        let offer = [
            Coin::new(amount0, self.assets.first().clone()),
            Coin::new(amount1, self.assets.second().clone()),
        ];
        let response = session
            .query_simulate_provide_liquidity(&self.contract, offer)
            .await?;
        let value = align_to(&self.assets, &self.contract, &response.share_value)?;
        Ok(ProvideLiquidityEstimate {
            new_shares: response.share_amount,
            new_share_value: self.value_coins(value),
        })
    }

    fn check_offer(&self, offer: &Coin) -> Result<()> {
        if !self.assets.contains(&offer.denom) {
            return Err(SwapError::InvalidDenom {
                denom: offer.denom.to_string(),
                expected: self.assets.to_strings().to_vec(),
            });
        }
        if offer.amount.is_zero() {
            return Err(SwapError::InvalidAmount("offer must be non-zero"));
        }
        Ok(())
    }
}

/// Reorders `coins` to match the listing order of `assets`.
fn align_to(assets: &DenomPair, contract: &Addr, coins: &[Coin; 2]) -> Result<[Amount; 2]> {
    let find = |denom: &Denom| {
        coins
            .iter()
            .find(|c| c.denom == *denom)
            .map(|c| c.amount)
            .ok_or_else(|| SwapError::PairMismatch {
                contract: contract.to_string(),
            })
    };
    Ok([find(assets.first())?, find(assets.second())?])
}
