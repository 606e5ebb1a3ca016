//! An in-process chain hosting one factory, one router and any number of
//! pair contracts.
//!
//! The pools reproduce the pair contract's integer arithmetic:
//!
//! - **Swap**: `naive = offer × out / in`,
//!   `actual = out − in × out / (in + offer)`, fees are charged on
//!   `actual`, the payer receives `actual − total_fee` and the maker fee
//!   leaves the pool too.
//! - **Naive swap**: fees charged on `naive`.
//! - **First deposit**: `isqrt(a0 × a1)` shares, at least 1 000.
//! - **Later deposits**: `min(aᵢ × S / dᵢ)` shares.
//! - **Share value**: `dᵢ × shares / S`.
//!
//! The router chains swaps through its `swappers`, reporting the last hop's
//! naive-versus-actual difference as slip.
//!
//! Every query yields to the scheduler before answering so that concurrent
//! callers interleave, and is counted per contract.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::domain::{Addr, Amount, BasisPoints, Coin, DenomPair, PairFees, PairKey, Rounding};
use crate::error::{Result, SwapError};
use crate::math::{isqrt_product, mul_div, CheckedArithmetic};
use crate::msg::factory::{FactoryQueryMsg, PairListing};
use crate::msg::pair::{
    CalcNaiveSwapResult, CalcSwapResult, PairConfigResponse, PairQueryMsg,
    SimulateDepositResponse,
};
use crate::msg::router::{RouterQueryMsg, SimulateSwapsResponse};
use crate::traits::ChainGateway;

/// Smallest number of shares a first deposit may mint.
const MINIMUM_INITIAL_SHARES: Amount = Amount::new(1_000);

/// Upper bound on one factory page.
const MAX_PAGE: u32 = 100;

#[derive(Debug, Clone)]
struct Pool {
    assets: DenomPair,
    reserves: [Amount; 2],
    total_shares: Amount,
    fees: PairFees,
}

impl Pool {
    fn side_of(&self, offer: &Coin) -> Result<usize> {
        self.assets
            .index_of(&offer.denom)
            .ok_or_else(|| SwapError::InvalidDenom {
                denom: offer.denom.to_string(),
                expected: self.assets.to_strings().to_vec(),
            })
    }

    fn reserves_for(&self, side: usize) -> Result<(Amount, Amount)> {
        let (pool_in, pool_out) = (self.reserves[side], self.reserves[1 - side]);
        if pool_in.is_zero() || pool_out.is_zero() {
            return Err(SwapError::ZeroReserve);
        }
        Ok((pool_in, pool_out))
    }

    fn calc_swap(&self, offer: &Coin) -> Result<CalcSwapResult> {
        let side = self.side_of(offer)?;
        let (pool_in, pool_out) = self.reserves_for(side)?;
        let incoming = offer.amount;
        let naive = mul_div(incoming, pool_out, pool_in, Rounding::Down)?;
        let remaining = mul_div(pool_in, pool_out, pool_in.safe_add(&incoming)?, Rounding::Down)?;
        let actual = pool_out.safe_sub(&remaining)?;
        let (total_fee, maker_fee) = self.fees.charged_on(actual)?;
        Ok(CalcSwapResult {
            result_amount: actual.safe_sub(&total_fee)?,
            spread_amount: naive.saturating_sub(&actual),
            total_fee_amount: total_fee,
            maker_fee_amount: maker_fee,
        })
    }

    fn calc_naive_swap(&self, offer: &Coin) -> Result<CalcNaiveSwapResult> {
        let side = self.side_of(offer)?;
        let (pool_in, pool_out) = self.reserves_for(side)?;
        let naive = mul_div(offer.amount, pool_out, pool_in, Rounding::Down)?;
        let (total_fee, maker_fee) = self.fees.charged_on(naive)?;
        Ok(CalcNaiveSwapResult {
            result_amount: naive.safe_sub(&total_fee)?,
            total_fee_amount: total_fee,
            maker_fee_amount: maker_fee,
        })
    }

    fn shares_for_deposit(&self, amounts: [Amount; 2]) -> Result<Amount> {
        if self.total_shares.is_zero() {
            let shares = isqrt_product(amounts[0], amounts[1]);
            if shares < MINIMUM_INITIAL_SHARES {
                return Err(SwapError::InvalidAmount(
                    "first deposit must mint at least 1000 shares",
                ));
            }
            return Ok(shares);
        }
        let [d0, d1] = self.reserves;
        if d0.is_zero() || d1.is_zero() {
            return Err(SwapError::ZeroReserve);
        }
        Ok(mul_div(amounts[0], self.total_shares, d0, Rounding::Down)?.min(mul_div(
            amounts[1],
            self.total_shares,
            d1,
            Rounding::Down,
        )?))
    }

    fn share_value(&self, shares: Amount) -> Result<[Coin; 2]> {
        let [a0, a1] = self.assets.as_array();
        if self.total_shares.is_zero() {
            return Ok([Coin::zero(a0.clone()), Coin::zero(a1.clone())]);
        }
        Ok([
            Coin::new(
                mul_div(self.reserves[0], shares, self.total_shares, Rounding::Down)?,
                a0.clone(),
            ),
            Coin::new(
                mul_div(self.reserves[1], shares, self.total_shares, Rounding::Down)?,
                a1.clone(),
            ),
        ])
    }

    fn align(&self, offer: &[Coin; 2]) -> Result<[Amount; 2]> {
        let mut amounts = [Amount::ZERO; 2];
        for coin in offer {
            let side = self.side_of(coin)?;
            amounts[side] = amounts[side].safe_add(&coin.amount)?;
        }
        Ok(amounts)
    }

    fn simulate_deposit(&self, offer: &[Coin; 2]) -> Result<SimulateDepositResponse> {
        let amounts = self.align(offer)?;
        let shares = self.shares_for_deposit(amounts)?;
        let mut after = self.clone();
        after.reserves = [
            self.reserves[0].safe_add(&amounts[0])?,
            self.reserves[1].safe_add(&amounts[1])?,
        ];
        after.total_shares = self.total_shares.safe_add(&shares)?;
        Ok(SimulateDepositResponse {
            share_amount: shares,
            share_value: after.share_value(shares)?,
        })
    }

    fn config(&self, admin: &Addr) -> Result<PairConfigResponse> {
        let bps = |b: BasisPoints| {
            u16::try_from(b.get()).map_err(|_| SwapError::InvalidFee("fee exceeds u16"))
        };
        Ok(PairConfigResponse {
            admin: admin.clone(),
            fee_receiver: admin.clone(),
            total_fee_bps: bps(self.fees.total())?,
            maker_fee_bps: bps(self.fees.maker())?,
            endorsed: true,
        })
    }
}

#[derive(Debug)]
struct ChainState {
    pools: HashMap<Addr, Pool>,
    listing: BTreeMap<PairKey, (DenomPair, Addr)>,
    queries: HashMap<Addr, usize>,
    failing: HashSet<Addr>,
}

/// A chain living in memory, implementing [`ChainGateway`].
///
/// # Example
///
/// ```rust
/// use swap_market::domain::{Addr, Amount, BasisPoints, Denom, DenomPair, PairFees};
/// use swap_market::gateway::InMemoryChain;
///
/// let chain = InMemoryChain::new(
///     Addr::new("sei1factory").expect("addr"),
///     Addr::new("sei1router").expect("addr"),
/// );
/// let pair = Addr::new("sei1pair").expect("addr");
/// let assets = DenomPair::new(
///     "usei".parse::<Denom>().expect("denom"),
///     "uusdc".parse::<Denom>().expect("denom"),
/// ).expect("distinct");
/// let fees = PairFees::new(BasisPoints::new(25), BasisPoints::new(75)).expect("fees");
///
/// chain.add_pair(pair.clone(), assets, fees).expect("new pair");
/// let shares = chain
///     .deposit(&pair, [Amount::new(1_000_000), Amount::new(2_000_000)])
///     .expect("deposit");
/// assert_eq!(shares, Amount::new(1_414_213));
/// ```
#[derive(Debug)]
pub struct InMemoryChain {
    factory: Addr,
    router: Addr,
    state: Mutex<ChainState>,
}

impl InMemoryChain {
    /// Creates a chain with no pairs.
    #[must_use]
    pub fn new(factory: Addr, router: Addr) -> Self {
        Self {
            factory,
            router,
            state: Mutex::new(ChainState {
                pools: HashMap::new(),
                listing: BTreeMap::new(),
                queries: HashMap::new(),
                failing: HashSet::new(),
            }),
        }
    }

    /// Factory contract address.
    #[must_use]
    pub const fn factory(&self) -> &Addr {
        &self.factory
    }

    /// Router contract address.
    #[must_use]
    pub const fn router(&self) -> &Addr {
        &self.router
    }

    /// Deploys an empty pair and lists it with the factory.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidConfiguration`] if the contract address
    /// is taken or the asset pair (in either order) is already listed.
    pub fn add_pair(&self, contract: Addr, assets: DenomPair, fees: PairFees) -> Result<()> {
        let mut state = self.lock();
        if contract == self.factory
            || contract == self.router
            || state.pools.contains_key(&contract)
        {
            return Err(SwapError::InvalidConfiguration("contract address taken"));
        }
        if state.listing.contains_key(&assets.key())
            || state.listing.contains_key(&assets.inverse().key())
        {
            return Err(SwapError::InvalidConfiguration("pair already listed"));
        }
        state
            .listing
            .insert(assets.key(), (assets.clone(), contract.clone()));
        state.pools.insert(
            contract,
            Pool {
                assets,
                reserves: [Amount::ZERO; 2],
                total_shares: Amount::ZERO,
                fees,
            },
        );
        Ok(())
    }

    /// Deposits `amounts` (listing order) and returns the minted shares.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Query`] if no pair lives at `contract`.
    /// - [`SwapError::InvalidAmount`] if a first deposit mints fewer than
    ///   1 000 shares.
    pub fn deposit(&self, contract: &Addr, amounts: [Amount; 2]) -> Result<Amount> {
        self.with_pool(contract, |pool| {
            let shares = pool.shares_for_deposit(amounts)?;
            pool.reserves = [
                pool.reserves[0].safe_add(&amounts[0])?,
                pool.reserves[1].safe_add(&amounts[1])?,
            ];
            pool.total_shares = pool.total_shares.safe_add(&shares)?;
            Ok(shares)
        })
    }

    /// Burns `shares` and returns what they were worth.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Query`] if no pair lives at `contract`.
    /// - [`SwapError::InvalidAmount`] if `shares` exceeds the supply.
    pub fn withdraw(&self, contract: &Addr, shares: Amount) -> Result<[Coin; 2]> {
        self.with_pool(contract, |pool| {
            if shares > pool.total_shares {
                return Err(SwapError::InvalidAmount("shares exceed supply"));
            }
            let value = pool.share_value(shares)?;
            pool.reserves = [
                pool.reserves[0].safe_sub(&value[0].amount)?,
                pool.reserves[1].safe_sub(&value[1].amount)?,
            ];
            pool.total_shares = pool.total_shares.safe_sub(&shares)?;
            Ok(value)
        })
    }

    /// Executes a swap against the pair at `contract`.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Query`] if no pair lives at `contract`.
    /// - [`SwapError::InvalidDenom`] if `offer` is not one of its assets.
    /// - [`SwapError::ZeroReserve`] if the pool is empty.
    pub fn swap(&self, contract: &Addr, offer: &Coin) -> Result<CalcSwapResult> {
        self.with_pool(contract, |pool| {
            let result = pool.calc_swap(offer)?;
            let side = pool.side_of(offer)?;
            let paid_out = result.result_amount.safe_add(&result.maker_fee_amount)?;
            pool.reserves[side] = pool.reserves[side].safe_add(&offer.amount)?;
            pool.reserves[1 - side] = pool.reserves[1 - side].safe_sub(&paid_out)?;
            Ok(result)
        })
    }

    /// Replaces a pair's fees.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Query`] if no pair lives at `contract`.
    pub fn set_fees(&self, contract: &Addr, fees: PairFees) -> Result<()> {
        self.with_pool(contract, |pool| {
            pool.fees = fees;
            Ok(())
        })
    }

    /// Makes every query to `contract` fail (or succeed again).
    pub fn set_failing(&self, contract: &Addr, failing: bool) {
        let mut state = self.lock();
        if failing {
            state.failing.insert(contract.clone());
        } else {
            state.failing.remove(contract);
        }
    }

    /// Number of queries `contract` has answered or rejected.
    #[must_use]
    pub fn query_count(&self, contract: &Addr) -> usize {
        self.lock().queries.get(contract).copied().unwrap_or(0)
    }

    /// Reserves of the pair at `contract`, in listing order.
    #[must_use]
    pub fn reserves(&self, contract: &Addr) -> Option<[Amount; 2]> {
        self.lock().pools.get(contract).map(|p| p.reserves)
    }

    fn lock(&self) -> MutexGuard<'_, ChainState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_pool<T>(&self, contract: &Addr, f: impl FnOnce(&mut Pool) -> Result<T>) -> Result<T> {
        let mut state = self.lock();
        let pool = state
            .pools
            .get_mut(contract)
            .ok_or_else(|| no_contract(contract))?;
        let mut updated = pool.clone();
        let out = f(&mut updated)?;
        *pool = updated;
        Ok(out)
    }

    fn answer(&self, state: &ChainState, contract: &Addr, msg: Value) -> Result<Value> {
        if *contract == self.factory {
            let FactoryQueryMsg::Pairs { start_after, limit } =
                decode::<FactoryQueryMsg>(contract, msg)?;
            let limit = limit.unwrap_or(MAX_PAGE).min(MAX_PAGE) as usize;
            let lower = match start_after {
                Some(raw) => Bound::Excluded(DenomPair::parse(&raw)?.key()),
                None => Bound::Unbounded,
            };
            let page: Vec<PairListing> = state
                .listing
                .range((lower, Bound::Unbounded))
                .take(limit)
                .map(|(_, (assets, address))| PairListing {
                    pair: assets.to_strings(),
                    address: address.clone(),
                })
                .collect();
            return encode(&page);
        }
        if *contract == self.router {
            let RouterQueryMsg::SimulateSwaps { offer, swappers } =
                decode::<RouterQueryMsg>(contract, msg)?;
            return encode(&simulate_swaps(state, offer, &swappers)?);
        }
        let pool = state
            .pools
            .get(contract)
            .ok_or_else(|| no_contract(contract))?;
        match decode::<PairQueryMsg>(contract, msg)? {
            PairQueryMsg::PairDenoms => encode(&pool.assets.to_strings()),
            PairQueryMsg::CanonicalPairDenoms => {
                let mut denoms = pool.assets.to_strings();
                denoms.sort();
                encode(&denoms)
            }
            PairQueryMsg::Config => encode(&pool.config(&self.factory)?),
            PairQueryMsg::TotalShares => encode(&pool.total_shares),
            PairQueryMsg::ShareValue { amount } => encode(&pool.share_value(amount)?),
            PairQueryMsg::SimulateProvideLiquidity { offer } => {
                encode(&pool.simulate_deposit(&offer)?)
            }
            PairQueryMsg::SimulateSwap { offer } => encode(&pool.calc_swap(&offer)?),
            PairQueryMsg::SimulateNaiveSwap { offer } => encode(&pool.calc_naive_swap(&offer)?),
        }
    }
}

#[async_trait]
impl ChainGateway for InMemoryChain {
    async fn query_smart(&self, contract: &Addr, msg: Value) -> Result<Value> {
        tokio::task::yield_now().await;
        let mut state = self.lock();
        *state.queries.entry(contract.clone()).or_default() += 1;
        if state.failing.contains(contract) {
            return Err(SwapError::Query {
                contract: contract.to_string(),
                reason: "node unavailable".to_owned(),
            });
        }
        trace!(contract = %contract, "in-memory query");
        self.answer(&state, contract, msg)
            .map_err(|e| match e {
                SwapError::Query { .. } => e,
                other => SwapError::Query {
                    contract: contract.to_string(),
                    reason: other.to_string(),
                },
            })
    }
}

fn simulate_swaps(
    state: &ChainState,
    offer: Coin,
    swappers: &[Addr],
) -> Result<SimulateSwapsResponse> {
    if swappers.is_empty() {
        return Err(SwapError::InvalidAmount("no swappers given"));
    }
    let mut current = offer;
    let mut slip = Amount::ZERO;
    for swapper in swappers {
        let pool = state
            .pools
            .get(swapper)
            .ok_or_else(|| no_contract(swapper))?;
        let actual = pool.calc_swap(&current)?;
        let naive = pool.calc_naive_swap(&current)?;
        let Some(next) = pool.assets.other(&current.denom).cloned() else {
            return Err(SwapError::InvalidDenom {
                denom: current.denom.to_string(),
                expected: pool.assets.to_strings().to_vec(),
            });
        };
        slip = naive.result_amount.saturating_sub(&actual.result_amount);
        current = Coin::new(actual.result_amount, next);
    }
    Ok(SimulateSwapsResponse {
        result_denom: current.denom,
        result_amount: current.amount,
        slip_amount: slip,
    })
}

fn decode<T: serde::de::DeserializeOwned>(contract: &Addr, msg: Value) -> Result<T> {
    serde_json::from_value(msg).map_err(|e| SwapError::Query {
        contract: contract.to_string(),
        reason: format!("unsupported query: {e}"),
    })
}

fn encode<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn no_contract(contract: &Addr) -> SwapError {
    SwapError::Query {
        contract: contract.to_string(),
        reason: "no contract at this address".to_owned(),
    }
}
