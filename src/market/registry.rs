//! The registry of every pair a factory lists.
//!
//! [`Market`] owns two indexes over the same `Arc<Pair>` objects: one by
//! [`PairKey`] (listing order, used for routing) and one by display name.
//! Entries are only ever added, by [`Market::refresh`].
//!
//! # Single-flight loading
//!
//! Overlapping refreshes must never build two `Pair`s for one key. The
//! first refresh to see an unknown key registers a shared
//! [`OnceCell`](tokio::sync::OnceCell) for it; later refreshes join that
//! cell instead of loading again. The finished pair is inserted into the
//! index before the cell is retired, and both steps happen under the
//! in-flight lock, so a refresh either finds the key indexed or finds the
//! cell. A failed load leaves the cell uninitialised and the next refresh
//! retries it.
//!
//! Lock order is in-flight map, then index. Neither guard is held across
//! an `.await`.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};

use super::route_resolver::{resolve_route, DirectTradeMap};
use crate::config::{check_slippage_tolerance, MarketConfig};
use crate::domain::{Addr, Amount, BasisPoints, Coin, Denom, DenomPair, Hop, PairKey, Route};
use crate::error::{Result, SwapError};
use crate::msg::router::{RouterExecuteMsg, SimulateSwapsResponse, SwapExpectation};
use crate::msg::{offer_to_contract, ExecuteInstruction};
use crate::pools::Pair;
use crate::session::ChainSession;
use crate::traits::ChainGateway;

type InFlight = HashMap<PairKey, Arc<OnceCell<Arc<Pair>>>>;

#[derive(Debug, Default)]
struct Index {
    by_key: BTreeMap<PairKey, Arc<Pair>>,
    by_name: HashMap<String, Arc<Pair>>,
}

impl Index {
    /// Inserts `pair` unless its key is taken. Returns the indexed pair.
    fn insert_if_absent(&mut self, pair: Arc<Pair>) -> Arc<Pair> {
        let key = pair.assets().key();
        if let Some(existing) = self.by_key.get(&key) {
            return Arc::clone(existing);
        }
        match self.by_name.get(pair.name()) {
            Some(existing) => warn!(
                name = pair.name(),
                kept = %existing.contract(),
                ignored = %pair.contract(),
                "display name collision, name keeps the first pair"
            ),
            None => {
                self.by_name
                    .insert(pair.name().to_owned(), Arc::clone(&pair));
            }
        }
        self.by_key.insert(key, Arc::clone(&pair));
        pair
    }
}

enum Step {
    Refresh(Arc<Pair>),
    Load(Arc<OnceCell<Arc<Pair>>>),
}

/// All pairs listed by one factory, plus the router used to trade across
/// them.
///
/// # Example
///
/// ```rust
/// use swap_market::domain::{Addr, Denom};
/// use swap_market::market::Market;
///
/// let market = Market::new(
///     Addr::new("sei1factory").expect("addr"),
///     Addr::new("sei1router").expect("addr"),
/// ).expect("valid contracts");
///
/// // Nothing is known before the first refresh.
/// assert!(market.get_all_pairs().is_empty());
/// let sei: Denom = "usei".parse().expect("denom");
/// assert_eq!(market.resolve_multi_swap_route(&sei, &sei).map(|r| r.len()), Some(0));
/// assert!(market.exchange_rate(&sei, &"uusdc".parse().expect("denom"), false).is_nan());
/// ```
#[derive(Debug)]
pub struct Market {
    factory: Addr,
    router: Addr,
    default_slippage: BasisPoints,
    page_size: u32,
    in_flight: Mutex<InFlight>,
    index: RwLock<Index>,
}

impl Market {
    /// Creates an empty market with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidConfiguration`] if `factory == router`.
    pub fn new(factory: Addr, router: Addr) -> Result<Self> {
        Ok(Self::from_config(&MarketConfig::new(factory, router)?))
    }

    /// Creates an empty market from a validated configuration.
    #[must_use]
    pub fn from_config(config: &MarketConfig) -> Self {
        Self {
            factory: config.factory().clone(),
            router: config.router().clone(),
            default_slippage: config.default_slippage(),
            page_size: config.factory_page_size(),
            in_flight: Mutex::new(HashMap::new()),
            index: RwLock::new(Index::default()),
        }
    }

    /// Factory contract.
    #[must_use]
    pub const fn factory(&self) -> &Addr {
        &self.factory
    }

    /// Router contract.
    #[must_use]
    pub const fn router(&self) -> &Addr {
        &self.router
    }

    // -- Refresh ------------------------------------------------------------

    /// Reads the factory's full listing, loads pairs not seen before and
    /// refreshes the known ones.
    ///
    /// Returns the number of listed pairs.
    ///
    /// # Errors
    ///
    /// The first query, decoding or [`SwapError::PairMismatch`] error
    /// encountered. Pairs processed before the error stay registered.
    pub async fn refresh<G: ChainGateway>(&self, session: &ChainSession<G>) -> Result<usize> {
        let listings = self.list_pairs(session).await?;
        for (assets, contract) in &listings {
            self.ensure_pair(session, contract.clone(), assets.clone())
                .await?;
        }
        debug!(
            factory = %self.factory,
            listed = listings.len(),
            known = self.read_index().by_key.len(),
            "market refreshed"
        );
        Ok(listings.len())
    }

    async fn list_pairs<G: ChainGateway>(
        &self,
        session: &ChainSession<G>,
    ) -> Result<Vec<(DenomPair, Addr)>> {
        let mut listings = Vec::new();
        let mut start_after = None;
        loop {
            let page = session
                .query_factory_pairs(&self.factory, start_after.take(), self.page_size)
                .await?;
            trace!(factory = %self.factory, listed = page.len(), "factory page read");
            for listing in &page {
                listings.push((DenomPair::parse(&listing.pair)?, listing.address.clone()));
            }
            // The factory may cap pages below `page_size`; only an empty
            // page ends the listing.
            match page.into_iter().last() {
                Some(last) => start_after = Some(last.pair),
                None => break,
            }
        }
        Ok(listings)
    }

    /// Returns the indexed pair for `assets`, loading it if unknown and
    /// refreshing it otherwise.
    async fn ensure_pair<G: ChainGateway>(
        &self,
        session: &ChainSession<G>,
        contract: Addr,
        assets: DenomPair,
    ) -> Result<Arc<Pair>> {
        let key = assets.key();
        let step = {
            let mut in_flight = self.lock_in_flight();
            let indexed = self.read_index().by_key.get(&key).cloned();
            match indexed {
                Some(pair) => Step::Refresh(pair),
                None => {
                    let cell = in_flight.entry(key.clone()).or_default();
                    if cell.initialized() || Arc::strong_count(cell) > 1 {
                        trace!(pair = %key, "joining in-flight pair load");
                    }
                    Step::Load(Arc::clone(cell))
                }
            }
        };

        let cell = match step {
            Step::Refresh(pair) => {
                pair.refresh(session).await?;
                return Ok(pair);
            }
            Step::Load(cell) => cell,
        };

        let loaded = cell
            .get_or_try_init(|| async move {
                Pair::load(session, contract, assets).await.map(Arc::new)
            })
            .await
            .map(Arc::clone)?;

        let mut in_flight = self.lock_in_flight();
        let indexed = self.write_index().insert_if_absent(loaded);
        if in_flight
            .get(&key)
            .is_some_and(|current| Arc::ptr_eq(current, &cell))
        {
            in_flight.remove(&key);
            debug!(
                pair = %key,
                contract = %indexed.contract(),
                name = indexed.name(),
                "pair discovered"
            );
        }
        Ok(indexed)
    }

    // -- Lookup -------------------------------------------------------------

    /// The pair listed as `pair`, or as its inverse when `try_inverse`.
    #[must_use]
    pub fn get_pair(&self, pair: &DenomPair, try_inverse: bool) -> Option<Arc<Pair>> {
        let index = self.read_index();
        index
            .by_key
            .get(&pair.key())
            .or_else(|| {
                try_inverse
                    .then(|| index.by_key.get(&pair.inverse().key()))
                    .flatten()
            })
            .cloned()
    }

    /// The pair with display name `name`.
    #[must_use]
    pub fn get_pair_from_name(&self, name: &str) -> Option<Arc<Pair>> {
        self.read_index().by_name.get(name).cloned()
    }

    /// Every known pair, in pair-key order.
    #[must_use]
    pub fn get_all_pairs(&self) -> Vec<Arc<Pair>> {
        self.read_index().by_key.values().cloned().collect()
    }

    /// Like [`get_pair`](Self::get_pair) in either direction, but failing.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::PairNotFound`] if neither direction is listed.
    pub fn require_pair(&self, pair: &DenomPair) -> Result<Arc<Pair>> {
        self.get_pair(pair, true).ok_or_else(|| {
            SwapError::PairNotFound(pair.first().to_string(), pair.second().to_string())
        })
    }

    /// Which denoms each denom trades against directly.
    ///
    /// Built fresh from the current pairs on every call; each pair adds
    /// both directions once.
    #[must_use]
    pub fn get_direct_trade_map(&self) -> DirectTradeMap {
        let mut map = DirectTradeMap::new();
        for pair in self.read_index().by_key.values() {
            let [a, b] = pair.assets().as_array();
            for (from, to) in [(a, b), (b, a)] {
                let neighbours = map.entry(from.clone()).or_default();
                if !neighbours.contains(to) {
                    neighbours.push(to.clone());
                }
            }
        }
        map
    }

    /// Returns `true` if every denom in `denoms` is part of some pair.
    #[must_use]
    pub fn has_asset(&self, denoms: &[Denom]) -> bool {
        let index = self.read_index();
        let known: HashSet<&Denom> = index
            .by_key
            .values()
            .flat_map(|p| p.assets().as_array().iter())
            .collect();
        denoms.iter().all(|d| known.contains(d))
    }

    // -- Routing ------------------------------------------------------------

    /// Fewest-hop route from `from` to `to`. See
    /// [`resolve_route`](super::resolve_route).
    #[must_use]
    pub fn resolve_multi_swap_route(&self, from: &Denom, to: &Denom) -> Option<Route> {
        let route = resolve_route(&self.get_direct_trade_map(), from, to);
        match &route {
            Some(r) => trace!(%from, %to, hops = r.len(), "route resolved"),
            None => trace!(%from, %to, "route unreachable"),
        }
        route
    }

    /// Like [`resolve_multi_swap_route`](Self::resolve_multi_swap_route),
    /// but failing.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::UnsatisfiableRoute`] if no route exists.
    pub fn require_route(&self, from: &Denom, to: &Denom) -> Result<Route> {
        self.resolve_multi_swap_route(from, to)
            .ok_or_else(|| SwapError::UnsatisfiableRoute {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    /// Approximate rate from `from` to `to` along the fewest-hop route, the
    /// product of each hop's reserve ratio.
    ///
    /// `1.0` for identical denoms and `NaN` if no route exists. With
    /// `include_fees` each hop's total fee is taken off.
    #[must_use]
    pub fn exchange_rate(&self, from: &Denom, to: &Denom, include_fees: bool) -> f64 {
        let Some(route) = self.resolve_multi_swap_route(from, to) else {
            return f64::NAN;
        };
        let mut rate = 1.0;
        for hop in &route {
            let Some((pair, inverse)) = self.hop_pair(hop) else {
                return f64::NAN;
            };
            rate *= pair.exchange_rate(inverse);
            if include_fees {
                rate *= 1.0 - pair.total_fee_bps().as_fraction();
            }
        }
        rate
    }

    /// Linear value of `amount` of `from` in `to`, chained through every hop
    /// of the fewest-hop route.
    ///
    /// `Ok(None)` if no route exists; `amount` itself for identical denoms.
    ///
    /// # Errors
    ///
    /// Any error of [`Pair::exchange_value`] along the way.
    pub fn exchange_value(
        &self,
        amount: Amount,
        from: &Denom,
        to: &Denom,
        include_fees: bool,
    ) -> Result<Option<Amount>> {
        let Some(route) = self.resolve_multi_swap_route(from, to) else {
            return Ok(None);
        };
        self.exchange_value_along(&route, amount, include_fees).map(Some)
    }

    /// Linear value of `amount` chained through every hop of `route`.
    ///
    /// `amount` itself for an empty route.
    ///
    /// # Errors
    ///
    /// - [`SwapError::PairNotFound`] if a hop's pair is no longer indexed.
    /// - Any error of [`Pair::exchange_value`] along the way.
    pub fn exchange_value_along(
        &self,
        route: &Route,
        amount: Amount,
        include_fees: bool,
    ) -> Result<Amount> {
        let mut value = amount;
        for hop in route {
            let (pair, inverse) = self.require_hop_pair(hop)?;
            value = pair.exchange_value(value, inverse, include_fees)?;
        }
        Ok(value)
    }

    // -- Trading ------------------------------------------------------------

    /// Builds the router instruction swapping `offer` into `ask`.
    ///
    /// Every hop's pair contract is named in route order and `offer` is
    /// attached to the call (or sent through the token for CW20 offers).
    /// `slippage` bounds each hop and defaults to the configured tolerance;
    /// `expectation` optionally bounds the final result.
    ///
    /// Returns `Ok(None)` if `ask` is not reachable from the offer denom.
    ///
    /// # Errors
    ///
    /// - [`SwapError::SameAsset`] if the offer denom equals `ask`.
    /// - [`SwapError::InvalidAmount`] if the offer is zero.
    /// - [`SwapError::InvalidConfiguration`] for an excessive tolerance.
    pub fn build_swap_ixs(
        &self,
        offer: &Coin,
        ask: &Denom,
        receiver: Option<Addr>,
        slippage: Option<BasisPoints>,
        expectation: Option<SwapExpectation>,
    ) -> Result<Option<ExecuteInstruction>> {
        let slippage = slippage.unwrap_or(self.default_slippage);
        check_slippage_tolerance(slippage)?;
        let Some(swappers) = self.swappers_for(offer, ask)? else {
            return Ok(None);
        };
        let msg = RouterExecuteMsg::ExecuteSwaps {
            swappers,
            intermediate_slippage_tolerance: Some(slippage),
            expectation,
            unwrapper: None,
            receiver,
        };
        offer_to_contract(&self.router, &msg, offer).map(Some)
    }

    /// Asks the router to simulate swapping `offer` into `ask`.
    ///
    /// Returns `Ok(None)` if `ask` is not reachable from the offer denom.
    ///
    /// # Errors
    ///
    /// - [`SwapError::SameAsset`] if the offer denom equals `ask`.
    /// - [`SwapError::InvalidAmount`] if the offer is zero.
    /// - Any query or decoding error.
    pub async fn simulate_swap<G: ChainGateway>(
        &self,
        session: &ChainSession<G>,
        offer: &Coin,
        ask: &Denom,
    ) -> Result<Option<SimulateSwapsResponse>> {
        check_offer(offer, ask)?;
        let Some(route) = self.resolve_multi_swap_route(&offer.denom, ask) else {
            return Ok(None);
        };
        self.simulate_route(session, offer, &route).await.map(Some)
    }

    /// Asks the router to simulate swapping `offer` along `route`.
    ///
    /// The route is taken as given; the router sees exactly its hops.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidAmount`] if the offer is zero.
    /// - [`SwapError::PairNotFound`] if a hop's pair is no longer indexed.
    /// - Any query or decoding error.
    pub async fn simulate_route<G: ChainGateway>(
        &self,
        session: &ChainSession<G>,
        offer: &Coin,
        route: &Route,
    ) -> Result<SimulateSwapsResponse> {
        if offer.amount.is_zero() {
            return Err(SwapError::InvalidAmount("offer must be non-zero"));
        }
        let swappers = self.route_contracts(route)?;
        session
            .query_router_simulate_swaps(&self.router, offer.clone(), swappers)
            .await
    }

    /// Pair contracts along the route from the offer denom to `ask`.
    fn swappers_for(&self, offer: &Coin, ask: &Denom) -> Result<Option<Vec<Addr>>> {
        check_offer(offer, ask)?;
        let Some(route) = self.resolve_multi_swap_route(&offer.denom, ask) else {
            return Ok(None);
        };
        self.route_contracts(&route).map(Some)
    }

    fn route_contracts(&self, route: &Route) -> Result<Vec<Addr>> {
        route
            .iter()
            .map(|hop| self.require_hop_pair(hop).map(|(p, _)| p.contract().clone()))
            .collect()
    }

    /// The pair serving `hop` and whether the hop runs against listing
    /// order.
    fn hop_pair(&self, hop: &Hop) -> Option<(Arc<Pair>, bool)> {
        let assets = DenomPair::new(hop.from.clone(), hop.to.clone()).ok()?;
        let pair = self.get_pair(&assets, true)?;
        let inverse = pair.assets().first() != &hop.from;
        Some((pair, inverse))
    }

    fn require_hop_pair(&self, hop: &Hop) -> Result<(Arc<Pair>, bool)> {
        self.hop_pair(hop)
            .ok_or_else(|| SwapError::PairNotFound(hop.from.to_string(), hop.to.to_string()))
    }

    // -- Locks --------------------------------------------------------------

    fn lock_in_flight(&self) -> MutexGuard<'_, InFlight> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_index(&self) -> std::sync::RwLockReadGuard<'_, Index> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_index(&self) -> std::sync::RwLockWriteGuard<'_, Index> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn insert_for_test(&self, pair: Pair) -> Arc<Pair> {
        self.write_index().insert_if_absent(Arc::new(pair))
    }
}

/// Rejects swaps between identical denoms and zero offers.
fn check_offer(offer: &Coin, ask: &Denom) -> Result<()> {
    if offer.denom == *ask {
        return Err(SwapError::SameAsset(ask.to_string()));
    }
    if offer.amount.is_zero() {
        return Err(SwapError::InvalidAmount("offer must be non-zero"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::domain::PairFees;
    use crate::pools::PairState;

    fn d(s: &str) -> Denom {
        let Ok(d) = s.parse() else {
            panic!("valid denom {s}");
        };
        d
    }

    fn addr(s: &str) -> Addr {
        let Ok(a) = Addr::new(s) else {
            panic!("valid address {s}");
        };
        a
    }

    fn market() -> Market {
        let Ok(m) = Market::new(addr("sei1factory"), addr("sei1router")) else {
            panic!("valid market");
        };
        m
    }

    fn pair(contract: &str, a: &str, b: &str, d0: u128, d1: u128, fee_bps: u32) -> Pair {
        let Ok(assets) = DenomPair::new(d(a), d(b)) else {
            panic!("distinct");
        };
        let Ok(fees) = PairFees::new(BasisPoints::ZERO, BasisPoints::new(fee_bps)) else {
            panic!("valid fees");
        };
        Pair::from_parts(
            addr(contract),
            assets,
            format!("{a}-{b}"),
            PairState::new([Amount::new(d0), Amount::new(d1)], Amount::new(1_000), fees),
        )
    }

    fn pair_of(a: &str, b: &str) -> DenomPair {
        let Ok(p) = DenomPair::new(d(a), d(b)) else {
            panic!("distinct");
        };
        p
    }

    /// uaaa-ubbb (1:2) and ubbb-uccc (1:3), plus isolated uxxx-uyyy.
    fn seeded() -> Market {
        let m = market();
        m.insert_for_test(pair("sei1ab", "uaaa", "ubbb", 1_000, 2_000, 0));
        m.insert_for_test(pair("sei1bc", "ubbb", "uccc", 1_000, 3_000, 100));
        m.insert_for_test(pair("sei1xy", "uxxx", "uyyy", 10, 10, 0));
        m
    }

    // -- Lookup -------------------------------------------------------------

    #[test]
    fn inverse_lookup_returns_same_object() {
        let m = seeded();
        let Some(direct) = m.get_pair(&pair_of("uaaa", "ubbb"), false) else {
            panic!("listed");
        };
        let Some(inverse) = m.get_pair(&pair_of("ubbb", "uaaa"), true) else {
            panic!("found via inverse");
        };
        assert!(Arc::ptr_eq(&direct, &inverse));
        assert!(m.get_pair(&pair_of("ubbb", "uaaa"), false).is_none());
    }

    #[test]
    fn name_lookup_keeps_first_on_collision() {
        let m = market();
        let first = m.insert_for_test(pair("sei1first", "uaaa", "ubbb", 1, 1, 0));
        let clash = pair("sei1second", "uccc", "uddd", 1, 1, 0);
        m.insert_for_test(Pair::from_parts(
            clash.contract().clone(),
            clash.assets().clone(),
            "uaaa-ubbb",
            clash.snapshot(),
        ));
        let Some(named) = m.get_pair_from_name("uaaa-ubbb") else {
            panic!("named");
        };
        assert!(Arc::ptr_eq(&named, &first));
        assert_eq!(m.get_all_pairs().len(), 2);
    }

    #[test]
    fn require_pair_errors() {
        let m = seeded();
        assert!(m.require_pair(&pair_of("ubbb", "uaaa")).is_ok());
        assert_eq!(
            m.require_pair(&pair_of("uaaa", "uccc")).map(|p| p.name().to_owned()),
            Err(SwapError::PairNotFound("uaaa".into(), "uccc".into()))
        );
    }

    #[test]
    fn direct_trade_map_has_both_directions() {
        let m = seeded();
        let map = m.get_direct_trade_map();
        assert_eq!(map.get(&d("ubbb")), Some(&vec![d("uaaa"), d("uccc")]));
        assert_eq!(map.get(&d("uaaa")), Some(&vec![d("ubbb")]));
        assert!(m.has_asset(&[d("uaaa"), d("uyyy")]));
        assert!(!m.has_asset(&[d("uaaa"), d("uzzz")]));
    }

    // -- Routing ------------------------------------------------------------

    #[test]
    fn routes_and_rates() {
        let m = seeded();
        let Ok(route) = m.require_route(&d("uaaa"), &d("uccc")) else {
            panic!("connected");
        };
        assert_eq!(route.len(), 2);
        assert_eq!(m.exchange_rate(&d("uaaa"), &d("uccc"), false), 6.0);
        assert_eq!(m.exchange_rate(&d("uccc"), &d("uaaa"), false), 1.0 / 6.0);
        assert_eq!(m.exchange_rate(&d("uaaa"), &d("uaaa"), true), 1.0);
        assert!(m.exchange_rate(&d("uaaa"), &d("uxxx"), false).is_nan());
        assert!(matches!(
            m.require_route(&d("uaaa"), &d("uxxx")),
            Err(SwapError::UnsatisfiableRoute { .. })
        ));
    }

    #[test]
    fn exchange_value_chains_hops() {
        let m = seeded();
        assert_eq!(
            m.exchange_value(Amount::new(100), &d("uaaa"), &d("uccc"), false),
            Ok(Some(Amount::new(600)))
        );
        // Second hop takes 1%: 200 * 0.99 = 198, * 3 = 594.
        assert_eq!(
            m.exchange_value(Amount::new(100), &d("uaaa"), &d("uccc"), true),
            Ok(Some(Amount::new(594)))
        );
        assert_eq!(
            m.exchange_value(Amount::new(7), &d("uaaa"), &d("uaaa"), true),
            Ok(Some(Amount::new(7)))
        );
        assert_eq!(
            m.exchange_value(Amount::new(7), &d("uaaa"), &d("uxxx"), true),
            Ok(None)
        );
    }

    #[test]
    fn exchange_value_along_follows_the_given_route() {
        let m = seeded();
        let Ok(route) = m.require_route(&d("uaaa"), &d("uccc")) else {
            panic!("connected");
        };
        // A direct pair listed later does not change an already resolved route.
        m.insert_for_test(pair("sei1ac", "uaaa", "uccc", 1_000, 1_000, 0));
        assert_eq!(m.require_route(&d("uaaa"), &d("uccc")).map(|r| r.len()), Ok(1));
        assert_eq!(
            m.exchange_value_along(&route, Amount::new(100), true),
            Ok(Amount::new(594))
        );
        assert_eq!(
            m.exchange_value_along(&Route::empty(), Amount::new(5), true),
            Ok(Amount::new(5))
        );
        let unknown = Route::new(vec![Hop::new(d("uaaa"), d("uzzz"))]);
        assert_eq!(
            m.exchange_value_along(&unknown, Amount::new(5), false),
            Err(SwapError::PairNotFound("uaaa".into(), "uzzz".into()))
        );
    }

    // -- Instructions -------------------------------------------------------

    #[test]
    fn swap_ixs_name_every_hop() {
        let m = seeded();
        let offer = Coin::new(Amount::new(100), d("uaaa"));
        let Ok(Some(ix)) = m.build_swap_ixs(&offer, &d("uccc"), None, None, None) else {
            panic!("route exists");
        };
        assert_eq!(ix.contract_address, addr("sei1router"));
        assert_eq!(ix.funds, vec![offer]);
        let Ok(RouterExecuteMsg::ExecuteSwaps {
            swappers,
            intermediate_slippage_tolerance,
            ..
        }) = ix.decode_msg::<RouterExecuteMsg>()
        else {
            panic!("router message");
        };
        assert_eq!(swappers, vec![addr("sei1ab"), addr("sei1bc")]);
        assert_eq!(intermediate_slippage_tolerance, Some(BasisPoints::new(50)));
    }

    #[test]
    fn swap_ixs_edge_cases() {
        let m = seeded();
        let offer = Coin::new(Amount::new(100), d("uaaa"));
        assert_eq!(m.build_swap_ixs(&offer, &d("uxxx"), None, None, None), Ok(None));
        assert_eq!(
            m.build_swap_ixs(&offer, &d("uaaa"), None, None, None),
            Err(SwapError::SameAsset("uaaa".into()))
        );
        assert!(matches!(
            m.build_swap_ixs(&offer, &d("uccc"), None, Some(BasisPoints::new(9_000)), None),
            Err(SwapError::InvalidConfiguration(_))
        ));
        let zero = Coin::zero(d("uaaa"));
        assert!(matches!(
            m.build_swap_ixs(&zero, &d("uccc"), None, None, None),
            Err(SwapError::InvalidAmount(_))
        ));
    }
}
