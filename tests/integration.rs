//! Integration tests driving the market against the in-memory chain.
//!
//! These tests verify end-to-end flows through the public API: discovery
//! through the factory, overlapping refreshes, routing, local pair math
//! against the contracts' own previews, router simulation and quoting.

#![cfg(feature = "in-memory")]
#![allow(clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use swap_market::config::{MarketConfig, TokenDirectory};
use swap_market::domain::{Addr, Amount, BasisPoints, Coin, Denom, DenomPair, Hop, PairFees};
use swap_market::error::{Result, SwapError};
use swap_market::gateway::InMemoryChain;
use swap_market::market::Market;
use swap_market::pools::{Pair, PairState};
use swap_market::quote::SwapQuoter;
use swap_market::session::ChainSession;
use swap_market::traits::ChainGateway;

type Session = ChainSession<Arc<InMemoryChain>>;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

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

fn pair_of(a: &str, b: &str) -> DenomPair {
    let Ok(p) = DenomPair::new(d(a), d(b)) else {
        panic!("distinct denoms");
    };
    p
}

fn fees(maker: u32, pool: u32) -> PairFees {
    let Ok(f) = PairFees::new(BasisPoints::new(maker), BasisPoints::new(pool)) else {
        panic!("valid fees");
    };
    f
}

fn config() -> MarketConfig {
    let Ok(cfg) = MarketConfig::from_json(
        r#"{
            "factory": "sei1factory",
            "router": "sei1router",
            "tokens": [
                { "denom": "uaaa", "symbol": "AAA", "decimals": 6 },
                { "denom": "ubbb", "symbol": "BBB", "decimals": 6 }
            ]
        }"#,
    ) else {
        panic!("valid config");
    };
    cfg
}

fn list(chain: &InMemoryChain, contract: &str, a: &str, b: &str, f: PairFees, reserves: [u128; 2]) {
    let Ok(()) = chain.add_pair(addr(contract), pair_of(a, b), f) else {
        panic!("pair {contract} listed");
    };
    if reserves != [0, 0] {
        let Ok(_) = chain.deposit(&addr(contract), reserves.map(Amount::new)) else {
            panic!("deposit into {contract}");
        };
    }
}

/// uaaa-ubbb (1:2, 0.3%), ubbb-uccc (1:3, 1%) and the isolated uxxx-uyyy.
fn deployment() -> (Arc<InMemoryChain>, Session, MarketConfig) {
    let cfg = config();
    let chain = Arc::new(InMemoryChain::new(cfg.factory().clone(), cfg.router().clone()));
    list(&chain, "sei1ab", "uaaa", "ubbb", fees(10, 20), [1_000_000, 2_000_000]);
    list(&chain, "sei1bc", "ubbb", "uccc", fees(0, 100), [1_000_000, 3_000_000]);
    list(&chain, "sei1xy", "uxxx", "uyyy", fees(0, 0), [1_000_000, 1_000_000]);
    let session = ChainSession::new(
        "pacific-1",
        Arc::clone(&chain),
        TokenDirectory::new(cfg.tokens().iter().cloned()),
    );
    (chain, session, cfg)
}

async fn discovered() -> (Arc<InMemoryChain>, Session, Market) {
    let (chain, session, cfg) = deployment();
    let market = Market::from_config(&cfg);
    let Ok(listed) = market.refresh(&session).await else {
        panic!("refresh succeeds");
    };
    assert_eq!(listed, 3);
    (chain, session, market)
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_discovers_every_listed_pair() {
    let (_, _, market) = discovered().await;
    assert_eq!(market.get_all_pairs().len(), 3);

    let Some(ab) = market.get_pair_from_name("AAA-BBB") else {
        panic!("named by token symbols");
    };
    assert_eq!(ab.contract(), &addr("sei1ab"));
    assert_eq!(ab.total_fee_bps(), BasisPoints::new(30));
    assert_eq!(ab.maker_fee_bps(), BasisPoints::new(10));
    assert_eq!(ab.pool_fee_bps(), BasisPoints::new(20));
    assert!(market.get_pair_from_name("BBB-uccc").is_some());
    assert!(market.has_asset(&[d("uaaa"), d("uyyy")]));
    assert!(!market.has_asset(&[d("uzzz")]));
}

#[tokio::test]
async fn inverse_lookup_returns_same_pair() {
    let (_, _, market) = discovered().await;
    let (Some(direct), Some(inverse)) = (
        market.get_pair(&pair_of("uaaa", "ubbb"), false),
        market.get_pair(&pair_of("ubbb", "uaaa"), true),
    ) else {
        panic!("pair registered");
    };
    assert!(Arc::ptr_eq(&direct, &inverse));
    assert!(market.get_pair(&pair_of("ubbb", "uaaa"), false).is_none());
    assert!(matches!(
        market.require_pair(&pair_of("uaaa", "uccc")),
        Err(SwapError::PairNotFound(_, _))
    ));
}

#[tokio::test]
async fn overlapping_refreshes_load_each_pair_once() {
    let cfg = config();
    let chain = Arc::new(InMemoryChain::new(cfg.factory().clone(), cfg.router().clone()));
    list(&chain, "sei1ab", "uaaa", "ubbb", fees(10, 20), [1_000_000, 2_000_000]);
    let session = ChainSession::new("pacific-1", Arc::clone(&chain), TokenDirectory::default());
    let market = Market::from_config(&cfg);

    let (first, second) = tokio::join!(market.refresh(&session), market.refresh(&session));
    assert_eq!(first, Ok(1));
    assert_eq!(second, Ok(1));
    assert_eq!(market.get_all_pairs().len(), 1);
    // config, total_shares, pair_denoms and share_value, once.
    assert_eq!(chain.query_count(&addr("sei1ab")), 4);
}

#[tokio::test]
async fn overlapping_refreshes_converge_on_one_pair_object() {
    let (_, session, cfg) = deployment();
    let market = Market::from_config(&cfg);

    let results = tokio::join!(
        market.refresh(&session),
        market.refresh(&session),
        market.refresh(&session),
    );
    assert_eq!(results, (Ok(3), Ok(3), Ok(3)));
    assert_eq!(market.get_all_pairs().len(), 3);

    let (Some(by_key), Some(by_name)) = (
        market.get_pair(&pair_of("ubbb", "uccc"), false),
        market.get_pair_from_name("BBB-uccc"),
    ) else {
        panic!("pair registered");
    };
    assert!(Arc::ptr_eq(&by_key, &by_name));
}

#[tokio::test]
async fn refresh_updates_known_pairs_in_place() {
    let (chain, session, market) = discovered().await;
    let Some(before) = market.get_pair(&pair_of("uaaa", "ubbb"), false) else {
        panic!("pair registered");
    };

    let Ok(_) = chain.swap(&addr("sei1ab"), &Coin::new(Amount::new(50_000), d("uaaa"))) else {
        panic!("swap executes");
    };
    chain.set_fees(&addr("sei1ab"), fees(0, 50)).unwrap_or_else(|e| panic!("{e}"));
    let Ok(3) = market.refresh(&session).await else {
        panic!("refresh succeeds");
    };

    let Some(after) = market.get_pair(&pair_of("uaaa", "ubbb"), false) else {
        panic!("pair registered");
    };
    assert!(Arc::ptr_eq(&before, &after));
    let Some(reserves) = chain.reserves(&addr("sei1ab")) else {
        panic!("pool exists");
    };
    assert_eq!(after.total_deposits(), reserves);
    assert_eq!(after.total_fee_bps(), BasisPoints::new(50));
}

#[tokio::test]
async fn factory_is_read_page_by_page() {
    let Ok(cfg) = MarketConfig::from_json(
        r#"{ "factory": "sei1factory", "router": "sei1router", "factory_page_size": 2 }"#,
    ) else {
        panic!("valid config");
    };
    let chain = Arc::new(InMemoryChain::new(cfg.factory().clone(), cfg.router().clone()));
    for (i, quote) in ["uaaa", "ubbb", "uccc", "uddd", "ueee"].iter().enumerate() {
        list(&chain, &format!("sei1pair{i}"), "usei", quote, fees(0, 30), [10_000, 10_000]);
    }
    let session = ChainSession::new("pacific-1", Arc::clone(&chain), TokenDirectory::default());
    let market = Market::from_config(&cfg);

    assert_eq!(market.refresh(&session).await, Ok(5));
    assert_eq!(market.get_all_pairs().len(), 5);
    // Two full pages, a short one, then the empty page that ends the listing.
    assert_eq!(chain.query_count(&addr("sei1factory")), 4);
}

#[tokio::test]
async fn factory_page_cap_below_page_size_still_lists_everything() {
    // The chain serves at most 100 listings per page.
    let Ok(cfg) = MarketConfig::from_json(
        r#"{ "factory": "sei1factory", "router": "sei1router", "factory_page_size": 150 }"#,
    ) else {
        panic!("valid config");
    };
    let chain = Arc::new(InMemoryChain::new(cfg.factory().clone(), cfg.router().clone()));
    for i in 0..120 {
        list(&chain, &format!("sei1p{i}"), "usei", &format!("utok{i}"), fees(0, 30), [0, 0]);
    }
    let session = ChainSession::new("pacific-1", Arc::clone(&chain), TokenDirectory::default());
    let market = Market::from_config(&cfg);

    assert_eq!(market.refresh(&session).await, Ok(120));
    assert_eq!(market.get_all_pairs().len(), 120);
    assert!(market.get_pair(&pair_of("usei", "utok119"), true).is_some());
}

#[tokio::test]
async fn failed_load_is_retried_on_next_refresh() {
    let (chain, session, cfg) = deployment();
    let market = Market::from_config(&cfg);

    chain.set_failing(&addr("sei1ab"), true);
    assert!(matches!(
        market.refresh(&session).await,
        Err(SwapError::Query { .. })
    ));
    assert!(market.get_pair(&pair_of("uaaa", "ubbb"), true).is_none());

    chain.set_failing(&addr("sei1ab"), false);
    assert_eq!(market.refresh(&session).await, Ok(3));
    assert!(market.get_pair(&pair_of("uaaa", "ubbb"), true).is_some());
}

/// Forwards to the in-memory chain but lies about one pair's denoms.
#[derive(Debug)]
struct Misreporting {
    inner: InMemoryChain,
    pair: Addr,
}

#[async_trait]
impl ChainGateway for Misreporting {
    async fn query_smart(&self, contract: &Addr, msg: Value) -> Result<Value> {
        if *contract == self.pair && msg == json!("pair_denoms") {
            return Ok(json!(["uzzz", "ubbb"]));
        }
        self.inner.query_smart(contract, msg).await
    }
}

#[tokio::test]
async fn pair_reporting_other_denoms_is_rejected() {
    let cfg = config();
    let inner = InMemoryChain::new(cfg.factory().clone(), cfg.router().clone());
    list(&inner, "sei1ab", "uaaa", "ubbb", fees(0, 30), [10_000, 10_000]);
    let gateway = Misreporting {
        inner,
        pair: addr("sei1ab"),
    };
    let session = ChainSession::new("pacific-1", gateway, TokenDirectory::default());
    let market = Market::from_config(&cfg);

    let Err(SwapError::PairMismatch { contract }) = market.refresh(&session).await else {
        panic!("mismatch detected");
    };
    assert_eq!(contract, "sei1ab");
    assert!(market.get_all_pairs().is_empty());
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn routes_follow_fewest_hops() {
    let (_, _, market) = discovered().await;

    assert_eq!(
        market.resolve_multi_swap_route(&d("uaaa"), &d("uaaa")).map(|r| r.len()),
        Some(0)
    );

    let Some(route) = market.resolve_multi_swap_route(&d("uaaa"), &d("uccc")) else {
        panic!("reachable");
    };
    assert_eq!(
        route.hops(),
        &[Hop::new(d("uaaa"), d("ubbb")), Hop::new(d("ubbb"), d("uccc"))]
    );
    assert!(route.connects(&d("uaaa"), &d("uccc")));

    assert!(market.resolve_multi_swap_route(&d("uaaa"), &d("uxxx")).is_none());
    assert!(matches!(
        market.require_route(&d("uyyy"), &d("uccc")),
        Err(SwapError::UnsatisfiableRoute { .. })
    ));
    assert!(market.exchange_rate(&d("uaaa"), &d("uyyy"), false).is_nan());
}

#[tokio::test]
async fn direct_trade_map_is_symmetric() {
    let (_, _, market) = discovered().await;
    let map = market.get_direct_trade_map();
    for (from, tos) in &map {
        for to in tos {
            assert!(map.get(to).is_some_and(|back| back.contains(from)));
        }
    }
    assert_eq!(map.get(&d("ubbb")).map(Vec::len), Some(2));
}

// ---------------------------------------------------------------------------
// Pair math against the contracts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_supply_is_worth_the_reserves() {
    let (chain, _, market) = discovered().await;
    for pair in market.get_all_pairs() {
        let Ok(value) = pair.share_value(pair.total_shares()) else {
            panic!("share value");
        };
        assert_eq!(value.amounts(), pair.total_deposits());
        assert_eq!(chain.reserves(pair.contract()), Some(pair.total_deposits()));
    }
}

#[tokio::test]
async fn first_deposit_into_empty_pair() {
    let cfg = config();
    let chain = Arc::new(InMemoryChain::new(cfg.factory().clone(), cfg.router().clone()));
    list(&chain, "sei1ab", "uaaa", "ubbb", fees(0, 30), [0, 0]);
    let session = ChainSession::new("pacific-1", Arc::clone(&chain), TokenDirectory::default());
    let market = Market::from_config(&cfg);
    assert_eq!(market.refresh(&session).await, Ok(1));

    let Ok(pair) = market.require_pair(&pair_of("uaaa", "ubbb")) else {
        panic!("pair registered");
    };
    assert!(pair.snapshot().is_empty());
    let Ok(estimate) = pair.calculate_provide_liquidity(Amount::new(100), Amount::new(200)) else {
        panic!("estimate");
    };
    assert_eq!(estimate.new_shares, Amount::new(1_000));
    assert_eq!(estimate.new_share_value.amounts(), [Amount::new(100), Amount::new(200)]);
}

#[test]
fn proportional_deposit_mints_proportional_shares() {
    let pair = Pair::from_parts(
        addr("sei1ab"),
        pair_of("uaaa", "ubbb"),
        "AAA-BBB".to_owned(),
        PairState::new(
            [Amount::new(1_000), Amount::new(2_000)],
            Amount::new(1_000),
            fees(0, 30),
        ),
    );
    let Ok(estimate) = pair.calculate_provide_liquidity(Amount::new(100), Amount::new(200)) else {
        panic!("estimate");
    };
    assert_eq!(estimate.new_shares, Amount::new(100));
    assert_eq!(estimate.new_share_value.amounts(), [Amount::new(100), Amount::new(200)]);
}

#[tokio::test]
async fn local_deposit_preview_matches_contract() {
    let (_, session, market) = discovered().await;
    let Ok(pair) = market.require_pair(&pair_of("uaaa", "ubbb")) else {
        panic!("pair registered");
    };
    for (a0, a1) in [(1_000, 2_000), (5_000, 1_000), (1, 1_000_000)] {
        let (a0, a1) = (Amount::new(a0), Amount::new(a1));
        let (Ok(local), Ok(remote)) = (
            pair.calculate_provide_liquidity(a0, a1),
            pair.simulate_provide_liquidity(&session, a0, a1).await,
        ) else {
            panic!("both previews succeed");
        };
        assert_eq!(local, remote);
    }
}

#[tokio::test]
async fn fees_never_increase_exchange_value() {
    let (_, _, market) = discovered().await;
    for amount in [1, 1_000, 123_456, 10_000_000] {
        let amount = Amount::new(amount);
        let (Ok(Some(with_fees)), Ok(Some(without))) = (
            market.exchange_value(amount, &d("uaaa"), &d("uccc"), true),
            market.exchange_value(amount, &d("uaaa"), &d("uccc"), false),
        ) else {
            panic!("reachable");
        };
        assert!(with_fees <= without);
    }
    assert_eq!(
        market.exchange_value(Amount::new(5), &d("uaaa"), &d("uxxx"), true),
        Ok(None)
    );
}

// ---------------------------------------------------------------------------
// Simulation and quoting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn router_simulation_chains_pair_simulations() {
    let (_, session, market) = discovered().await;
    let offer = Coin::new(Amount::new(25_000), d("uaaa"));

    let Ok(Some(routed)) = market.simulate_swap(&session, &offer, &d("uccc")).await else {
        panic!("router simulation");
    };
    let Ok(first) = session
        .query_simulate_swap(&addr("sei1ab"), offer.clone())
        .await
    else {
        panic!("first hop");
    };
    let Ok(second) = session
        .query_simulate_swap(&addr("sei1bc"), Coin::new(first.result_amount, d("ubbb")))
        .await
    else {
        panic!("second hop");
    };
    assert_eq!(routed.result_denom, d("uccc"));
    assert_eq!(routed.result_amount, second.result_amount);

    assert_eq!(market.simulate_swap(&session, &offer, &d("uxxx")).await, Ok(None));
    assert!(matches!(
        market.simulate_swap(&session, &offer, &d("uaaa")).await,
        Err(SwapError::SameAsset(_))
    ));
}

#[tokio::test]
async fn pair_simulations_reach_the_pool() {
    let (_, session, market) = discovered().await;
    let Ok(pair) = market.require_pair(&pair_of("uaaa", "ubbb")) else {
        panic!("pair registered");
    };
    let offer = Coin::new(Amount::new(10_000), d("uaaa"));
    let (Ok(actual), Ok(naive)) = (
        pair.simulate_swap(&session, offer.clone()).await,
        pair.simulate_naive_swap(&session, offer).await,
    ) else {
        panic!("simulations succeed");
    };
    assert!(actual.result_amount < naive.result_amount);
    assert!(matches!(
        pair.simulate_swap(&session, Coin::new(Amount::new(1), d("uccc"))).await,
        Err(SwapError::InvalidDenom { .. })
    ));
}

#[tokio::test]
async fn quotes_flag_large_price_impact() {
    let (_, session, market) = discovered().await;
    let quoter = SwapQuoter::new(Arc::new(market), Arc::new(session), &config());

    let Ok(Some(small)) = quoter
        .quote(&Coin::new(Amount::new(100), d("uaaa")), &d("uccc"))
        .await
    else {
        panic!("small quote");
    };
    assert_eq!(small.route.len(), 2);
    assert!(!small.warn);

    let Ok(Some(large)) = quoter
        .quote(&Coin::new(Amount::new(100_000), d("uaaa")), &d("uccc"))
        .await
    else {
        panic!("large quote");
    };
    assert!(large.amount < large.naive_amount);
    assert!(large.slippage_bps > BasisPoints::new(50));
    assert!(large.warn);

    let Ok(None) = quoter
        .quote(&Coin::new(Amount::new(100), d("uaaa")), &d("uyyy"))
        .await
    else {
        panic!("unreachable ask");
    };
}

/// Forwards to the in-memory chain, answering router queries a second late.
#[derive(Debug)]
struct SlowRouter {
    inner: Arc<InMemoryChain>,
}

#[async_trait]
impl ChainGateway for SlowRouter {
    async fn query_smart(&self, contract: &Addr, msg: Value) -> Result<Value> {
        if contract == self.inner.router() {
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        }
        self.inner.query_smart(contract, msg).await
    }
}

#[tokio::test(start_paused = true)]
async fn quote_keeps_its_route_when_market_changes_mid_simulation() {
    let (chain, _, cfg) = deployment();
    let session = Arc::new(ChainSession::new(
        "pacific-1",
        SlowRouter {
            inner: Arc::clone(&chain),
        },
        TokenDirectory::default(),
    ));
    let market = Arc::new(Market::from_config(&cfg));
    assert_eq!(market.refresh(&session).await, Ok(3));
    let quoter = SwapQuoter::new(Arc::clone(&market), Arc::clone(&session), &cfg);

    // A direct pair appears while the router simulation is pending.
    list(&chain, "sei1ac", "uaaa", "uccc", fees(0, 0), [1_000_000, 6_000_000]);
    let offer = Coin::new(Amount::new(25_000), d("uaaa"));
    let ask = d("uccc");
    let (quoted, refreshed) = tokio::join!(quoter.quote(&offer, &ask), async {
        market.refresh(&session).await
    });
    assert_eq!(refreshed, Ok(4));
    let Ok(Some(quote)) = quoted else {
        panic!("quote succeeds");
    };
    assert_eq!(market.require_route(&d("uaaa"), &d("uccc")).map(|r| r.len()), Ok(1));

    assert_eq!(quote.route.len(), 2);
    let Ok(two_hop) = session
        .query_router_simulate_swaps(
            &addr("sei1router"),
            offer.clone(),
            vec![addr("sei1ab"), addr("sei1bc")],
        )
        .await
    else {
        panic!("two-hop simulation");
    };
    assert_eq!(quote.amount, two_hop.result_amount);
    assert_eq!(
        market.exchange_value_along(&quote.route, offer.amount, true),
        Ok(quote.naive_amount)
    );
}

#[tokio::test(start_paused = true)]
async fn debounced_requests_quote_latest_input() {
    let (_, session, market) = discovered().await;
    let quoter = SwapQuoter::new(Arc::new(market), Arc::new(session), &config());

    let (driver, follower) = tokio::join!(
        quoter.request(Coin::new(Amount::new(1_000), d("uaaa")), d("ubbb")),
        quoter.request(Coin::new(Amount::new(2_000), d("uaaa")), d("uccc")),
    );
    assert!(follower.is_none());
    let Some(Ok(Some(quote))) = driver else {
        panic!("driver returns a quote");
    };
    assert!(quote.route.connects(&d("uaaa"), &d("uccc")));
}

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn swap_instruction_names_every_hop() {
    let (_, _, market) = discovered().await;
    let offer = Coin::new(Amount::new(10_000), d("uaaa"));
    let Ok(Some(ix)) = market.build_swap_ixs(&offer, &d("uccc"), None, None, None) else {
        panic!("swap instruction");
    };
    assert_eq!(ix.contract_address, addr("sei1router"));
    assert_eq!(ix.funds, vec![offer]);
    assert_eq!(
        ix.msg["execute_swaps"]["swappers"],
        json!(["sei1ab", "sei1bc"])
    );
    assert_eq!(
        ix.msg["execute_swaps"]["intermediate_slippage_tolerance"],
        json!("0.005")
    );
}
