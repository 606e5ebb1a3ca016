//! Market tour against the in-memory chain.
//!
//! Lists three pairs (one of them holding a CW20 token), discovers them
//! through the factory, resolves a two-hop route, compares the naive and
//! curve-accurate results of a swap and prints the instructions a wallet
//! would sign.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=swap_market=debug cargo run --example market_tour
//! ```

use std::sync::Arc;

use swap_market::config::{MarketConfig, TokenDirectory};
use swap_market::domain::{Addr, Amount, BasisPoints, Coin, Denom, DenomPair, PairFees};
use swap_market::gateway::InMemoryChain;
use swap_market::market::Market;
use swap_market::quote::SwapQuoter;
use swap_market::session::ChainSession;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Swap Market Tour ===\n");

    // ── 1. Configuration ────────────────────────────────────────────────
    let config = MarketConfig::from_json(
        r#"{
            "factory": "sei1factory",
            "router": "sei1router",
            "slippage_warning": 100,
            "tokens": [
                { "denom": "usei", "symbol": "SEI", "decimals": 6 },
                { "denom": "uusdc", "symbol": "USDC", "decimals": 6 },
                { "denom": "cw20/sei1kraken", "symbol": "KRAKEN", "decimals": 6 }
            ]
        }"#,
    )?;
    let tokens = TokenDirectory::new(config.tokens().iter().cloned());

    // ── 2. Deploy pairs on the in-memory chain ──────────────────────────
    let usei: Denom = "usei".parse()?;
    let uusdc: Denom = "uusdc".parse()?;
    let kraken: Denom = "cw20/sei1kraken".parse()?;

    let chain = Arc::new(InMemoryChain::new(
        config.factory().clone(),
        config.router().clone(),
    ));
    let fees = PairFees::new(BasisPoints::new(10), BasisPoints::new(20))?;
    for (contract, a, b, reserves) in [
        ("sei1seiusdc", &usei, &uusdc, [50_000_000_000, 20_000_000_000]),
        ("sei1krakensei", &kraken, &usei, [9_000_000_000, 3_000_000_000]),
    ] {
        let contract = Addr::new(contract)?;
        chain.add_pair(contract.clone(), DenomPair::new(a.clone(), b.clone())?, fees)?;
        chain.deposit(&contract, reserves.map(Amount::new))?;
    }

    // ── 3. Discover the market ──────────────────────────────────────────
    let session = Arc::new(ChainSession::new("pacific-1", Arc::clone(&chain), tokens));
    let market = Arc::new(Market::from_config(&config));
    let listed = market.refresh(&session).await?;
    println!("Discovered {listed} pairs:");
    for pair in market.get_all_pairs() {
        let [d0, d1] = pair.total_deposits();
        println!(
            "  {:<12} {}  reserves {} / {}  fee {}",
            pair.name(),
            pair.contract(),
            d0,
            d1,
            pair.total_fee_bps()
        );
    }

    // ── 4. Route and price ──────────────────────────────────────────────
    let route = market.require_route(&kraken, &uusdc)?;
    println!("\nRoute KRAKEN -> USDC ({} hops):", route.len());
    for hop in &route {
        println!("  {} -> {}", hop.from, hop.to);
    }
    println!(
        "Rate with fees: {:.6} USDC per KRAKEN",
        market.exchange_rate(&kraken, &uusdc, true)
    );

    // ── 5. Quote a swap ─────────────────────────────────────────────────
    let quoter = SwapQuoter::new(Arc::clone(&market), Arc::clone(&session), &config);
    let offer = Coin::new(Amount::new(250_000_000), kraken.clone());
    if let Some(quote) = quoter.quote(&offer, &uusdc).await? {
        println!("\nSwapping {offer}:");
        println!("  naive result:  {}", quote.naive_amount);
        println!("  router result: {}", quote.amount);
        println!(
            "  slippage:      {}{}",
            quote.slippage_bps,
            if quote.warn { "  (above warning threshold)" } else { "" }
        );
    }

    // ── 6. Build instructions ───────────────────────────────────────────
    if let Some(ix) = market.build_swap_ixs(&offer, &uusdc, None, None, None)? {
        println!("\nRouter swap instruction:\n{}", serde_json::to_string_pretty(&ix)?);
    }

    let sei_usdc = market.require_pair(&DenomPair::new(usei, uusdc)?)?;
    let estimate =
        sei_usdc.calculate_provide_liquidity(Amount::new(5_000_000), Amount::new(2_000_000))?;
    println!(
        "\nDepositing into {} mints {} shares worth {} + {}",
        sei_usdc.name(),
        estimate.new_shares,
        estimate.new_share_value.coins()[0],
        estimate.new_share_value.coins()[1]
    );
    for ix in sei_usdc.build_provide_liquidity_ixs(
        Amount::new(5_000_000),
        Amount::new(2_000_000),
        None,
        None,
    )? {
        println!("{}", serde_json::to_string(&ix)?);
    }

    Ok(())
}
