//! Swap quotes combining router simulation with the naive estimate.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::RefreshLoop;
use crate::config::MarketConfig;
use crate::domain::{Amount, BasisPoints, Coin, Denom, Rounding, Route};
use crate::error::{Result, SwapError};
use crate::market::Market;
use crate::math::{mul_div, CheckedArithmetic};
use crate::session::ChainSession;
use crate::traits::ChainGateway;

/// A priced swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuote {
    /// Hops the router would take.
    pub route: Route,
    /// Amount received after every hop and fee, per the router.
    pub amount: Amount,
    /// Linear estimate at the cached reserve ratios, fees included.
    pub naive_amount: Amount,
    /// Shortfall of `amount` against `naive_amount`, rounded up.
    pub slippage_bps: BasisPoints,
    /// Whether `slippage_bps` exceeds the configured warning threshold.
    pub warn: bool,
}

/// Quotes swaps against a [`Market`], optionally debounced.
///
/// [`quote`](Self::quote) prices one swap immediately.
/// [`request`](Self::request) is meant for interactive input: every call
/// records the newest offer, and only the first concurrent caller drives
/// the debounced refresh and receives the quote for the newest input.
#[derive(Debug)]
pub struct SwapQuoter<G> {
    market: Arc<Market>,
    session: Arc<ChainSession<G>>,
    warning: BasisPoints,
    refresh: RefreshLoop,
    input: Mutex<Option<(Coin, Denom)>>,
}

impl<G: ChainGateway> SwapQuoter<G> {
    /// Creates a quoter with the warning threshold and debounce delay of
    /// `config`.
    #[must_use]
    pub fn new(market: Arc<Market>, session: Arc<ChainSession<G>>, config: &MarketConfig) -> Self {
        Self {
            market,
            session,
            warning: config.slippage_warning(),
            refresh: RefreshLoop::new(config.quote_debounce()),
            input: Mutex::new(None),
        }
    }

    /// Prices swapping `offer` into `ask`.
    ///
    /// The route is resolved once; the router simulation and the naive
    /// estimate both follow it even if the market changes meanwhile.
    ///
    /// Returns `Ok(None)` if `ask` is unreachable.
    ///
    /// # Errors
    ///
    /// - [`SwapError::SameAsset`] if the offer denom equals `ask`.
    /// - [`SwapError::InvalidAmount`] if the offer is zero.
    /// - Any query, decoding or arithmetic error.
    pub async fn quote(&self, offer: &Coin, ask: &Denom) -> Result<Option<SwapQuote>> {
        if offer.denom == *ask {
            return Err(SwapError::SameAsset(ask.to_string()));
        }
        if offer.amount.is_zero() {
            return Err(SwapError::InvalidAmount("offer must be non-zero"));
        }
        let Some(route) = self.market.resolve_multi_swap_route(&offer.denom, ask) else {
            return Ok(None);
        };
        let naive_amount = self.market.exchange_value_along(&route, offer.amount, true)?;
        let simulated = self
            .market
            .simulate_route(&self.session, offer, &route)
            .await?;
        let slippage_bps = shortfall_bps(simulated.result_amount, naive_amount)?;
        let warn = slippage_bps > self.warning;
        debug!(
            offer = %offer,
            %ask,
            amount = %simulated.result_amount,
            naive = %naive_amount,
            slippage = %slippage_bps,
            warn,
            "swap quoted"
        );
        Ok(Some(SwapQuote {
            route,
            amount: simulated.result_amount,
            naive_amount,
            slippage_bps,
            warn,
        }))
    }

    /// Records `offer`/`ask` as the newest input and, if no other caller is
    /// already refreshing, drives the debounced refresh.
    ///
    /// Returns `None` when another caller is driving; that caller's result
    /// reflects this input. Otherwise returns the quote for the newest input
    /// seen once requests stop arriving.
    pub async fn request(&self, offer: Coin, ask: Denom) -> Option<Result<Option<SwapQuote>>> {
        *self.input.lock().unwrap_or_else(PoisonError::into_inner) = Some((offer, ask));
        if !self.refresh.request() {
            debug!("quote request superseded by active refresh");
            return None;
        }
        self.refresh.drive(|| self.quote_latest()).await
    }

    async fn quote_latest(&self) -> Result<Option<SwapQuote>> {
        let input = self
            .input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match input {
            Some((offer, ask)) => self.quote(&offer, &ask).await,
            None => Ok(None),
        }
    }
}

/// `(naive - actual) / naive` in basis points, rounded up. Zero when the
/// actual amount is not below the naive one.
fn shortfall_bps(actual: Amount, naive: Amount) -> Result<BasisPoints> {
    if naive.is_zero() || actual >= naive {
        return Ok(BasisPoints::ZERO);
    }
    let missing = naive.safe_sub(&actual)?;
    let bps = mul_div(missing, Amount::new(10_000), naive, Rounding::Up)?;
    let bps = u32::try_from(bps.get()).map_err(|_| SwapError::Overflow("slippage bps"))?;
    Ok(BasisPoints::new(bps))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_rounds_up() {
        assert_eq!(
            shortfall_bps(Amount::new(9_950), Amount::new(10_000)),
            Ok(BasisPoints::new(50))
        );
        assert_eq!(
            shortfall_bps(Amount::new(9_999), Amount::new(1_000_000)),
            Ok(BasisPoints::new(9_901))
        );
        assert_eq!(
            shortfall_bps(Amount::new(999_999), Amount::new(1_000_000)),
            Ok(BasisPoints::new(1))
        );
    }

    #[test]
    fn no_shortfall_is_zero() {
        assert_eq!(
            shortfall_bps(Amount::new(11), Amount::new(10)),
            Ok(BasisPoints::ZERO)
        );
        assert_eq!(shortfall_bps(Amount::new(5), Amount::ZERO), Ok(BasisPoints::ZERO));
    }
}
