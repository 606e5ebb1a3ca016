//! Configuration for a [`Market`](crate::market::Market) and its quote loop.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::TokenInfo;
use crate::domain::{Addr, BasisPoints};
use crate::error::SwapError;

/// Slippage tolerance used when the caller does not pick one (0.5%).
pub const DEFAULT_SLIPPAGE: BasisPoints = BasisPoints::new(50);

/// Highest slippage tolerance the pair contracts accept (50%).
pub const MAX_ALLOWED_TOLERANCE: BasisPoints = BasisPoints::new(5_000);

/// Approximate slippage above which a quote is flagged (0.5%).
pub const DEFAULT_SLIPPAGE_WARNING: BasisPoints = BasisPoints::new(50);

/// Delay between a quote request and the chain query it triggers.
pub const DEFAULT_QUOTE_DEBOUNCE_MS: u64 = 500;

/// Pairs requested per factory page.
pub const DEFAULT_FACTORY_PAGE_SIZE: u32 = 30;

/// Rejects slippage tolerances the pair contracts would refuse.
///
/// # Errors
///
/// Returns [`SwapError::InvalidConfiguration`] above
/// [`MAX_ALLOWED_TOLERANCE`].
pub fn check_slippage_tolerance(tolerance: BasisPoints) -> Result<(), SwapError> {
    if tolerance > MAX_ALLOWED_TOLERANCE {
        return Err(SwapError::InvalidConfiguration(
            "slippage tolerance exceeds the maximum allowed tolerance",
        ));
    }
    Ok(())
}

/// Everything needed to stand up a market against one deployment.
///
/// # Validation
///
/// - `factory` and `router` must differ.
/// - `default_slippage` must not exceed [`MAX_ALLOWED_TOLERANCE`].
/// - `slippage_warning` must be a valid percentage.
/// - `factory_page_size` must be non-zero.
/// - Token denoms must be unique and every [`TokenInfo`] valid.
///
/// # Example
///
/// ```rust
/// use swap_market::config::MarketConfig;
///
/// let cfg = MarketConfig::from_json(r#"{
///     "factory": "sei1factory",
///     "router": "sei1router",
///     "tokens": [{ "denom": "usei", "symbol": "SEI", "decimals": 6 }]
/// }"#).expect("valid config");
///
/// assert_eq!(cfg.default_slippage().get(), 50);
/// assert_eq!(cfg.quote_debounce().as_millis(), 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    factory: Addr,
    router: Addr,
    #[serde(default = "default_slippage")]
    default_slippage: BasisPoints,
    #[serde(default = "default_slippage_warning")]
    slippage_warning: BasisPoints,
    #[serde(default = "default_quote_debounce_ms")]
    quote_debounce_ms: u64,
    #[serde(default = "default_factory_page_size")]
    factory_page_size: u32,
    #[serde(default)]
    tokens: Vec<TokenInfo>,
}

const fn default_slippage() -> BasisPoints {
    DEFAULT_SLIPPAGE
}

const fn default_slippage_warning() -> BasisPoints {
    DEFAULT_SLIPPAGE_WARNING
}

const fn default_quote_debounce_ms() -> u64 {
    DEFAULT_QUOTE_DEBOUNCE_MS
}

const fn default_factory_page_size() -> u32 {
    DEFAULT_FACTORY_PAGE_SIZE
}

impl MarketConfig {
    /// Creates a configuration with default tolerances and no token
    /// metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidConfiguration`] if `factory == router`.
    pub fn new(factory: Addr, router: Addr) -> Result<Self, SwapError> {
        let config = Self {
            factory,
            router,
            default_slippage: DEFAULT_SLIPPAGE,
            slippage_warning: DEFAULT_SLIPPAGE_WARNING,
            quote_debounce_ms: DEFAULT_QUOTE_DEBOUNCE_MS,
            factory_page_size: DEFAULT_FACTORY_PAGE_SIZE,
            tokens: Vec::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Serialization`] if the JSON is malformed.
    /// - Any error from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, SwapError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the token list.
    ///
    /// # Errors
    ///
    /// Any error from [`validate`](Self::validate).
    pub fn with_tokens(mut self, tokens: Vec<TokenInfo>) -> Result<Self, SwapError> {
        self.tokens = tokens;
        self.validate()?;
        Ok(self)
    }

    /// Replaces the default slippage tolerance.
    ///
    /// # Errors
    ///
    /// Any error from [`validate`](Self::validate).
    pub fn with_default_slippage(mut self, slippage: BasisPoints) -> Result<Self, SwapError> {
        self.default_slippage = slippage;
        self.validate()?;
        Ok(self)
    }

    /// Replaces the quote debounce delay.
    #[must_use]
    pub fn with_quote_debounce(mut self, debounce: Duration) -> Self {
        self.quote_debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidConfiguration`] naming the first violated
    /// rule, or the error of an invalid [`TokenInfo`].
    pub fn validate(&self) -> Result<(), SwapError> {
        if self.factory == self.router {
            return Err(SwapError::InvalidConfiguration(
                "factory and router must be different contracts",
            ));
        }
        check_slippage_tolerance(self.default_slippage)?;
        if !self.slippage_warning.is_valid_percent() {
            return Err(SwapError::InvalidConfiguration(
                "slippage warning must be 0..=10000 bps",
            ));
        }
        if self.factory_page_size == 0 {
            return Err(SwapError::InvalidConfiguration(
                "factory page size must be non-zero",
            ));
        }
        let mut seen = HashSet::with_capacity(self.tokens.len());
        for token in &self.tokens {
            token.validate()?;
            if !seen.insert(&token.denom) {
                return Err(SwapError::InvalidConfiguration("duplicate token denom"));
            }
        }
        Ok(())
    }

    /// Returns the factory contract.
    #[must_use]
    pub const fn factory(&self) -> &Addr {
        &self.factory
    }

    /// Returns the router contract.
    #[must_use]
    pub const fn router(&self) -> &Addr {
        &self.router
    }

    /// Returns the slippage tolerance applied when callers pass none.
    #[must_use]
    pub const fn default_slippage(&self) -> BasisPoints {
        self.default_slippage
    }

    /// Returns the approximate slippage above which quotes are flagged.
    #[must_use]
    pub const fn slippage_warning(&self) -> BasisPoints {
        self.slippage_warning
    }

    /// Returns the quote debounce delay.
    #[must_use]
    pub const fn quote_debounce(&self) -> Duration {
        Duration::from_millis(self.quote_debounce_ms)
    }

    /// Returns the factory page size.
    #[must_use]
    pub const fn factory_page_size(&self) -> u32 {
        self.factory_page_size
    }

    /// Returns the token metadata.
    #[must_use]
    pub fn tokens(&self) -> &[TokenInfo] {
        &self.tokens
    }
}
