//! Token metadata used for display names and human-readable amounts.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Denom};
use crate::error::SwapError;

/// Highest number of decimals a token may declare.
const MAX_DECIMALS: u8 = 18;

/// Display metadata of one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Asset the metadata describes.
    pub denom: Denom,
    /// Ticker shown to users, e.g. `SEI`.
    pub symbol: String,
    /// Decimal places between the raw amount and the display amount.
    pub decimals: u8,
}

impl TokenInfo {
    /// Creates validated token metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidConfiguration`] if the symbol is empty or
    /// contains `-` (the pair name separator), or if `decimals > 18`.
    pub fn new(
        denom: Denom,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> crate::error::Result<Self> {
        let info = Self {
            denom,
            symbol: symbol.into(),
            decimals,
        };
        info.validate()?;
        Ok(info)
    }

    /// Validates the metadata.
    ///
    /// # Errors
    ///
    /// See [`TokenInfo::new`].
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.symbol.is_empty() || self.symbol.contains('-') {
            return Err(SwapError::InvalidConfiguration(
                "token symbol must be non-empty and free of '-'",
            ));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(SwapError::InvalidConfiguration("token decimals must be 0..=18"));
        }
        Ok(())
    }

    /// Formats a raw amount with this token's decimals, trimming trailing
    /// zeros: `1_500_000` with 6 decimals is `"1.5"`.
    #[must_use]
    pub fn format_amount(&self, amount: Amount) -> String {
        let factor = 10u128.pow(u32::from(self.decimals));
        let whole = amount.get() / factor;
        let frac = amount.get() % factor;
        if frac == 0 {
            return whole.to_string();
        }
        let digits = format!("{frac:0width$}", width = usize::from(self.decimals));
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }
}

/// Lookup of [`TokenInfo`] by denom.
///
/// Unknown denoms fall back to their own string encoding as symbol so that
/// pairs of unlisted tokens still get a usable name.
#[derive(Debug, Clone, Default)]
pub struct TokenDirectory {
    tokens: HashMap<Denom, TokenInfo>,
}

impl TokenDirectory {
    /// Builds a directory. Later entries replace earlier ones for the same
    /// denom.
    #[must_use]
    pub fn new(tokens: impl IntoIterator<Item = TokenInfo>) -> Self {
        Self {
            tokens: tokens.into_iter().map(|t| (t.denom.clone(), t)).collect(),
        }
    }

    /// Metadata for `denom`, if listed.
    #[must_use]
    pub fn get(&self, denom: &Denom) -> Option<&TokenInfo> {
        self.tokens.get(denom)
    }

    /// Display symbol for `denom`.
    #[must_use]
    pub fn symbol(&self, denom: &Denom) -> Cow<'_, str> {
        match self.tokens.get(denom) {
            Some(info) => Cow::Borrowed(info.symbol.as_str()),
            None => Cow::Owned(denom.to_string()),
        }
    }

    /// Number of listed tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no token is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
