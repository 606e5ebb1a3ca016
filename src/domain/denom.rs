//! Unified identifier for a tradable asset.

use core::fmt;
use core::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use super::Addr;
use crate::error::SwapError;

/// Prefix marking a contract-backed token in the string encoding.
pub const CW20_PREFIX: &str = "cw20/";

/// Length bounds of a native bank denom.
const NATIVE_MIN_LEN: usize = 3;
const NATIVE_MAX_LEN: usize = 128;

/// A tradable asset: either a native bank denom or a CW20 token contract.
///
/// The string encoding is parsed exactly once, at the boundary. Past that
/// point the rest of the crate matches on the variant and never inspects
/// string prefixes.
///
/// | Encoding | Value |
/// |----------|-------|
/// | `usei` | `Denom::Native("usei")` |
/// | `factory/sei1pair/lp` | `Denom::Native("factory/sei1pair/lp")` |
/// | `cw20/sei1token` | `Denom::Cw20(sei1token)` |
///
/// # Examples
///
/// ```
/// use swap_market::domain::Denom;
///
/// let sei: Denom = "usei".parse().expect("native denom");
/// let tok: Denom = "cw20/sei1token".parse().expect("cw20 denom");
/// assert!(sei.is_native());
/// assert_eq!(tok.as_cw20().map(|a| a.as_str()), Some("sei1token"));
/// assert_eq!(tok.to_string(), "cw20/sei1token");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub enum Denom {
    /// A bank-module denom, including token-factory and IBC denoms.
    Native(String),
    /// A CW20 token identified by its contract address.
    Cw20(Addr),
}

impl Denom {
    /// Builds a validated native denom.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidDenom`] if the denom does not follow the
    /// bank module's format or carries the CW20 prefix.
    pub fn native(denom: impl Into<String>) -> crate::error::Result<Self> {
        let denom = denom.into();
        if !is_valid_native(&denom) {
            return Err(invalid(denom));
        }
        Ok(Self::Native(denom))
    }

    /// Wraps a CW20 token contract address.
    #[must_use]
    pub const fn cw20(contract: Addr) -> Self {
        Self::Cw20(contract)
    }

    /// The token-factory denom a pair contract mints its shares under.
    #[must_use]
    pub fn pair_shares(pair: &Addr) -> Self {
        Self::Native(format!("factory/{pair}/lp"))
    }

    /// Returns `true` for bank-module denoms.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }

    /// Returns the token contract for CW20 denoms.
    #[must_use]
    pub const fn as_cw20(&self) -> Option<&Addr> {
        match self {
            Self::Cw20(addr) => Some(addr),
            Self::Native(_) => None,
        }
    }
}

fn is_valid_native(denom: &str) -> bool {
    let len_ok = (NATIVE_MIN_LEN..=NATIVE_MAX_LEN).contains(&denom.len());
    let mut bytes = denom.bytes();
    let starts_alpha = bytes.next().is_some_and(|b| b.is_ascii_alphabetic());
    let body_ok =
        bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-'));
    len_ok && starts_alpha && body_ok && !denom.starts_with(CW20_PREFIX)
}

fn invalid(denom: String) -> SwapError {
    SwapError::InvalidDenom {
        denom,
        expected: Vec::new(),
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(denom) => f.write_str(denom),
            Self::Cw20(addr) => write!(f, "{CW20_PREFIX}{addr}"),
        }
    }
}

impl FromStr for Denom {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(CW20_PREFIX) {
            Some(contract) => Addr::new(contract)
                .map(Self::Cw20)
                .map_err(|_| invalid(s.to_owned())),
            None => Self::native(s),
        }
    }
}
