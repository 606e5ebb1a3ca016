//! Chain account / contract address.

use core::fmt;
use core::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::error::SwapError;

/// A bech32-style account or contract address (`sei1...`).
///
/// The crate never decodes the checksum; it only enforces that the address
/// is a non-empty run of lowercase ASCII letters and digits so it can be
/// embedded safely in denoms such as `cw20/<addr>` and `factory/<addr>/lp`.
///
/// # Examples
///
/// ```
/// use swap_market::domain::Addr;
///
/// let addr = Addr::new("sei1pair").expect("valid address");
/// assert_eq!(addr.as_str(), "sei1pair");
/// assert!(Addr::new("sei1 pair").is_err());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct Addr(String);

impl Addr {
    /// Validates and wraps an address.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidAddress`] if the string is empty or
    /// contains anything other than lowercase ASCII letters and digits.
    pub fn new(addr: impl Into<String>) -> crate::error::Result<Self> {
        let addr = addr.into();
        let valid = !addr.is_empty()
            && addr
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
        if !valid {
            return Err(SwapError::InvalidAddress(addr));
        }
        Ok(Self(addr))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Addr {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Addr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
