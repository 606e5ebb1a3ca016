//! Ordered pair of distinct denoms and the registry key derived from it.

use core::fmt;

use super::Denom;
use crate::error::SwapError;

/// Separator between the two denoms of a [`PairKey`].
const KEY_SEPARATOR: char = '\0';

/// Two distinct denoms in the order the chain listed them.
///
/// Unlike a canonical (sorted) pair, a `DenomPair` is never reordered:
/// `first()` is always the asset the factory listed first, and reserves are
/// index-aligned with it. Use [`inverse`](Self::inverse) to look up the same
/// pool from the other side.
///
/// # Examples
///
/// ```
/// use swap_market::domain::{Denom, DenomPair};
///
/// let sei: Denom = "usei".parse().expect("denom");
/// let usdc: Denom = "uusdc".parse().expect("denom");
/// let pair = DenomPair::new(sei.clone(), usdc.clone()).expect("distinct");
/// assert_eq!(pair.first(), &sei);
/// assert_eq!(pair.inverse().first(), &usdc);
/// assert_eq!(pair.key().as_str(), "usei\0uusdc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DenomPair([Denom; 2]);

impl DenomPair {
    /// Creates a pair from two distinct denoms, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::SameAsset`] if both denoms are equal.
    pub fn new(first: Denom, second: Denom) -> crate::error::Result<Self> {
        if first == second {
            return Err(SwapError::SameAsset(first.to_string()));
        }
        Ok(Self([first, second]))
    }

    /// Parses both halves of a `[String; 2]` as returned by the contracts.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidDenom`] for a malformed denom and
    /// [`SwapError::SameAsset`] if both are equal.
    pub fn parse(raw: &[String; 2]) -> crate::error::Result<Self> {
        Self::new(raw[0].parse()?, raw[1].parse()?)
    }

    /// The first listed denom.
    #[must_use]
    pub const fn first(&self) -> &Denom {
        &self.0[0]
    }

    /// The second listed denom.
    #[must_use]
    pub const fn second(&self) -> &Denom {
        &self.0[1]
    }

    /// Both denoms in listing order.
    #[must_use]
    pub const fn as_array(&self) -> &[Denom; 2] {
        &self.0
    }

    /// The same pair with the denoms swapped.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self([self.0[1].clone(), self.0[0].clone()])
    }

    /// Position of `denom` in the pair, if present.
    #[must_use]
    pub fn index_of(&self, denom: &Denom) -> Option<usize> {
        self.0.iter().position(|d| d == denom)
    }

    /// Returns `true` if `denom` is either side of the pair.
    #[must_use]
    pub fn contains(&self, denom: &Denom) -> bool {
        self.index_of(denom).is_some()
    }

    /// Given one side of the pair, returns the other.
    #[must_use]
    pub fn other(&self, denom: &Denom) -> Option<&Denom> {
        self.index_of(denom).map(|i| &self.0[1 - i])
    }

    /// Registry key: `first || NUL || second`.
    pub fn key(&self) -> PairKey {
        PairKey(format!("{}{KEY_SEPARATOR}{}", self.0[0], self.0[1]))
    }

    /// The two denoms as wire strings.
    #[must_use]
    pub fn to_strings(&self) -> [String; 2] {
        [self.0[0].to_string(), self.0[1].to_string()]
    }
}

impl fmt::Display for DenomPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <> {}", self.0[0], self.0[1])
    }
}

/// Lookup key of a pair in the market registry.
///
/// Order-sensitive: the key of `(a, b)` differs from that of `(b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use]
pub struct PairKey(String);

impl PairKey {
    /// Returns the raw key, NUL separator included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.0.split_once(KEY_SEPARATOR).unwrap_or((&self.0, ""));
        write!(f, "{a} <> {b}")
    }
}
