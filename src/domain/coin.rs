//! An amount tagged with its denom.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Denom};

/// An [`Amount`] of a specific [`Denom`].
///
/// Serializes as the chain's `{"denom": "...", "amount": "..."}` object.
///
/// # Examples
///
/// ```
/// use swap_market::domain::{Amount, Coin};
///
/// let coin = Coin::new(Amount::new(100), "usei".parse().expect("denom"));
/// assert_eq!(coin.to_string(), "100usei");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Asset identifier.
    pub denom: Denom,
    /// Raw amount in the asset's smallest unit.
    pub amount: Amount,
}

impl Coin {
    /// Creates a coin.
    #[must_use]
    pub const fn new(amount: Amount, denom: Denom) -> Self {
        Self { denom, amount }
    }

    /// A zero amount of `denom`.
    #[must_use]
    pub const fn zero(denom: Denom) -> Self {
        Self::new(Amount::ZERO, denom)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape() {
        let Ok(denom) = "usei".parse::<Denom>() else {
            panic!("valid denom");
        };
        let coin = Coin::new(Amount::new(1_500), denom);
        let Ok(json) = serde_json::to_string(&coin) else {
            panic!("serializable");
        };
        assert_eq!(json, r#"{"denom":"usei","amount":"1500"}"#);
    }

    #[test]
    fn rejects_bad_denom_on_the_wire() {
        let raw = r#"{"denom":"not a denom","amount":"1"}"#;
        assert!(serde_json::from_str::<Coin>(raw).is_err());
    }
}
