//! Value of liquidity shares and deposit previews.

use super::{Amount, Coin, Denom};

/// The two reserve-side amounts a number of shares is worth, aligned with the
/// pair's listing order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareValue([Coin; 2]);

impl ShareValue {
    /// Wraps two coins in listing order.
    #[must_use]
    pub const fn new(coins: [Coin; 2]) -> Self {
        Self(coins)
    }

    /// Zero of each asset.
    #[must_use]
    pub fn zero(assets: &[Denom; 2]) -> Self {
        Self([Coin::zero(assets[0].clone()), Coin::zero(assets[1].clone())])
    }

    /// Both coins in listing order.
    #[must_use]
    pub const fn coins(&self) -> &[Coin; 2] {
        &self.0
    }

    /// Both amounts in listing order.
    pub fn amounts(&self) -> [Amount; 2] {
        [self.0[0].amount, self.0[1].amount]
    }

    /// Amount of `denom`, if it is one of the two assets.
    pub fn amount_of(&self, denom: &Denom) -> Option<Amount> {
        self.0.iter().find(|c| c.denom == *denom).map(|c| c.amount)
    }

    /// Consumes the value, returning the coins.
    #[must_use]
    pub fn into_coins(self) -> [Coin; 2] {
        self.0
    }
}

/// Result of previewing a two-sided deposit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProvideLiquidityEstimate {
    /// Shares that would be minted.
    pub new_shares: Amount,
    /// What those shares would be worth right after the deposit.
    pub new_share_value: ShareValue,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn d(s: &str) -> Denom {
        let Ok(d) = s.parse() else {
            panic!("valid denom {s}");
        };
        d
    }

    #[test]
    fn lookup_by_denom() {
        let value = ShareValue::new([
            Coin::new(Amount::new(10), d("usei")),
            Coin::new(Amount::new(20), d("uusdc")),
        ]);
        assert_eq!(value.amount_of(&d("uusdc")), Some(Amount::new(20)));
        assert_eq!(value.amount_of(&d("uatom")), None);
        assert_eq!(value.amounts(), [Amount::new(10), Amount::new(20)]);
    }

    #[test]
    fn zero_value() {
        let value = ShareValue::zero(&[d("usei"), d("uusdc")]);
        assert_eq!(value.amounts(), [Amount::ZERO, Amount::ZERO]);
        assert_eq!(value.coins()[1].denom, d("uusdc"));
    }
}
