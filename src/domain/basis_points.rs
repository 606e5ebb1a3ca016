//! Basis-point representation for fees and slippage tolerances.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

use super::{Amount, Rounding};
use crate::error::SwapError;

/// Maximum value that represents 100%.
const MAX_BPS: u32 = 10_000;

/// Number of fractional digits a basis point needs in decimal form.
const BPS_DIGITS: usize = 4;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// In configuration files and pair config responses a `BasisPoints` is a
/// plain integer. Contract messages that take a `Decimal` use the
/// [`DecimalBps`] adapter instead, which writes `50` as `"0.005"`.
///
/// # Examples
///
/// ```
/// use swap_market::domain::BasisPoints;
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.get(), 30);
/// assert!(bp.is_valid_percent());
/// assert_eq!(bp.to_decimal_string(), "0.003");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in the valid percentage range (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BPS
    }

    /// Returns `10_000 - self`, or `None` above 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<Self> {
        match MAX_BPS.checked_sub(self.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked addition. Returns `None` on `u32` overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Converts to a fraction of one (`50` → `0.005`). Display only.
    #[must_use]
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / f64::from(MAX_BPS)
    }

    /// Computes `amount * self / 10_000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Overflow`] if the intermediate multiplication overflows.
    pub const fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        let product = match amount.get().checked_mul(self.0 as u128) {
            Some(v) => v,
            None => return Err(SwapError::Overflow("basis points apply overflow")),
        };
        match Amount::new(product).checked_div(&Amount::new(MAX_BPS as u128), rounding) {
            Some(v) => Ok(v),
            None => Err(SwapError::DivisionByZero),
        }
    }

    /// Renders the value as a CosmWasm `Decimal` string: `10000` → `"1"`,
    /// `50` → `"0.005"`, `12345` → `"1.2345"`.
    #[must_use]
    pub fn to_decimal_string(&self) -> String {
        let whole = self.0 / MAX_BPS;
        let frac = self.0 % MAX_BPS;
        if frac == 0 {
            return whole.to_string();
        }
        let digits = format!("{frac:0width$}", width = BPS_DIGITS);
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }

    /// Parses a CosmWasm `Decimal` string into basis points.
    ///
    /// Digits past the fourth fractional place must be zero.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidConfiguration`] if the string is not a plain
    ///   decimal or is finer than one basis point.
    /// - [`SwapError::Overflow`] if the value does not fit in a `u32`.
    pub fn from_decimal_str(s: &str) -> crate::error::Result<Self> {
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        let is_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(frac) {
            return Err(SwapError::InvalidConfiguration("malformed decimal"));
        }
        if s.contains('.') && frac.is_empty() {
            return Err(SwapError::InvalidConfiguration("malformed decimal"));
        }
        let (kept, rest) = frac.split_at(frac.len().min(BPS_DIGITS));
        if rest.bytes().any(|b| b != b'0') {
            return Err(SwapError::InvalidConfiguration(
                "decimal is finer than one basis point",
            ));
        }

        let whole: u32 = whole
            .parse()
            .map_err(|_| SwapError::Overflow("decimal whole part exceeds u32"))?;
        let mut frac_bps: u32 = 0;
        for (i, b) in kept.bytes().enumerate() {
            let place = 10u32.pow((BPS_DIGITS - 1 - i) as u32);
            frac_bps += u32::from(b - b'0') * place;
        }
        whole
            .checked_mul(MAX_BPS)
            .and_then(|v| v.checked_add(frac_bps))
            .map(Self)
            .ok_or(SwapError::Overflow("decimal exceeds u32 basis points"))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

/// `serde_with` adapter that encodes [`BasisPoints`] as a CosmWasm `Decimal`
/// string.
///
/// ```
/// use serde::Serialize;
/// use serde_with::serde_as;
/// use swap_market::domain::{BasisPoints, DecimalBps};
///
/// #[serde_as]
/// #[derive(Serialize)]
/// struct Msg {
///     #[serde_as(as = "Option<DecimalBps>")]
///     slippage_tolerance: Option<BasisPoints>,
/// }
///
/// let json = serde_json::to_string(&Msg { slippage_tolerance: Some(BasisPoints::new(100)) })
///     .expect("serializable");
/// assert_eq!(json, r#"{"slippage_tolerance":"0.01"}"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecimalBps;

impl SerializeAs<BasisPoints> for DecimalBps {
    fn serialize_as<S: Serializer>(source: &BasisPoints, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&source.to_decimal_string())
    }
}

impl<'de> DeserializeAs<'de, BasisPoints> for DecimalBps {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<BasisPoints, D::Error> {
        let s = String::deserialize(deserializer)?;
        BasisPoints::from_decimal_str(&s).map_err(serde::de::Error::custom)
    }
}
