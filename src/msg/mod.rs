//! Wire messages exchanged with the pair, factory, router and CW20 contracts.
//!
//! Every type here serializes exactly as the contracts' `cw_serde` types do:
//! snake_case externally tagged enums, `Uint128` as decimal strings,
//! `Decimal` as decimal strings and `Binary` as base64.
//!
//! [`ExecuteInstruction`] is the unit handed to the external signing and
//! broadcast layer.

pub mod cw20;
pub mod factory;
pub mod pair;
pub mod router;

use core::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{Addr, Coin, Denom};
use crate::error::SwapError;

/// Opaque bytes, base64 encoded on the wire.
///
/// # Examples
///
/// ```
/// use swap_market::msg::Binary;
///
/// let bin = Binary::new(b"{}".to_vec());
/// assert_eq!(bin.to_base64(), "e30=");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Binary(Vec<u8>);

impl Binary {
    /// Wraps raw bytes.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Serializes `msg` as JSON bytes, the encoding contracts expect for
    /// hook messages.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Serialization`] if `msg` cannot be encoded.
    pub fn from_json<T: Serialize>(msg: &T) -> crate::error::Result<Self> {
        Ok(Self(serde_json::to_vec(msg)?))
    }

    /// Decodes the bytes as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Serialization`] if the bytes are not valid JSON
    /// for `T`.
    pub fn to_json<T: for<'de> Deserialize<'de>>(&self) -> crate::error::Result<T> {
        Ok(serde_json::from_slice(&self.0)?)
    }

    /// Standard base64 of the bytes.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// The raw bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binary({})", self.to_base64())
    }
}

impl Serialize for Binary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Binary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

/// One contract execution, ready to be signed and broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteInstruction {
    /// Contract receiving the message.
    pub contract_address: Addr,
    /// JSON execute message.
    pub msg: serde_json::Value,
    /// Native funds attached to the call, sorted by denom.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funds: Vec<Coin>,
}

impl ExecuteInstruction {
    /// Builds an instruction from a typed message.
    ///
    /// Zero-amount coins are dropped and the rest sorted by denom, which is
    /// what the bank module requires of attached funds.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Serialization`] if `msg` cannot be encoded.
    /// - [`SwapError::InvalidDenom`] if a CW20 coin is passed as funds.
    pub fn new<M: Serialize>(
        contract_address: Addr,
        msg: &M,
        funds: Vec<Coin>,
    ) -> crate::error::Result<Self> {
        if let Some(bad) = funds.iter().find(|c| !c.denom.is_native()) {
            return Err(SwapError::InvalidDenom {
                denom: bad.denom.to_string(),
                expected: Vec::new(),
            });
        }
        let mut funds: Vec<Coin> = funds.into_iter().filter(|c| !c.amount.is_zero()).collect();
        funds.sort_by(|a, b| a.denom.to_string().cmp(&b.denom.to_string()));
        Ok(Self {
            contract_address,
            msg: serde_json::to_value(msg)?,
            funds,
        })
    }

    /// Decodes the message back into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Serialization`] if the message does not match `T`.
    pub fn decode_msg<T: for<'de> Deserialize<'de>>(&self) -> crate::error::Result<T> {
        Ok(serde_json::from_value(self.msg.clone())?)
    }
}

/// Builds the instruction that hands `offer` to `contract` along with `msg`.
///
/// Native offers are attached as funds. CW20 offers are routed through the
/// token's `send`, carrying `msg` as the hook payload.
///
/// # Errors
///
/// Returns [`SwapError::Serialization`] if `msg` cannot be encoded.
pub fn offer_to_contract<M: Serialize>(
    contract: &Addr,
    msg: &M,
    offer: &Coin,
) -> crate::error::Result<ExecuteInstruction> {
    match &offer.denom {
        Denom::Native(_) => ExecuteInstruction::new(contract.clone(), msg, vec![offer.clone()]),
        Denom::Cw20(token) => ExecuteInstruction::new(
            token.clone(),
            &cw20::Cw20ExecuteMsg::Send {
                contract: contract.clone(),
                amount: offer.amount,
                msg: Binary::from_json(msg)?,
            },
            Vec::new(),
        ),
    }
}
