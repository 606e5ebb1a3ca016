//! Outcome of a submitted transaction.

use serde::{Deserialize, Serialize};

use crate::error::SwapError;

/// What the submission layer reports back for a broadcast transaction.
///
/// Signing and broadcasting are out of this crate's hands; callers feed the
/// receipt back through [`into_result`](Self::into_result) to get a
/// [`SwapError::ExecutionFailed`] for failed transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// ABCI result code, `0` on success.
    pub code: u32,
    /// Transaction hash, if the transaction was included.
    #[serde(default)]
    pub tx_hash: Option<String>,
    /// Raw log text.
    #[serde(default)]
    pub raw_log: String,
    /// Gas used, when reported.
    #[serde(default)]
    pub gas_used: u64,
}

impl TxReceipt {
    /// Returns `true` if the chain accepted the transaction.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Passes successful receipts through and turns failures into errors.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::ExecutionFailed`] when `code != 0`.
    pub fn into_result(self) -> crate::error::Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(SwapError::ExecutionFailed {
            code: self.code,
            tx_hash: self.tx_hash,
            raw_log: self.raw_log,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn success_passes_through() {
        let receipt = TxReceipt {
            code: 0,
            tx_hash: Some("AB12".to_owned()),
            raw_log: String::new(),
            gas_used: 120_000,
        };
        assert_eq!(receipt.clone().into_result(), Ok(receipt));
    }

    #[test]
    fn failure_carries_details() {
        let receipt = TxReceipt {
            code: 5,
            tx_hash: None,
            raw_log: "slippage too high".to_owned(),
            gas_used: 0,
        };
        let Err(SwapError::ExecutionFailed {
            code,
            tx_hash,
            raw_log,
        }) = receipt.into_result()
        else {
            panic!("expected execution failure");
        };
        assert_eq!(code, 5);
        assert_eq!(tx_hash, None);
        assert_eq!(raw_log, "slippage too high");
    }

    #[test]
    fn deserializes_minimal_receipt() {
        let Ok(receipt) = serde_json::from_str::<TxReceipt>(r#"{"code":0}"#) else {
            panic!("deserializable");
        };
        assert!(receipt.is_success());
    }
}
