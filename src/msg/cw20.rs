//! CW20 token messages used to move contract-backed tokens.

use serde::{Deserialize, Serialize};

use super::Binary;
use crate::domain::{Addr, Amount};

/// The subset of the CW20 execute interface this crate emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cw20ExecuteMsg {
    /// Transfers `amount` to `contract` and invokes its receive hook with
    /// `msg`.
    Send {
        /// Receiving contract.
        contract: Addr,
        /// Tokens to transfer.
        amount: Amount,
        /// Hook message, JSON encoded.
        msg: Binary,
    },
    /// Lets `spender` pull up to `amount` more tokens from the sender.
    IncreaseAllowance {
        /// Contract allowed to spend.
        spender: Addr,
        /// Additional allowance.
        amount: Amount,
    },
}
