//! Unified error types for the swap-market library.
//!
//! All fallible operations across the crate return [`SwapError`] as their
//! error type. Route resolution is the one exception: an unreachable asset
//! is reported as `None` (or `NaN` for rates) and callers turn it into
//! [`SwapError::UnsatisfiableRoute`] through
//! [`Market::require_route`](crate::market::Market::require_route).

use thiserror::Error;

/// Errors produced by the swap-market library.
///
/// Arithmetic variants carry a `&'static str` describing the operation that
/// failed so that overflow in share minting can be told apart from overflow
/// in fee application without allocating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    /// A denom string is malformed or does not belong to the expected set.
    #[error("invalid denom `{denom}`, expected one of [{}]", .expected.join(", "))]
    InvalidDenom {
        /// The offending denom as received.
        denom: String,
        /// The denoms that would have been accepted (may be empty).
        expected: Vec<String>,
    },

    /// An account or contract address is malformed.
    #[error("invalid address `{0}`")]
    InvalidAddress(String),

    /// No pair is registered for the requested assets.
    #[error("no pair registered for {0} / {1}")]
    PairNotFound(String, String),

    /// The two assets are not connected by any chain of pairs.
    #[error("no route from {from} to {to}")]
    UnsatisfiableRoute {
        /// Offered asset.
        from: String,
        /// Requested asset.
        to: String,
    },

    /// A trade was requested from an asset into itself.
    #[error("cannot swap {0} into itself")]
    SameAsset(String),

    /// The submission layer reported a failed transaction.
    #[error("transaction failed with code {code}: {raw_log}")]
    ExecutionFailed {
        /// Non-zero ABCI result code.
        code: u32,
        /// Transaction hash, when the transaction made it into a block.
        tx_hash: Option<String>,
        /// Raw log returned by the node.
        raw_log: String,
    },

    /// A query against an external contract was rejected.
    #[error("query to {contract} failed: {reason}")]
    Query {
        /// Contract address the query was sent to.
        contract: String,
        /// Reason reported by the gateway.
        reason: String,
    },

    /// A wire message could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An arithmetic operation overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// An arithmetic operation went below zero.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero was attempted.
    #[error("division by zero")]
    DivisionByZero,

    /// A pool reserve is zero where a non-zero value is required.
    #[error("zero reserve")]
    ZeroReserve,

    /// Fee configuration is out of range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// An amount is not acceptable for the requested operation.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// The chain reported a pair whose assets do not match the listing.
    #[error("pair {contract} reports denoms that do not match its listing")]
    PairMismatch {
        /// Pair contract address.
        contract: String,
    },
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = SwapError> = core::result::Result<T, E>;
