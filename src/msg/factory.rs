//! Factory contract messages.

use serde::{Deserialize, Serialize};

use crate::domain::Addr;

/// Queries answered by the factory contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactoryQueryMsg {
    /// One page of listed pairs, ordered by pair key. Returns
    /// `Vec<PairListing>`.
    Pairs {
        /// Listing order pair to resume after.
        start_after: Option<[String; 2]>,
        /// Page size; the contract caps it.
        limit: Option<u32>,
    },
}

/// One pair as listed by the factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairListing {
    /// Both denoms, in listing order.
    pub pair: [String; 2],
    /// Pair contract.
    pub address: Addr,
}
