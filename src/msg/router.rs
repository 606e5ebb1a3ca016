//! Swap router contract messages.

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::domain::{Addr, Amount, BasisPoints, Coin, DecimalBps, Denom};

/// Final-result guard for a multi-hop swap.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapExpectation {
    /// Amount the caller expects after all hops and fees.
    pub expected_amount: Amount,
    /// Tolerated deviation from `expected_amount`.
    #[serde_as(as = "DecimalBps")]
    pub slippage_tolerance: BasisPoints,
}

/// Execute messages accepted by the router.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterExecuteMsg {
    /// Swap the attached coin through every pair in `swappers`, in order.
    ExecuteSwaps {
        /// Pair contracts, one per hop.
        swappers: Vec<Addr>,
        /// Tolerance applied to each individual hop.
        #[serde_as(as = "Option<DecimalBps>")]
        intermediate_slippage_tolerance: Option<BasisPoints>,
        /// Optional guard on the final result.
        expectation: Option<SwapExpectation>,
        /// Unwrapper contract for wrapped result denoms.
        unwrapper: Option<Addr>,
        /// Recipient of the result, defaults to the sender.
        receiver: Option<Addr>,
    },
}

/// Queries answered by the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterQueryMsg {
    /// Chains `simulate_swap` through every pair. Returns
    /// [`SimulateSwapsResponse`].
    SimulateSwaps {
        /// Coin offered to the first pair.
        offer: Coin,
        /// Pair contracts, one per hop.
        swappers: Vec<Addr>,
    },
}

/// Response to [`RouterQueryMsg::SimulateSwaps`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateSwapsResponse {
    /// Denom received at the end of the route.
    pub result_denom: Denom,
    /// Amount received after all fees.
    pub result_amount: Amount,
    /// Difference between the last hop's naive and actual result.
    pub slip_amount: Amount,
}
