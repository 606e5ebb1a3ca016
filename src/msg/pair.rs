//! Pair (pool) contract messages.

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::Binary;
use crate::domain::{Addr, Amount, BasisPoints, Coin, DecimalBps, PairFees};

/// Queries answered by a pair contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairQueryMsg {
    /// Denoms in marketing (listing) order. Returns `[String; 2]`.
    PairDenoms,
    /// Denoms in lexicographical order. Returns `[String; 2]`.
    CanonicalPairDenoms,
    /// Fee and admin settings. Returns [`PairConfigResponse`].
    Config,
    /// Outstanding share supply. Returns [`Amount`].
    TotalShares,
    /// What `amount` shares are worth. Returns `[Coin; 2]`.
    ShareValue {
        /// Shares to value.
        amount: Amount,
    },
    /// Previews a deposit. Returns [`SimulateDepositResponse`].
    SimulateProvideLiquidity {
        /// Both sides of the deposit.
        offer: [Coin; 2],
    },
    /// Curve-accurate swap preview. Returns [`CalcSwapResult`].
    SimulateSwap {
        /// Coin offered to the pool.
        offer: Coin,
    },
    /// Swap preview assuming infinite liquidity. Returns [`CalcNaiveSwapResult`].
    SimulateNaiveSwap {
        /// Coin offered to the pool.
        offer: Coin,
    },
}

/// Execute messages accepted by a pair contract.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairExecuteMsg {
    /// Deposit both assets (attached as funds) for shares.
    ProvideLiquidity {
        /// Maximum tolerated imbalance versus the pool's ratio.
        #[serde_as(as = "Option<DecimalBps>")]
        slippage_tolerance: Option<BasisPoints>,
        /// Share recipient, defaults to the sender.
        receiver: Option<Addr>,
        /// Message forwarded to `receiver` if it is a contract.
        receiver_payload: Option<Binary>,
    },
    /// Burn the attached shares for their value.
    WithdrawLiquidity {
        /// Recipient of both assets, defaults to the sender.
        receiver: Option<Addr>,
        /// Message forwarded to `receiver` if it is a contract.
        receiver_payload: Option<Binary>,
    },
    /// Swap the attached coin for the other asset.
    Swap {
        /// Expected payout before fees, defaults to the naive estimate.
        expected_result: Option<Amount>,
        /// Tolerated deviation from `expected_result`.
        #[serde_as(as = "Option<DecimalBps>")]
        slippage_tolerance: Option<BasisPoints>,
        /// Payout recipient, defaults to the sender.
        receiver: Option<Addr>,
        /// Message forwarded to `receiver` if it is a contract.
        receiver_payload: Option<Binary>,
    },
}

/// Response to [`PairQueryMsg::Config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConfigResponse {
    /// Admin, usually the factory.
    pub admin: Addr,
    /// Recipient of maker fees.
    pub fee_receiver: Addr,
    /// Total fee in basis points.
    pub total_fee_bps: u16,
    /// Maker's part of the total fee in basis points.
    pub maker_fee_bps: u16,
    /// Whether the market maker endorsed this pair.
    pub endorsed: bool,
}

impl PairConfigResponse {
    /// The pair's fee split.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidFee`](crate::error::SwapError::InvalidFee)
    /// if the reported fees are inconsistent.
    pub fn fees(&self) -> crate::error::Result<PairFees> {
        PairFees::from_total(
            BasisPoints::new(u32::from(self.total_fee_bps)),
            BasisPoints::new(u32::from(self.maker_fee_bps)),
        )
    }
}

/// Response to [`PairQueryMsg::SimulateSwap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcSwapResult {
    /// Payout after fees.
    pub result_amount: Amount,
    /// Naive payout minus the curve payout, before fees.
    pub spread_amount: Amount,
    /// Maker plus pool fee.
    pub total_fee_amount: Amount,
    /// Maker's part of the fee.
    pub maker_fee_amount: Amount,
}

/// Response to [`PairQueryMsg::SimulateNaiveSwap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcNaiveSwapResult {
    /// Payout after fees at the current exchange rate.
    pub result_amount: Amount,
    /// Maker plus pool fee.
    pub total_fee_amount: Amount,
    /// Maker's part of the fee.
    pub maker_fee_amount: Amount,
}

/// Response to [`PairQueryMsg::SimulateProvideLiquidity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateDepositResponse {
    /// Shares that would be minted.
    pub share_amount: Amount,
    /// Their value right after the deposit.
    pub share_value: [Coin; 2],
}
