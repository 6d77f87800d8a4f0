use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Point-in-time view of the vault's accounting scalars.
///
/// The four fields come from four separate reads against the node and
/// may therefore reflect different block heights; `is_consistent` tells
/// a caller whether this particular snapshot happened to line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSnapshot {
    /// Liquid assets held by the vault (excludes queued payouts).
    pub total_assets: U256,
    /// Outstanding csSTT share supply.
    pub total_supply: U256,
    /// Assets earmarked for queued withdrawal payouts.
    pub queued_assets: U256,
    /// Assets available for instant redemption.
    pub free_liquidity: U256,
}

impl VaultSnapshot {
    #[must_use]
    pub fn new(
        total_assets: U256,
        total_supply: U256,
        queued_assets: U256,
        free_liquidity: U256,
    ) -> Self {
        Self {
            total_assets,
            total_supply,
            queued_assets,
            free_liquidity,
        }
    }

    /// True backing of the share supply: liquid assets plus assets
    /// already earmarked for queue payout.
    pub fn actual_total_assets(&self) -> U256 {
        self.total_assets.saturating_add(self.queued_assets)
    }

    /// Checks the contract-enforced accounting identity
    /// `free_liquidity == total_assets - queued_assets`.
    ///
    /// A violation here is a display concern, not an error: it usually
    /// means the four reads straddled a block boundary.
    pub fn is_consistent(&self) -> bool {
        self.total_assets >= self.queued_assets
            && self.free_liquidity == self.total_assets - self.queued_assets
    }
}

/// Withdrawal-queue counters read from the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueState {
    /// Number of unfulfilled requests.
    pub pending_requests: U256,
    /// Assets owed to the queue in aggregate.
    pub queued_assets: U256,
    /// Assets available for instant redemption.
    pub free_liquidity: U256,
    /// Index of the next request to be processed.
    pub head: U256,
    /// Index one past the most recently created request.
    pub tail: U256,
}

impl QueueState {
    /// Depth of the queue as shown on the withdrawal page.
    pub fn queue_position(&self) -> U256 {
        self.tail.saturating_sub(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.pending_requests.is_zero()
    }
}

/// A queued withdrawal as recorded by the contract.
///
/// Read-only at this layer: the record is created when instant liquidity
/// is insufficient and fulfilled by the contract's queue processing. The
/// client only ever triggers processing and re-reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    /// Queue ordinal assigned by the contract.
    pub id: u64,
    /// Share owner that placed the request.
    pub owner: String,
    /// Shares burned when the request was placed.
    pub shares: U256,
    /// Assets owed at the exchange rate of request time.
    pub assets_owed: U256,
    /// Whether queue processing has paid this request out.
    pub fulfilled: bool,
}
