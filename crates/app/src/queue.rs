//! Withdrawal-queue status and processing.

use anyhow::Result;
use covus_domain::format;
use covus_domain::value_objects::amount::Amount;
use covus_domain::vault::{QueueState, WithdrawalRequest};
use covus_protocols::snapshot::fetch_queue_state;
use covus_protocols::{VaultReader, VaultWriter};
use ethers::types::TxHash;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Display model for the queue page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStatusView {
    pub state: QueueState,
    /// Queued assets in display units (STT).
    pub queued_assets: Decimal,
    /// Free liquidity in display units (STT).
    pub free_liquidity: Decimal,
    /// Depth of the queue (`tail - head`).
    pub queue_position: u64,
    /// One-line summary as shown on the withdrawal page.
    pub summary: String,
}

impl QueueStatusView {
    pub fn from_state(state: QueueState) -> Result<Self> {
        let queued_assets = Amount::native(state.queued_assets).to_decimal()?;
        let free_liquidity = Amount::native(state.free_liquidity).to_decimal()?;
        let summary = format::queue_summary(&state, queued_assets, free_liquidity);

        Ok(Self {
            queue_position: state.queue_position().low_u64(),
            state,
            queued_assets,
            free_liquidity,
            summary,
        })
    }
}

/// Queue monitoring and the processing trigger.
pub struct QueueService {
    reader: Arc<dyn VaultReader>,
    writer: Arc<dyn VaultWriter>,
}

impl QueueService {
    pub fn new(reader: Arc<dyn VaultReader>, writer: Arc<dyn VaultWriter>) -> Self {
        Self { reader, writer }
    }

    pub async fn status(&self) -> Result<QueueStatusView> {
        let state = fetch_queue_state(self.reader.as_ref()).await?;
        QueueStatusView::from_state(state)
    }

    /// Triggers processing of every currently pending request. Anyone may
    /// call; authorization, if any, is enforced on-chain. Returns `None`
    /// when the queue is empty.
    pub async fn process(&self) -> Result<Option<TxHash>> {
        let pending = self.reader.pending_requests().await?;
        if pending.is_zero() {
            info!("withdrawal queue is empty, nothing to process");
            return Ok(None);
        }

        let hash = self.writer.process_queue(pending).await?;
        info!(%hash, %pending, "processQueue submitted");
        Ok(Some(hash))
    }
}

/// Read-only recent-activity records, reconstructed from events by the
/// protocol layer and passed through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentActivity {
    pub requests: Vec<WithdrawalRequest>,
}

impl RecentActivity {
    #[must_use]
    pub fn new(requests: Vec<WithdrawalRequest>) -> Self {
        Self { requests }
    }

    pub fn pending(&self) -> impl Iterator<Item = &WithdrawalRequest> {
        self.requests.iter().filter(|r| !r.fulfilled)
    }

    pub fn fulfilled_count(&self) -> usize {
        self.requests.iter().filter(|r| r.fulfilled).count()
    }
}
