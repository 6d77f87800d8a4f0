//! Vault snapshot fetching.

use crate::VaultReader;
use crate::error::VaultError;
use chrono::{DateTime, Utc};
use covus_domain::vault::{QueueState, VaultSnapshot};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A vault snapshot plus the wall-clock time it was assembled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObservedSnapshot {
    pub snapshot: VaultSnapshot,
    pub fetched_at: DateTime<Utc>,
}

/// Fetches the four accounting scalars concurrently.
///
/// The reads are independent RPC calls, not a batch: under concurrent
/// on-chain activity they may land on different block heights. That
/// staleness window is accepted; the snapshot is a display input, and
/// every submitted amount is re-derived by the contract anyway. A
/// snapshot that fails its own accounting identity is logged and
/// returned as-is.
pub async fn fetch_snapshot(reader: &dyn VaultReader) -> Result<ObservedSnapshot, VaultError> {
    let (total_assets, total_supply, queued_assets, free_liquidity) = tokio::try_join!(
        reader.total_assets(),
        reader.total_supply(),
        reader.queued_assets(),
        reader.free_liquidity(),
    )?;

    let snapshot = VaultSnapshot::new(total_assets, total_supply, queued_assets, free_liquidity);
    if !snapshot.is_consistent() {
        warn!(
            %total_assets,
            %queued_assets,
            %free_liquidity,
            "vault snapshot straddles block heights"
        );
    }

    Ok(ObservedSnapshot {
        snapshot,
        fetched_at: Utc::now(),
    })
}

/// Fetches the withdrawal-queue counters concurrently. Same staleness
/// caveat as [`fetch_snapshot`].
pub async fn fetch_queue_state(reader: &dyn VaultReader) -> Result<QueueState, VaultError> {
    let (pending_requests, queued_assets, free_liquidity, head, tail) = tokio::try_join!(
        reader.pending_requests(),
        reader.queued_assets(),
        reader.free_liquidity(),
        reader.head(),
        reader.tail(),
    )?;

    Ok(QueueState {
        pending_requests,
        queued_assets,
        free_liquidity,
        head,
        tail,
    })
}
