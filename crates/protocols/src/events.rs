//! Withdrawal-queue event scanning.
//!
//! Queue requests are contract state the client never mutates; this
//! module reconstructs them read-only from the `WithdrawalRequested` /
//! `WithdrawalProcessed` event pair for the recent-activity view.

use crate::abi::{CovusVault, WithdrawalProcessedFilter, WithdrawalRequestedFilter};
use crate::error::VaultError;
use covus_domain::vault::WithdrawalRequest;
use ethers::providers::Middleware;
use ethers::types::Address;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Scans vault logs for withdrawal-queue activity.
pub struct QueueEventScanner<M> {
    vault: CovusVault<M>,
}

impl<M: Middleware + 'static> QueueEventScanner<M> {
    pub fn new(vault_address: Address, client: Arc<M>) -> Self {
        Self {
            vault: CovusVault::new(vault_address, client),
        }
    }

    /// Returns queue requests created since `from_block`, oldest first,
    /// with `fulfilled` derived from processing events over the same
    /// range.
    pub async fn requests_since(
        &self,
        from_block: u64,
    ) -> Result<Vec<WithdrawalRequest>, VaultError> {
        let requested: Vec<WithdrawalRequestedFilter> = self
            .vault
            .event::<WithdrawalRequestedFilter>()
            .from_block(from_block)
            .query()
            .await
            .map_err(VaultError::from_provider)?;

        let processed: Vec<WithdrawalProcessedFilter> = self
            .vault
            .event::<WithdrawalProcessedFilter>()
            .from_block(from_block)
            .query()
            .await
            .map_err(VaultError::from_provider)?;

        let fulfilled_ids: HashSet<u64> =
            processed.iter().map(|e| e.id.low_u64()).collect();

        debug!(
            requested = requested.len(),
            processed = processed.len(),
            from_block,
            "scanned withdrawal queue events"
        );

        Ok(requested
            .into_iter()
            .map(|e| {
                let id = e.id.low_u64();
                WithdrawalRequest {
                    id,
                    owner: format!("{:?}", e.owner),
                    shares: e.shares,
                    assets_owed: e.assets,
                    fulfilled: fulfilled_ids.contains(&id),
                }
            })
            .collect())
    }
}
