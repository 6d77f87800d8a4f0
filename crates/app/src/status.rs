//! Protocol status aggregate for the landing/analytics surface.

use anyhow::Result;
use covus_domain::math::exchange_rate;
use covus_domain::token::Token;
use covus_domain::value_objects::amount::Amount;
use covus_protocols::VaultReader;
use covus_protocols::snapshot::{ObservedSnapshot, fetch_snapshot};
use ethers::types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Protocol-wide status: the numbers on the landing and analytics pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolStatus {
    /// The staked asset.
    pub asset: Token,
    /// The liquid receipt token.
    pub share_token: Token,
    pub observed: ObservedSnapshot,
    /// Total value locked in display units (liquid plus queued backing).
    pub tvl: Decimal,
    /// Advisory assets-per-share rate.
    pub assets_per_share: Decimal,
    /// Advisory shares-per-asset rate.
    pub shares_per_asset: Decimal,
    /// The contract's own reported csSTT/STT rate, raw fixed point.
    pub reported_rate: U256,
    /// The contract's rate sanity flag.
    pub rate_healthy: bool,
    pub paused: bool,
    /// Contract-maximum slippage tolerance in bps.
    pub max_slippage_bps: u64,
}

impl ProtocolStatus {
    /// Whether writes would currently be accepted.
    pub fn accepting_transactions(&self) -> bool {
        !self.paused && self.rate_healthy
    }
}

/// Read-only status aggregation.
pub struct StatusService {
    reader: Arc<dyn VaultReader>,
    asset: Token,
    share_token: Token,
}

impl StatusService {
    pub fn new(reader: Arc<dyn VaultReader>, vault_address: impl Into<String>) -> Self {
        Self {
            reader,
            asset: Token::stt(),
            share_token: Token::cs_stt(vault_address),
        }
    }

    pub async fn fetch(&self) -> Result<ProtocolStatus> {
        let observed = fetch_snapshot(self.reader.as_ref()).await?;
        let (reported_rate, rate_healthy, paused, max_slippage) = tokio::try_join!(
            self.reader.cs_stt_rate(),
            self.reader.is_exchange_rate_healthy(),
            self.reader.paused(),
            self.reader.max_slippage_bps(),
        )?;

        let snap = observed.snapshot;
        let status = ProtocolStatus {
            asset: self.asset.clone(),
            share_token: self.share_token.clone(),
            observed,
            tvl: Amount::native(snap.actual_total_assets()).to_decimal()?,
            assets_per_share: exchange_rate::assets_per_share(
                snap.total_assets,
                snap.total_supply,
                snap.queued_assets,
            )?,
            shares_per_asset: exchange_rate::shares_per_asset(
                snap.total_assets,
                snap.total_supply,
                snap.queued_assets,
            )?,
            reported_rate,
            rate_healthy,
            paused,
            max_slippage_bps: max_slippage.low_u64(),
        };

        debug!(
            tvl = %status.tvl,
            rate = %status.assets_per_share,
            healthy = status.rate_healthy,
            paused = status.paused,
            "protocol status assembled"
        );
        Ok(status)
    }
}
