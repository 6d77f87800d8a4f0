//! Portfolio view, deposits and routed withdrawals.

use anyhow::Result;
use covus_domain::math::{exchange_rate, withdrawal};
use covus_domain::value_objects::percentage::BasisPoints;
use covus_domain::{format, math::withdrawal::WithdrawalRoute};
use covus_protocols::error::VaultError;
use covus_protocols::snapshot::fetch_snapshot;
use covus_protocols::{VaultReader, VaultWriter};
use ethers::types::{Address, TxHash, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for withdrawal routing.
#[derive(Debug, Clone, Copy)]
pub struct RouterConfig {
    /// Client-side slippage tolerance for instant redemptions. Clamped
    /// to the contract's `maxSlippageBps` when that read succeeds.
    pub slippage: BasisPoints,
    /// Whether queued withdrawals pay out as native STT.
    pub as_native: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            slippage: withdrawal::DEFAULT_SLIPPAGE,
            as_native: true,
        }
    }
}

/// A user's position in the vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioView {
    /// csSTT balance.
    pub shares: U256,
    /// Current STT value of those shares, per the contract's own
    /// conversion (authoritative).
    pub staked_assets: U256,
    /// Share of the total supply, percent.
    pub share_of_supply_pct: Decimal,
    /// Advisory assets-per-share rate.
    pub assets_per_share: Decimal,
    /// Advisory shares-per-asset rate.
    pub shares_per_asset: Decimal,
}

/// Result of a routed withdrawal submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WithdrawalOutcome {
    pub route: WithdrawalRoute,
    pub tx_hash: TxHash,
}

/// Deposit/withdraw orchestration over the vault.
pub struct StakingService {
    reader: Arc<dyn VaultReader>,
    writer: Arc<dyn VaultWriter>,
    config: RouterConfig,
}

impl StakingService {
    pub fn new(
        reader: Arc<dyn VaultReader>,
        writer: Arc<dyn VaultWriter>,
        config: RouterConfig,
    ) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// Builds the portfolio panel for `owner`.
    pub async fn portfolio(&self, owner: Address) -> Result<PortfolioView> {
        let shares = self.reader.balance_of(owner).await?;
        let staked_assets = self.reader.convert_to_assets(shares).await?;
        let observed = fetch_snapshot(self.reader.as_ref()).await?;
        let snap = observed.snapshot;

        Ok(PortfolioView {
            shares,
            staked_assets,
            share_of_supply_pct: format::share_percentage(shares, snap.total_supply),
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
        })
    }

    /// Deposits `amount` native STT, minting shares to `receiver`.
    pub async fn deposit(&self, amount: U256, receiver: Address) -> Result<TxHash> {
        if amount.is_zero() {
            // mirror of the contract's ZERO_STT revert
            return Err(VaultError::ZeroAmount.into());
        }
        self.ensure_not_paused().await?;

        let hash = self.writer.deposit_stt(receiver, amount).await?;
        info!(%hash, %amount, "deposit submitted");
        Ok(hash)
    }

    /// Withdraws `amount` STT for `owner`, instantly when free liquidity
    /// covers the request and through the queue otherwise.
    ///
    /// The instant path is pre-checked against the contract's expected
    /// payout; the service refuses to submit a redemption its own
    /// slippage guard would revert. The pre-check is best-effort; the
    /// contract re-runs it authoritatively.
    pub async fn withdraw(&self, amount: U256, owner: Address) -> Result<WithdrawalOutcome> {
        if amount.is_zero() {
            return Err(VaultError::ZeroAmount.into());
        }
        self.ensure_not_paused().await?;

        let observed = fetch_snapshot(self.reader.as_ref()).await?;
        let tolerance = self.effective_slippage().await;
        let route = withdrawal::plan_withdrawal(amount, &observed.snapshot, tolerance)?;

        let tx_hash = match route {
            WithdrawalRoute::Instant {
                shares_to_burn,
                min_assets,
            } => {
                let expected = self.reader.convert_to_assets(shares_to_burn).await?;
                if expected < min_assets {
                    warn!(
                        %expected,
                        %min_assets,
                        "refusing instant redemption: payout below slippage bound"
                    );
                    return Err(VaultError::SlippageExceeded.into());
                }
                self.writer
                    .redeem_stt(shares_to_burn, min_assets, owner, owner)
                    .await?
            }
            WithdrawalRoute::Queued { shares_to_burn } => {
                self.writer
                    .request_withdrawal(shares_to_burn, self.config.as_native)
                    .await?
            }
        };

        info!(
            %tx_hash,
            instant = route.is_instant(),
            shares = %route.shares_to_burn(),
            "withdrawal submitted"
        );
        Ok(WithdrawalOutcome { route, tx_hash })
    }

    /// The configured tolerance, clamped to the contract's maximum when
    /// that read succeeds.
    async fn effective_slippage(&self) -> BasisPoints {
        match self.reader.max_slippage_bps().await {
            Ok(max) => {
                let max = BasisPoints::new(max.low_u64() as u32);
                let clamped = self.config.slippage.clamp_to(max);
                if clamped != self.config.slippage {
                    debug!(
                        configured = self.config.slippage.as_u32(),
                        contract_max = max.as_u32(),
                        "slippage tolerance clamped to contract maximum"
                    );
                }
                clamped
            }
            Err(err) => {
                debug!(%err, "maxSlippageBps read failed, using configured tolerance");
                self.config.slippage
            }
        }
    }

    async fn ensure_not_paused(&self) -> Result<()> {
        if self.reader.paused().await? {
            warn!("vault is paused, refusing to submit");
            return Err(VaultError::Paused.into());
        }
        Ok(())
    }
}
