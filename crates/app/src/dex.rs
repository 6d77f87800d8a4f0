//! Swap previews and exchange operations.

use anyhow::Result;
use covus_domain::TokenAmount;
use covus_domain::math::constant_product::{self, CurvePoint};
use covus_domain::token::NATIVE_DECIMALS;
use covus_protocols::error::VaultError;
use covus_protocols::{DexReader, DexWriter, VaultWriter};
use ethers::types::{Address, TxHash, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Swap direction on the STT/csSTT pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapDirection {
    SttToCsStt,
    CsSttToStt,
}

/// Exchange reserves at preview time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DexReserves {
    /// Native STT held by the exchange.
    pub stt: U256,
    /// csSTT held by the exchange.
    pub cs_stt: U256,
}

impl DexReserves {
    /// Orients the reserves for a given direction: (in, out).
    pub fn oriented(&self, direction: SwapDirection) -> (U256, U256) {
        match direction {
            SwapDirection::SttToCsStt => (self.stt, self.cs_stt),
            SwapDirection::CsSttToStt => (self.cs_stt, self.stt),
        }
    }
}

/// An illustrative swap preview. The exchange contract recomputes the
/// trade (fee included) at execution time; transactions ordering ahead
/// of the swap move the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapPreview {
    pub direction: SwapDirection,
    pub amount_in: U256,
    pub amount_out: U256,
    /// Marginal price before the trade (out per in).
    pub spot_price: Decimal,
    /// Average price realized by the trade (out per in).
    pub execution_price: Decimal,
    /// How far the execution price falls below spot, percent.
    pub price_impact_pct: Decimal,
    /// Sampled invariant curve for the preview chart.
    pub curve: Vec<CurvePoint>,
}

impl SwapPreview {
    /// Number of curve samples behind the preview chart.
    pub const CURVE_SAMPLES: usize = 64;

    /// Pure preview computation from oriented reserves.
    pub fn compute(
        direction: SwapDirection,
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> Result<Self> {
        let amount_out = constant_product::quote_out_amount(
            TokenAmount(amount_in),
            TokenAmount(reserve_in),
            TokenAmount(reserve_out),
        )?
        .0;

        let spot_price =
            constant_product::spot_price(TokenAmount(reserve_in), TokenAmount(reserve_out))?;

        let execution_price = if amount_in.is_zero() {
            spot_price
        } else {
            let amount_in_d = Decimal::from_str(&amount_in.to_string())?;
            let amount_out_d = Decimal::from_str(&amount_out.to_string())?;
            amount_out_d / amount_in_d
        };

        let price_impact_pct = if spot_price.is_zero() {
            Decimal::ZERO
        } else {
            ((spot_price - execution_price) / spot_price * Decimal::ONE_HUNDRED).round_dp(4)
        };

        let curve = constant_product::curve_points(
            TokenAmount(reserve_in),
            TokenAmount(reserve_out),
            NATIVE_DECIMALS,
            Self::CURVE_SAMPLES,
        )?;

        Ok(Self {
            direction,
            amount_in,
            amount_out,
            spot_price,
            execution_price,
            price_impact_pct,
            curve,
        })
    }
}

/// Exchange operations for the trading page.
pub struct DexService {
    reader: Arc<dyn DexReader>,
    writer: Arc<dyn DexWriter>,
    vault_writer: Arc<dyn VaultWriter>,
    /// Spender target for csSTT approvals.
    dex_address: Address,
}

impl DexService {
    pub fn new(
        reader: Arc<dyn DexReader>,
        writer: Arc<dyn DexWriter>,
        vault_writer: Arc<dyn VaultWriter>,
        dex_address: Address,
    ) -> Self {
        Self {
            reader,
            writer,
            vault_writer,
            dex_address,
        }
    }

    pub async fn reserves(&self) -> Result<DexReserves> {
        let (stt, cs_stt) =
            tokio::try_join!(self.reader.native_reserve(), self.reader.token_reserve())?;
        Ok(DexReserves { stt, cs_stt })
    }

    /// Previews a swap against the current reserves.
    pub async fn preview(&self, direction: SwapDirection, amount_in: U256) -> Result<SwapPreview> {
        let reserves = self.reserves().await?;
        let (reserve_in, reserve_out) = reserves.oriented(direction);
        SwapPreview::compute(direction, amount_in, reserve_in, reserve_out)
    }

    /// Executes a swap. The csSTT→STT direction is the product's
    /// two-step flow: approve the exchange, then swap. Both hashes are
    /// returned in submission order.
    pub async fn swap(&self, direction: SwapDirection, amount_in: U256) -> Result<Vec<TxHash>> {
        if amount_in.is_zero() {
            return Err(VaultError::ZeroAmount.into());
        }

        let hashes = match direction {
            SwapDirection::SttToCsStt => {
                vec![self.writer.stt_to_token(amount_in).await?]
            }
            SwapDirection::CsSttToStt => {
                let approval = self
                    .vault_writer
                    .approve(self.dex_address, amount_in)
                    .await?;
                let swap = self.writer.token_to_stt(amount_in).await?;
                vec![approval, swap]
            }
        };

        info!(?direction, %amount_in, txs = hashes.len(), "swap submitted");
        Ok(hashes)
    }

    /// Adds `value` native STT of exchange liquidity.
    pub async fn add_liquidity(&self, value: U256) -> Result<TxHash> {
        if value.is_zero() {
            return Err(VaultError::ZeroAmount.into());
        }
        let hash = self.writer.deposit(value).await?;
        info!(%hash, %value, "liquidity deposit submitted");
        Ok(hash)
    }

    /// Removes `amount` of exchange liquidity.
    pub async fn remove_liquidity(&self, amount: U256) -> Result<TxHash> {
        if amount.is_zero() {
            return Err(VaultError::ZeroAmount.into());
        }
        let hash = self.writer.withdraw(amount).await?;
        info!(%hash, %amount, "liquidity withdrawal submitted");
        Ok(hash)
    }

    pub async fn liquidity_of(&self, owner: Address) -> Result<U256> {
        Ok(self.reader.liquidity_of(owner).await?)
    }

    pub async fn total_liquidity(&self) -> Result<U256> {
        Ok(self.reader.total_liquidity().await?)
    }
}
