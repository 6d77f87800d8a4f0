//! Typed vault client.

use crate::abi::CovusVault;
use crate::error::VaultError;
use crate::{VaultReader, VaultWriter};
use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::types::{Address, TxHash, U256};
use std::sync::Arc;
use tracing::debug;

/// Client over a deployed `CovusVault`.
///
/// Reads work with any middleware; writes need one that can sign.
#[derive(Clone)]
pub struct VaultClient<M> {
    contract: CovusVault<M>,
}

impl<M: Middleware + 'static> VaultClient<M> {
    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self {
            contract: CovusVault::new(address, client),
        }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub fn contract(&self) -> &CovusVault<M> {
        &self.contract
    }
}

#[async_trait]
impl<M: Middleware + 'static> VaultReader for VaultClient<M> {
    async fn total_assets(&self) -> Result<U256, VaultError> {
        self.contract
            .total_assets()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn total_supply(&self) -> Result<U256, VaultError> {
        self.contract
            .total_supply()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn queued_assets(&self) -> Result<U256, VaultError> {
        self.contract
            .queued_assets()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn free_liquidity(&self) -> Result<U256, VaultError> {
        self.contract
            .free_liquidity()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn balance_of(&self, owner: Address) -> Result<U256, VaultError> {
        self.contract
            .balance_of(owner)
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn convert_to_assets(&self, shares: U256) -> Result<U256, VaultError> {
        self.contract
            .convert_to_assets(shares)
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn pending_requests(&self) -> Result<U256, VaultError> {
        self.contract
            .pending_requests()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn head(&self) -> Result<U256, VaultError> {
        self.contract
            .head()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn tail(&self) -> Result<U256, VaultError> {
        self.contract
            .tail()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn cs_stt_rate(&self) -> Result<U256, VaultError> {
        self.contract
            .get_cs_sttstt_rate()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn is_exchange_rate_healthy(&self) -> Result<bool, VaultError> {
        self.contract
            .is_exchange_rate_healthy()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn paused(&self) -> Result<bool, VaultError> {
        self.contract
            .paused()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn max_slippage_bps(&self) -> Result<U256, VaultError> {
        self.contract
            .max_slippage_bps()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }
}

#[async_trait]
impl<M: Middleware + 'static> VaultWriter for VaultClient<M> {
    async fn deposit_stt(&self, receiver: Address, value: U256) -> Result<TxHash, VaultError> {
        let call = self.contract.deposit_stt(receiver).value(value);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %value, "depositSTT submitted");
        Ok(hash)
    }

    async fn redeem(
        &self,
        shares: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<TxHash, VaultError> {
        let call = self.contract.redeem(shares, receiver, owner);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %shares, "redeem submitted");
        Ok(hash)
    }

    async fn redeem_stt(
        &self,
        shares: U256,
        min_assets: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<TxHash, VaultError> {
        let call = self.contract.redeem_stt(shares, min_assets, receiver, owner);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %shares, %min_assets, "redeemSTT submitted");
        Ok(hash)
    }

    async fn withdraw(
        &self,
        assets: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<TxHash, VaultError> {
        let call = self.contract.withdraw(assets, receiver, owner);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %assets, "withdraw submitted");
        Ok(hash)
    }

    async fn withdraw_stt(
        &self,
        assets: U256,
        max_shares: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<TxHash, VaultError> {
        let call = self.contract.withdraw_stt(assets, max_shares, receiver, owner);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %assets, %max_shares, "withdrawSTT submitted");
        Ok(hash)
    }

    async fn request_withdrawal(
        &self,
        shares: U256,
        as_native: bool,
    ) -> Result<TxHash, VaultError> {
        let call = self.contract.request_withdrawal(shares, as_native);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %shares, as_native, "requestWithdrawal submitted");
        Ok(hash)
    }

    async fn process_queue(&self, max_count: U256) -> Result<TxHash, VaultError> {
        let call = self.contract.process_queue(max_count);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %max_count, "processQueue submitted");
        Ok(hash)
    }

    async fn approve(&self, spender: Address, amount: U256) -> Result<TxHash, VaultError> {
        let call = self.contract.approve(spender, amount);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %spender, %amount, "approve submitted");
        Ok(hash)
    }
}
