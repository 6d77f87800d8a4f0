//! Typed exchange client.
//!
//! The exchange holds native STT directly and csSTT as a vault-token
//! balance, so the two reserves come from different places: the node's
//! balance view for STT, the vault's `balanceOf` for csSTT.

use crate::abi::{CovusDex, CovusVault};
use crate::error::VaultError;
use crate::{DexReader, DexWriter};
use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::types::{Address, TxHash, U256};
use std::sync::Arc;
use tracing::debug;

/// Client over a deployed `CovusDex` and the vault token it trades.
#[derive(Clone)]
pub struct DexClient<M> {
    dex: CovusDex<M>,
    vault: CovusVault<M>,
    client: Arc<M>,
}

impl<M: Middleware + 'static> DexClient<M> {
    pub fn new(dex_address: Address, vault_address: Address, client: Arc<M>) -> Self {
        Self {
            dex: CovusDex::new(dex_address, client.clone()),
            vault: CovusVault::new(vault_address, client.clone()),
            client,
        }
    }

    pub fn address(&self) -> Address {
        self.dex.address()
    }

    /// The vault address, needed as the `approve` spender target.
    pub fn vault_address(&self) -> Address {
        self.vault.address()
    }
}

#[async_trait]
impl<M: Middleware + 'static> DexReader for DexClient<M> {
    async fn total_liquidity(&self) -> Result<U256, VaultError> {
        self.dex
            .total_liquidity()
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn liquidity_of(&self, owner: Address) -> Result<U256, VaultError> {
        self.dex
            .get_liquidity(owner)
            .call()
            .await
            .map_err(VaultError::from_provider)
    }

    async fn native_reserve(&self) -> Result<U256, VaultError> {
        self.client
            .get_balance(self.dex.address(), None)
            .await
            .map_err(VaultError::from_provider)
    }

    async fn token_reserve(&self) -> Result<U256, VaultError> {
        self.vault
            .balance_of(self.dex.address())
            .call()
            .await
            .map_err(VaultError::from_provider)
    }
}

#[async_trait]
impl<M: Middleware + 'static> DexWriter for DexClient<M> {
    async fn stt_to_token(&self, value: U256) -> Result<TxHash, VaultError> {
        let call = self.dex.stt_to_token().value(value);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %value, "sttToToken submitted");
        Ok(hash)
    }

    async fn token_to_stt(&self, tokens: U256) -> Result<TxHash, VaultError> {
        let call = self.dex.token_to_stt(tokens);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %tokens, "tokenToStt submitted");
        Ok(hash)
    }

    async fn deposit(&self, value: U256) -> Result<TxHash, VaultError> {
        let call = self.dex.deposit().value(value);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %value, "dex deposit submitted");
        Ok(hash)
    }

    async fn withdraw(&self, amount: U256) -> Result<TxHash, VaultError> {
        let call = self.dex.withdraw(amount);
        let pending = call
            .send()
            .await
            .map_err(VaultError::from_provider)?;
        let hash = pending.tx_hash();
        debug!(%hash, %amount, "dex withdraw submitted");
        Ok(hash)
    }
}
