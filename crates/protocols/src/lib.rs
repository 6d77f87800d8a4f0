//! Typed clients over the deployed Covus contracts.
//!
//! This crate is the chain boundary:
//! - abigen bindings for the vault and the bundled exchange
//! - `VaultReader`/`VaultWriter` and `DexReader`/`DexWriter` seams so the
//!   service layer can run against test doubles
//! - concurrent vault snapshot fetching
//! - withdrawal-queue event scanning
//! - the protocol error taxonomy
//!
//! Writes are fire-and-forget: a call resolves as soon as the node
//! accepts the submission and returns the transaction hash. Nothing here
//! waits for confirmations or locks out a second conflicting submission.

/// Prelude module for convenient imports.
pub mod prelude;

/// Contract bindings.
pub mod abi;
/// Error taxonomy.
pub mod error;
/// Withdrawal-queue event scanning.
pub mod events;
/// RPC configuration and provider construction.
pub mod provider;
/// Vault snapshot fetching.
pub mod snapshot;
/// Vault client.
pub mod vault;
/// Exchange client.
pub mod dex;

use async_trait::async_trait;
use ethers::types::{Address, TxHash, U256};

use error::VaultError;

/// Read surface of the vault, one method per contract view function.
#[async_trait]
pub trait VaultReader: Send + Sync {
    async fn total_assets(&self) -> Result<U256, VaultError>;
    async fn total_supply(&self) -> Result<U256, VaultError>;
    async fn queued_assets(&self) -> Result<U256, VaultError>;
    async fn free_liquidity(&self) -> Result<U256, VaultError>;
    async fn balance_of(&self, owner: Address) -> Result<U256, VaultError>;
    async fn convert_to_assets(&self, shares: U256) -> Result<U256, VaultError>;
    async fn pending_requests(&self) -> Result<U256, VaultError>;
    async fn head(&self) -> Result<U256, VaultError>;
    async fn tail(&self) -> Result<U256, VaultError>;
    async fn cs_stt_rate(&self) -> Result<U256, VaultError>;
    async fn is_exchange_rate_healthy(&self) -> Result<bool, VaultError>;
    async fn paused(&self) -> Result<bool, VaultError>;
    async fn max_slippage_bps(&self) -> Result<U256, VaultError>;
}

/// Write surface of the vault. Every method returns the transaction hash
/// at submission time.
#[async_trait]
pub trait VaultWriter: Send + Sync {
    /// Payable deposit of `value` native STT, shares minted to `receiver`.
    async fn deposit_stt(&self, receiver: Address, value: U256) -> Result<TxHash, VaultError>;
    async fn redeem(
        &self,
        shares: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<TxHash, VaultError>;
    /// Slippage-guarded native redemption.
    async fn redeem_stt(
        &self,
        shares: U256,
        min_assets: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<TxHash, VaultError>;
    async fn withdraw(
        &self,
        assets: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<TxHash, VaultError>;
    /// Slippage-guarded asset-denominated withdrawal.
    async fn withdraw_stt(
        &self,
        assets: U256,
        max_shares: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<TxHash, VaultError>;
    /// Places a FIFO queue request burning `shares`.
    async fn request_withdrawal(&self, shares: U256, as_native: bool)
    -> Result<TxHash, VaultError>;
    /// Pays out up to `max_count` queued requests. Anyone may call.
    async fn process_queue(&self, max_count: U256) -> Result<TxHash, VaultError>;
    async fn approve(&self, spender: Address, amount: U256) -> Result<TxHash, VaultError>;
}

/// Read surface of the bundled constant-product exchange.
#[async_trait]
pub trait DexReader: Send + Sync {
    async fn total_liquidity(&self) -> Result<U256, VaultError>;
    async fn liquidity_of(&self, owner: Address) -> Result<U256, VaultError>;
    /// Native STT held by the exchange (the STT-side reserve).
    async fn native_reserve(&self) -> Result<U256, VaultError>;
    /// csSTT held by the exchange (the token-side reserve).
    async fn token_reserve(&self) -> Result<U256, VaultError>;
}

/// Write surface of the bundled exchange.
#[async_trait]
pub trait DexWriter: Send + Sync {
    /// Swap `value` native STT for csSTT.
    async fn stt_to_token(&self, value: U256) -> Result<TxHash, VaultError>;
    /// Swap `tokens` csSTT for native STT. Requires a prior `approve` on
    /// the vault token.
    async fn token_to_stt(&self, tokens: U256) -> Result<TxHash, VaultError>;
    /// Add `value` native STT (plus matching csSTT) of liquidity.
    async fn deposit(&self, value: U256) -> Result<TxHash, VaultError>;
    /// Remove `amount` of liquidity.
    async fn withdraw(&self, amount: U256) -> Result<TxHash, VaultError>;
}
