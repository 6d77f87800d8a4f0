//! RPC configuration and provider construction.

use anyhow::{Context, Result};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use std::env;
use std::sync::Arc;

/// Connection settings for the node and the deployed contracts.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// HTTP endpoint of the node.
    pub rpc_url: String,
    /// Deployed `CovusVault` address.
    pub vault_address: String,
    /// Deployed `CovusDex` address.
    pub dex_address: String,
    /// Expected chain id; signing keys are bound to it.
    pub chain_id: u64,
    /// Hex signing key. Reads work without one; writes require it.
    pub private_key: Option<String>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        // Local devnet with the standard first two deployment addresses.
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            vault_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            dex_address: "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512".to_string(),
            chain_id: 31337,
            private_key: None,
        }
    }
}

impl RpcConfig {
    /// Builds a config from `COVUS_*` environment variables, falling back
    /// to the local-devnet defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let chain_id = match env::var("COVUS_CHAIN_ID") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("COVUS_CHAIN_ID must be a decimal chain id")?,
            Err(_) => defaults.chain_id,
        };

        Ok(Self {
            rpc_url: env::var("COVUS_RPC_URL").unwrap_or(defaults.rpc_url),
            vault_address: env::var("COVUS_VAULT_ADDRESS").unwrap_or(defaults.vault_address),
            dex_address: env::var("COVUS_DEX_ADDRESS").unwrap_or(defaults.dex_address),
            chain_id,
            private_key: env::var("COVUS_PRIVATE_KEY").ok(),
        })
    }

    pub fn vault_address(&self) -> Result<Address> {
        self.vault_address
            .parse()
            .context("invalid vault address")
    }

    pub fn dex_address(&self) -> Result<Address> {
        self.dex_address.parse().context("invalid DEX address")
    }

    /// Read-only provider.
    pub fn provider(&self) -> Result<Arc<Provider<Http>>> {
        let provider = Provider::<Http>::try_from(self.rpc_url.as_str())
            .context("invalid RPC URL")?;
        Ok(Arc::new(provider))
    }

    /// Signing middleware for write operations.
    pub fn signer(&self) -> Result<Arc<SignerMiddleware<Provider<Http>, LocalWallet>>> {
        let key = self
            .private_key
            .as_deref()
            .context("COVUS_PRIVATE_KEY is required for write operations")?;
        let provider = Provider::<Http>::try_from(self.rpc_url.as_str())
            .context("invalid RPC URL")?;
        let wallet: LocalWallet = key.parse().context("invalid signing key")?;
        Ok(Arc::new(SignerMiddleware::new(
            provider,
            wallet.with_chain_id(self.chain_id),
        )))
    }

    pub fn has_signer(&self) -> bool {
        self.private_key.is_some()
    }
}
