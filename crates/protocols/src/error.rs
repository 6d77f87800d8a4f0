//! Protocol error taxonomy.
//!
//! Variants mirror the contract's revert reasons and the common provider
//! failures. The policy everywhere is catch at the call site, log, and
//! return: no retry, no backoff, no compensation; the user retries.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// Contract rejects zero-amount deposits and withdrawals.
    #[error("amount must be non-zero")]
    ZeroAmount,
    /// Contract is paused.
    #[error("contract is paused")]
    Paused,
    /// Realized payout would fall below the guarded minimum.
    #[error("slippage tolerance exceeded")]
    SlippageExceeded,
    /// Caller may not act on the given owner's shares.
    #[error("caller is not authorized")]
    Unauthorized,
    /// Signer cannot cover value plus gas.
    #[error("insufficient funds for transaction")]
    InsufficientFunds,
    /// Rejected in the signer/wallet before submission.
    #[error("transaction rejected by user")]
    UserRejected,
    /// Signer chain id does not match the node's.
    #[error("connected to the wrong network")]
    NetworkMismatch,
    /// A write requires a configured signing key.
    #[error("no signing key configured")]
    MissingSigner,
    /// Anything the taxonomy does not classify.
    #[error("rpc error: {0}")]
    Rpc(String),
}

impl VaultError {
    /// Classifies a provider or revert message into the taxonomy.
    ///
    /// Revert strings are the contract's own (`ZERO_STT` et al.); the
    /// rest are the strings the common providers emit.
    pub fn classify(message: impl AsRef<str>) -> Self {
        let raw = message.as_ref();
        let msg = raw.to_ascii_uppercase();

        if msg.contains("ZERO_STT") || msg.contains("ZERO_SHARES") || msg.contains("ZERO_ASSETS") {
            VaultError::ZeroAmount
        } else if msg.contains("PAUSED") {
            VaultError::Paused
        } else if msg.contains("SLIPPAGE") || msg.contains("MIN_ASSETS") || msg.contains("MAX_SHARES")
        {
            VaultError::SlippageExceeded
        } else if msg.contains("UNAUTHORIZED") || msg.contains("NOT_OWNER") {
            VaultError::Unauthorized
        } else if msg.contains("INSUFFICIENT FUNDS") {
            VaultError::InsufficientFunds
        } else if msg.contains("USER REJECTED") || msg.contains("USER DENIED") {
            VaultError::UserRejected
        } else if msg.contains("CHAIN ID") || msg.contains("WRONG NETWORK") {
            VaultError::NetworkMismatch
        } else {
            VaultError::Rpc(raw.to_string())
        }
    }

    /// Classifies any displayable error.
    pub fn from_provider<E: std::fmt::Display>(err: E) -> Self {
        Self::classify(err.to_string())
    }
}
