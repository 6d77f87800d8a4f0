//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust,ignore
//! use covus_protocols::prelude::*;
//! ```

pub use crate::abi::{CovusDex, CovusVault};
pub use crate::dex::DexClient;
pub use crate::error::VaultError;
pub use crate::events::QueueEventScanner;
pub use crate::provider::RpcConfig;
pub use crate::snapshot::{ObservedSnapshot, fetch_queue_state, fetch_snapshot};
pub use crate::vault::VaultClient;
pub use crate::{DexReader, DexWriter, VaultReader, VaultWriter};
