//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust,ignore
//! use covus_app::prelude::*;
//! ```

pub use crate::dex::{DexReserves, DexService, SwapDirection, SwapPreview};
pub use crate::queue::{QueueService, QueueStatusView, RecentActivity};
pub use crate::staking::{
    PortfolioView, RouterConfig, StakingService, WithdrawalOutcome,
};
pub use crate::status::{ProtocolStatus, StatusService};
