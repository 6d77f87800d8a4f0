//! Domain types and pure math for the Covus liquid-staking client.
//!
//! Everything in this crate is a pure function of on-chain scalars:
//! - Exchange-rate derivation for the STT/csSTT pair
//! - Instant-vs-queued withdrawal routing and slippage bounds
//! - Constant-product swap previews for the bundled exchange
//! - Display formatting for queue and balance views
//!
//! Nothing here talks to a chain. The on-chain conversion functions stay
//! authoritative for transaction construction; the math in this crate is
//! advisory and display-only unless a function documents otherwise.

pub mod error;
pub mod format;
pub mod math;
pub mod token;
pub mod value_objects;
pub mod vault;

pub use error::MathError;
pub use token::{Token, TokenAmount};
pub use value_objects::amount::Amount;
pub use value_objects::percentage::BasisPoints;
pub use vault::{QueueState, VaultSnapshot, WithdrawalRequest};
