//! Instant-vs-queued withdrawal routing.
//!
//! Classification is strict: a request for exactly the free liquidity is
//! still instant. Share conversion truncates the way the chain's
//! fixed-point division does, so a plan never asks to burn more shares
//! than the exact quotient.

use crate::error::MathError;
use crate::value_objects::percentage::BasisPoints;
use crate::vault::VaultSnapshot;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Default client-side slippage tolerance for instant redemptions.
pub const DEFAULT_SLIPPAGE: BasisPoints = BasisPoints(500);

/// How a requested withdrawal will be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawalRoute {
    /// Enough free liquidity: redeem immediately, guarded by `min_assets`.
    Instant {
        shares_to_burn: U256,
        min_assets: U256,
    },
    /// Insufficient liquidity: place a FIFO queue request. The realized
    /// payout is determined later by queue processing, so no slippage
    /// parameter applies.
    Queued { shares_to_burn: U256 },
}

impl WithdrawalRoute {
    pub fn is_instant(&self) -> bool {
        matches!(self, WithdrawalRoute::Instant { .. })
    }

    pub fn shares_to_burn(&self) -> U256 {
        match self {
            WithdrawalRoute::Instant { shares_to_burn, .. }
            | WithdrawalRoute::Queued { shares_to_burn } => *shares_to_burn,
        }
    }
}

/// Plans a withdrawal of `requested` assets against the given snapshot.
pub fn plan_withdrawal(
    requested: U256,
    snapshot: &VaultSnapshot,
    slippage: BasisPoints,
) -> Result<WithdrawalRoute, MathError> {
    let shares_to_burn = shares_for_assets(requested, snapshot)?;

    if snapshot.free_liquidity >= requested {
        Ok(WithdrawalRoute::Instant {
            shares_to_burn,
            min_assets: min_assets_out(requested, slippage)?,
        })
    } else {
        Ok(WithdrawalRoute::Queued { shares_to_burn })
    }
}

/// Shares to burn for a target asset amount:
/// `assets * total_supply / (total_assets + queued_assets)`, truncating.
///
/// An empty vault (zero supply or zero backing) falls back to the 1:1
/// peg, mirroring the contract's first-deposit behavior.
pub fn shares_for_assets(assets: U256, snapshot: &VaultSnapshot) -> Result<U256, MathError> {
    let backing = snapshot.actual_total_assets();
    if snapshot.total_supply.is_zero() || backing.is_zero() {
        return Ok(assets);
    }
    let numerator = assets
        .checked_mul(snapshot.total_supply)
        .ok_or(MathError::Overflow)?;
    Ok(numerator / backing)
}

/// Minimum acceptable payout for an instant redemption:
/// `assets * (10_000 - slippage_bps) / 10_000`, truncating.
///
/// Passed to the contract's slippage-guarded redeem; the boundary is
/// inclusive (a payout of exactly `min_assets` succeeds on-chain).
pub fn min_assets_out(assets: U256, slippage: BasisPoints) -> Result<U256, MathError> {
    let keep_bps = BasisPoints::DENOMINATOR
        .checked_sub(slippage.as_u32())
        .ok_or(MathError::Overflow)?;
    let numerator = assets
        .checked_mul(U256::from(keep_bps))
        .ok_or(MathError::Overflow)?;
    Ok(numerator / U256::from(BasisPoints::DENOMINATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(n: u64) -> U256 {
        U256::from(n) * U256::exp10(18)
    }

    fn snapshot(total: u64, supply: u64, queued: u64, free: u64) -> VaultSnapshot {
        VaultSnapshot::new(wei(total), wei(supply), wei(queued), wei(free))
    }

    #[test]
    fn test_instant_iff_liquidity_covers_request() {
        let snap = snapshot(10, 10, 0, 5);

        // strictly below free liquidity
        assert!(
            plan_withdrawal(wei(4), &snap, DEFAULT_SLIPPAGE)
                .unwrap()
                .is_instant()
        );
        // equality is still instant
        assert!(
            plan_withdrawal(wei(5), &snap, DEFAULT_SLIPPAGE)
                .unwrap()
                .is_instant()
        );
        // one wei over goes to the queue
        let over = wei(5) + U256::one();
        assert!(
            !plan_withdrawal(over, &snap, DEFAULT_SLIPPAGE)
                .unwrap()
                .is_instant()
        );
    }

    #[test]
    fn test_min_assets_at_five_percent() {
        // 1.0 STT at 500 bps -> exactly 0.95 STT
        let min = min_assets_out(wei(1), DEFAULT_SLIPPAGE).unwrap();
        assert_eq!(min, U256::from(950_000_000_000_000_000u128));
    }

    #[test]
    fn test_queued_route_carries_no_slippage_bound() {
        let snap = snapshot(10, 10, 8, 2);
        let route = plan_withdrawal(wei(5), &snap, DEFAULT_SLIPPAGE).unwrap();
        match route {
            WithdrawalRoute::Queued { shares_to_burn } => {
                // 5 * 10 / 18 = 2.777..., truncated
                assert_eq!(shares_to_burn, wei(50) / U256::from(18));
            }
            WithdrawalRoute::Instant { .. } => panic!("expected queued route"),
        }
    }

    #[test]
    fn test_shares_truncate_never_round_up() {
        // 10 * 3 / 7 = 4.2857... -> 4
        let snap = VaultSnapshot::new(U256::from(7), U256::from(3), U256::zero(), U256::from(7));
        let shares = shares_for_assets(U256::from(10), &snap).unwrap();
        assert_eq!(shares, U256::from(4));

        // exact quotient stays exact
        let snap = VaultSnapshot::new(U256::from(5), U256::from(10), U256::zero(), U256::from(5));
        let shares = shares_for_assets(U256::from(10), &snap).unwrap();
        assert_eq!(shares, U256::from(20));
    }

    #[test]
    fn test_empty_vault_converts_one_to_one() {
        let snap = VaultSnapshot::new(U256::zero(), U256::zero(), U256::zero(), U256::zero());
        assert_eq!(shares_for_assets(wei(3), &snap).unwrap(), wei(3));
    }

    #[test]
    fn test_shares_reflect_appreciated_rate() {
        // 20 STT backing 10 shares: 2 STT per share, so 4 STT burns 2 shares
        let snap = snapshot(20, 10, 0, 20);
        assert_eq!(shares_for_assets(wei(4), &snap).unwrap(), wei(2));
    }
}
