//! STT/csSTT exchange-rate derivation.
//!
//! The vault reports liquid assets (`totalAssets`) separately from assets
//! awaiting queue payout (`queuedAssets`); the true backing of the share
//! supply is their sum. Rates computed here are advisory and display-only:
//! the contract's own conversion functions are authoritative for any
//! amount submitted on-chain.

use crate::error::MathError;
use primitive_types::U256;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Assets-per-share rate: `(total_assets + queued_assets) / total_supply`.
///
/// A zero share supply means no deposits have ever happened; the rate is
/// the initial 1:1 peg.
pub fn assets_per_share(
    total_assets: U256,
    total_supply: U256,
    queued_assets: U256,
) -> Result<Decimal, MathError> {
    let backing = total_assets.saturating_add(queued_assets);
    if total_supply.is_zero() {
        return Ok(Decimal::ONE);
    }
    ratio(backing, total_supply)
}

/// Shares-per-asset rate: `total_supply / (total_assets + queued_assets)`.
///
/// Same zero-guard as [`assets_per_share`]: an empty vault quotes the
/// 1:1 peg.
pub fn shares_per_asset(
    total_assets: U256,
    total_supply: U256,
    queued_assets: U256,
) -> Result<Decimal, MathError> {
    let backing = total_assets.saturating_add(queued_assets);
    if backing.is_zero() {
        return Ok(Decimal::ONE);
    }
    ratio(total_supply, backing)
}

fn ratio(numerator: U256, denominator: U256) -> Result<Decimal, MathError> {
    let n = Decimal::from_str(&numerator.to_string()).map_err(|_| MathError::DecimalConversion)?;
    let d =
        Decimal::from_str(&denominator.to_string()).map_err(|_| MathError::DecimalConversion)?;
    n.checked_div(d).ok_or(MathError::DecimalConversion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn wei(n: u64) -> U256 {
        U256::from(n) * U256::exp10(18)
    }

    #[test]
    fn test_empty_vault_quotes_initial_peg() {
        assert_eq!(
            assets_per_share(U256::zero(), U256::zero(), U256::zero()).unwrap(),
            Decimal::ONE
        );
        assert_eq!(
            shares_per_asset(U256::zero(), U256::zero(), U256::zero()).unwrap(),
            Decimal::ONE
        );
    }

    #[test]
    fn test_one_to_one_post_deposit() {
        // 11 STT backing 11 shares
        assert_eq!(
            assets_per_share(wei(11), wei(11), U256::zero()).unwrap(),
            Decimal::ONE
        );
    }

    #[test]
    fn test_queued_assets_count_toward_backing() {
        // 6 liquid + 5 queued backing 10 shares -> 1.1 STT per csSTT
        let rate = assets_per_share(wei(6), wei(10), wei(5)).unwrap();
        assert_eq!(rate, dec!(1.1));

        let inverse = shares_per_asset(wei(6), wei(10), wei(5)).unwrap();
        assert_eq!((rate * inverse).round_dp(12), Decimal::ONE);
    }

    #[test]
    fn test_rate_rises_with_rewards() {
        let before = assets_per_share(wei(10), wei(10), U256::zero()).unwrap();
        let after = assets_per_share(wei(12), wei(10), U256::zero()).unwrap();
        assert!(after > before);
    }
}
