//! Constant-product (x * y = k) swap previews for the bundled exchange.
//!
//! All outputs here are illustrative: the exchange contract recomputes
//! the trade (fee included) at execution time, and transactions landing
//! ahead of the swap move the reserves. Preview and realized amounts can
//! therefore differ.

use crate::error::MathError;
use crate::token::TokenAmount;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output amount for a swap, fee excluded (the exchange applies its fee
/// on-chain): `dy = y * dx / (x + dx)`, truncating.
pub fn quote_out_amount(
    amount_in: TokenAmount,
    reserve_in: TokenAmount,
    reserve_out: TokenAmount,
) -> Result<TokenAmount, MathError> {
    let amount_in = amount_in.0;
    let reserve_in = reserve_in.0;
    let reserve_out = reserve_out.0;

    if amount_in.is_zero() {
        return Ok(TokenAmount::zero());
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(MathError::EmptyReserves);
    }

    let numerator = amount_in
        .checked_mul(reserve_out)
        .ok_or(MathError::Overflow)?;
    let denominator = reserve_in
        .checked_add(amount_in)
        .ok_or(MathError::Overflow)?;

    Ok(TokenAmount(numerator / denominator))
}

/// Spot price of the input token in terms of the output token:
/// `reserve_out / reserve_in`.
pub fn spot_price(
    reserve_in: TokenAmount,
    reserve_out: TokenAmount,
) -> Result<Decimal, MathError> {
    if reserve_in.0.is_zero() {
        return Err(MathError::EmptyReserves);
    }
    let r_in =
        Decimal::from_str(&reserve_in.0.to_string()).map_err(|_| MathError::DecimalConversion)?;
    let r_out =
        Decimal::from_str(&reserve_out.0.to_string()).map_err(|_| MathError::DecimalConversion)?;
    r_out.checked_div(r_in).ok_or(MathError::DecimalConversion)
}

/// The constant product K.
pub fn constant_k(reserve0: TokenAmount, reserve1: TokenAmount) -> U256 {
    reserve0.0.saturating_mul(reserve1.0)
}

/// A sampled point on the `x * y = k` curve, in display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: Decimal,
    pub y: Decimal,
}

/// Samples the invariant curve around the current reserves for the
/// preview chart: `n` points with x swept linearly across
/// `[reserve_in / 4, reserve_in * 4]` and `y = k / x`.
///
/// Sampling happens in display units (`decimals` scales the raw
/// reserves down); k computed on raw 18-decimal reserves would not fit
/// a `Decimal`.
pub fn curve_points(
    reserve_in: TokenAmount,
    reserve_out: TokenAmount,
    decimals: u8,
    n: usize,
) -> Result<Vec<CurvePoint>, MathError> {
    if reserve_in.0.is_zero() || reserve_out.0.is_zero() {
        return Err(MathError::EmptyReserves);
    }
    if n < 2 {
        return Ok(Vec::new());
    }

    let scale = Decimal::from(10u64.pow(u32::from(decimals)));
    let x0 = Decimal::from_str(&reserve_in.0.to_string())
        .map_err(|_| MathError::DecimalConversion)?
        .checked_div(scale)
        .ok_or(MathError::DecimalConversion)?;
    let y0 = Decimal::from_str(&reserve_out.0.to_string())
        .map_err(|_| MathError::DecimalConversion)?
        .checked_div(scale)
        .ok_or(MathError::DecimalConversion)?;
    let k = x0.checked_mul(y0).ok_or(MathError::Overflow)?;

    let lo = x0 / Decimal::from(4);
    let hi = x0 * Decimal::from(4);
    let step = (hi - lo) / Decimal::from(n as u64 - 1);

    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let x = lo + step * Decimal::from(i as u64);
        let y = k.checked_div(x).ok_or(MathError::DecimalConversion)?;
        points.push(CurvePoint { x, y });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(n: u64) -> TokenAmount {
        TokenAmount(U256::from(n) * U256::exp10(18))
    }

    #[test]
    fn test_zero_input_quotes_zero() {
        let out = quote_out_amount(TokenAmount::zero(), wei(100), wei(100)).unwrap();
        assert!(out.is_zero());
    }

    #[test]
    fn test_quote_matches_closed_form() {
        // 10 in against 100/100: 100 * 10 / 110 = 9.0909...
        let out = quote_out_amount(wei(10), wei(100), wei(100)).unwrap();
        let expected = wei(100).0 * wei(10).0 / (wei(100).0 + wei(10).0);
        assert_eq!(out.0, expected);
        assert!(out.0 < wei(10).0);
    }

    #[test]
    fn test_output_increases_with_input() {
        let mut last = U256::zero();
        for amount in [1u64, 2, 5, 10, 50, 99] {
            let out = quote_out_amount(wei(amount), wei(100), wei(100)).unwrap();
            assert!(out.0 > last, "output must grow with input");
            last = out.0;
        }
    }

    #[test]
    fn test_pool_cannot_be_drained() {
        // even an absurd input never reaches the full output reserve
        let huge = TokenAmount(U256::exp10(30));
        let out = quote_out_amount(huge, wei(100), wei(100)).unwrap();
        assert!(out.0 < wei(100).0);
    }

    #[test]
    fn test_empty_reserves_rejected() {
        assert_eq!(
            quote_out_amount(wei(1), TokenAmount::zero(), wei(100)),
            Err(MathError::EmptyReserves)
        );
    }

    #[test]
    fn test_spot_price() {
        let price = spot_price(wei(2000), wei(1000)).unwrap();
        assert_eq!(price, Decimal::from_str("0.5").unwrap());
    }

    #[test]
    fn test_constant_k() {
        let k = constant_k(TokenAmount::from(1000u64), TokenAmount::from(2000u64));
        assert_eq!(k, U256::from(2_000_000u64));
    }

    #[test]
    fn test_curve_points_lie_on_invariant() {
        let points = curve_points(wei(100), wei(100), 18, 16).unwrap();
        assert_eq!(points.len(), 16);

        let k = points[0].x * points[0].y;
        for p in &points[1..] {
            let here = p.x * p.y;
            // sampled k drifts only by decimal rounding
            let drift = ((here - k) / k).abs();
            assert!(drift < Decimal::from_str("0.000001").unwrap());
        }
        // x sweeps upward, y downward
        assert!(points[0].x < points[15].x);
        assert!(points[0].y > points[15].y);
    }
}
