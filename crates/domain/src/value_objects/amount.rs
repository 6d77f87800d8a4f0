use crate::error::MathError;
use primitive_types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A raw fixed-point amount tagged with its decimal scale.
///
/// The raw value is what goes over the wire; the decimal view is for
/// display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount {
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    #[must_use]
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// An amount of the 18-decimal native asset.
    #[must_use]
    pub fn native(raw: U256) -> Self {
        Self::new(raw, crate::token::NATIVE_DECIMALS)
    }

    #[must_use]
    pub fn zero(decimals: u8) -> Self {
        Self::new(U256::zero(), decimals)
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Parses a human-readable decimal (e.g. "1.5") into a raw amount.
    ///
    /// Truncates any fraction finer than `decimals` places, matching the
    /// chain's fixed-point arithmetic.
    pub fn from_decimal(d: Decimal, decimals: u8) -> Result<Self, MathError> {
        if d.is_sign_negative() {
            return Err(MathError::DecimalConversion);
        }
        let scaled = d
            .checked_mul(Decimal::from(10u64.pow(u32::from(decimals))))
            .ok_or(MathError::Overflow)?
            .trunc();
        let raw_u128 = scaled.to_u128().ok_or(MathError::DecimalConversion)?;
        Ok(Self::new(U256::from(raw_u128), decimals))
    }

    /// Display view of the raw amount.
    ///
    /// Goes through string parsing rather than `as_u128` so raws larger
    /// than 128 bits fail loudly instead of truncating.
    pub fn to_decimal(&self) -> Result<Decimal, MathError> {
        let d = Decimal::from_str(&self.raw.to_string())
            .map_err(|_| MathError::DecimalConversion)?;
        let divisor = Decimal::from(10u64.pow(u32::from(self.decimals)));
        d.checked_div(divisor).ok_or(MathError::DecimalConversion)
    }
}

impl fmt::Display for Amount {
    // Falls back to the raw integer when the decimal view overflows.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal() {
            Ok(d) => write!(f, "{d}"),
            Err(_) => write!(f, "{}", self.raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_decimal_roundtrip() {
        let a = Amount::from_decimal(dec!(1.5), 18).unwrap();
        assert_eq!(a.raw, U256::from(1_500_000_000_000_000_000u128));
        assert_eq!(a.to_decimal().unwrap(), dec!(1.5));
    }

    #[test]
    fn test_from_decimal_truncates_excess_precision() {
        // 6-decimal token cannot represent the 7th place
        let a = Amount::from_decimal(dec!(1.2345678), 6).unwrap();
        assert_eq!(a.raw, U256::from(1_234_567u64));
    }

    #[test]
    fn test_negative_rejected() {
        assert!(Amount::from_decimal(dec!(-1), 18).is_err());
    }
}
