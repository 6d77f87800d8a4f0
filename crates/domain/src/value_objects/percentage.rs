use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A tolerance or fee expressed in basis points (1 bps = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BasisPoints(pub u32);

impl BasisPoints {
    pub const DENOMINATOR: u32 = 10_000;

    #[must_use]
    pub fn new(bps: u32) -> Self {
        Self(bps)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Fractional view, e.g. 500 bps -> 0.05.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(Self::DENOMINATOR)
    }

    pub fn from_decimal(d: Decimal) -> Self {
        Self((d * Decimal::from(Self::DENOMINATOR)).to_u32().unwrap_or(0))
    }

    /// The smaller of the two tolerances.
    #[must_use]
    pub fn clamp_to(self, max: BasisPoints) -> Self {
        if self.0 > max.0 { max } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bps_decimal_view() {
        assert_eq!(BasisPoints::new(500).to_decimal(), dec!(0.05));
        assert_eq!(BasisPoints::from_decimal(dec!(0.05)), BasisPoints::new(500));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(
            BasisPoints::new(800).clamp_to(BasisPoints::new(500)),
            BasisPoints::new(500)
        );
        assert_eq!(
            BasisPoints::new(300).clamp_to(BasisPoints::new(500)),
            BasisPoints::new(300)
        );
    }
}
