use thiserror::Error;

/// Errors from the pure math layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// An intermediate product or sum exceeded 256 bits.
    #[error("arithmetic overflow")]
    Overflow,
    /// A pool-side input that must be non-zero was zero.
    #[error("reserves must be non-zero")]
    EmptyReserves,
    /// A raw integer could not be represented as a decimal.
    #[error("decimal conversion failed")]
    DecimalConversion,
}
