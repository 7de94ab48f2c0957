// Error type shared by the field engine, the interpolator and the split/combine entry points.

use thiserror::Error;

/// Everything that can go wrong while splitting or recovering a secret.
///
/// Combining fewer shares than the threshold is not an error: the result is a
/// wrong secret and nothing in the shares allows detecting it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("share count must be at least 1")]
    ZeroShareCount,
    #[error("threshold must be at least 1")]
    ZeroThreshold,
    #[error("threshold {threshold} cannot exceed share count {share_count}")]
    ThresholdExceedsShareCount { threshold: u8, share_count: u8 },

    #[error("at least one share is required")]
    NoShares,
    #[error("share id {0} is not a valid x-coordinate")]
    InvalidShareId(u8),
    #[error("all shares must have the same length: expected {expected} bytes, found {found}")]
    ShareLengthMismatch { expected: usize, found: usize },
    #[error("a share must hold at least its 1-byte id, got {0} bytes")]
    ShareTooShort(usize),
    #[error("expected {expected} share slots, got {found}; use None for unknown shares")]
    ShareCountMismatch { expected: usize, found: usize },
    #[error("not enough distinct shares: {needed} required, {found} provided")]
    NotEnoughShares { needed: u8, found: usize },

    /// Raised by field division with a zero divisor. During interpolation this
    /// means two points shared the same x-coordinate.
    #[error("division by zero in GF(256)")]
    DivisionByZero,

    #[error("entropy source failure: {0}")]
    Entropy(rand::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
