use super::Float;

/// Caller-contract violations, rejected before any geometry is computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("maximum travel distance must be finite and non-negative, got {0}")]
    InvalidMaxDistance(Float),

    #[error("minimum hit distance must be finite and non-negative, got {0}")]
    InvalidMinHitDistance(Float),

    #[error("deduplication precision of {digits} decimal digits exceeds the maximum of {max}")]
    PrecisionTooHigh { digits: u32, max: u32 },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
