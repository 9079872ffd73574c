//! Input error types.

use thiserror::Error;

/// Invalid gesture configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Dismiss distance must be positive, got {0}")]
    InvalidDistance(f32),

    #[error("Dismiss velocity must be positive, got {0}")]
    InvalidVelocity(f32),

    #[error("Elastic factor must be within 0.0-1.0, got {0}")]
    InvalidElastic(f32),

    #[error("Velocity window must be at least 1ms")]
    EmptyVelocityWindow,
}
