//! Error types.

use thiserror::Error;

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvalidRange { field: &'static str, min: f32, max: f32 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a probability in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
