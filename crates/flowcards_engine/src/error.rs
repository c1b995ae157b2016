// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for carousel configuration.

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A numeric option is NaN or infinite
    #[error("{field} must be a finite number, got {value}")]
    NonFinite {
        /// Option name
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// A numeric option that must not be negative is negative
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Option name
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Item width and gap are both zero, so the strip has no extent
    #[error("item width and gap are both zero")]
    ZeroStride,

    /// Serialized configuration could not be parsed
    #[error("failed to parse carousel config: {0}")]
    Parse(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
