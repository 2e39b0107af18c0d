//! Error types for config validation and file/service boundaries
//!
//! The projection engine itself never fails. Errors only arise when
//! untrusted input (JSON bodies, CSV scenario files) is turned into a
//! `ProjectionConfig`.

use thiserror::Error;

/// A `ProjectionConfig` that must not enter the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("years must be greater than zero")]
    ZeroYears,

    #[error("years must be at most {max}, got {years}")]
    TooManyYears { years: u32, max: u32 },

    #[error("initial share price must be greater than zero")]
    NonPositiveSharePrice,

    #[error("{field} of {rate} is below -100%")]
    GrowthRateBelowTotalLoss { field: &'static str, rate: f64 },
}

/// Errors raised while loading or exporting projections
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("invalid projection config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("projection overflowed to a non-finite value")]
    NonFiniteResult,

    #[error("invalid scenario on line {line}: {reason}")]
    InvalidScenarioRow { line: u64, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
