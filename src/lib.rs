//! DRIP Projection - deterministic dividend reinvestment growth projections
//!
//! This library provides:
//! - Month-by-month compounding of contributions and distributions
//! - Yearly snapshots with annual price and distribution growth
//! - A cash-out counterfactual run alongside every projection
//! - Dividend income figures for a single holding
//! - Form input coercion, CSV scenario loading and batch runs

pub mod error;
pub mod income;
pub mod inputs;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ConfigError, ProjectionError};
pub use income::{DividendIncome, PaymentFrequency};
pub use inputs::FormInput;
pub use projection::{project, ProjectionConfig, ProjectionEngine, ProjectionResult, YearSnapshot};
pub use scenario::{Scenario, ScenarioRunner};
