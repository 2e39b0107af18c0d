//! Projection engine for DRIP and cash-out scenarios

mod schedule;
mod state;
mod engine;
mod snapshots;
pub mod export;

pub use schedule::{RateSchedule, YearRates};
pub use state::{apply_month, PortfolioState, MIN_SHARE_PRICE};
pub use engine::{apply_year, project, ProjectionConfig, ProjectionEngine, MAX_PROJECTION_YEARS};
pub use snapshots::{ProjectionResult, ProjectionSummary, YearSnapshot};
