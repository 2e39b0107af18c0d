//! Scenario runner for batch projections
//!
//! Every projection owns its state, so batches run in parallel with no
//! locking.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, RateSchedule};

/// A named projection config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub config: ProjectionConfig,
}

impl Scenario {
    pub fn new(name: impl Into<String>, config: ProjectionConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Result of one named scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: ProjectionResult,
}

/// Runs many projections, optionally with a shared explicit rate schedule
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// for rate in [0.03, 0.05, 0.07] {
///     let config = ProjectionConfig { annual_price_growth_rate: rate, ..Default::default() };
///     let result = runner.run(config);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    /// Replaces each config's constant growth rates when set
    schedule: Option<RateSchedule>,
}

impl ScenarioRunner {
    /// Runner using each config's own growth rates
    pub fn new() -> Self {
        Self { schedule: None }
    }

    /// Runner applying one explicit schedule to every projection
    pub fn with_schedule(schedule: RateSchedule) -> Self {
        Self {
            schedule: Some(schedule),
        }
    }

    fn engine(&self, config: ProjectionConfig) -> ProjectionEngine {
        match &self.schedule {
            Some(schedule) => ProjectionEngine::with_schedule(config, schedule.clone()),
            None => ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, config: ProjectionConfig) -> ProjectionResult {
        self.engine(config).run()
    }

    /// Run projections for many configs in parallel, preserving input order
    pub fn run_batch(&self, configs: &[ProjectionConfig]) -> Vec<ProjectionResult> {
        configs
            .par_iter()
            .map(|config| self.run(config.clone()))
            .collect()
    }

    /// Run named scenarios in parallel, preserving input order
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        info!("Running {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                result: self.run(scenario.config.clone()),
            })
            .collect()
    }

    /// Re-run `base` once per price growth rate
    pub fn price_growth_sensitivity(
        &self,
        base: &ProjectionConfig,
        price_growth_rates: &[f64],
    ) -> Vec<(f64, ProjectionResult)> {
        price_growth_rates
            .par_iter()
            .map(|&rate| {
                let config = ProjectionConfig {
                    annual_price_growth_rate: rate,
                    ..base.clone()
                };
                (rate, self.run(config))
            })
            .collect()
    }
}
