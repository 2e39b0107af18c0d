//! Load projection scenarios from a CSV file
//!
//! Expected columns:
//! `Name,InitialInvestment,MonthlyContribution,Years,Reinvest,DistributionGrowthPct,PriceGrowthPct,SharePrice,MonthlyDistPerShare`

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;

use crate::error::{ProjectionError, Result};
use crate::projection::ProjectionConfig;
use crate::scenario::Scenario;

/// Default scenario file shipped with the crate
pub const DEFAULT_SCENARIOS_PATH: &str = "data/scenarios.csv";

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "InitialInvestment")]
    initial_investment: f64,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "Years")]
    years: u32,
    #[serde(rename = "Reinvest")]
    reinvest: String,
    #[serde(rename = "DistributionGrowthPct")]
    distribution_growth_pct: f64,
    #[serde(rename = "PriceGrowthPct")]
    price_growth_pct: f64,
    #[serde(rename = "SharePrice")]
    share_price: f64,
    #[serde(rename = "MonthlyDistPerShare")]
    monthly_dist_per_share: f64,
}

impl CsvRow {
    fn into_scenario(self, line: u64) -> Result<Scenario> {
        let reinvest_dividends = match self.reinvest.trim().to_ascii_uppercase().as_str() {
            "Y" | "YES" | "TRUE" | "1" => true,
            "N" | "NO" | "FALSE" | "0" => false,
            other => {
                return Err(ProjectionError::InvalidScenarioRow {
                    line,
                    reason: format!("Unknown Reinvest flag: {}", other),
                })
            }
        };

        let config = ProjectionConfig {
            initial_investment: self.initial_investment,
            monthly_contribution: self.monthly_contribution,
            years: self.years,
            reinvest_dividends,
            annual_distribution_growth_rate: self.distribution_growth_pct / 100.0,
            annual_price_growth_rate: self.price_growth_pct / 100.0,
            initial_share_price: self.share_price,
            initial_monthly_distribution_per_share: self.monthly_dist_per_share,
        };

        config
            .validate()
            .map_err(|e| ProjectionError::InvalidScenarioRow {
                line,
                reason: e.to_string(),
            })?;

        Ok(Scenario::new(self.name.trim(), config))
    }
}

/// Load scenarios from any reader producing scenario CSV
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for (idx, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1
        let line = idx as u64 + 2;
        scenarios.push(row?.into_scenario(line)?);
    }

    Ok(scenarios)
}

/// Load scenarios from a CSV file
pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>> {
    let file = File::open(path)?;
    let scenarios = load_scenarios_from_reader(file)?;
    info!("Loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load the scenario file shipped with the crate
pub fn load_default_scenarios() -> Result<Vec<Scenario>> {
    load_scenarios(Path::new(DEFAULT_SCENARIOS_PATH))
}
