//! Run every scenario in a CSV file and write one summary line per scenario
//!
//! Usage: run_batch [SCENARIOS_CSV] [OUTPUT_CSV]
//! Defaults to data/scenarios.csv and batch_projection_output.csv

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use drip_projection::inputs::loader::{load_default_scenarios, load_scenarios, DEFAULT_SCENARIOS_PATH};
use drip_projection::ScenarioRunner;
use serde::Serialize;

/// Summary line for one scenario
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "Scenario")]
    name: &'a str,
    #[serde(rename = "Years")]
    years: u32,
    #[serde(rename = "Reinvest")]
    reinvest: bool,
    #[serde(rename = "FinalValue")]
    final_value: String,
    #[serde(rename = "FinalShares")]
    final_shares: String,
    #[serde(rename = "TotalContributed")]
    total_contributed: String,
    #[serde(rename = "TotalDividends")]
    total_dividends: String,
    #[serde(rename = "FinalAnnualIncome")]
    final_annual_income: String,
    #[serde(rename = "CashOutValue")]
    cash_out_value: String,
    #[serde(rename = "ReinvestmentAdvantage")]
    reinvestment_advantage: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().map(PathBuf::from);
    let output = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "batch_projection_output.csv".to_string()),
    );

    let start = Instant::now();
    let scenarios = match &input {
        Some(path) => {
            println!("Loading scenarios from {}...", path.display());
            load_scenarios(path)
                .with_context(|| format!("Failed to load scenarios from {}", path.display()))?
        }
        None => {
            println!("Loading scenarios from {}...", DEFAULT_SCENARIOS_PATH);
            load_default_scenarios()
                .with_context(|| format!("Failed to load scenarios from {}", DEFAULT_SCENARIOS_PATH))?
        }
    };
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    println!("Running projections...");
    let proj_start = Instant::now();
    let runner = ScenarioRunner::new();
    let outcomes = runner.run_scenarios(&scenarios);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    for (scenario, outcome) in scenarios.iter().zip(&outcomes) {
        let summary = outcome.result.summary();
        writer.serialize(SummaryRow {
            name: &outcome.name,
            years: scenario.config.years,
            reinvest: scenario.config.reinvest_dividends,
            final_value: format!("{:.2}", summary.final_portfolio_value),
            final_shares: format!("{:.6}", summary.final_share_count),
            total_contributed: format!("{:.2}", summary.total_contributed),
            total_dividends: format!("{:.2}", summary.total_distributions),
            final_annual_income: format!("{:.2}", summary.final_annual_income),
            cash_out_value: format!("{:.2}", summary.counterfactual_final_value),
            reinvestment_advantage: format!("{:.2}", outcome.result.reinvestment_advantage),
        })?;
    }
    writer.flush()?;

    println!("Output written to {}", output.display());

    println!("\nBatch Summary:");
    for outcome in &outcomes {
        println!(
            "  {:<24} FinalValue=${:>14.2}  CashOut=${:>14.2}",
            outcome.name, outcome.result.final_portfolio_value, outcome.result.counterfactual_final_value
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
