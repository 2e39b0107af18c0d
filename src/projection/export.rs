//! CSV and JSON export of projection results

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::snapshots::{ProjectionResult, YearSnapshot};
use crate::error::{ProjectionError, Result};

/// One line of the exported yearly table
#[derive(Debug, Serialize)]
struct YearRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Shares")]
    shares: f64,
    #[serde(rename = "SharePrice")]
    share_price: f64,
    #[serde(rename = "MonthlyDistPerShare")]
    monthly_distribution_per_share: f64,
    #[serde(rename = "PortfolioValue")]
    portfolio_value: f64,
    #[serde(rename = "Distributions")]
    distributions: f64,
    #[serde(rename = "CumulativeDistributions")]
    cumulative_distributions: f64,
    #[serde(rename = "CumulativeContributions")]
    cumulative_contributions: f64,
    #[serde(rename = "AnnualIncome")]
    annual_income: f64,
    #[serde(rename = "CashOutValue")]
    cash_out_value: Option<f64>,
}

impl YearRow {
    fn new(snapshot: &YearSnapshot, counterfactual: Option<&YearSnapshot>) -> Self {
        Self {
            year: snapshot.year_index,
            shares: round_to(snapshot.shares_end_of_year, 6),
            share_price: round_to(snapshot.share_price_end_of_year, 4),
            monthly_distribution_per_share: round_to(snapshot.monthly_distribution_per_share, 6),
            portfolio_value: round_to(snapshot.portfolio_value, 2),
            distributions: round_to(snapshot.distributions_this_year, 2),
            cumulative_distributions: round_to(snapshot.cumulative_distributions, 2),
            cumulative_contributions: round_to(snapshot.cumulative_contributions, 2),
            annual_income: round_to(snapshot.annual_income_run_rate, 2),
            cash_out_value: counterfactual.map(|c| round_to(c.portfolio_value, 2)),
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Write the yearly table, with the cash-out value alongside each year
pub fn write_yearly_csv<W: Write>(result: &ProjectionResult, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for (idx, snapshot) in result.yearly.iter().enumerate() {
        csv.serialize(YearRow::new(snapshot, result.counterfactual_yearly.get(idx)))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the yearly table to a file
pub fn write_yearly_csv_file(result: &ProjectionResult, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_yearly_csv(result, file)
}

/// Serialize the full result as pretty JSON.
///
/// JSON has no infinity, so a non-finite result is an error rather than `null`.
pub fn to_json(result: &ProjectionResult) -> Result<String> {
    if !result.is_finite() {
        return Err(ProjectionError::NonFiniteResult);
    }
    Ok(serde_json::to_string_pretty(result)?)
}
