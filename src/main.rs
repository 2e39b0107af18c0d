//! DRIP Projection CLI
//!
//! Command-line interface for running a single DRIP projection

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use drip_projection::income::{DividendIncome, PaymentFrequency};
use drip_projection::projection::export::{to_json, write_yearly_csv_file};
use drip_projection::projection::{ProjectionConfig, ProjectionEngine};

/// Project a dividend holding year by year, with and without reinvestment
#[derive(Debug, Parser)]
#[command(name = "drip", version)]
struct Args {
    /// Cash invested at the start
    #[arg(long, env = "PROJECTION_INITIAL_INVESTMENT", default_value_t = 10_000.0)]
    initial_investment: f64,

    /// Cash added every month
    #[arg(long, env = "PROJECTION_MONTHLY_CONTRIBUTION", default_value_t = 100.0)]
    monthly_contribution: f64,

    /// Years to project
    #[arg(long, env = "PROJECTION_YEARS", default_value_t = 10)]
    years: u32,

    /// Take distributions as cash instead of reinvesting
    #[arg(long, env = "PROJECTION_NO_REINVEST")]
    no_reinvest: bool,

    /// Annual distribution growth, percent
    #[arg(long, env = "PROJECTION_DISTRIBUTION_GROWTH", default_value_t = 2.0, allow_hyphen_values = true)]
    distribution_growth: f64,

    /// Annual share price growth, percent
    #[arg(long, env = "PROJECTION_PRICE_GROWTH", default_value_t = 5.0, allow_hyphen_values = true)]
    price_growth: f64,

    /// Share price at the start
    #[arg(long, env = "PROJECTION_SHARE_PRICE", default_value_t = 54.25)]
    share_price: f64,

    /// Monthly distribution per share at the start
    #[arg(long, env = "PROJECTION_MONTHLY_DISTRIBUTION", default_value_t = 0.62)]
    monthly_distribution: f64,

    /// Write the yearly table to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of the table
    #[arg(long)]
    json: bool,
}

impl Args {
    fn to_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            initial_investment: self.initial_investment,
            monthly_contribution: self.monthly_contribution,
            years: self.years,
            reinvest_dividends: !self.no_reinvest,
            annual_distribution_growth_rate: self.distribution_growth / 100.0,
            annual_price_growth_rate: self.price_growth / 100.0,
            initial_share_price: self.share_price,
            initial_monthly_distribution_per_share: self.monthly_distribution,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let engine = ProjectionEngine::new(args.to_config());
    let config = engine.config();
    config.validate().context("Invalid projection inputs")?;

    let result = engine.run();

    if let Some(path) = &args.csv {
        write_yearly_csv_file(&result, path)
            .with_context(|| format!("Unable to write {}", path.display()))?;
    }

    if args.json {
        println!("{}", to_json(&result)?);
        return Ok(());
    }

    println!("DRIP Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    let income = DividendIncome::calculate(
        config.initial_investment,
        config.initial_share_price,
        config.initial_monthly_distribution_per_share * 12.0,
        PaymentFrequency::Monthly,
    );
    println!("Holding:");
    println!("  Initial Investment: ${:.2}", config.initial_investment);
    println!("  Share Price: ${:.2}", config.initial_share_price);
    println!("  Starting Shares: {:.4}", income.shares);
    println!("  Dividend Yield: {:.2}%", income.dividend_yield * 100.0);
    println!("  Starting Income: ${:.2}/yr (${:.2}/mo)", income.annual_income, income.monthly_income);
    println!(
        "  Reinvest Dividends: {}",
        if config.reinvest_dividends { "yes" } else { "no" }
    );
    println!();

    println!("Projection Results ({} years):", result.yearly.len());
    println!(
        "{:>4} {:>14} {:>10} {:>14} {:>12} {:>14} {:>14} {:>14}",
        "Year", "Shares", "Price", "Value", "Dividends", "Cum Divs", "Contributed", "Cash-Out Value"
    );
    println!("{}", "-".repeat(104));

    for (snapshot, cash) in result.yearly.iter().zip(&result.counterfactual_yearly) {
        println!(
            "{:>4} {:>14.4} {:>10.2} {:>14.2} {:>12.2} {:>14.2} {:>14.2} {:>14.2}",
            snapshot.year_index,
            snapshot.shares_end_of_year,
            snapshot.share_price_end_of_year,
            snapshot.portfolio_value,
            snapshot.distributions_this_year,
            snapshot.cumulative_distributions,
            snapshot.cumulative_contributions,
            cash.portfolio_value,
        );
    }

    let milestones: Vec<_> = [1, 5, 10, 20, 30]
        .iter()
        .filter_map(|&y| result.year(y))
        .collect();
    if milestones.len() > 1 {
        println!("\nKey Milestones:");
        for snapshot in milestones {
            println!(
                "  Year {:>2}: Value ${:.2}, Income ${:.2}/yr",
                snapshot.year_index, snapshot.portfolio_value, snapshot.annual_income_run_rate
            );
        }
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Final Portfolio Value: ${:.2}", summary.final_portfolio_value);
    println!("  Final Shares: {:.4}", summary.final_share_count);
    println!("  Total Contributed: ${:.2}", summary.total_contributed);
    println!("  Total Dividends: ${:.2}", summary.total_distributions);
    println!("  Total Gain: ${:.2}", summary.total_gain);
    println!("  Final Annual Income: ${:.2}", summary.final_annual_income);
    println!("  Yield on Contributions: {:.2}%", summary.yield_on_contributions * 100.0);
    println!("  Without Reinvestment: ${:.2}", summary.counterfactual_final_value);
    println!("  Reinvestment Advantage: ${:.2}", summary.reinvestment_advantage);

    if let Some(path) = &args.csv {
        println!("\nYearly table written to: {}", path.display());
    }

    Ok(())
}
