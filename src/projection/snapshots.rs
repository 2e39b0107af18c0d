//! Output structures for projections

use serde::{Deserialize, Serialize};

use crate::income::yield_on_cost;

/// Portfolio state recorded at the end of one projection year, before that
/// year's growth rates are applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    pub year_index: u32,
    pub shares_end_of_year: f64,
    pub share_price_end_of_year: f64,
    pub portfolio_value: f64,
    pub distributions_this_year: f64,
    pub cumulative_distributions: f64,
    pub cumulative_contributions: f64,

    /// Per-share monthly distribution paid during this year
    pub monthly_distribution_per_share: f64,
    /// Yearly income the end-of-year holding pays at this year's rate
    pub annual_income_run_rate: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// One snapshot per simulated year, in chronological order
    pub yearly: Vec<YearSnapshot>,

    pub final_portfolio_value: f64,
    pub final_share_count: f64,
    pub total_distributions: f64,
    pub total_contributed: f64,

    /// Final value of the same schedule with distributions taken as cash
    pub counterfactual_final_value: f64,

    /// Yearly series of the cash-out scenario
    pub counterfactual_yearly: Vec<YearSnapshot>,

    /// `final_portfolio_value - counterfactual_final_value`, unclamped
    pub reinvestment_advantage: f64,
}

impl YearSnapshot {
    pub fn is_finite(&self) -> bool {
        [
            self.shares_end_of_year,
            self.share_price_end_of_year,
            self.portfolio_value,
            self.distributions_this_year,
            self.cumulative_distributions,
            self.cumulative_contributions,
            self.monthly_distribution_per_share,
            self.annual_income_run_rate,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

impl ProjectionResult {
    /// Whether every figure is a finite number. Extreme price declines with
    /// reinvestment can overflow the share count.
    pub fn is_finite(&self) -> bool {
        [
            self.final_portfolio_value,
            self.final_share_count,
            self.total_distributions,
            self.total_contributed,
            self.counterfactual_final_value,
            self.reinvestment_advantage,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.yearly.iter().all(YearSnapshot::is_finite)
            && self.counterfactual_yearly.iter().all(YearSnapshot::is_finite)
    }

    /// Reinvestment advantage floored at zero for display
    pub fn display_reinvestment_advantage(&self) -> f64 {
        self.reinvestment_advantage.max(0.0)
    }

    /// Snapshot for a given year (1-indexed)
    pub fn year(&self, year_index: u32) -> Option<&YearSnapshot> {
        year_index
            .checked_sub(1)
            .and_then(|idx| self.yearly.get(idx as usize))
    }

    /// Headline figures
    pub fn summary(&self) -> ProjectionSummary {
        let final_annual_income = self
            .yearly
            .last()
            .map(|y| y.annual_income_run_rate)
            .unwrap_or(0.0);

        ProjectionSummary {
            total_years: self.yearly.len() as u32,
            final_portfolio_value: self.final_portfolio_value,
            final_share_count: self.final_share_count,
            total_contributed: self.total_contributed,
            total_distributions: self.total_distributions,
            total_gain: self.final_portfolio_value - self.total_contributed,
            final_annual_income,
            yield_on_contributions: yield_on_cost(final_annual_income, self.total_contributed),
            counterfactual_final_value: self.counterfactual_final_value,
            reinvestment_advantage: self.display_reinvestment_advantage(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub final_portfolio_value: f64,
    pub final_share_count: f64,
    pub total_contributed: f64,
    pub total_distributions: f64,
    pub total_gain: f64,
    pub final_annual_income: f64,
    pub yield_on_contributions: f64,
    pub counterfactual_final_value: f64,
    pub reinvestment_advantage: f64,
}
