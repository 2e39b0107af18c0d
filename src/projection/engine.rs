//! Core projection engine for year-by-year DRIP projections

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::schedule::{RateSchedule, YearRates};
use super::snapshots::{ProjectionResult, YearSnapshot};
use super::state::{apply_month, PortfolioState, MIN_SHARE_PRICE};
use crate::error::ConfigError;

/// Longest projection accepted at the input boundary
pub const MAX_PROJECTION_YEARS: u32 = 100;

const MONTHS_PER_YEAR: u32 = 12;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionConfig {
    /// Cash invested at the start
    pub initial_investment: f64,

    /// Cash added at the start of every month
    pub monthly_contribution: f64,

    /// Number of years to project
    pub years: u32,

    /// Buy shares with each distribution instead of taking cash
    pub reinvest_dividends: bool,

    /// Annual growth of the per-share distribution (0.02 = 2%)
    pub annual_distribution_growth_rate: f64,

    /// Annual share price growth (0.05 = 5%)
    pub annual_price_growth_rate: f64,

    pub initial_share_price: f64,

    pub initial_monthly_distribution_per_share: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            initial_investment: 10_000.0,
            monthly_contribution: 100.0,
            years: 10,
            reinvest_dividends: true,
            annual_distribution_growth_rate: 0.02,
            annual_price_growth_rate: 0.05,
            initial_share_price: 54.25,
            initial_monthly_distribution_per_share: 0.62,
        }
    }
}

impl ProjectionConfig {
    /// Check the config before it enters the engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        let amounts = [
            ("initialInvestment", self.initial_investment),
            ("monthlyContribution", self.monthly_contribution),
            ("initialSharePrice", self.initial_share_price),
            (
                "initialMonthlyDistributionPerShare",
                self.initial_monthly_distribution_per_share,
            ),
            ("annualDistributionGrowthRate", self.annual_distribution_growth_rate),
            ("annualPriceGrowthRate", self.annual_price_growth_rate),
        ];
        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        if self.years == 0 {
            return Err(ConfigError::ZeroYears);
        }
        if self.years > MAX_PROJECTION_YEARS {
            return Err(ConfigError::TooManyYears {
                years: self.years,
                max: MAX_PROJECTION_YEARS,
            });
        }
        if self.initial_share_price <= 0.0 {
            return Err(ConfigError::NonPositiveSharePrice);
        }

        let non_negative = [
            ("initialInvestment", self.initial_investment),
            ("monthlyContribution", self.monthly_contribution),
            (
                "initialMonthlyDistributionPerShare",
                self.initial_monthly_distribution_per_share,
            ),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field });
            }
        }

        let rates = [
            ("annualDistributionGrowthRate", self.annual_distribution_growth_rate),
            ("annualPriceGrowthRate", self.annual_price_growth_rate),
        ];
        for (field, rate) in rates {
            if rate < -1.0 {
                return Err(ConfigError::GrowthRateBelowTotalLoss { field, rate });
            }
        }

        Ok(())
    }

    /// Contributed principal at the end of `year`
    pub fn contributions_through_year(&self, year: u32) -> f64 {
        self.initial_investment
            + self.monthly_contribution.max(0.0) * f64::from(MONTHS_PER_YEAR) * f64::from(year)
    }
}

/// Run one projection year: twelve monthly steps, a snapshot, then growth.
///
/// The snapshot uses the price and distribution rate in effect during the
/// year; the returned state carries next year's rates.
pub fn apply_year(
    state: &PortfolioState,
    year_index: u32,
    config: &ProjectionConfig,
    reinvest: bool,
    rates: YearRates,
) -> (PortfolioState, YearSnapshot) {
    let mut next = *state;
    let distributions_before = next.total_distributions_received;

    for _month in 1..=MONTHS_PER_YEAR {
        next = apply_month(&next, config.monthly_contribution, reinvest);
    }

    // Re-anchor so repeated monthly additions never drift from the closed form
    next.total_contributed = config.contributions_through_year(year_index);

    let snapshot = YearSnapshot {
        year_index,
        shares_end_of_year: next.shares,
        share_price_end_of_year: next.share_price,
        portfolio_value: next.market_value(),
        distributions_this_year: next.total_distributions_received - distributions_before,
        cumulative_distributions: next.total_distributions_received,
        cumulative_contributions: next.total_contributed,
        monthly_distribution_per_share: next.monthly_distribution_per_share,
        annual_income_run_rate: next.monthly_distribution() * f64::from(MONTHS_PER_YEAR),
    };

    let grown_price = next.share_price * (1.0 + rates.price_growth);
    if grown_price < MIN_SHARE_PRICE {
        if next.share_price > MIN_SHARE_PRICE {
            warn!(
                "Share price fell to {:.6} after year {}; holding at floor {}",
                grown_price, year_index, MIN_SHARE_PRICE
            );
        }
        next.share_price = MIN_SHARE_PRICE;
    } else {
        next.share_price = grown_price;
    }
    next.monthly_distribution_per_share =
        (next.monthly_distribution_per_share * (1.0 + rates.distribution_growth)).max(0.0);

    (next, snapshot)
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
    schedule: RateSchedule,
}

impl ProjectionEngine {
    /// Engine with a constant rate schedule taken from the config
    pub fn new(config: ProjectionConfig) -> Self {
        let schedule = RateSchedule::constant(
            config.annual_price_growth_rate,
            config.annual_distribution_growth_rate,
        );
        Self { config, schedule }
    }

    /// Engine with explicit per-year growth rates. The config's growth rate
    /// fields are ignored.
    pub fn with_schedule(config: ProjectionConfig, schedule: RateSchedule) -> Self {
        Self { config, schedule }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the configured scenario and its cash-out counterfactual
    pub fn run(&self) -> ProjectionResult {
        let (yearly, end_state) = self.run_scenario(self.config.reinvest_dividends);
        let (counterfactual_yearly, counterfactual_end) = self.run_scenario(false);

        let final_portfolio_value = self.final_value(&yearly);
        let counterfactual_final_value = self.final_value(&counterfactual_yearly);

        debug!(
            "Projected {} years: final value {:.2}, counterfactual {:.2}, cash-out shares {:.4}",
            yearly.len(),
            final_portfolio_value,
            counterfactual_final_value,
            counterfactual_end.shares
        );

        ProjectionResult {
            yearly,
            final_portfolio_value,
            final_share_count: end_state.shares,
            total_distributions: end_state.total_distributions_received,
            total_contributed: end_state.total_contributed,
            counterfactual_final_value,
            counterfactual_yearly,
            reinvestment_advantage: final_portfolio_value - counterfactual_final_value,
        }
    }

    /// Fold `apply_year` over the projection horizon from a fresh state
    fn run_scenario(&self, reinvest: bool) -> (Vec<YearSnapshot>, PortfolioState) {
        let mut state = PortfolioState::from_config(&self.config);
        let mut yearly = Vec::with_capacity(self.config.years.min(MAX_PROJECTION_YEARS) as usize);

        for year in 1..=self.config.years {
            let (next, snapshot) = apply_year(
                &state,
                year,
                &self.config,
                reinvest,
                self.schedule.rates_for_year(year),
            );
            state = next;
            yearly.push(snapshot);
        }

        (yearly, state)
    }

    fn final_value(&self, yearly: &[YearSnapshot]) -> f64 {
        yearly
            .last()
            .map(|y| y.portfolio_value)
            .unwrap_or(self.config.initial_investment)
    }
}

/// Run a single projection with a constant rate schedule
pub fn project(config: &ProjectionConfig) -> ProjectionResult {
    ProjectionEngine::new(config.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn example_config() -> ProjectionConfig {
        ProjectionConfig {
            initial_investment: 10_000.0,
            monthly_contribution: 100.0,
            years: 10,
            reinvest_dividends: true,
            annual_distribution_growth_rate: 0.02,
            annual_price_growth_rate: 0.05,
            initial_share_price: 54.25,
            initial_monthly_distribution_per_share: 0.62,
        }
    }

    #[test]
    fn test_projection_runs() {
        let result = project(&example_config());

        assert_eq!(result.yearly.len(), 10);
        assert_eq!(result.yearly[9].year_index, 10);
        assert!(result.final_portfolio_value > 10_000.0 && result.final_portfolio_value < 1_000_000.0);
        assert!(result.final_portfolio_value > result.counterfactual_final_value);
        assert!(result.reinvestment_advantage > 0.0);
    }

    #[test]
    fn test_reinvest_beats_cash_out_run() {
        let drip = project(&example_config());
        let cash = project(&ProjectionConfig {
            reinvest_dividends: false,
            ..example_config()
        });

        assert!(drip.final_portfolio_value > cash.final_portfolio_value);
        // Counterfactual of the DRIP run is the cash-out run
        assert_eq!(drip.counterfactual_final_value, cash.final_portfolio_value);
        assert_eq!(cash.reinvestment_advantage, 0.0);
    }

    #[test]
    fn test_no_contribution_keeps_principal_flat() {
        let config = ProjectionConfig {
            monthly_contribution: 0.0,
            reinvest_dividends: false,
            ..example_config()
        };
        let result = project(&config);

        for snapshot in &result.yearly {
            assert_eq!(snapshot.cumulative_contributions, config.initial_investment);
        }
        assert_eq!(result.total_contributed, config.initial_investment);
    }

    #[test]
    fn test_zero_years_returns_initial_investment() {
        let config = ProjectionConfig {
            years: 0,
            ..example_config()
        };
        let result = project(&config);

        assert!(result.yearly.is_empty());
        assert!(result.counterfactual_yearly.is_empty());
        assert_eq!(result.final_portfolio_value, 10_000.0);
        assert_eq!(result.counterfactual_final_value, 10_000.0);
        assert_eq!(result.reinvestment_advantage, 0.0);
    }

    #[test]
    fn test_first_year_matches_hand_calculation() {
        let config = ProjectionConfig {
            initial_investment: 1_200.0,
            monthly_contribution: 0.0,
            years: 1,
            reinvest_dividends: false,
            annual_distribution_growth_rate: 0.10,
            annual_price_growth_rate: 0.50,
            initial_share_price: 12.0,
            initial_monthly_distribution_per_share: 0.1,
        };
        let result = project(&config);
        let year = &result.yearly[0];

        // 100 shares paying 0.1 a month, no reinvestment, price unchanged within the year
        assert_relative_eq!(year.shares_end_of_year, 100.0);
        assert_relative_eq!(year.distributions_this_year, 120.0, epsilon = 1e-9);
        assert_relative_eq!(year.share_price_end_of_year, 12.0);
        assert_relative_eq!(year.portfolio_value, 1_200.0);
        assert_relative_eq!(year.annual_income_run_rate, 120.0, epsilon = 1e-9);
    }

    #[test]
    fn test_growth_applies_after_snapshot() {
        let config = ProjectionConfig {
            years: 2,
            ..example_config()
        };
        let result = project(&config);

        assert_relative_eq!(result.yearly[0].share_price_end_of_year, 54.25);
        assert_relative_eq!(result.yearly[1].share_price_end_of_year, 54.25 * 1.05, max_relative = 1e-12);
        assert_relative_eq!(result.yearly[0].monthly_distribution_per_share, 0.62);
        assert_relative_eq!(result.yearly[1].monthly_distribution_per_share, 0.62 * 1.02, max_relative = 1e-12);
    }

    #[test]
    fn test_total_loss_rate_floors_price() {
        let config = ProjectionConfig {
            years: 3,
            annual_price_growth_rate: -1.0,
            ..example_config()
        };
        let result = project(&config);

        assert_eq!(result.yearly[1].share_price_end_of_year, MIN_SHARE_PRICE);
        assert!(result.yearly.iter().all(|y| y.shares_end_of_year.is_finite()));
        assert!(result.final_portfolio_value.is_finite());
    }

    #[test]
    fn test_total_loss_rate_stays_finite_over_long_horizon() {
        let config = ProjectionConfig {
            years: 12,
            annual_price_growth_rate: -1.0,
            ..example_config()
        };
        assert!(config.validate().is_ok());
        let result = project(&config);

        assert!(result.is_finite());
        assert!(result.final_portfolio_value.is_finite());
        assert!(result.final_share_count.is_finite());
        // Year 1 is priced normally, every later year sits at the floor and pays nothing
        assert!(result.yearly[0].distributions_this_year > 0.0);
        for snapshot in &result.yearly[1..] {
            assert_eq!(snapshot.distributions_this_year, 0.0);
        }
        assert!(result.final_portfolio_value >= result.counterfactual_final_value);
    }

    #[test]
    fn test_explicit_schedule_is_shared_by_both_scenarios() {
        let schedule = RateSchedule::from_yearly(vec![
            YearRates::new(0.20, 0.0),
            YearRates::new(-0.10, 0.05),
        ]);
        let engine = ProjectionEngine::with_schedule(example_config(), schedule);
        let result = engine.run();

        for (drip, cash) in result.yearly.iter().zip(&result.counterfactual_yearly) {
            assert_eq!(drip.share_price_end_of_year, cash.share_price_end_of_year);
            assert_eq!(
                drip.monthly_distribution_per_share,
                cash.monthly_distribution_per_share
            );
        }
        assert_relative_eq!(result.yearly[2].share_price_end_of_year, 54.25 * 1.2 * 0.9, max_relative = 1e-12);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(ProjectionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let base = example_config();

        let cases = [
            (ProjectionConfig { years: 0, ..base.clone() }, ConfigError::ZeroYears),
            (
                ProjectionConfig { years: 101, ..base.clone() },
                ConfigError::TooManyYears { years: 101, max: 100 },
            ),
            (
                ProjectionConfig { initial_share_price: 0.0, ..base.clone() },
                ConfigError::NonPositiveSharePrice,
            ),
            (
                ProjectionConfig { monthly_contribution: -1.0, ..base.clone() },
                ConfigError::Negative { field: "monthlyContribution" },
            ),
            (
                ProjectionConfig { initial_investment: f64::NAN, ..base.clone() },
                ConfigError::NonFinite { field: "initialInvestment" },
            ),
            (
                ProjectionConfig { annual_price_growth_rate: -1.5, ..base.clone() },
                ConfigError::GrowthRateBelowTotalLoss {
                    field: "annualPriceGrowthRate",
                    rate: -1.5,
                },
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_config_json_uses_form_field_names() {
        let json = r#"{"initialInvestment": 500, "years": 3, "reinvestDividends": false}"#;
        let config: ProjectionConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.initial_investment, 500.0);
        assert_eq!(config.years, 3);
        assert!(!config.reinvest_dividends);
        // Missing fields fall back to defaults
        assert_eq!(config.initial_share_price, 54.25);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_shares_never_decrease(
            initial in 0u32..100_000,
            monthly in 0u32..2_000,
            years in 1u32..40,
            price_cents in 100u32..50_000,
            dps_mills in 0u32..2_000,
            price_bp in -3_000i32..3_000,
            dist_bp in -3_000i32..3_000,
            reinvest in proptest::bool::ANY,
        ) {
            let config = ProjectionConfig {
                initial_investment: f64::from(initial),
                monthly_contribution: f64::from(monthly),
                years,
                reinvest_dividends: reinvest,
                annual_distribution_growth_rate: f64::from(dist_bp) / 10_000.0,
                annual_price_growth_rate: f64::from(price_bp) / 10_000.0,
                initial_share_price: f64::from(price_cents) / 100.0,
                initial_monthly_distribution_per_share: f64::from(dps_mills) / 1_000.0,
            };
            let result = project(&config);

            prop_assert_eq!(result.yearly.len(), years as usize);
            for pair in result.yearly.windows(2) {
                prop_assert!(pair[1].shares_end_of_year >= pair[0].shares_end_of_year);
                prop_assert_eq!(pair[1].year_index, pair[0].year_index + 1);
            }
            for snapshot in &result.yearly {
                let expected = config.initial_investment
                    + config.monthly_contribution * 12.0 * f64::from(snapshot.year_index);
                prop_assert!((snapshot.cumulative_contributions - expected).abs() <= 1e-9 * expected.max(1.0));
            }
        }

        #[test]
        fn prop_reinvesting_never_loses_to_cash_out(
            initial in 1u32..100_000,
            monthly in 0u32..2_000,
            years in 1u32..40,
            price_cents in 100u32..50_000,
            dps_mills in 1u32..2_000,
            price_bp in -2_000i32..3_000,
            dist_bp in -3_000i32..3_000,
        ) {
            let config = ProjectionConfig {
                initial_investment: f64::from(initial),
                monthly_contribution: f64::from(monthly),
                years,
                reinvest_dividends: true,
                annual_distribution_growth_rate: f64::from(dist_bp) / 10_000.0,
                annual_price_growth_rate: f64::from(price_bp) / 10_000.0,
                initial_share_price: f64::from(price_cents) / 100.0,
                initial_monthly_distribution_per_share: f64::from(dps_mills) / 1_000.0,
            };
            let result = project(&config);

            prop_assert!(result.final_portfolio_value >= result.counterfactual_final_value);
        }

        #[test]
        fn prop_repeated_runs_are_identical(
            initial in 0u32..50_000,
            monthly in 0u32..1_000,
            years in 0u32..30,
        ) {
            let config = ProjectionConfig {
                initial_investment: f64::from(initial),
                monthly_contribution: f64::from(monthly),
                years,
                ..ProjectionConfig::default()
            };
            let engine = ProjectionEngine::new(config);
            let first = engine.run();
            let second = engine.run();

            prop_assert_eq!(first.final_portfolio_value.to_bits(), second.final_portfolio_value.to_bits());
            prop_assert_eq!(first, second);
        }
    }
}
