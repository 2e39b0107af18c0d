//! Raw form field values and their coercion into a `ProjectionConfig`
//!
//! Form text is never an error: anything that does not read as a usable
//! number becomes 0, the same way the calculator page treats it.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::projection::{ProjectionConfig, MAX_PROJECTION_YEARS};

/// Field values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub initial_investment: String,
    pub monthly_contribution: String,
    pub years: String,
    pub reinvest_dividends: bool,
    /// Percent, e.g. "2" or "2%"
    pub distribution_growth_pct: String,
    /// Percent, e.g. "5" or "-3.5%"
    pub price_growth_pct: String,
    pub share_price: String,
    pub monthly_distribution_per_share: String,
}

impl FormInput {
    /// Coerce every field; never fails
    pub fn to_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            initial_investment: parse_amount(&self.initial_investment),
            monthly_contribution: parse_amount(&self.monthly_contribution),
            years: parse_years(&self.years),
            reinvest_dividends: self.reinvest_dividends,
            annual_distribution_growth_rate: parse_percent(&self.distribution_growth_pct),
            annual_price_growth_rate: parse_percent(&self.price_growth_pct),
            initial_share_price: parse_amount(&self.share_price),
            initial_monthly_distribution_per_share: parse_amount(
                &self.monthly_distribution_per_share,
            ),
        }
    }

    /// Coerce, then reject configs the engine should not run (zero years,
    /// zero share price)
    pub fn to_validated_config(&self) -> Result<ProjectionConfig, ConfigError> {
        let config = self.to_config();
        config.validate()?;
        Ok(config)
    }
}

fn clean(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%' | ' ' | '_'))
        .collect()
}

fn parse_number(text: &str) -> Option<f64> {
    clean(text).parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Money or share amount: unparseable, NaN, infinite or negative gives 0
pub fn parse_amount(text: &str) -> f64 {
    parse_number(text).map(|v| v.max(0.0)).unwrap_or(0.0)
}

/// Percent text to a fraction. Negative rates are kept but floored at -100%.
pub fn parse_percent(text: &str) -> f64 {
    parse_number(text)
        .map(|pct| (pct / 100.0).max(-1.0))
        .unwrap_or(0.0)
}

/// Whole years, at most `MAX_PROJECTION_YEARS`; fractional input is truncated
pub fn parse_years(text: &str) -> u32 {
    parse_number(text)
        .filter(|v| *v >= 0.0)
        .map(|v| v.trunc().min(f64::from(MAX_PROJECTION_YEARS)) as u32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_coerces_bad_input() {
        assert_eq!(parse_amount("$10,000.50"), 10_000.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-250"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("5"), 0.05);
        assert_eq!(parse_percent("2%"), 0.02);
        assert_eq!(parse_percent("-3.5"), -0.035);
        assert_eq!(parse_percent("-250"), -1.0);
        assert_eq!(parse_percent("x"), 0.0);
    }

    #[test]
    fn test_parse_years() {
        assert_eq!(parse_years("10"), 10);
        assert_eq!(parse_years("7.9"), 7);
        assert_eq!(parse_years("-3"), 0);
        assert_eq!(parse_years("ten"), 0);
        assert_eq!(parse_years("4294967295"), MAX_PROJECTION_YEARS);
        assert_eq!(parse_years("1e12"), MAX_PROJECTION_YEARS);
    }

    #[test]
    fn test_form_to_config() {
        let form = FormInput {
            initial_investment: "10,000".into(),
            monthly_contribution: "100".into(),
            years: "10".into(),
            reinvest_dividends: true,
            distribution_growth_pct: "2".into(),
            price_growth_pct: "5%".into(),
            share_price: "$54.25".into(),
            monthly_distribution_per_share: "0.62".into(),
        };

        let config = form.to_validated_config().unwrap();
        assert_eq!(config, ProjectionConfig::default());
    }

    #[test]
    fn test_blank_form_is_rejected_not_run() {
        let form = FormInput::default();
        let config = form.to_config();

        assert_eq!(config.initial_investment, 0.0);
        assert_eq!(config.years, 0);
        assert_eq!(form.to_validated_config(), Err(ConfigError::ZeroYears));
    }
}
