//! Dividend income for a single holding
//!
//! One-shot figures shown beside the DRIP projection: how much a position
//! pays per year, per month and per payment at a given dividend rate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How often a holding pays its dividend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl PaymentFrequency {
    pub fn payments_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::SemiAnnual => 2,
            PaymentFrequency::Annual => 1,
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::SemiAnnual => "semi-annual",
            PaymentFrequency::Annual => "annual",
        };
        f.write_str(name)
    }
}

impl FromStr for PaymentFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "12" => Ok(PaymentFrequency::Monthly),
            "quarterly" | "4" => Ok(PaymentFrequency::Quarterly),
            "semi-annual" | "semiannual" | "semi-annually" | "2" => Ok(PaymentFrequency::SemiAnnual),
            "annual" | "annually" | "yearly" | "1" => Ok(PaymentFrequency::Annual),
            other => Err(format!("Unknown payment frequency: {}", other)),
        }
    }
}

/// Income figures for one holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendIncome {
    pub shares: f64,
    pub annual_income: f64,
    pub monthly_income: f64,
    pub income_per_payment: f64,
    /// Annual dividend over share price (0.04 = 4%)
    pub dividend_yield: f64,
    pub frequency: PaymentFrequency,
}

impl DividendIncome {
    /// Income from investing `investment` at `share_price`.
    ///
    /// A non-positive share price yields an all-zero result.
    pub fn calculate(
        investment: f64,
        share_price: f64,
        annual_dividend_per_share: f64,
        frequency: PaymentFrequency,
    ) -> Self {
        if share_price <= 0.0 || !share_price.is_finite() {
            return Self::zero(frequency);
        }

        let shares = investment.max(0.0) / share_price;
        let annual_income = shares * annual_dividend_per_share.max(0.0);

        Self {
            shares,
            annual_income,
            monthly_income: annual_income / 12.0,
            income_per_payment: annual_income / f64::from(frequency.payments_per_year()),
            dividend_yield: annual_dividend_per_share.max(0.0) / share_price,
            frequency,
        }
    }

    fn zero(frequency: PaymentFrequency) -> Self {
        Self {
            shares: 0.0,
            annual_income: 0.0,
            monthly_income: 0.0,
            income_per_payment: 0.0,
            dividend_yield: 0.0,
            frequency,
        }
    }
}

/// Annual income as a fraction of the capital paid in
pub fn yield_on_cost(annual_income: f64, cost_basis: f64) -> f64 {
    if cost_basis <= 0.0 {
        0.0
    } else {
        annual_income / cost_basis
    }
}
