//! Yearly growth rates for share price and per-share distribution

use serde::{Deserialize, Serialize};

/// Growth rates applied at the end of one projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRates {
    /// Annual share price growth (0.05 = 5%)
    pub price_growth: f64,
    /// Annual growth of the per-share distribution
    pub distribution_growth: f64,
}

impl YearRates {
    pub fn new(price_growth: f64, distribution_growth: f64) -> Self {
        Self {
            price_growth,
            distribution_growth,
        }
    }
}

/// Immutable schedule of growth rates, one entry per projection year.
///
/// Years past the end of an explicit schedule reuse the last entry, so a
/// single-entry schedule is a constant-rate schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSchedule {
    rates: Vec<YearRates>,
}

impl RateSchedule {
    /// Same rates for every year
    pub fn constant(price_growth: f64, distribution_growth: f64) -> Self {
        Self {
            rates: vec![YearRates::new(price_growth, distribution_growth)],
        }
    }

    /// Explicit per-year rates, year 1 first. An empty list means no growth.
    pub fn from_yearly(rates: Vec<YearRates>) -> Self {
        if rates.is_empty() {
            return Self::constant(0.0, 0.0);
        }
        Self { rates }
    }

    /// Rates in effect at the end of `year` (1-indexed)
    pub fn rates_for_year(&self, year: u32) -> YearRates {
        let idx = (year.max(1) - 1) as usize;
        // from_yearly guarantees at least one entry
        self.rates
            .get(idx)
            .or_else(|| self.rates.last())
            .copied()
            .unwrap_or(YearRates::new(0.0, 0.0))
    }
}
