//! Portfolio state tracking for a single projection run

use super::engine::ProjectionConfig;

/// Smallest share price the projection will hold.
///
/// A growth rate of -100% (or a long run of steep negative rates) would
/// otherwise drive the price to zero and the next contribution would divide
/// by it.
pub const MIN_SHARE_PRICE: f64 = 1e-6;

/// State of the holding at a point in time during projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioState {
    /// Shares held (fractional)
    pub shares: f64,

    /// Share price in effect for the current year
    pub share_price: f64,

    /// Distribution paid per share each month, in effect for the current year
    pub monthly_distribution_per_share: f64,

    /// Cash put in so far, including the initial investment
    pub total_contributed: f64,

    /// Distributions credited so far, reinvested or not
    pub total_distributions_received: f64,
}

impl PortfolioState {
    /// Initialize state at projection start
    pub fn from_config(config: &ProjectionConfig) -> Self {
        let share_price = config.initial_share_price.max(MIN_SHARE_PRICE);
        Self {
            shares: config.initial_investment / share_price,
            share_price,
            monthly_distribution_per_share: config.initial_monthly_distribution_per_share,
            total_contributed: config.initial_investment,
            total_distributions_received: 0.0,
        }
    }

    /// Market value of the holding at the current price
    pub fn market_value(&self) -> f64 {
        self.shares * self.share_price
    }

    /// Distribution the current holding would pay this month
    pub fn monthly_distribution(&self) -> f64 {
        self.shares * self.monthly_distribution_per_share
    }
}

/// Apply one month of contribution and distribution.
///
/// The contribution buys shares before the distribution is credited, so the
/// new shares earn this month's distribution. A holding priced at the floor
/// pays nothing and buys nothing with distributions.
pub fn apply_month(state: &PortfolioState, monthly_contribution: f64, reinvest: bool) -> PortfolioState {
    let mut next = *state;

    if monthly_contribution > 0.0 {
        next.shares += monthly_contribution / next.share_price;
        next.total_contributed += monthly_contribution;
    }

    if next.share_price <= MIN_SHARE_PRICE {
        return next;
    }

    let distribution = next.monthly_distribution();
    next.total_distributions_received += distribution;

    if reinvest {
        next.shares += distribution / next.share_price;
    }

    next
}
