//! Price path and price matrix types.
//!
//! A price path is one stock's daily closing prices. Days where the simulated
//! price went non-positive hold `f64::NAN`; the sentinel propagates through
//! downstream arithmetic and marks the day as untradeable.

use crate::domain::error::DriftsimError;

/// Daily closing prices for a single stock, day 0 first.
pub type PricePath = Vec<f64>;

/// Closing prices for several stocks over a shared day axis.
///
/// Stored column-major: one [`PricePath`] per stock, all of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMatrix {
    columns: Vec<PricePath>,
    days: usize,
}

impl PriceMatrix {
    pub fn from_columns(columns: Vec<PricePath>) -> Result<Self, DriftsimError> {
        if columns.is_empty() {
            return Err(DriftsimError::InvalidParameter {
                reason: "price matrix needs at least one stock column".into(),
            });
        }
        let days = columns[0].len();
        if days == 0 {
            return Err(DriftsimError::InvalidParameter {
                reason: "price columns are empty".into(),
            });
        }
        if columns.iter().any(|c| c.len() != days) {
            return Err(DriftsimError::InvalidParameter {
                reason: "price columns have unequal lengths".into(),
            });
        }
        Ok(PriceMatrix { columns, days })
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn stocks(&self) -> usize {
        self.columns.len()
    }

    pub fn price(&self, day: usize, stock: usize) -> f64 {
        self.columns[stock][day]
    }

    pub fn column(&self, stock: usize) -> &[f64] {
        &self.columns[stock]
    }
}

/// Requested initial price / volatility targets for price table column selection.
///
/// When both lists are given, initial price wins and volatility is ignored
/// (the report records the ignore so the caller can surface it).
#[derive(Debug, Clone, Default)]
pub struct SelectionTargets {
    pub initial_prices: Option<Vec<f64>>,
    pub volatilities: Option<Vec<f64>>,
}

/// Outcome of nearest-match column selection against a price table.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionReport {
    pub columns: Vec<usize>,
    pub initial_prices: Vec<f64>,
    pub volatilities: Vec<f64>,
    pub volatility_ignored: bool,
}

impl SelectionReport {
    /// Human-readable selection message, mirrored on stdout by the CLI.
    pub fn message(&self) -> String {
        let mut msg = format!(
            "Found data with initial prices {:?} and volatilities {:?}.",
            self.initial_prices, self.volatilities
        );
        if self.volatility_ignored {
            msg.push_str("\nInput argument volatility ignored.");
        }
        msg
    }
}
