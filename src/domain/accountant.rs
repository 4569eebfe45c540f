//! Portfolio cash-flow reconstruction from the ledger.
//!
//! The ledger is the single source of truth: the running cash position is
//! rebuilt in full on every pass by bucketing net cash amounts per day and
//! prefix-summing. Entries need not be day-sorted — the per-day accumulation
//! is a plain sum, so ledger order never matters.

use crate::domain::error::DriftsimError;
use crate::domain::ledger::LedgerEntry;

/// Running cash balance, one value per simulated day.
pub type CashPosition = Vec<f64>;

/// Aggregate statistics over a ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub transactions: usize,
    /// Sum of all net cash amounts.
    pub net_profit: f64,
    /// Sum of the negative amounts (money out, reported as a negative total).
    pub total_spent: f64,
    /// Sum of the positive amounts (money in).
    pub total_earned: f64,
}

impl LedgerSummary {
    pub fn compute(entries: &[LedgerEntry]) -> Self {
        let mut net_profit = 0.0;
        let mut total_spent = 0.0;
        let mut total_earned = 0.0;

        for entry in entries {
            net_profit += entry.net_cash;
            if entry.net_cash > 0.0 {
                total_earned += entry.net_cash;
            } else {
                total_spent += entry.net_cash;
            }
        }

        LedgerSummary {
            transactions: entries.len(),
            net_profit,
            total_spent,
            total_earned,
        }
    }
}

/// Rebuild the daily cash position over `duration` days from ledger entries.
///
/// An entry whose day falls outside the duration is malformed for this run
/// and aborts the reconstruction rather than being dropped.
pub fn reconstruct_cash_flow(
    duration: usize,
    entries: &[LedgerEntry],
) -> Result<CashPosition, DriftsimError> {
    let mut daily_flow = vec![0.0; duration];
    for (index, entry) in entries.iter().enumerate() {
        if entry.day >= duration {
            return Err(DriftsimError::DataFormat {
                line: index + 1,
                reason: format!(
                    "entry day {} is outside the {duration}-day duration",
                    entry.day
                ),
            });
        }
        daily_flow[entry.day] += entry.net_cash;
    }

    let mut cash = vec![0.0; duration];
    if duration > 0 {
        cash[0] = daily_flow[0];
        for day in 1..duration {
            cash[day] = cash[day - 1] + daily_flow[day];
        }
    }
    Ok(cash)
}
