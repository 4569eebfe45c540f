//! Plain-text cash-flow report adapter.

use crate::domain::accountant::LedgerSummary;
use crate::domain::error::DriftsimError;
use crate::ports::report_port::ReportPort;
use std::io::Write;

pub struct TextReportAdapter;

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        summary: &LedgerSummary,
        cash_position: &[f64],
        out: &mut dyn Write,
    ) -> Result<(), DriftsimError> {
        writeln!(out, "transactions performed: {}", summary.transactions)?;
        writeln!(out, "overall profit or loss: {:.2}", summary.net_profit)?;
        writeln!(out, "total spent: {:.2}", summary.total_spent)?;
        writeln!(out, "total earned: {:.2}", summary.total_earned)?;
        if let Some(final_cash) = cash_position.last() {
            writeln!(
                out,
                "final cash position after {} days: {:.2}",
                cash_position.len(),
                final_cash
            )?;
        }
        Ok(())
    }
}
