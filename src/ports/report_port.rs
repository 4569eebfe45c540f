//! Report generation port trait.

use crate::domain::accountant::LedgerSummary;
use crate::domain::error::DriftsimError;
use std::io::Write;

/// Port for writing a cash-flow report for one ledger.
pub trait ReportPort {
    fn write(
        &self,
        summary: &LedgerSummary,
        cash_position: &[f64],
        out: &mut dyn Write,
    ) -> Result<(), DriftsimError>;
}
