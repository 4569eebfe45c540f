//! Ledger access port trait.

use crate::domain::error::DriftsimError;
use crate::domain::ledger::LedgerEntry;

/// Append-only transaction log. Append is the only mutation; read-back
/// returns entries in append order.
pub trait LedgerPort {
    fn append(&mut self, entry: &LedgerEntry) -> Result<(), DriftsimError>;

    fn read_all(&self) -> Result<Vec<LedgerEntry>, DriftsimError>;
}
