#![allow(dead_code)]

use driftsim::domain::error::DriftsimError;
use driftsim::domain::ledger::{LedgerEntry, TransactionType};
use driftsim::domain::price::PriceMatrix;
use driftsim::ports::ledger_port::LedgerPort;

/// In-memory ledger for tests that don't need a file on disk.
pub struct MemoryLedger {
    pub entries: Vec<LedgerEntry>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl LedgerPort for MemoryLedger {
    fn append(&mut self, entry: &LedgerEntry) -> Result<(), DriftsimError> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<LedgerEntry>, DriftsimError> {
        Ok(self.entries.clone())
    }
}

pub fn make_matrix(columns: Vec<Vec<f64>>) -> PriceMatrix {
    PriceMatrix::from_columns(columns).unwrap()
}

pub fn make_entry(
    transaction_type: TransactionType,
    day: usize,
    stock: usize,
    shares: u64,
    net_cash: f64,
) -> LedgerEntry {
    LedgerEntry {
        transaction_type,
        day,
        stock,
        shares,
        net_cash,
    }
}
