//! Plain-text ledger file adapter.
//!
//! One entry per line in emission order, no header. The file is created on
//! first append. Each append opens and closes the file within the call, so no
//! descriptor outlives an operation even on error paths.

use crate::domain::error::DriftsimError;
use crate::domain::ledger::LedgerEntry;
use crate::ports::ledger_port::LedgerPort;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub struct FileLedgerAdapter {
    path: PathBuf,
}

impl FileLedgerAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl LedgerPort for FileLedgerAdapter {
    fn append(&mut self, entry: &LedgerEntry) -> Result<(), DriftsimError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry.to_line())?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<LedgerEntry>, DriftsimError> {
        let content = std::fs::read_to_string(&self.path)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut entries = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let line = index + 1;
            let record = result.map_err(|e| DriftsimError::DataFormat {
                line,
                reason: e.to_string(),
            })?;
            let fields: Vec<&str> = record.iter().collect();
            entries.push(LedgerEntry::from_fields(&fields, line)?);
        }
        Ok(entries)
    }
}
