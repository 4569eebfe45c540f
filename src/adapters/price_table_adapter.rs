//! Whitespace-separated price table adapter.
//!
//! Table layout: first row holds per-column volatility metadata, each
//! following row holds one day's closing prices across all stock columns.
//! Loading reads at most the requested number of days.

use crate::domain::error::DriftsimError;
use crate::domain::price::{PriceMatrix, SelectionReport, SelectionTargets};
use crate::ports::price_port::PricePort;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct PriceTableAdapter {
    path: PathBuf,
}

struct Table {
    volatilities: Vec<f64>,
    /// Column-major daily closes.
    columns: Vec<Vec<f64>>,
}

impl PriceTableAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn error(&self, reason: String) -> DriftsimError {
        DriftsimError::PriceTable {
            file: self.path.display().to_string(),
            reason,
        }
    }

    fn read_table(&self, days: usize) -> Result<Table, DriftsimError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| self.error(e.to_string()))?;
        let mut rows = content.lines().filter(|l| !l.trim().is_empty());

        let header = rows
            .next()
            .ok_or_else(|| self.error("empty price table".into()))?;
        let volatilities = parse_row(header).map_err(|e| self.error(e))?;
        let width = volatilities.len();

        let mut columns = vec![Vec::new(); width];
        for (index, row) in rows.take(days).enumerate() {
            let values = parse_row(row).map_err(|e| self.error(e))?;
            if values.len() != width {
                return Err(self.error(format!(
                    "row {} has {} columns, expected {width}",
                    index + 2,
                    values.len()
                )));
            }
            for (column, value) in columns.iter_mut().zip(values) {
                column.push(value);
            }
        }

        if columns.iter().any(|c| c.is_empty()) {
            return Err(self.error("price table has no data rows".into()));
        }
        Ok(Table {
            volatilities,
            columns,
        })
    }
}

fn parse_row(row: &str) -> Result<Vec<f64>, String> {
    row.split_whitespace()
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| format!("invalid numeric value '{v}'"))
        })
        .collect()
}

/// Index of the candidate closest to `target`.
fn nearest(candidates: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, &candidate) in candidates.iter().enumerate() {
        let distance = (candidate - target).abs();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

impl PricePort for PriceTableAdapter {
    fn load_prices(&self, days: usize) -> Result<PriceMatrix, DriftsimError> {
        let table = self.read_table(days)?;
        PriceMatrix::from_columns(table.columns)
    }

    fn select_prices(
        &self,
        days: usize,
        targets: &SelectionTargets,
    ) -> Result<(PriceMatrix, SelectionReport), DriftsimError> {
        let table = self.read_table(days)?;
        let first_row: Vec<f64> = table.columns.iter().map(|c| c[0]).collect();

        // Initial price wins when both criteria are supplied.
        let (selected, volatility_ignored) =
            match (&targets.initial_prices, &targets.volatilities) {
                (Some(prices), both) => (
                    prices.iter().map(|&t| nearest(&first_row, t)).collect(),
                    both.is_some(),
                ),
                (None, Some(volatilities)) => (
                    volatilities
                        .iter()
                        .map(|&t| nearest(&table.volatilities, t))
                        .collect(),
                    false,
                ),
                (None, None) => ((0..table.columns.len()).collect::<Vec<_>>(), false),
            };

        let report = SelectionReport {
            initial_prices: selected.iter().map(|&c| first_row[c]).collect(),
            volatilities: selected.iter().map(|&c| table.volatilities[c]).collect(),
            columns: selected.clone(),
            volatility_ignored,
        };

        let columns = selected
            .into_iter()
            .map(|c| table.columns[c].clone())
            .collect();
        Ok((PriceMatrix::from_columns(columns)?, report))
    }
}

/// Write a matrix in price table format: volatility header row, then one row
/// per day.
pub fn write_table(
    path: &Path,
    volatilities: &[f64],
    matrix: &PriceMatrix,
) -> Result<(), DriftsimError> {
    let mut file = std::fs::File::create(path)?;

    let header: Vec<String> = volatilities.iter().map(|v| v.to_string()).collect();
    writeln!(file, "{}", header.join(" "))?;

    for day in 0..matrix.days() {
        let row: Vec<String> = (0..matrix.stocks())
            .map(|stock| matrix.price(day, stock).to_string())
            .collect();
        writeln!(file, "{}", row.join(" "))?;
    }
    Ok(())
}
