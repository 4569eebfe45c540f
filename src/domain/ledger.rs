//! Ledger entry type and its line format.
//!
//! One entry per line: `type,day,stock,shares,net_cash`, net cash with exactly
//! 2 decimal digits, e.g. `buy,5,2,10,-1050.00`. The ledger is append-only and
//! entry order is emission order — callers must not assume entries are sorted
//! by day.

use crate::domain::error::DriftsimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "buy",
            TransactionType::Sell => "sell",
        }
    }
}

/// One recorded buy or sell.
///
/// `shares` is the number bought, or the full prior holding on a sell.
/// `net_cash` is signed: negative for money spent, positive for money earned,
/// fees included.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub transaction_type: TransactionType,
    pub day: usize,
    pub stock: usize,
    pub shares: u64,
    pub net_cash: f64,
}

impl LedgerEntry {
    /// Serialize to the ledger line format (no trailing newline).
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{:.2}",
            self.transaction_type.as_str(),
            self.day,
            self.stock,
            self.shares,
            self.net_cash
        )
    }

    /// Parse one ledger record's fields. `line` is the 1-based line number
    /// used in error reports.
    pub fn from_fields(fields: &[&str], line: usize) -> Result<Self, DriftsimError> {
        if fields.len() != 5 {
            return Err(DriftsimError::DataFormat {
                line,
                reason: format!("expected 5 fields, got {}", fields.len()),
            });
        }

        let transaction_type = match fields[0] {
            "buy" => TransactionType::Buy,
            "sell" => TransactionType::Sell,
            other => {
                return Err(DriftsimError::DataFormat {
                    line,
                    reason: format!("unknown transaction type '{other}'"),
                });
            }
        };

        let day = parse_field(fields[1], "day", line)?;
        let stock = parse_field(fields[2], "stock", line)?;
        let shares = parse_field(fields[3], "shares", line)?;
        let net_cash = parse_field(fields[4], "net cash", line)?;

        Ok(LedgerEntry {
            transaction_type,
            day,
            stock,
            shares,
            net_cash,
        })
    }
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    name: &str,
    line: usize,
) -> Result<T, DriftsimError> {
    value.parse().map_err(|_| DriftsimError::DataFormat {
        line,
        reason: format!("invalid {name} value '{value}'"),
    })
}
