//! Buy/sell execution against a portfolio and ledger.
//!
//! Every trade decision here is all-or-nothing per stock: a buy spends as much
//! of the allocated capital as whole shares allow, a sell liquidates the full
//! holding. An undefined (NaN) price makes the operation a no-op.

use crate::domain::error::DriftsimError;
use crate::domain::ledger::{LedgerEntry, TransactionType};
use crate::domain::portfolio::Portfolio;
use crate::domain::price::PriceMatrix;
use crate::ports::ledger_port::LedgerPort;

/// Buy as many whole shares of `stock` as `available_capital` covers after
/// fees.
///
/// A zero-share buy (capital insufficient) is still logged: the ledger records
/// the attempt and its fee cost. No entry is logged when the price is
/// undefined.
pub fn buy<L: LedgerPort>(
    day: usize,
    stock: usize,
    available_capital: f64,
    prices: &PriceMatrix,
    fees: f64,
    portfolio: &mut Portfolio,
    ledger: &mut L,
) -> Result<(), DriftsimError> {
    let price = prices.price(day, stock);
    if price.is_nan() {
        return Ok(());
    }

    let shares = ((available_capital - fees) / price).floor().max(0.0) as u64;
    let net_cash = -(shares as f64 * price + fees);

    portfolio.add_shares(stock, shares);
    ledger.append(&LedgerEntry {
        transaction_type: TransactionType::Buy,
        day,
        stock,
        shares,
        net_cash,
    })
}

/// Sell the entire holding of `stock`. No-op when nothing is held or the
/// price is undefined.
pub fn sell<L: LedgerPort>(
    day: usize,
    stock: usize,
    prices: &PriceMatrix,
    fees: f64,
    portfolio: &mut Portfolio,
    ledger: &mut L,
) -> Result<(), DriftsimError> {
    if portfolio.holding(stock) == 0 {
        return Ok(());
    }
    let price = prices.price(day, stock);
    if price.is_nan() {
        return Ok(());
    }

    let shares = portfolio.clear(stock);
    let net_cash = shares as f64 * price - fees;

    ledger.append(&LedgerEntry {
        transaction_type: TransactionType::Sell,
        day,
        stock,
        shares,
        net_cash,
    })
}

/// Build an initial portfolio with one day-0 buy per stock, spending each
/// stock's allocated amount.
pub fn create_portfolio<L: LedgerPort>(
    available_amounts: &[f64],
    prices: &PriceMatrix,
    fees: f64,
    ledger: &mut L,
) -> Result<Portfolio, DriftsimError> {
    if available_amounts.len() != prices.stocks() {
        return Err(DriftsimError::InvalidParameter {
            reason: format!(
                "got {} allocations for {} stocks",
                available_amounts.len(),
                prices.stocks()
            ),
        });
    }

    let mut portfolio = Portfolio::new(prices.stocks());
    for (stock, &amount) in available_amounts.iter().enumerate() {
        buy(0, stock, amount, prices, fees, &mut portfolio, ledger)?;
    }
    Ok(portfolio)
}
