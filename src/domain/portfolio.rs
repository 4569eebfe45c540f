//! Portfolio holdings state.

/// Per-stock share counts, indexed by stock column.
///
/// Owned by the strategy loop and mutated only through the executor; the
/// ledger remains the source of truth for how the holdings came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portfolio {
    holdings: Vec<u64>,
}

impl Portfolio {
    pub fn new(stocks: usize) -> Self {
        Portfolio {
            holdings: vec![0; stocks],
        }
    }

    pub fn stocks(&self) -> usize {
        self.holdings.len()
    }

    pub fn holding(&self, stock: usize) -> u64 {
        self.holdings[stock]
    }

    pub fn add_shares(&mut self, stock: usize, shares: u64) {
        self.holdings[stock] += shares;
    }

    /// Zero the holding for `stock`, returning the prior count.
    pub fn clear(&mut self, stock: usize) -> u64 {
        std::mem::take(&mut self.holdings[stock])
    }

    pub fn holdings(&self) -> &[u64] {
        &self.holdings
    }
}
