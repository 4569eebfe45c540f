//! Price data access port trait.

use crate::domain::error::DriftsimError;
use crate::domain::price::{PriceMatrix, SelectionReport, SelectionTargets};

pub trait PricePort {
    /// Load all columns, up to `days` rows.
    fn load_prices(&self, days: usize) -> Result<PriceMatrix, DriftsimError>;

    /// Load columns chosen by nearest-match selection against `targets`.
    fn select_prices(
        &self,
        days: usize,
        targets: &SelectionTargets,
    ) -> Result<(PriceMatrix, SelectionReport), DriftsimError>;
}
