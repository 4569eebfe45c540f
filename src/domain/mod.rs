//! Core domain types and logic.

pub mod accountant;
pub mod error;
pub mod executor;
pub mod indicator;
pub mod ledger;
pub mod portfolio;
pub mod price;
pub mod simulator;
pub mod strategy;
