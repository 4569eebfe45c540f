//! Concrete port implementations.

pub mod file_config_adapter;
pub mod file_ledger_adapter;
pub mod price_table_adapter;
pub mod text_report_adapter;
