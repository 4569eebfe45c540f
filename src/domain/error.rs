//! Domain error types.
//!
//! Undefined prices are deliberately not an error variant: they are data-level
//! NaN sentinels that propagate through arithmetic, and consumers treat them as
//! "no trade possible".

/// Top-level error type for driftsim.
#[derive(Debug, thiserror::Error)]
pub enum DriftsimError {
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("weights length mismatch: expected {expected}, got {actual}")]
    WeightLength { expected: usize, actual: usize },

    #[error("malformed ledger data at line {line}: {reason}")]
    DataFormat { line: usize, reason: String },

    #[error("price table error in {file}: {reason}")]
    PriceTable { file: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DriftsimError> for std::process::ExitCode {
    fn from(err: &DriftsimError) -> Self {
        let code: u8 = match err {
            DriftsimError::Io(_) => 1,
            DriftsimError::ConfigParse { .. }
            | DriftsimError::ConfigMissing { .. }
            | DriftsimError::ConfigInvalid { .. } => 2,
            DriftsimError::DataFormat { .. } | DriftsimError::PriceTable { .. } => 3,
            DriftsimError::InvalidParameter { .. } | DriftsimError::WeightLength { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
