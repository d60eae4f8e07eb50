//! Domain error types.
//!
//! The search core never fails; everything here comes from the boundary
//! (configuration, input table, symbol selection, report output).

/// Top-level error type for smagrid.
#[derive(Debug, thiserror::Error)]
pub enum SmagridError {
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

    #[error("input error: {reason}")]
    Input { reason: String },

    #[error("unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("no dates matching {window} for {symbol}")]
    DateRangeNotFound { symbol: String, window: String },

    #[error("output error: {reason}")]
    Output { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SmagridError> for std::process::ExitCode {
    fn from(err: &SmagridError) -> Self {
        let code: u8 = match err {
            SmagridError::Io(_) => 1,
            SmagridError::ConfigParse { .. }
            | SmagridError::ConfigMissing { .. }
            | SmagridError::ConfigInvalid { .. } => 2,
            SmagridError::Input { .. } => 3,
            SmagridError::UnknownSymbol { .. }
            | SmagridError::NoData { .. }
            | SmagridError::DateRangeNotFound { .. } => 5,
            SmagridError::Output { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
