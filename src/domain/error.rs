//! Domain error types.

/// Top-level error type for intrasim.
#[derive(Debug, thiserror::Error)]
pub enum IntrasimError {
    /// Index math landed outside a series. The index is signed so that a
    /// would-be-negative index is reported as computed rather than wrapped.
    #[error("index {index} out of range for series of length {len}")]
    OutOfRange { index: isize, len: usize },

    #[error("operation requires a non-empty series")]
    EmptySeries,

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

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

    #[error("feed error for {ticker} on {exchange}: {reason}")]
    Feed {
        ticker: String,
        exchange: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&IntrasimError> for std::process::ExitCode {
    fn from(err: &IntrasimError) -> Self {
        let code: u8 = match err {
            IntrasimError::Io(_) => 1,
            IntrasimError::ConfigParse { .. }
            | IntrasimError::ConfigMissing { .. }
            | IntrasimError::ConfigInvalid { .. }
            | IntrasimError::InvalidConfiguration { .. } => 2,
            IntrasimError::Feed { .. } => 3,
            IntrasimError::OutOfRange { .. } | IntrasimError::EmptySeries => 4,
        };
        std::process::ExitCode::from(code)
    }
}
