//! Error types for gspump-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end a CLI run with exit code 1
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Structural error from the walk
    #[error(transparent)]
    Core(#[from] gspump_core::Error),

    /// Configuration or client setup error
    #[error(transparent)]
    Rest(#[from] gspump_rest::Error),

    /// Report serialization error
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
