//! Error types for gspump-rest

/// Result type for gspump-rest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that stop a push before any request is sent.
///
/// REST-level failures are not errors: they come back as
/// [`PushOutcome::Failed`](crate::PushOutcome::Failed).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source file missing or unreadable
    #[error(transparent)]
    Fs(#[from] gspump_fs::Error),

    /// Source file is not well-formed XML
    #[error("Cannot purify {file}: {source}")]
    Xml {
        file: String,
        #[source]
        source: gspump_xml::Error,
    },

    /// Invalid connection settings
    #[error("Invalid server configuration: {message}")]
    Config { message: String },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
