//! Error types for gspump-xml

/// Result type for gspump-xml operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while purifying a document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed XML at byte {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Namespace prefix '{prefix}' is not bound (at byte {position})")]
    UnboundPrefix { prefix: String, position: usize },

    #[error("Document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

impl Error {
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}
