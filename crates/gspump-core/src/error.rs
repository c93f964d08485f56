//! Error types for gspump-core

/// Result type for gspump-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors that abort (part of) a restore
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An object directory lacks its descriptor file
    #[error("Missing {kind} descriptor at {path}")]
    MissingDescriptor { kind: crate::NodeKind, path: String },

    /// Error from the pusher (unreadable file, malformed XML)
    #[error(transparent)]
    Rest(#[from] gspump_rest::Error),
}
