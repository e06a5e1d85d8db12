//! Error types for rs-docparser.
//!
//! This module defines the error types returned by extraction operations.
//! Damage *inside* a document (unbalanced RTF groups, a missing container
//! member, absent style markers) is not an error: extraction degrades to a
//! best-effort result and records a warning instead.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source bytes or path could not be read.
    #[error("Failed to read input: {0}")]
    UnreadableInput(String),

    /// The media type is not one of the supported document types.
    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),

    /// The document archive could not be opened or read.
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    /// An XML member (or converter output) failed to parse.
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
