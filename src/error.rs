//! Error types for audiowave
//!
//! Defines module-specific error types using thiserror for clear error propagation.

use thiserror::Error;

/// Main error type for the audiowave crate
#[derive(Error, Debug)]
pub enum Error {
    /// Source cannot be opened, probed, or read
    #[error("Source unreadable: {0}")]
    SourceUnreadable(String),

    /// Container has no decodable audio track
    #[error("No audio track found in source")]
    NoAudioTrack,

    /// Decoder cannot be created or configured for the track's codec
    #[error("Decoder init error: {0}")]
    DecoderInit(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid extraction request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using the audiowave Error
pub type Result<T> = std::result::Result<T, Error>;
