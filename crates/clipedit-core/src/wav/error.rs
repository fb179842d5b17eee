//! WAV export error types

use thiserror::Error;

/// Errors that can occur while encoding a clip to WAV
///
/// Every variant is raised before any output byte is produced; there is
/// no partially written result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// Malformed sample buffer (no channels, no frames, ragged channels)
    #[error("Invalid input buffer: {0}")]
    InvalidInput(String),

    /// Speed or volume outside the encodable domain
    #[error("Invalid encode parameter: {0}")]
    InvalidParameter(String),

    /// The encoded data would not fit the 32-bit RIFF size fields
    #[error("Encoded output too large: {frames} frames x {channels} channels exceeds the RIFF limit")]
    OutputTooLarge { frames: f64, channels: usize },
}

/// Result type for encode operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while parsing a canonical WAV header
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeaderError {
    /// Fewer than 44 bytes available
    #[error("Header truncated: {0} bytes, need 44")]
    Truncated(usize),

    /// Chunk identifier mismatch
    #[error("Missing required chunk: {0}")]
    MissingChunk(&'static str),

    /// Not 16-bit PCM
    #[error("Unsupported format: tag {format_tag}, {bits_per_sample} bits")]
    UnsupportedFormat { format_tag: u16, bits_per_sample: u16 },
}
