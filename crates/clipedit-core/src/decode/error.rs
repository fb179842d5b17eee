//! Decode error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding an input file
///
/// Raised only on the load side of the editor; the encoder never produces
/// these.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to read audio file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("No audio track found")]
    NoAudioTrack,

    #[error("Unknown sample rate")]
    UnknownSampleRate,

    #[error("Decoded stream contains no audio frames")]
    Empty,

    #[error("Decoded audio is not a valid sample buffer: {0}")]
    InvalidBuffer(#[from] crate::wav::EncodeError),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
