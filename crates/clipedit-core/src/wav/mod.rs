//! Canonical WAV export for edited clips
//!
//! Turns a decoded [`SampleBuffer`](crate::types::SampleBuffer) plus the
//! user's speed and volume controls into a 16-bit PCM RIFF/WAVE file.
//!
//! # Pipeline
//!
//! ```text
//! SampleBuffer ──► decimate (floor(i * speed)) ──► gain + clamp ──► i16 quantize
//!                                                                      │
//!                        WavHeader (44 bytes, little-endian) ◄─────────┘
//!                                   │
//!                                   ▼
//!                               WavBytes ("audio/wav")
//! ```
//!
//! # Example Usage
//!
//! ```ignore
//! use clipedit_core::wav::{encode_wav, WAV_MIME_TYPE};
//!
//! let wav = encode_wav(&buffer, 1.25, 0.8)?;
//! assert_eq!(wav.mime_type(), WAV_MIME_TYPE);
//! std::fs::write("edited.wav", wav.as_bytes())?;
//! ```

mod encoder;
mod error;
mod header;

pub use encoder::{
    encode, encode_wav, quantize_sample, EncodeParams, RatePolicy, WavBytes, WAV_MIME_TYPE,
};
pub use error::{EncodeError, EncodeResult, HeaderError};
pub use header::{WavHeader, BITS_PER_SAMPLE, HEADER_LEN, PCM_FORMAT};
