//! Clipedit Core - audio clip editing without the UI
//!
//! Load a clip, look at it, adjust speed and volume, export it as WAV:
//!
//! - [`decode`]: file bytes to a planar [`SampleBuffer`]
//! - [`waveform`]: min/max overview peaks
//! - [`session`]: explicit editor state and playback control
//! - [`wav`]: the bit-exact 16-bit PCM WAV encoder
//! - [`export`]: delivering encoded clips (`edited.wav`)
//! - [`config`]: YAML settings

pub mod config;
pub mod decode;
pub mod export;
pub mod session;
pub mod types;
pub mod waveform;
pub mod wav;

pub use types::*;
