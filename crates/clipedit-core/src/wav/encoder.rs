//! Sample buffer to 16-bit PCM WAV encoding
//!
//! The encoder is a single pass over the output frames: each output frame
//! picks its source frame by decimation (`floor(i * speed)`, no filtering or
//! interpolation), applies the volume as a linear gain, clips to full scale
//! and quantizes to i16. It is pure and allocation-bounded: one output
//! vector sized exactly `44 + data_size`.

use serde::{Deserialize, Serialize};

use super::error::{EncodeError, EncodeResult};
use super::header::{WavHeader, BITS_PER_SAMPLE, HEADER_LEN};
use crate::types::{Sample, SampleBuffer};

/// MIME type attached to every encoded clip
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Largest data chunk that still fits the 32-bit RIFF chunk size (36 + data)
const MAX_DATA_SIZE: u64 = u32::MAX as u64 - 36;

/// How the header's sample rate field is derived from the source rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePolicy {
    /// `source_rate + speed`, kept fractional until it is stored
    ///
    /// Byte-compatible with clips exported by earlier versions of the editor:
    /// the rate and byte rate fields are each truncated and wrapped to 32 bits
    /// from the unrounded value. Decimated audio at (nearly) the original rate plays back faster by
    /// `speed` because frames were dropped, not because of this field.
    #[default]
    LegacyOffset,
    /// The unchanged source rate
    Preserve,
}

impl RatePolicy {
    /// Declared sample rate for a given source rate and speed, unrounded
    pub fn declared_rate(self, source_rate: u32, speed: f64) -> f64 {
        match self {
            RatePolicy::LegacyOffset => source_rate as f64 + speed,
            RatePolicy::Preserve => source_rate as f64,
        }
    }

    /// Header for an encoded clip
    ///
    /// Both rate fields derive from the unrounded declared rate, so a
    /// fractional legacy rate gives a byte rate that is not exactly
    /// `sample_rate * block_align`.
    pub fn header(self, source_rate: u32, speed: f64, channels: u16, data_size: u32) -> WavHeader {
        let rate = self.declared_rate(source_rate, speed);
        let bytes_per_frame = channels as f64 * f64::from(BITS_PER_SAMPLE / 8);
        WavHeader {
            channels,
            sample_rate: to_u32_field(rate),
            byte_rate: to_u32_field(rate * bytes_per_frame),
            data_size,
        }
    }
}

/// Store a real number in a 32-bit header field
///
/// Truncates toward zero, then wraps modulo 2^32. Non-finite values store 0.
fn to_u32_field(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// Source frame for output frame `i`: `floor(i * speed)`, clamped to the last frame
#[inline]
fn source_index(i: usize, speed: f64, last_frame: usize) -> usize {
    ((i as f64 * speed).floor() as usize).min(last_frame)
}

/// Export-time control values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeParams {
    /// Playback-rate multiplier (1.0 = unchanged), must be finite and > 0
    pub speed: f64,
    /// Linear gain applied before clipping, must be finite
    pub volume: f64,
    /// Header sample rate derivation
    pub rate_policy: RatePolicy,
}

impl EncodeParams {
    /// Params with the default (legacy) rate policy
    pub fn new(speed: f64, volume: f64) -> Self {
        Self {
            speed,
            volume,
            rate_policy: RatePolicy::default(),
        }
    }

    /// Override the rate policy
    pub fn with_rate_policy(mut self, rate_policy: RatePolicy) -> Self {
        self.rate_policy = rate_policy;
        self
    }

    /// Reject parameters the encoder cannot honour
    pub fn validate(&self) -> EncodeResult<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(EncodeError::InvalidParameter(format!(
                "speed must be a positive finite number, got {}",
                self.speed
            )));
        }
        if !self.volume.is_finite() {
            return Err(EncodeError::InvalidParameter(format!(
                "volume must be finite, got {}",
                self.volume
            )));
        }
        Ok(())
    }

    /// Number of output frames: `floor(frame_count / speed)`
    pub fn output_frames(&self, frame_count: usize) -> f64 {
        (frame_count as f64 / self.speed).floor()
    }
}

impl Default for EncodeParams {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// An encoded WAV file, owned by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavBytes {
    bytes: Vec<u8>,
}

impl WavBytes {
    /// Raw file contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total file length (44 + data size)
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Never true for encoder output (the header is always present)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Always `audio/wav`
    pub fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }

    /// Parsed view of the header fields
    pub fn header(&self) -> WavHeader {
        // Only the encoder constructs WavBytes, and it always writes a valid header
        WavHeader::parse(&self.bytes).unwrap_or(WavHeader::new(0, 0, 0))
    }

    /// Interleaved sample data after the header
    pub fn data(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }

    /// Take ownership of the bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for WavBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Quantize a gained sample to signed 16-bit
///
/// Clamps to [-1, 1], then scales negatives by 32768 and non-negatives by
/// 32767 so both full-scale ends are reachable, rounding half away from zero.
/// NaN quantizes to silence.
#[inline]
pub fn quantize_sample(sample: Sample, volume: f64) -> i16 {
    let amplified = (sample as f64 * volume).clamp(-1.0, 1.0);
    let scaled = if amplified < 0.0 {
        amplified * 32768.0
    } else {
        amplified * 32767.0
    };
    // `as` saturates and maps NaN to 0
    scaled.round() as i16
}

/// Encode with default rate policy
///
/// Shorthand for `encode(buffer, &EncodeParams::new(speed, volume))`.
pub fn encode_wav(buffer: &SampleBuffer, speed: f64, volume: f64) -> EncodeResult<WavBytes> {
    encode(buffer, &EncodeParams::new(speed, volume))
}

/// Encode a sample buffer to a canonical 16-bit PCM WAV file
///
/// # Errors
/// - [`EncodeError::InvalidParameter`] for non-positive/non-finite speed or non-finite volume
/// - [`EncodeError::OutputTooLarge`] when the data would overflow the RIFF size fields
///
/// A speed so large that no output frame remains yields a valid 44-byte
/// file with an empty data chunk.
pub fn encode(buffer: &SampleBuffer, params: &EncodeParams) -> EncodeResult<WavBytes> {
    params.validate()?;

    let channel_count = buffer.channel_count();
    let frame_count = buffer.frame_count();
    let speed = params.speed;

    let output_frames = params.output_frames(frame_count);
    let data_size = output_frames * channel_count as f64 * 2.0;
    if data_size > MAX_DATA_SIZE as f64 {
        return Err(EncodeError::OutputTooLarge {
            frames: output_frames,
            channels: channel_count,
        });
    }
    let output_frames = output_frames as usize;
    let data_size = data_size as u32;

    // SampleBuffer caps the channel count at u16::MAX
    let header = params.rate_policy.header(
        buffer.sample_rate(),
        speed,
        channel_count as u16,
        data_size,
    );

    log::debug!(
        "encode: {} frames x {} ch @ {} Hz -> {} frames @ {} Hz (speed {}, volume {})",
        frame_count,
        channel_count,
        buffer.sample_rate(),
        output_frames,
        header.sample_rate,
        speed,
        params.volume
    );

    let mut bytes = Vec::with_capacity(HEADER_LEN + data_size as usize);
    bytes.extend_from_slice(&header.to_bytes());

    let last_frame = frame_count - 1;
    for i in 0..output_frames {
        let source = source_index(i, speed, last_frame);
        for channel in buffer.channels() {
            let value = quantize_sample(channel[source], params.volume);
            bytes.extend_from_slice(&value.to_le_bytes());
        }
    }

    debug_assert_eq!(bytes.len(), HEADER_LEN + data_size as usize);
    Ok(WavBytes { bytes })
}
