//! Common types for clipedit
//!
//! This module contains the decoded audio representation shared by the
//! encoder, the waveform overview and the editing session.

use crate::wav::EncodeError;

/// Audio sample type (32-bit float for processing, stored as 16-bit in exported files)
pub type Sample = f32;

/// A decoded audio clip: one sample vector per channel, all of equal length
///
/// Produced by the decode capability once per file load and read (never
/// mutated) by every export. Channels are stored planar, not interleaved.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    channels: Vec<Vec<Sample>>,
}

impl SampleBuffer {
    /// Create a buffer from planar channel data
    ///
    /// Fails with [`EncodeError::InvalidInput`] for zero channels, zero frames,
    /// a zero sample rate, or channels of differing length.
    pub fn new(sample_rate: u32, channels: Vec<Vec<Sample>>) -> Result<Self, EncodeError> {
        if sample_rate == 0 {
            return Err(EncodeError::InvalidInput("sample rate is zero".to_string()));
        }
        let Some(first) = channels.first() else {
            return Err(EncodeError::InvalidInput("buffer has no channels".to_string()));
        };
        let frames = first.len();
        if frames == 0 {
            return Err(EncodeError::InvalidInput("buffer has no frames".to_string()));
        }
        if let Some((idx, ch)) = channels.iter().enumerate().find(|(_, ch)| ch.len() != frames) {
            return Err(EncodeError::InvalidInput(format!(
                "channel {} has {} frames, expected {}",
                idx,
                ch.len(),
                frames
            )));
        }
        if channels.len() > u16::MAX as usize {
            return Err(EncodeError::InvalidInput(format!(
                "{} channels exceeds the WAV limit of {}",
                channels.len(),
                u16::MAX
            )));
        }

        Ok(Self { sample_rate, channels })
    }

    /// Create a buffer by splitting interleaved samples into channels
    ///
    /// Trailing samples that do not fill a whole frame are dropped.
    pub fn from_interleaved(
        sample_rate: u32,
        channel_count: usize,
        interleaved: &[Sample],
    ) -> Result<Self, EncodeError> {
        if channel_count == 0 {
            return Err(EncodeError::InvalidInput("buffer has no channels".to_string()));
        }
        let frames = interleaved.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in interleaved.chunks_exact(channel_count) {
            for (ch, &sample) in channels.iter_mut().zip(frame) {
                ch.push(sample);
            }
        }
        Self::new(sample_rate, channels)
    }

    /// Create a single-channel buffer
    pub fn mono(sample_rate: u32, samples: Vec<Sample>) -> Result<Self, EncodeError> {
        Self::new(sample_rate, vec![samples])
    }

    /// Number of independent channels (always >= 1)
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Frames per second of the decoded audio
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames per channel (always >= 1)
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.channels[0].len()
    }

    /// Samples of one channel
    ///
    /// # Panics
    /// Panics if `channel >= channel_count()`.
    #[inline]
    pub fn channel_data(&self, channel: usize) -> &[Sample] {
        &self.channels[channel]
    }

    /// Iterate over all channels in order
    pub fn channels(&self) -> impl Iterator<Item = &[Sample]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }
}
