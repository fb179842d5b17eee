//! Waveform overview peaks
//!
//! Downsamples a channel to one min/max pair per pixel column so a host
//! can draw the classic vertical-line overview. Each column reduces an
//! explicit index window `[col * step, min((col + 1) * step, len))`, where
//! `step = ceil(len / width)`.

use rayon::prelude::*;

use crate::types::{Sample, SampleBuffer};

/// Min/max of one waveform column
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Peak {
    pub min: Sample,
    pub max: Sample,
}

impl Peak {
    /// Column with no samples behind it
    pub const SILENT: Peak = Peak { min: 0.0, max: 0.0 };

    /// Vertical line endpoints `(y_min, y_max)` for a canvas of `height` pixels
    ///
    /// The centre line sits at `height / 2`; positive samples go up (smaller y).
    pub fn to_pixels(&self, height: f32) -> (f32, f32) {
        let amp = height / 2.0;
        (amp - self.min * amp, amp - self.max * amp)
    }
}

/// Samples per column for a given length and width (`ceil(len / width)`)
pub fn samples_per_column(len: usize, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    len.div_ceil(width)
}

/// Reduce one column's window to its min/max
fn reduce_window(window: &[Sample]) -> Peak {
    if window.is_empty() {
        return Peak::SILENT;
    }

    let mut min = Sample::INFINITY;
    let mut max = Sample::NEG_INFINITY;
    for &sample in window {
        min = min.min(sample);
        max = max.max(sample);
    }

    // All-NaN windows leave the sentinels untouched
    if min.is_infinite() && max.is_infinite() {
        return Peak::SILENT;
    }
    Peak { min, max }
}

/// Generate `width` peaks from a single channel
///
/// Columns past the end of the data (possible because the step rounds up)
/// are [`Peak::SILENT`]. Empty input or zero width yields no peaks.
pub fn compute_peaks(samples: &[Sample], width: usize) -> Vec<Peak> {
    let len = samples.len();
    if len == 0 || width == 0 {
        return Vec::new();
    }

    let step = samples_per_column(len, width);

    (0..width)
        .into_par_iter()
        .map(|col| {
            let start = (col * step).min(len);
            let end = ((col + 1) * step).min(len);
            reduce_window(&samples[start..end])
        })
        .collect()
}

/// Overview of a loaded clip, drawn from its first channel
pub fn overview(buffer: &SampleBuffer, width: usize) -> Vec<Peak> {
    compute_peaks(buffer.channel_data(0), width)
}
