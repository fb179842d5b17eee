//! Audio decoding (Symphonia)
//!
//! The load side of the editor: raw file bytes in, planar
//! [`SampleBuffer`] out. Any container/codec Symphonia knows is accepted
//! (WAV, FLAC, MP3, OGG/Vorbis, AAC/MP4, ...); only the first audio track is
//! decoded.

mod error;

pub use error::{DecodeError, Result};

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use symphonia::core::audio::SampleBuffer as InterleavedBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::types::SampleBuffer;

/// Decode an audio file from disk
pub fn decode_file(path: &Path) -> Result<SampleBuffer> {
    log::info!("decode_file: Loading {:?}", path);

    let file = File::open(path).map_err(|e| DecodeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Create a hint with the file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    decode_source(Box::new(file), hint)
}

/// Decode an in-memory audio file
///
/// `extension` (e.g. `"mp3"`) speeds up probing but is not required.
pub fn decode_bytes(bytes: Vec<u8>, extension: Option<&str>) -> Result<SampleBuffer> {
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    decode_source(Box::new(Cursor::new(bytes)), hint)
}

fn decode_source(source: Box<dyn MediaSource>, hint: Hint) -> Result<SampleBuffer> {
    let mss = MediaSourceStream::new(source, Default::default());

    // Probe the media source
    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

    let mut format = probed.format;

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;

    let track_id = track.id;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::UnknownSampleRate)?;

    let mut channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<InterleavedBuffer<f32>> = None;

    // Decode all packets
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                log::warn!("decode: Error reading packet: {}", e);
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("decode: Error decoding packet: {}", e);
                continue;
            }
        };

        // Initialize sample buffer on first decode; the decoded spec is
        // authoritative when the container omits the channel layout
        let needed = decoded.capacity() * decoded.spec().channels.count();
        let needs_alloc = sample_buf
            .as_ref()
            .is_none_or(|buf| buf.capacity() < needed);
        if needs_alloc {
            let spec = *decoded.spec();
            channels.get_or_insert(spec.channels.count());
            sample_buf = Some(InterleavedBuffer::new(decoded.capacity() as u64, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    let channels = channels.unwrap_or(2);
    if channels == 0 || samples.len() < channels {
        return Err(DecodeError::Empty);
    }

    let buffer = SampleBuffer::from_interleaved(sample_rate, channels, &samples)?;
    log::info!(
        "decode: {} frames, {} channels @ {} Hz ({:.2}s)",
        buffer.frame_count(),
        buffer.channel_count(),
        buffer.sample_rate(),
        buffer.duration_secs()
    );

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};

    fn write_test_wav(path: &Path, channels: u16, samples: &[i16]) {
        let spec = WavSpec {
            channels,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_decode_stereo_wav_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        write_test_wav(&path, 2, &[16384, -16384, 0, 8192, -32768, 0]);

        let buffer = decode_file(&path).unwrap();

        assert_eq!(buffer.sample_rate(), 22050);
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frame_count(), 3);
        assert_eq!(buffer.channel_data(0), &[0.5, 0.0, -1.0]);
        assert_eq!(buffer.channel_data(1), &[-0.5, 0.25, 0.0]);
    }

    #[test]
    fn test_decode_bytes_matches_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_test_wav(&path, 1, &[1000, 2000, 3000, 4000]);

        let from_file = decode_file(&path).unwrap();
        let from_bytes = decode_bytes(std::fs::read(&path).unwrap(), None).unwrap();

        assert_eq!(from_file, from_bytes);
    }

    #[test]
    fn test_missing_file() {
        let result = decode_file(Path::new("/nonexistent/clip.wav"));
        assert!(matches!(result, Err(DecodeError::Io { .. })));
    }

    #[test]
    fn test_garbage_is_unsupported() {
        let result = decode_bytes(b"definitely not audio".to_vec(), Some("wav"));
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_encoder_output_decodes() {
        let buffer = SampleBuffer::new(16000, vec![vec![0.5, -0.5, 0.0, 0.25]; 2]).unwrap();
        let wav = crate::wav::encode_wav(&buffer, 1.0, 1.0).unwrap();

        let decoded = decode_bytes(wav.into_inner(), Some("wav")).unwrap();

        assert_eq!(decoded.channel_count(), 2);
        assert_eq!(decoded.frame_count(), 4);
        assert_eq!(decoded.sample_rate(), 16001);
        assert_eq!(decoded.channel_data(1)[1], -0.5);
    }
}
