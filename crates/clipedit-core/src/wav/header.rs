//! Canonical 44-byte RIFF/WAVE header
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! 0   "RIFF"          4   chunk size (36 + data)   8   "WAVE"
//! 12  "fmt "          16  16                       20  format (1 = PCM)
//! 22  channels        24  sample rate              28  byte rate
//! 32  block align     34  bits per sample (16)
//! 36  "data"          40  data size                44  samples...
//! ```

use std::io::{self, Write};

use super::error::HeaderError;

/// Size of the canonical header; sample data starts at this offset
pub const HEADER_LEN: usize = 44;

/// Audio format tag for integer PCM
pub const PCM_FORMAT: u16 = 1;

/// Exported clips are always 16-bit
pub const BITS_PER_SAMPLE: u16 = 16;

/// Bytes per sample for 16-bit PCM
const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;

/// Size of the PCM fmt chunk body
const FMT_CHUNK_SIZE: u32 = 16;

/// Fields of a canonical 16-bit PCM header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Number of interleaved channels
    pub channels: u16,
    /// Declared sample rate in Hz
    pub sample_rate: u32,
    /// Declared bytes per second
    ///
    /// Normally `sample_rate * block_align`, but stored separately because a
    /// fractional declared rate truncates differently in the two fields.
    pub byte_rate: u32,
    /// Size of the sample data in bytes
    pub data_size: u32,
}

impl WavHeader {
    /// Header with the byte rate derived from an integer sample rate
    ///
    /// The byte rate wraps modulo 2^32 like the field it is written to.
    pub fn new(channels: u16, sample_rate: u32, data_size: u32) -> Self {
        Self {
            channels,
            sample_rate,
            byte_rate: sample_rate.wrapping_mul(channels as u32 * BYTES_PER_SAMPLE as u32),
            data_size,
        }
    }

    /// RIFF chunk size: everything after the first 8 bytes
    pub fn chunk_size(&self) -> u32 {
        self.data_size.wrapping_add(36)
    }

    /// Bytes per frame (channels * 2)
    pub fn block_align(&self) -> u16 {
        self.channels.wrapping_mul(BYTES_PER_SAMPLE)
    }

    /// Number of whole frames described by `data_size`
    pub fn frame_count(&self) -> u32 {
        match self.block_align() {
            0 => 0,
            align => self.data_size / align as u32,
        }
    }

    /// Write the 44 header bytes
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        // RIFF header
        writer.write_all(b"RIFF")?;
        writer.write_all(&self.chunk_size().to_le_bytes())?;
        writer.write_all(b"WAVE")?;

        // fmt chunk
        writer.write_all(b"fmt ")?;
        writer.write_all(&FMT_CHUNK_SIZE.to_le_bytes())?;
        writer.write_all(&PCM_FORMAT.to_le_bytes())?;
        writer.write_all(&self.channels.to_le_bytes())?;
        writer.write_all(&self.sample_rate.to_le_bytes())?;
        writer.write_all(&self.byte_rate.to_le_bytes())?;
        writer.write_all(&self.block_align().to_le_bytes())?;
        writer.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

        // data chunk
        writer.write_all(b"data")?;
        writer.write_all(&self.data_size.to_le_bytes())?;
        Ok(())
    }

    /// Header as a fixed-size byte array
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        // A 44-byte slice always has room for the 44 header bytes
        let mut cursor: &mut [u8] = &mut bytes;
        let _ = self.write_to(&mut cursor);
        bytes
    }

    /// Parse a canonical header from the start of `bytes`
    ///
    /// Only the layout produced by [`WavHeader::write_to`] is accepted; files
    /// with extension chunks between `fmt ` and `data` are rejected.
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < HEADER_LEN {
            return Err(HeaderError::Truncated(bytes.len()));
        }

        let u16_at = |offset: usize| u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
        let u32_at = |offset: usize| {
            u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };

        if &bytes[0..4] != b"RIFF" {
            return Err(HeaderError::MissingChunk("RIFF"));
        }
        if &bytes[8..12] != b"WAVE" {
            return Err(HeaderError::MissingChunk("WAVE"));
        }
        if &bytes[12..16] != b"fmt " || u32_at(16) != FMT_CHUNK_SIZE {
            return Err(HeaderError::MissingChunk("fmt "));
        }
        if &bytes[36..40] != b"data" {
            return Err(HeaderError::MissingChunk("data"));
        }

        let format_tag = u16_at(20);
        let bits_per_sample = u16_at(34);
        if format_tag != PCM_FORMAT || bits_per_sample != BITS_PER_SAMPLE {
            return Err(HeaderError::UnsupportedFormat {
                format_tag,
                bits_per_sample,
            });
        }

        Ok(Self {
            channels: u16_at(22),
            sample_rate: u32_at(24),
            byte_rate: u32_at(28),
            data_size: u32_at(40),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = WavHeader::new(2, 44100, 400);
        let bytes = header.to_bytes();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 436);
        assert_eq!(&bytes[8..16], b"WAVEfmt ");
        assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 16);
        assert_eq!(u16::from_le_bytes(bytes[20..22].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(bytes[22..24].try_into().unwrap()), 2);
        assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 44100);
        assert_eq!(u32::from_le_bytes(bytes[28..32].try_into().unwrap()), 176400);
        assert_eq!(u16::from_le_bytes(bytes[32..34].try_into().unwrap()), 4);
        assert_eq!(u16::from_le_bytes(bytes[34..36].try_into().unwrap()), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), 400);
    }

    #[test]
    fn test_parse_written_header() {
        let header = WavHeader::new(6, 48001, 1200);
        let parsed = WavHeader::parse(&header.to_bytes()).unwrap();

        assert_eq!(parsed, header);
        assert_eq!(parsed.byte_rate, 48001 * 12);
        assert_eq!(parsed.frame_count(), 100);
    }

    #[test]
    fn test_byte_rate_is_written_as_given() {
        let header = WavHeader {
            byte_rate: 88203,
            ..WavHeader::new(1, 44101, 0)
        };
        let parsed = WavHeader::parse(&header.to_bytes()).unwrap();

        assert_eq!(parsed.sample_rate, 44101);
        assert_eq!(parsed.byte_rate, 88203);
    }

    #[test]
    fn test_byte_rate_wraps() {
        let header = WavHeader::new(2, u32::MAX, 0);
        assert_eq!(header.byte_rate, u32::MAX.wrapping_mul(4));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(WavHeader::parse(&[0u8; 10]), Err(HeaderError::Truncated(10)));

        let mut bytes = WavHeader::new(1, 8000, 0).to_bytes();
        bytes[34] = 24;
        assert!(matches!(
            WavHeader::parse(&bytes),
            Err(HeaderError::UnsupportedFormat { bits_per_sample: 24, .. })
        ));

        bytes[0] = b'X';
        assert_eq!(WavHeader::parse(&bytes), Err(HeaderError::MissingChunk("RIFF")));
    }
}
