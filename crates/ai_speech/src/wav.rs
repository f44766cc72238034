//! PCM WAV encoding and header inspection
//!
//! Only canonical little-endian RIFF/WAVE files are produced. Reading goes
//! through `hound`, so files with extra chunks (`LIST`, `fact`) are accepted.

use std::io::Cursor;

use hound::WavReader;

use crate::error::SpeechError;

/// Size of the canonical RIFF/WAVE header written by [`encode_pcm16_mono`]
pub const HEADER_LEN: usize = 44;

/// Bytes per sample of 16-bit PCM
pub const BYTES_PER_SAMPLE: u32 = 2;

const PCM_FORMAT: u16 = 1;

/// Format information read from a WAV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    /// Length of the `data` chunk payload in bytes
    pub data_len: usize,
}

impl WavInfo {
    /// Bytes per frame (all channels)
    pub fn block_align(&self) -> u32 {
        u32::from(self.channels) * u32::from(self.bits_per_sample).div_ceil(8)
    }

    /// Duration derived from the payload length
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_seconds(&self) -> f64 {
        let bytes_per_second = u64::from(self.sample_rate) * u64::from(self.block_align());
        if bytes_per_second == 0 {
            return 0.0;
        }
        self.data_len as f64 / bytes_per_second as f64
    }
}

/// Duration of a mono 16-bit PCM payload of `data_len` bytes
#[allow(clippy::cast_precision_loss)]
pub fn pcm16_mono_duration(data_len: usize, sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    data_len as f64 / (f64::from(sample_rate) * f64::from(BYTES_PER_SAMPLE))
}

/// Number of frames in a clip of the given duration
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn frame_count(sample_rate: u32, duration_seconds: f64) -> usize {
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return 0;
    }
    (f64::from(sample_rate) * duration_seconds).round() as usize
}

/// Wrap raw little-endian 16-bit mono samples in a WAV header
#[allow(clippy::cast_possible_truncation)]
pub fn encode_pcm16_mono(sample_rate: u32, pcm: &[u8]) -> Vec<u8> {
    let channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let block_align = channels * (bits_per_sample / 8);
    let byte_rate = sample_rate * u32::from(block_align);
    let data_size = pcm.len() as u32;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(HEADER_LEN + pcm.len());

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(pcm);

    wav
}

/// A silent mono 16-bit clip
///
/// Byte-identical for identical arguments.
pub fn silence(sample_rate: u32, duration_seconds: f64) -> Vec<u8> {
    let frames = frame_count(sample_rate, duration_seconds);
    let pcm = vec![0u8; frames * BYTES_PER_SAMPLE as usize];
    encode_pcm16_mono(sample_rate, &pcm)
}

/// Read format and payload length from a WAV file
///
/// Streaming writers leave the `data` size at 0 or `u32::MAX`; in that case
/// the payload runs to the end of the buffer.
#[allow(clippy::cast_possible_truncation)]
pub fn parse(bytes: &[u8]) -> Result<WavInfo, SpeechError> {
    let reader = WavReader::new(Cursor::new(bytes))
        .map_err(|e| SpeechError::InvalidAudio(e.to_string()))?;
    let spec = reader.spec();
    let declared_frames = u64::from(reader.duration());
    let data_start = reader.into_inner().position();

    let block_align = u64::from(spec.channels) * u64::from(spec.bits_per_sample.div_ceil(8));
    if spec.sample_rate == 0 || block_align == 0 {
        return Err(SpeechError::InvalidAudio("malformed fmt chunk".to_string()));
    }

    let available = (bytes.len() as u64).saturating_sub(data_start);
    let available_frames = available / block_align;
    let frames = if declared_frames == 0 || declared_frames > available_frames {
        available_frames
    } else {
        declared_frames
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        data_len: (frames * block_align) as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_has_canonical_header() {
        let wav = silence(24_000, 2.0);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(wav.len(), HEADER_LEN + 96_000);
        assert!(wav[HEADER_LEN..].iter().all(|&b| b == 0));
    }

    #[test]
    fn silence_is_deterministic() {
        assert_eq!(silence(24_000, 2.0), silence(24_000, 2.0));
        assert_ne!(silence(24_000, 2.0), silence(16_000, 2.0));
    }

    #[test]
    fn parse_reads_back_format() {
        let info = parse(&silence(16_000, 0.5)).unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.sample_rate, 16_000);
        assert_eq!(info.bits_per_sample, 16);
        assert_eq!(info.data_len, 16_000);
        assert!((info.duration_seconds() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_skips_unknown_chunks() {
        let plain = silence(8_000, 0.25);
        let mut wav = plain[..36].to_vec();
        wav.extend_from_slice(b"LIST");
        wav.extend_from_slice(&4u32.to_le_bytes());
        wav.extend_from_slice(b"INFO");
        wav.extend_from_slice(&plain[36..]);

        let info = parse(&wav).unwrap();
        assert_eq!(info.sample_rate, 8_000);
        assert_eq!(info.data_len, 4_000);
    }

    #[test]
    fn parse_reads_stereo_files_from_other_writers() {
        let mut buffer = Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::new(&mut buffer, spec).unwrap();
        for _ in 0..44_100 {
            writer.write_sample(0i16).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let info = parse(buffer.get_ref()).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.sample_rate, 44_100);
        assert_eq!(info.data_len, 44_100 * 4);
        assert!((info.duration_seconds() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_clamps_streaming_data_size() {
        let mut wav = silence(8_000, 0.1);
        wav[40..44].copy_from_slice(&u32::MAX.to_le_bytes());
        let info = parse(&wav).unwrap();
        assert_eq!(info.data_len, wav.len() - HEADER_LEN);
    }

    #[test]
    fn parse_rejects_non_wav() {
        assert!(parse(b"OggS\0\0\0\0\0\0\0\0").is_err());
        assert!(parse(b"").is_err());
    }

    #[test]
    fn parse_rejects_missing_data_chunk() {
        let wav = silence(8_000, 0.1);
        assert!(parse(&wav[..36]).is_err());
    }

    #[test]
    fn duration_matches_frame_count() {
        let wav = silence(24_000, 2.0);
        let duration = pcm16_mono_duration(wav.len() - HEADER_LEN, 24_000);
        assert!((duration - 2.0).abs() < f64::EPSILON);
        assert_eq!(frame_count(24_000, 2.0), 48_000);
    }

    #[test]
    fn non_positive_duration_is_empty_clip() {
        assert_eq!(frame_count(24_000, 0.0), 0);
        assert_eq!(frame_count(24_000, -1.0), 0);
        assert_eq!(frame_count(24_000, f64::NAN), 0);
        assert_eq!(silence(24_000, 0.0).len(), HEADER_LEN);
    }
}
