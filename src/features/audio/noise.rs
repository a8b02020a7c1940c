//! Built-in white noise.

use std::path::Path;

use rand::Rng;

use crate::error::FocusError;

/// Sample rate of the generated clip.
pub const WHITE_NOISE_SAMPLE_RATE: u32 = 8_000;

const CLIP_SECONDS: u32 = 10;
const BITS_PER_SAMPLE: u16 = 8;

/// Write a mono 8-bit PCM WAV of soft white noise to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn render_white_noise(path: &Path) -> Result<(), FocusError> {
    let mut rng = rand::thread_rng();
    // Unsigned 8-bit PCM centers on 128; keep the amplitude low.
    let samples: Vec<u8> = (0..WHITE_NOISE_SAMPLE_RATE * CLIP_SECONDS)
        .map(|_| rng.gen_range(104..=152))
        .collect();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, wav_bytes(&samples))?;
    tracing::debug!(path = %path.display(), "rendered white noise");
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn wav_bytes(samples: &[u8]) -> Vec<u8> {
    let data_len = samples.len() as u32;
    let block_align: u16 = BITS_PER_SAMPLE / 8;
    let byte_rate = WHITE_NOISE_SAMPLE_RATE * u32::from(block_align);

    let mut out = Vec::with_capacity(44 + samples.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&WHITE_NOISE_SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(samples);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_wav_header() {
        let bytes = wav_bytes(&[128; 10]);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 46);
        assert_eq!(
            u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]),
            8_000
        );
        assert_eq!(u16::from_le_bytes([bytes[34], bytes[35]]), 8);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(bytes.len(), 54);
    }

    #[test]
    fn test_render_white_noise() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sounds").join("white-noise.wav");

        render_white_noise(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 44 + 80_000);
        assert!(bytes[44..].iter().all(|s| (104..=152).contains(s)));
    }
}
