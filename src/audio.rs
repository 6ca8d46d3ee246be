use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Sample rate of the speech payload.
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;
pub const SPEECH_CHANNELS: u16 = 1;

/// Decoded PCM audio, samples in [-1.0, 1.0).
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<f32>,
}

impl AudioClip {
    /// Decode a base64 payload of little-endian 16-bit PCM. A trailing odd byte
    /// is dropped.
    pub fn from_base64_pcm(
        payload: &str,
        sample_rate: u32,
        channels: u16,
    ) -> Result<Self, base64::DecodeError> {
        let bytes = STANDARD.decode(payload.trim())?;
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
            .collect();
        Ok(Self {
            sample_rate,
            channels,
            samples,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / f64::from(self.sample_rate)
    }

    /// Encode as a 16-bit PCM WAV file.
    pub fn to_wav_bytes(&self) -> Vec<u8> {
        let bits_per_sample: u16 = 16;
        let block_align = self.channels * bits_per_sample / 8;
        let byte_rate = self.sample_rate * u32::from(block_align);
        let data_len = (self.samples.len() * 2) as u32;

        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&self.channels.to_le_bytes());
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&byte_rate.to_le_bytes());
        out.extend_from_slice(&block_align.to_le_bytes());
        out.extend_from_slice(&bits_per_sample.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for sample in &self.samples {
            let value = (sample * 32768.0).clamp(i16::MIN as f32, i16::MAX as f32) as i16;
            out.extend_from_slice(&value.to_le_bytes());
        }
        out
    }

    /// Write the clip under `dir` and return the file path.
    pub fn save_wav(&self, dir: &Path, name: &str) -> std::io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{name}.wav"));
        fs::write(&path, self.to_wav_bytes())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(samples: &[i16]) -> String {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        STANDARD.encode(bytes)
    }

    #[test]
    fn decodes_little_endian_samples() {
        let clip =
            AudioClip::from_base64_pcm(&encode(&[0, 16384, -32768]), SPEECH_SAMPLE_RATE, 1)
                .unwrap();
        assert_eq!(clip.samples, vec![0.0, 0.5, -1.0]);
        assert_eq!(clip.frame_count(), 3);
    }

    #[test]
    fn trailing_odd_byte_is_ignored() {
        let payload = STANDARD.encode([0x00u8, 0x40, 0x7f]);
        let clip = AudioClip::from_base64_pcm(&payload, SPEECH_SAMPLE_RATE, 1).unwrap();
        assert_eq!(clip.samples, vec![0.5]);
    }

    #[test]
    fn invalid_base64_is_an_error() {
        assert!(AudioClip::from_base64_pcm("***", SPEECH_SAMPLE_RATE, 1).is_err());
    }

    #[test]
    fn one_second_of_silence() {
        let clip = AudioClip {
            sample_rate: SPEECH_SAMPLE_RATE,
            channels: SPEECH_CHANNELS,
            samples: vec![0.0; 24_000],
        };
        assert!((clip.duration_secs() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn wav_header_describes_mono_24khz() {
        let clip = AudioClip::from_base64_pcm(&encode(&[1, 2, 3, 4]), SPEECH_SAMPLE_RATE, 1)
            .unwrap();
        let wav = clip.to_wav_bytes();

        assert_eq!(wav.len(), 44 + 8);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
        assert_eq!(
            u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]),
            24_000
        );
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 8);
        assert_eq!(i16::from_le_bytes([wav[44], wav[45]]), 1);
    }

    #[test]
    fn save_wav_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let clip = AudioClip {
            sample_rate: SPEECH_SAMPLE_RATE,
            channels: 1,
            samples: vec![0.25; 10],
        };
        let path = clip.save_wav(&dir.path().join("audio"), "answer").unwrap();
        assert!(path.ends_with("answer.wav"));
        assert_eq!(fs::metadata(&path).unwrap().len(), 44 + 20);
    }
}
