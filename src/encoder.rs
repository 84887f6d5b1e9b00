// src/encoder.rs
// Synthesizes dot/dash pattern sequences into PCM audio and WAV files.

use std::f32::consts::PI;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use log::debug;

use crate::error::{MorseError, Result};

pub const DEFAULT_SAMPLE_RATE: u32 = 8000;
pub const DEFAULT_FREQUENCY: f32 = 600.0;
/// Length of one dot in seconds. Dashes are three units; silences are
/// multiples of the same base.
pub const DEFAULT_UNIT_SECS: f32 = 0.1;

const AMPLITUDE: f32 = 0.5;
const DASH_UNITS: usize = 3;

// Accumulated silence lengths, in units of the base gap. These mirror the
// multipliers the decoder derives its gap thresholds from.
const CHAR_GAP_UNITS: usize = 3;
const WORD_GAP_UNITS: usize = 10;

/// Renders morse patterns into a mono PCM buffer at a fixed carrier
/// frequency and writes the result as a WAV file.
pub struct MorseEncoder {
    sample_rate: u32,
    frequency: f32,
    unit_samples: usize,
}

impl Default for MorseEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE, DEFAULT_FREQUENCY, DEFAULT_UNIT_SECS)
    }
}

impl MorseEncoder {
    /// `unit_secs` is the duration of one dot; every other segment length is
    /// derived from it.
    pub fn new(sample_rate: u32, frequency: f32, unit_secs: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            unit_samples: (unit_secs * sample_rate as f32) as usize,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Renders `patterns` into one contiguous sample buffer.
    ///
    /// Every tone is followed by one unit of silence; the gap is stretched
    /// to 3 units between characters and to 10 units at a blank word-marker
    /// entry. The final character keeps its single trailing unit, which
    /// later anchors the decoder's shortest-silence estimate.
    pub fn encode_patterns(&self, patterns: &[String]) -> Result<Vec<f32>> {
        let mut buffer = Vec::new();
        for (idx, pattern) in patterns.iter().enumerate() {
            if pattern == " " {
                // The preceding character already emitted one unit.
                self.push_silence(&mut buffer, WORD_GAP_UNITS - 1);
                continue;
            }
            for symbol in pattern.chars() {
                match symbol {
                    '.' => self.push_tone(&mut buffer, 1),
                    '-' => self.push_tone(&mut buffer, DASH_UNITS),
                    _ => return Err(MorseError::InvalidPattern(pattern.clone())),
                }
                self.push_silence(&mut buffer, 1);
            }
            // Stretch the trailing unit into an inter-character gap, unless
            // a word marker or the end of input follows.
            if matches!(patterns.get(idx + 1), Some(next) if next != " ") {
                self.push_silence(&mut buffer, CHAR_GAP_UNITS - 1);
            }
        }
        if buffer.is_empty() {
            return Err(MorseError::NoAudioData);
        }
        debug!(
            "encoded {} patterns into {} samples",
            patterns.len(),
            buffer.len()
        );
        Ok(buffer)
    }

    /// Encodes `patterns` and writes them as a 16-bit mono WAV file.
    pub fn write_wav<P: AsRef<Path>>(&self, patterns: &[String], path: P) -> Result<()> {
        let buffer = self.encode_patterns(patterns)?;
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec)?;
        for &sample in &buffer {
            writer.write_sample((sample * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
        Ok(())
    }

    fn push_tone(&self, buffer: &mut Vec<f32>, units: usize) {
        let samples = self.unit_samples * units;
        for i in 0..samples {
            let t = i as f32 / self.sample_rate as f32;
            buffer.push(AMPLITUDE * (2.0 * PI * self.frequency * t).sin());
        }
    }

    fn push_silence(&self, buffer: &mut Vec<f32>, units: usize) {
        buffer.extend(std::iter::repeat(0.0).take(self.unit_samples * units));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn segment_lengths_follow_unit_multiples() {
        let encoder = MorseEncoder::default();
        // dot + unit gap, stretched char gap, dash + trailing unit:
        // 1 + 1 + 2 + 3 + 1 = 8 units of 800 samples.
        let buffer = encoder.encode_patterns(&patterns(&[".", "-"])).unwrap();
        assert_eq!(buffer.len(), 8 * 800);
    }

    #[test]
    fn word_marker_stretches_gap_to_ten_units() {
        let encoder = MorseEncoder::default();
        // 1 + 1 + 9 + 1 + 1 = 13 units.
        let buffer = encoder.encode_patterns(&patterns(&[".", " ", "."])).unwrap();
        assert_eq!(buffer.len(), 13 * 800);
    }

    #[test]
    fn rejects_foreign_symbols() {
        let encoder = MorseEncoder::default();
        let err = encoder.encode_patterns(&patterns(&[".-x"])).unwrap_err();
        assert!(matches!(err, MorseError::InvalidPattern(_)));
    }

    #[test]
    fn empty_input_is_no_audio() {
        let encoder = MorseEncoder::default();
        let err = encoder.encode_patterns(&[]).unwrap_err();
        assert!(matches!(err, MorseError::NoAudioData));
    }

    #[test]
    fn writes_wav_file() {
        let encoder = MorseEncoder::default();
        let path = std::env::temp_dir().join("morsewav_encoder_test.wav");
        encoder.write_wav(&patterns(&["...", "---", "..."]), &path).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }
}
