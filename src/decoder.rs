// src/decoder.rs
// Decodes morse audio by run-length segmentation and adaptive
// threshold classification.

use std::path::Path;

use hound::{SampleFormat, WavReader};
use log::debug;

use crate::error::{MorseError, Result};

/// Minimum number of consecutive zero samples before a gap is treated as a
/// real silence rather than a momentary dropout.
pub const DEFAULT_NOISE_FLOOR: usize = 50;
/// Fractional slack around a reference duration when classifying a run.
pub const DEFAULT_TOLERANCE: f32 = 0.10;

// Gap thresholds are derived from the shortest observed silence run.
const CHAR_GAP_FACTOR: usize = 3;
const WORD_GAP_FACTOR: usize = 10;

/// One classified run of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunClass {
    ShortTone,
    LongTone,
    IntraCharGap,
    InterCharGap,
    InterWordGap,
}

/// Durations inferred from the run-length population of a single recording.
///
/// Thresholds are never reused across files: tone length depends entirely
/// on how the recording was generated.
#[derive(Debug, Clone, Copy)]
struct Thresholds {
    short_tone: usize,
    long_tone: usize,
    short_gap: usize,
    char_gap: usize,
    word_gap: usize,
    /// Word-gap detection is disabled when the word threshold is
    /// indistinguishable from the base gap under the tolerance factor.
    has_word: bool,
}

impl Thresholds {
    fn infer(beeps: &[usize], silences: &[usize], tolerance: f32) -> Option<Self> {
        let short_tone = beeps.iter().min().copied()?;
        let long_tone = beeps.iter().max().copied()?;
        let short_gap = silences.iter().min().copied()?;
        let char_gap = short_gap * CHAR_GAP_FACTOR;
        let word_gap = short_gap * WORD_GAP_FACTOR;
        let has_word = !in_range(word_gap, short_gap, tolerance);
        Some(Self {
            short_tone,
            long_tone,
            short_gap,
            char_gap,
            word_gap,
            has_word,
        })
    }
}

/// `value` lies within `reference ± reference × tolerance`, exclusive at
/// both boundaries.
fn in_range(value: usize, reference: usize, tolerance: f32) -> bool {
    let value = value as f32;
    let reference = reference as f32;
    value > reference - reference * tolerance && value < reference + reference * tolerance
}

/// Decodes morse audio back into dot/dash patterns.
///
/// The sample stream is segmented into alternating beep and silence runs,
/// every run is classified against thresholds inferred from the recording
/// itself, and the classified sequence is reassembled into one pattern per
/// character. The decoder assumes input produced by a comparable encoder:
/// silence is exactly zero, everything else is tone.
pub struct MorseDecoder {
    noise_floor: usize,
    tolerance: f32,
}

impl Default for MorseDecoder {
    fn default() -> Self {
        Self {
            noise_floor: DEFAULT_NOISE_FLOOR,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl MorseDecoder {
    /// `noise_floor` is the number of consecutive zero samples required to
    /// confirm a silence; `tolerance` must lie within `[0, 1]`.
    pub fn new(noise_floor: usize, tolerance: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&tolerance) {
            return Err(MorseError::InvalidTolerance(tolerance));
        }
        Ok(Self {
            noise_floor,
            tolerance,
        })
    }

    /// Decodes a mono WAV file into one pattern per character. Word gaps
    /// become blank entries when `with_blanks` is set.
    pub fn decode_wav_file<P: AsRef<Path>>(
        &self,
        path: P,
        with_blanks: bool,
    ) -> Result<Vec<String>> {
        let samples = read_mono_samples(path)?;
        self.decode_samples(&samples, with_blanks)
    }

    /// Decodes a raw mono sample buffer.
    pub fn decode_samples(&self, samples: &[f32], with_blanks: bool) -> Result<Vec<String>> {
        let (beeps, silences) = self.segment_runs(samples)?;
        debug!(
            "segmented {} beep runs and {} silence runs",
            beeps.len(),
            silences.len()
        );
        let classes = self.classify_runs(&beeps, &silences)?;
        Ok(assemble_patterns(&classes, with_blanks))
    }

    /// Splits the buffer into beep and silence run lengths, in run order.
    ///
    /// A tentative silence that is interrupted by a non-zero sample before
    /// reaching the noise floor is folded back into the surrounding beep
    /// run; an unconfirmed trailing silence is discarded as a tail
    /// artifact. Leading silence before the first tone is skipped, so the
    /// recovered interleaving is always beep, silence, beep, ...
    fn segment_runs(&self, samples: &[f32]) -> Result<(Vec<usize>, Vec<usize>)> {
        if samples.is_empty() {
            return Err(MorseError::NoAudioData);
        }
        let Some(start) = samples.iter().position(|&s| s != 0.0) else {
            return Err(MorseError::NoAudioData);
        };

        let mut beeps = Vec::new();
        let mut silences = Vec::new();
        let mut beep_len = 0usize;
        let mut silence_len = 0usize;
        let mut tentative = 0usize;
        let mut in_silence = false;

        for &sample in &samples[start..] {
            if sample == 0.0 {
                if in_silence {
                    silence_len += 1;
                } else {
                    tentative += 1;
                    if tentative == self.noise_floor {
                        beeps.push(beep_len);
                        beep_len = 0;
                        silence_len = tentative;
                        tentative = 0;
                        in_silence = true;
                    }
                }
            } else if in_silence {
                silences.push(silence_len);
                silence_len = 0;
                in_silence = false;
                beep_len = 1;
            } else {
                // Dropout shorter than the floor, part of the beep.
                beep_len += tentative + 1;
                tentative = 0;
            }
        }

        if in_silence {
            silences.push(silence_len);
        } else {
            beeps.push(beep_len);
        }
        Ok((beeps, silences))
    }

    /// Infers thresholds from the run populations and classifies every run
    /// in the original interleaved order (beep, silence, beep, ...).
    fn classify_runs(&self, beeps: &[usize], silences: &[usize]) -> Result<Vec<RunClass>> {
        let Some(thresholds) = Thresholds::infer(beeps, silences, self.tolerance) else {
            return Err(MorseError::NoAudioData);
        };
        debug!("inferred {:?}", thresholds);

        let mut classes = Vec::with_capacity(beeps.len() + silences.len());
        for i in 0..beeps.len() + silences.len() {
            let class = if i % 2 == 0 {
                let len = beeps[i / 2];
                if in_range(len, thresholds.long_tone, self.tolerance) {
                    RunClass::LongTone
                } else if in_range(len, thresholds.short_tone, self.tolerance) {
                    RunClass::ShortTone
                } else {
                    return Err(MorseError::UnrecognizedToneDuration(len));
                }
            } else {
                let len = silences[i / 2];
                // A gap ambiguously matching both the word and the char
                // range resolves to a word gap.
                if thresholds.has_word && in_range(len, thresholds.word_gap, self.tolerance) {
                    RunClass::InterWordGap
                } else if in_range(len, thresholds.char_gap, self.tolerance) {
                    RunClass::InterCharGap
                } else if in_range(len, thresholds.short_gap, self.tolerance) {
                    RunClass::IntraCharGap
                } else {
                    return Err(MorseError::UnrecognizedGapDuration(len));
                }
            };
            classes.push(class);
        }
        Ok(classes)
    }
}

/// Rebuilds pattern strings from the classified run sequence.
///
/// Tones append their symbol to the character at the cursor, creating a new
/// slot when the cursor points past the end. An intra-character gap is a
/// no-op, an inter-character gap advances the cursor, and a word gap
/// additionally inserts a standalone blank slot when blanks are requested.
fn assemble_patterns(classes: &[RunClass], with_blanks: bool) -> Vec<String> {
    let mut patterns: Vec<String> = Vec::new();
    let mut cursor = 0usize;
    for &class in classes {
        match class {
            RunClass::ShortTone | RunClass::LongTone => {
                let symbol = if class == RunClass::ShortTone { '.' } else { '-' };
                if patterns.len() <= cursor {
                    patterns.push(symbol.to_string());
                } else {
                    patterns[cursor].push(symbol);
                }
            }
            RunClass::IntraCharGap => {}
            RunClass::InterCharGap => cursor += 1,
            RunClass::InterWordGap => {
                if with_blanks {
                    patterns.push(" ".to_string());
                    cursor += 2;
                } else {
                    cursor += 1;
                }
            }
        }
    }
    patterns
}

/// Reads a WAV file into normalized f32 samples, rejecting anything that is
/// not mono 16-bit integer or 32-bit float PCM.
fn read_mono_samples<P: AsRef<Path>>(path: P) -> Result<Vec<f32>> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    debug!("wav spec: {:?}", spec);
    if spec.channels != 1 {
        return Err(MorseError::UnsupportedChannelCount(spec.channels));
    }
    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<hound::Result<_>>()?,
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|s| s as f32 / 32768.0))
            .collect::<hound::Result<_>>()?,
        (format, bits) => {
            return Err(MorseError::UnsupportedSampleFormat(format!(
                "{:?}/{} bit",
                format, bits
            )));
        }
    };
    if samples.is_empty() {
        return Err(MorseError::NoAudioData);
    }
    Ok(samples)
}
