// src/lib.rs
// Morse audio encoding and decoding.
//
// Text is flattened into dot/dash patterns, synthesized into a WAV tone
// sequence, and decoded back by segmenting the sample stream into runs and
// classifying run lengths against thresholds inferred from the recording.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod symbols;

pub use decoder::MorseDecoder;
pub use encoder::MorseEncoder;
pub use error::{MorseError, Result};
pub use symbols::SymbolTable;

use std::path::Path;

/// Encodes `text` into a morse WAV file with the default carrier and
/// timing. Spaces become word gaps.
pub fn encode_text_to_wav<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
    let table = SymbolTable::new();
    let patterns = table.text_to_patterns(text, true)?;
    MorseEncoder::default().write_wav(&patterns, path)
}

/// Decodes a morse WAV file back into text, word gaps included.
pub fn decode_wav_to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let table = SymbolTable::new();
    let patterns = MorseDecoder::default().decode_wav_file(path, true)?;
    table.patterns_to_text(&patterns, true)
}
