// src/error.rs
// Error types shared by the encoder, decoder and symbol table.

use thiserror::Error;

/// Errors surfaced by encoding, decoding and symbol lookups.
///
/// Classification failures (`UnrecognizedToneDuration`,
/// `UnrecognizedGapDuration`) mean the inferred threshold model does not fit
/// the recording; `SymbolNotFound` means the dictionary does not cover the
/// input. Callers can tell a bad recording from an unknown character by
/// matching on the variant.
#[derive(Debug, Error)]
pub enum MorseError {
    /// A pattern contained a symbol other than `.` or `-`.
    #[error("invalid pattern {0:?}: only '.' and '-' are allowed")]
    InvalidPattern(String),

    /// The buffer contained no samples, or no tone at all.
    #[error("no audio data to decode")]
    NoAudioData,

    #[error("unsupported channel count {0}, only mono input is supported")]
    UnsupportedChannelCount(u16),

    #[error("unsupported sample format {0}")]
    UnsupportedSampleFormat(String),

    /// A beep run matched neither the short-tone nor the long-tone range.
    #[error("unrecognized tone duration of {0} samples")]
    UnrecognizedToneDuration(usize),

    /// A silence run matched none of the gap ranges.
    #[error("unrecognized gap duration of {0} samples")]
    UnrecognizedGapDuration(usize),

    /// The character or pattern has no entry in the symbol table or the
    /// fallback alphabet.
    #[error("no symbol table entry for {0:?}")]
    SymbolNotFound(String),

    /// The character or pattern is already mapped in the symbol table.
    #[error("symbol table already contains {0:?}")]
    DuplicateSymbol(String),

    #[error("tolerance factor {0} is out of range, must be within [0, 1]")]
    InvalidTolerance(f32),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, MorseError>;
