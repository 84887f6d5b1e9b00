use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use morsewav::decoder::{DEFAULT_NOISE_FLOOR, DEFAULT_TOLERANCE};
use morsewav::encoder::{DEFAULT_FREQUENCY, DEFAULT_SAMPLE_RATE, DEFAULT_UNIT_SECS};
use morsewav::{MorseDecoder, MorseEncoder, SymbolTable};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text into a morse WAV file
    Encode {
        /// Text to encode
        text: String,
        /// Path of the WAV file to write
        #[arg(value_name = "WAV_FILE")]
        output: PathBuf,
        /// Carrier frequency in Hz
        #[arg(long, default_value_t = DEFAULT_FREQUENCY)]
        frequency: f32,
        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,
        /// Dot duration in seconds
        #[arg(long, default_value_t = DEFAULT_UNIT_SECS)]
        unit: f32,
    },
    /// Decode a morse WAV file back into text
    Decode {
        /// Path to the input WAV file
        #[arg(value_name = "WAV_FILE")]
        wav_file: PathBuf,
        /// Tolerance factor for run classification, between 0 and 1
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f32,
        /// Consecutive zero samples required to confirm a silence
        #[arg(long, default_value_t = DEFAULT_NOISE_FLOOR)]
        noise_floor: usize,
        /// Print the dot/dash patterns instead of text
        #[arg(long)]
        patterns: bool,
    },
}

fn main() -> Result<()> {
    // Use `RUST_LOG=debug` to see segmentation and threshold details.
    env_logger::init();
    let cli = Cli::parse();
    let table = SymbolTable::new();

    match cli.command {
        Command::Encode {
            text,
            output,
            frequency,
            sample_rate,
            unit,
        } => {
            let patterns = table.text_to_patterns(&text, true)?;
            let encoder = MorseEncoder::new(sample_rate, frequency, unit);
            encoder.write_wav(&patterns, &output)?;
            log::info!("Wrote {:?}", output);
        }
        Command::Decode {
            wav_file,
            tolerance,
            noise_floor,
            patterns,
        } => {
            log::info!("Opening WAV file: {:?}", wav_file);
            let decoder = MorseDecoder::new(noise_floor, tolerance)?;
            let decoded = decoder.decode_wav_file(&wav_file, true)?;
            if patterns {
                println!("{}", decoded.join("/"));
            } else {
                println!("{}", table.patterns_to_text(&decoded, true)?);
            }
        }
    }
    Ok(())
}
