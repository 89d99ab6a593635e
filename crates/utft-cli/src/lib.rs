//! Command-line front end for the `utft` transcoder.

use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use utft::{
    DEFAULT_GROWTH_INCREMENT, DEFAULT_INITIAL_CAPACITY, TranscodeOptions, Transcoder,
    Utf8Boundaries,
};

/// Convert UTF-T encoded text to UTF-8.
#[derive(Parser, Debug)]
#[command(name = "utft")]
#[command(about = "Convert UTF-T encoded text to UTF-8.", long_about = None)]
pub struct Cli {
    /// Input file; reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,
    /// Output file; writes stdout when omitted or `-`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Input is hexadecimal text; whitespace is ignored.
    #[arg(long, default_value_t = false)]
    pub hex: bool,
    /// Emit shortest-form UTF-8 instead of the legacy byte-compatible form.
    #[arg(long, default_value_t = false)]
    pub canonical: bool,
    /// Transcode each newline-separated record on its own.
    ///
    /// Matches whole-input decoding only for well-formed records: a 0x0A
    /// right after a non-sentinel high byte is a record separator here, but
    /// is skipped as part of that unit when decoding the whole input.
    #[arg(long, default_value_t = false)]
    pub lines: bool,
    /// Starting capacity of the output buffer.
    #[arg(long, default_value_t = DEFAULT_INITIAL_CAPACITY)]
    pub initial_capacity: usize,
    /// Step by which the output buffer grows.
    #[arg(long, default_value_t = DEFAULT_GROWTH_INCREMENT)]
    pub growth_increment: usize,
}

impl Cli {
    /// Transcoder configured from the command line.
    #[must_use]
    pub fn transcoder(&self) -> Transcoder {
        Transcoder::new(TranscodeOptions {
            initial_capacity: self.initial_capacity,
            growth_increment: self.growth_increment,
            boundaries: if self.canonical {
                Utf8Boundaries::Canonical
            } else {
                Utf8Boundaries::Legacy
            },
        })
    }
}

/// Read input, transcode it, and write the result.
///
/// # Errors
///
/// Fails on I/O errors, malformed hex input, or a truncated UTF-T unit.
pub fn run(cli: &Cli) -> Result<()> {
    let raw = read_input(cli.input.as_deref())?;
    let input = if cli.hex { decode_hex(&raw)? } else { raw };
    let transcoder = cli.transcoder();

    let out = if cli.lines {
        transcode_lines(&transcoder, &input)?
    } else {
        transcoder
            .transcode(&input)
            .context("transcode UTF-T input")?
            .into()
    };
    tracing::debug!(input_len = input.len(), output_len = out.len(), "done");
    write_output(cli.output.as_deref(), &out)
}

/// Transcode newline-separated records independently, keeping the separators.
///
/// # Errors
///
/// Fails with the 1-based record number when a record ends inside a UTF-T
/// unit.
pub fn transcode_lines(transcoder: &Transcoder, input: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len());
    for (idx, record) in input.split(|&b| b == b'\n').enumerate() {
        if idx > 0 {
            out.push(b'\n');
        }
        let utf8 = transcoder
            .transcode(record)
            .with_context(|| format!("transcode record {}", idx + 1))?;
        out.extend_from_slice(&utf8);
    }
    Ok(out)
}

/// Decode hexadecimal text, ignoring ASCII whitespace.
///
/// # Errors
///
/// Fails on non-hex characters or an odd number of digits.
pub fn decode_hex(text: &[u8]) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    hex::decode(digits).context("decode hex input")
}

fn is_stdio(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if !is_stdio(Some(path)) => {
            std::fs::read(path).with_context(|| format!("read input: {}", path.display()))
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) if !is_stdio(Some(path)) => {
            std::fs::write(path, bytes).with_context(|| format!("write output: {}", path.display()))
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).context("write stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}
