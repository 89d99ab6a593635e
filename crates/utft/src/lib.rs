//! Decoder for UTF-T, the text encoding used by a legacy ERP database, to
//! UTF-8.
//!
//! UTF-T stores code points below `0x80` as single bytes and every other code
//! point as a four byte unit: the sentinel `0x9B` followed by three bytes
//! whose low seven bits, concatenated and reduced by `0x0F0000`, give the code
//! point.
//!
//! ```rust
//! let utf8 = utft::transcode(&[b'A', 0x9B, 0xBC, 0xC1, 0xAC]).unwrap();
//! assert_eq!(utf8, "A€");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod error;
mod options;
mod transcoder;
mod unit;
mod utf8;

#[cfg(any(test, feature = "fuzzing"))]
pub mod testing;

#[cfg(test)]
mod tests;

pub use bstr::BString;
pub use buffer::{EAGER_LIMIT, OutputBuffer, UNIT_MARGIN};
pub use error::DecodeError;
pub use options::{DEFAULT_GROWTH_INCREMENT, DEFAULT_INITIAL_CAPACITY, TranscodeOptions};
pub use transcoder::Transcoder;
pub use unit::{ESCAPE_LEN, ESCAPE_OFFSET, SENTINEL, Unit, UnitKind, Units, decode_unit};
pub use utf8::{MAX_UTF8_LEN, Utf8Boundaries, encode_code_point, encoded_len};

/// Transcode `input` with the default options.
///
/// # Errors
///
/// Returns [`DecodeError::TruncatedUnit`] if a sentinel byte is not followed
/// by three more bytes.
pub fn transcode(input: &[u8]) -> Result<BString, DecodeError> {
    Transcoder::default().transcode(input)
}

/// Null-propagating entry point for database hosts.
///
/// An absent argument gives an absent result without decoding anything,
/// matching a function declared `STRICT`.
///
/// ```rust
/// assert_eq!(utft::utft_to_utf8(None), Ok(None));
/// assert_eq!(utft::utft_to_utf8(Some(&b"ok"[..])).unwrap().unwrap(), "ok");
/// ```
///
/// # Errors
///
/// Returns [`DecodeError::TruncatedUnit`] if a sentinel byte is not followed
/// by three more bytes.
pub fn utft_to_utf8(input: Option<&[u8]>) -> Result<Option<BString>, DecodeError> {
    input.map(transcode).transpose()
}
