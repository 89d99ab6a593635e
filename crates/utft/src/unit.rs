//! Decoding of individual UTF-T units.
//!
//! A UTF-T stream is a sequence of units, each starting at a byte the
//! previous unit did not consume:
//!
//! - a byte below `0x80` is an ASCII unit carrying its own value;
//! - the sentinel `0x9B` starts a four byte escape whose three trailing bytes
//!   carry seven payload bits each, offset by `0x0F0000`;
//! - any other byte with the high bit set is a two byte unit whose value is
//!   the first byte. The second byte is skipped without being inspected.
//!
//! ```rust
//! use utft::{UnitKind, decode_unit};
//!
//! let unit = decode_unit(&[0x9B, 0xBC, 0xC1, 0xAC], 0).unwrap();
//! assert_eq!(unit.code_point, 0x20AC);
//! assert_eq!(unit.kind, UnitKind::Escape);
//! assert_eq!(unit.len, 4);
//! ```

use core::iter::FusedIterator;

use crate::error::DecodeError;

/// Lead byte of a four byte escape unit.
pub const SENTINEL: u8 = 0x9B;

/// Length in bytes of an escape unit, sentinel included.
pub const ESCAPE_LEN: usize = 4;

/// Value subtracted from the 21-bit escape payload to obtain the code point.
pub const ESCAPE_OFFSET: u32 = 0x0F_0000;

const PAYLOAD_MASK: u8 = 0x7F;

/// Which branch of the decoder produced a [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// A single byte below `0x80`.
    Ascii,
    /// A sentinel followed by three payload bytes.
    Escape,
    /// A high byte other than the sentinel; it and the following byte form
    /// one unit whose value is the high byte.
    HighByte,
}

impl UnitKind {
    /// Number of input bytes the cursor advances past for this kind.
    #[must_use]
    pub const fn advance(self) -> usize {
        match self {
            UnitKind::Ascii => 1,
            UnitKind::HighByte => 2,
            UnitKind::Escape => ESCAPE_LEN,
        }
    }
}

/// One decoded UTF-T unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    /// Offset of the unit's first byte in the input.
    pub offset: usize,
    /// Number of input bytes the unit advances over. For a
    /// [`UnitKind::HighByte`] in the last position this reaches one past the
    /// end of the input.
    pub len: usize,
    /// Decoded value. Escapes with a payload below [`ESCAPE_OFFSET`] wrap
    /// around and may exceed `0x10FFFF`.
    pub code_point: u32,
    /// Branch that produced the unit.
    pub kind: UnitKind,
}

impl Unit {
    /// Offset of the first byte after this unit.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// The decoded value as a `char`, when it is a Unicode scalar value.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.code_point)
    }
}

/// Decode the unit that starts at `offset`.
///
/// # Errors
///
/// Returns [`DecodeError::TruncatedUnit`] when the byte at `offset` is the
/// sentinel and fewer than three bytes follow it.
///
/// # Panics
///
/// Panics if `offset` is not a valid index into `input`.
pub fn decode_unit(input: &[u8], offset: usize) -> Result<Unit, DecodeError> {
    let lead = input[offset];

    if lead == SENTINEL {
        let Some(&[b1, b2, b3]) = input.get(offset + 1..offset + ESCAPE_LEN) else {
            let available = input.len() - offset - 1;
            tracing::debug!(offset, available, "rejecting truncated UTF-T unit");
            return Err(DecodeError::TruncatedUnit { offset, available });
        };
        let payload = (u32::from(b1 & PAYLOAD_MASK) << 14)
            | (u32::from(b2 & PAYLOAD_MASK) << 7)
            | u32::from(b3 & PAYLOAD_MASK);
        return Ok(Unit {
            offset,
            len: ESCAPE_LEN,
            code_point: payload.wrapping_sub(ESCAPE_OFFSET),
            kind: UnitKind::Escape,
        });
    }

    let kind = if lead & 0x80 == 0 {
        UnitKind::Ascii
    } else {
        UnitKind::HighByte
    };
    Ok(Unit {
        offset,
        len: kind.advance(),
        code_point: u32::from(lead),
        kind,
    })
}

/// Iterator over the units of a UTF-T input.
///
/// Stops after yielding the first error.
#[derive(Debug, Clone)]
pub struct Units<'a> {
    input: &'a [u8],
    cursor: usize,
}

impl<'a> Units<'a> {
    /// Iterate over the units of `input`, starting at its first byte.
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, cursor: 0 }
    }

    /// Offset of the next unit to decode. May exceed the input length by one
    /// after a trailing [`UnitKind::HighByte`].
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Units<'_> {
    type Item = Result<Unit, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.input.len() {
            return None;
        }
        match decode_unit(self.input, self.cursor) {
            Ok(unit) => {
                self.cursor = unit.end();
                Some(Ok(unit))
            }
            Err(err) => {
                self.cursor = self.input.len();
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.input.len().saturating_sub(self.cursor);
        (remaining.div_ceil(ESCAPE_LEN), Some(remaining))
    }
}

impl FusedIterator for Units<'_> {}
