//! UTF-T encoding helpers for tests and fuzzing.
//!
//! Only the decoding direction is supported by this crate; these helpers exist
//! to build well-formed input.

use alloc::vec::Vec;

use crate::unit::{ESCAPE_LEN, ESCAPE_OFFSET, SENTINEL};

/// Encode one character as a UTF-T unit.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn encode_char(c: char) -> ([u8; ESCAPE_LEN], usize) {
    let c = u32::from(c);
    if c < 0x80 {
        return ([c as u8, 0, 0, 0], 1);
    }
    let v = c + ESCAPE_OFFSET;
    let unit = [
        SENTINEL,
        0x80 | ((v >> 14) & 0x7F) as u8,
        0x80 | ((v >> 7) & 0x7F) as u8,
        0x80 | (v & 0x7F) as u8,
    ];
    (unit, ESCAPE_LEN)
}

/// Encode a string as UTF-T.
#[must_use]
pub fn encode_str(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() * 2);
    for c in s.chars() {
        let (unit, len) = encode_char(c);
        out.extend_from_slice(&unit[..len]);
    }
    out
}
