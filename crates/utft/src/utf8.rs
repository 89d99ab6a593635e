//! Encoding of decoded code points into UTF-8.
//!
//! The encoder picks the size class by comparing the code point against three
//! thresholds. The legacy converter used `0x7F`, `0x07FF` and `0xFFFF`, one
//! less than the standard UTF-8 boundaries, so U+007F (when it arrives
//! through an escape), U+07FF and U+FFFF come out one size class larger than
//! necessary. Those overlong sequences are reproduced by
//! [`Utf8Boundaries::Legacy`]; [`Utf8Boundaries::Canonical`] produces
//! shortest-form UTF-8.

/// Largest number of bytes a single encoded code point occupies.
pub const MAX_UTF8_LEN: usize = 4;

const CONTINUATION: u8 = 0x80;
const CONTINUATION_MASK: u32 = 0x3F;

/// Thresholds used to select the UTF-8 size class of a code point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Utf8Boundaries {
    /// `c < 0x7F` → 1 byte, `c < 0x07FF` → 2, `c < 0xFFFF` → 3, else 4.
    ///
    /// Byte compatible with the legacy converter.
    #[default]
    Legacy,
    /// `c < 0x80` → 1 byte, `c < 0x0800` → 2, `c < 0x1_0000` → 3, else 4.
    Canonical,
}

impl Utf8Boundaries {
    const fn limits(self) -> [u32; 3] {
        match self {
            Utf8Boundaries::Legacy => [0x7F, 0x07FF, 0xFFFF],
            Utf8Boundaries::Canonical => [0x80, 0x0800, 0x1_0000],
        }
    }
}

/// Number of bytes `code_point` encodes to under `boundaries`.
#[must_use]
pub const fn encoded_len(code_point: u32, boundaries: Utf8Boundaries) -> usize {
    let [one, two, three] = boundaries.limits();
    if code_point < one {
        1
    } else if code_point < two {
        2
    } else if code_point < three {
        3
    } else {
        4
    }
}

/// Encode `code_point` into the front of `dst`, returning the number of
/// bytes written.
///
/// Bits above the ones a size class can carry are dropped, so values past
/// `0x10FFFF` still encode to four bytes.
///
/// ```rust
/// use utft::{Utf8Boundaries, encode_code_point};
///
/// let mut dst = [0; 4];
/// let n = encode_code_point(0x20AC, Utf8Boundaries::Legacy, &mut dst);
/// assert_eq!(&dst[..n], "€".as_bytes());
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn encode_code_point(
    code_point: u32,
    boundaries: Utf8Boundaries,
    dst: &mut [u8; MAX_UTF8_LEN],
) -> usize {
    let c = code_point;
    let cont = |shift: u32| CONTINUATION | ((c >> shift) & CONTINUATION_MASK) as u8;

    match encoded_len(c, boundaries) {
        1 => {
            dst[0] = c as u8;
            1
        }
        2 => {
            dst[0] = 0xC0 | ((c >> 6) & 0x1F) as u8;
            dst[1] = cont(0);
            2
        }
        3 => {
            dst[0] = 0xE0 | ((c >> 12) & 0x0F) as u8;
            dst[1] = cont(6);
            dst[2] = cont(0);
            3
        }
        _ => {
            dst[0] = 0xF0 | ((c >> 18) & 0x07) as u8;
            dst[1] = cont(12);
            dst[2] = cont(6);
            dst[3] = cont(0);
            4
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn encode(code_point: u32, boundaries: Utf8Boundaries) -> alloc::vec::Vec<u8> {
        let mut dst = [0; MAX_UTF8_LEN];
        let n = encode_code_point(code_point, boundaries, &mut dst);
        dst[..n].to_vec()
    }

    #[rstest]
    #[case(0x41, &[0x41])]
    #[case(0xE7, &[0xC3, 0xA7])]
    #[case(0x20AC, &[0xE2, 0x82, 0xAC])]
    #[case(0x1D11E, &[0xF0, 0x9D, 0x84, 0x9E])]
    #[case(0x10_FFFF, &[0xF4, 0x8F, 0xBF, 0xBF])]
    fn both_boundaries_agree_away_from_thresholds(#[case] code_point: u32, #[case] expected: &[u8]) {
        assert_eq!(encode(code_point, Utf8Boundaries::Legacy), expected);
        assert_eq!(encode(code_point, Utf8Boundaries::Canonical), expected);
    }

    // The legacy thresholds give these three code points an overlong form.
    #[rstest]
    #[case(0x7F, &[0xC1, 0xBF], &[0x7F])]
    #[case(0x07FF, &[0xE0, 0x9F, 0xBF], &[0xDF, 0xBF])]
    #[case(0xFFFF, &[0xF0, 0x8F, 0xBF, 0xBF], &[0xEF, 0xBF, 0xBF])]
    fn legacy_thresholds_are_overlong(
        #[case] code_point: u32,
        #[case] legacy: &[u8],
        #[case] canonical: &[u8],
    ) {
        assert_eq!(encode(code_point, Utf8Boundaries::Legacy), legacy);
        assert_eq!(encode(code_point, Utf8Boundaries::Canonical), canonical);
    }

    #[rstest]
    #[case(0x7E, 1)]
    #[case(0x7F, 2)]
    #[case(0x7FE, 2)]
    #[case(0x7FF, 3)]
    #[case(0xFFFE, 3)]
    #[case(0xFFFF, 4)]
    fn legacy_size_classes(#[case] code_point: u32, #[case] len: usize) {
        assert_eq!(encoded_len(code_point, Utf8Boundaries::Legacy), len);
    }

    #[test]
    fn canonical_matches_char_encoding() {
        for c in ['\0', '\u{7F}', '\u{80}', '\u{7FF}', '\u{800}', '\u{FFFF}', '\u{10000}'] {
            let mut buf = [0; 4];
            assert_eq!(
                encode(u32::from(c), Utf8Boundaries::Canonical),
                c.encode_utf8(&mut buf).as_bytes()
            );
        }
    }

    #[test]
    fn out_of_range_values_are_masked() {
        let bytes = encode(0xFFF1_0001, Utf8Boundaries::Legacy);
        assert_eq!(bytes.len(), 4);
        assert_eq!(bytes[0] & 0xF8, 0xF0);
        assert!(bytes[1..].iter().all(|b| b & 0xC0 == 0x80));
    }
}
