use bstr::BString;

use crate::{
    buffer::OutputBuffer,
    error::DecodeError,
    options::TranscodeOptions,
    unit::{UnitKind, Units},
    utf8::{MAX_UTF8_LEN, encode_code_point},
};

/// Converts UTF-T byte sequences to UTF-8.
///
/// A `Transcoder` holds only its options; every call decodes its whole input
/// in one pass and shares nothing with other calls.
///
/// ```rust
/// use utft::Transcoder;
///
/// let transcoder = Transcoder::default();
/// let utf8 = transcoder
///     .transcode(&[0x9B, 0xBC, 0x81, 0xE7, b'a', 0x9B, 0xC3, 0xA2, 0x9E])
///     .unwrap();
/// assert_eq!(utf8, "ça𝄞");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Transcoder {
    options: TranscodeOptions,
}

impl Transcoder {
    /// Create a transcoder with the given options.
    #[must_use]
    pub fn new(options: TranscodeOptions) -> Self {
        Self { options }
    }

    /// The options this transcoder was created with.
    #[must_use]
    pub fn options(&self) -> &TranscodeOptions {
        &self.options
    }

    /// An empty output buffer sized according to the options.
    #[must_use]
    pub fn output_buffer(&self) -> OutputBuffer {
        OutputBuffer::new(self.options.initial_capacity, self.options.growth_increment)
    }

    /// Decode `input` and return its UTF-8 encoding.
    ///
    /// With [`Utf8Boundaries::Legacy`](crate::Utf8Boundaries::Legacy) the
    /// result may contain overlong sequences, so it is returned as a
    /// [`BString`] rather than a `String`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TruncatedUnit`] if a sentinel byte is not
    /// followed by three more bytes.
    pub fn transcode(&self, input: &[u8]) -> Result<BString, DecodeError> {
        let mut out = OutputBuffer::for_input(
            self.options.initial_capacity,
            self.options.growth_increment,
            input.len(),
        );
        self.transcode_into(input, &mut out)?;
        Ok(BString::from(out.into_vec()))
    }

    /// Decode `input`, appending its UTF-8 encoding to `out`, and return the
    /// number of units decoded.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TruncatedUnit`] if a sentinel byte is not
    /// followed by three more bytes. Units before the truncated one have
    /// already been appended to `out` when this happens.
    pub fn transcode_into(
        &self,
        input: &[u8],
        out: &mut OutputBuffer,
    ) -> Result<usize, DecodeError> {
        let start_len = out.len();
        let mut scratch = [0u8; MAX_UTF8_LEN];
        let mut units = 0usize;

        for unit in Units::new(input) {
            let unit = unit?;
            out.reserve_unit();
            match unit.kind {
                #[allow(clippy::cast_possible_truncation)]
                UnitKind::Ascii => out.push_unit(&[unit.code_point as u8]),
                UnitKind::Escape | UnitKind::HighByte => {
                    let n = encode_code_point(unit.code_point, self.options.boundaries, &mut scratch);
                    out.push_unit(&scratch[..n]);
                }
            }
            units += 1;
        }

        tracing::trace!(
            input_len = input.len(),
            output_len = out.len() - start_len,
            units,
            "transcoded UTF-T input"
        );
        Ok(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Utf8Boundaries;

    #[test]
    fn ascii_bytes_bypass_the_encoder() {
        // U+007F as a plain byte stays one byte even with legacy thresholds.
        let out = Transcoder::default().transcode(&[0x7F]).unwrap();
        assert_eq!(out, [0x7Fu8].as_slice());
    }

    #[test]
    fn escaped_del_is_overlong_under_legacy_thresholds() {
        let escaped_del = [0x9B, 0xBC, 0x80, 0xFF];
        let legacy = Transcoder::default().transcode(&escaped_del).unwrap();
        assert_eq!(legacy, [0xC1u8, 0xBF].as_slice());

        let canonical = Transcoder::new(TranscodeOptions {
            boundaries: Utf8Boundaries::Canonical,
            ..Default::default()
        })
        .transcode(&escaped_del)
        .unwrap();
        assert_eq!(canonical, [0x7Fu8].as_slice());
    }

    #[test]
    fn high_byte_encodes_as_two_bytes() {
        let out = Transcoder::default().transcode(&[0xE9, 0x00, b'!']).unwrap();
        assert_eq!(out, "é!");
    }

    #[test]
    fn transcode_into_appends_and_counts_units() {
        let transcoder = Transcoder::default();
        let mut out = transcoder.output_buffer();
        assert_eq!(transcoder.transcode_into(b"ab", &mut out).unwrap(), 2);
        assert_eq!(
            transcoder
                .transcode_into(&[0x9B, 0xBC, 0xC1, 0xAC], &mut out)
                .unwrap(),
            1
        );
        assert_eq!(out.as_slice(), "ab€".as_bytes());
    }

    #[test]
    fn extreme_capacities_do_not_change_output() {
        let input = [b'a'; 600];
        let reference = Transcoder::default().transcode(&input).unwrap();
        for (initial_capacity, growth_increment) in
            [(512, usize::MAX), (usize::MAX, 512), (usize::MAX, usize::MAX), (0, 0)]
        {
            let out = Transcoder::new(TranscodeOptions {
                initial_capacity,
                growth_increment,
                ..Default::default()
            })
            .transcode(&input)
            .unwrap();
            assert_eq!(out, reference);
        }
        assert_eq!(
            Transcoder::new(TranscodeOptions {
                initial_capacity: usize::MAX,
                ..Default::default()
            })
            .transcode(b"a")
            .unwrap(),
            "a"
        );
    }

    #[test]
    fn truncated_unit_reports_offset() {
        let err = Transcoder::default()
            .transcode(&[b'x', b'y', 0x9B, 0xBC, 0x81])
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedUnit {
                offset: 2,
                available: 2
            }
        );
    }
}
