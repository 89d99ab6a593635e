use thiserror::Error;

/// Errors reported while decoding a UTF-T byte sequence.
///
/// Only structural problems that would otherwise force a read past the end of
/// the input are reported. Payload bits are never validated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A sentinel byte (`0x9B`) was found with fewer than three bytes after
    /// it.
    #[error(
        "truncated UTF-T unit at byte {offset}: sentinel needs 3 trailing bytes, {available} available"
    )]
    TruncatedUnit {
        /// Offset of the sentinel byte within the input.
        offset: usize,
        /// Number of bytes that followed the sentinel.
        available: usize,
    },
}

impl DecodeError {
    /// Offset of the unit that failed to decode.
    #[must_use]
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::TruncatedUnit { offset, .. } => offset,
        }
    }
}
