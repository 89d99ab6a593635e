use crate::utf8::Utf8Boundaries;

/// Starting capacity of the output buffer, in bytes.
pub const DEFAULT_INITIAL_CAPACITY: usize = 512;

/// Step by which the output buffer grows, in bytes.
pub const DEFAULT_GROWTH_INCREMENT: usize = 512;

/// Configuration options for the transcoder.
///
/// None of the capacity settings change the produced bytes; they only decide
/// how often the output buffer is reallocated.
///
/// # Examples
///
/// ```rust
/// use utft::{TranscodeOptions, Transcoder, Utf8Boundaries};
///
/// let transcoder = Transcoder::new(TranscodeOptions {
///     boundaries: Utf8Boundaries::Canonical,
///     ..Default::default()
/// });
/// assert_eq!(transcoder.transcode(&[0x9B, 0xBC, 0x8F, 0xFF]).unwrap(), "\u{7FF}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeOptions {
    /// Capacity the output buffer is created with. Any value is accepted;
    /// no more than the input can produce is allocated up front.
    ///
    /// # Default
    ///
    /// `512`
    pub initial_capacity: usize,

    /// Amount added to the output buffer's capacity whenever fewer than four
    /// bytes of headroom remain. Zero is treated as one, and the capacity
    /// saturates instead of overflowing for very large steps.
    ///
    /// # Default
    ///
    /// `512`
    pub growth_increment: usize,

    /// Thresholds that select the UTF-8 length of each code point.
    ///
    /// # Default
    ///
    /// [`Utf8Boundaries::Legacy`], which reproduces the legacy converter byte
    /// for byte.
    pub boundaries: Utf8Boundaries,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            growth_increment: DEFAULT_GROWTH_INCREMENT,
            boundaries: Utf8Boundaries::Legacy,
        }
    }
}
