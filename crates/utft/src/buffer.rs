use alloc::vec::Vec;

use crate::utf8::MAX_UTF8_LEN;

/// Free space that must remain in an [`OutputBuffer`] before a unit is
/// written: room for the longest UTF-8 sequence.
pub const UNIT_MARGIN: usize = MAX_UTF8_LEN;

/// Largest amount of memory an [`OutputBuffer`] allocates ahead of the bytes
/// actually written.
pub const EAGER_LIMIT: usize = 1 << 20;

/// Growable output for the transcoder.
///
/// The buffer tracks a logical capacity that starts at `initial_capacity` and
/// grows in steps of `growth_increment`. [`OutputBuffer::reserve_unit`] is
/// called before each unit, so writing one unit never needs a capacity check
/// of its own.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    bytes: Vec<u8>,
    capacity: usize,
    growth_increment: usize,
}

impl OutputBuffer {
    /// Create a buffer with the given starting capacity and growth step. A
    /// step of zero is treated as one.
    ///
    /// At most [`EAGER_LIMIT`] bytes are allocated up front; larger logical
    /// capacities are backed lazily as output is written.
    #[must_use]
    pub fn new(initial_capacity: usize, growth_increment: usize) -> Self {
        Self::with_allocation(initial_capacity, growth_increment, EAGER_LIMIT)
    }

    /// Like [`OutputBuffer::new`], but allocates no more up front than the
    /// transcoding of `input_len` bytes can produce.
    #[must_use]
    pub fn for_input(
        initial_capacity: usize,
        growth_increment: usize,
        input_len: usize,
    ) -> Self {
        let bound = input_len.saturating_mul(MAX_UTF8_LEN).saturating_add(UNIT_MARGIN);
        Self::with_allocation(initial_capacity, growth_increment, bound.min(EAGER_LIMIT))
    }

    fn with_allocation(initial_capacity: usize, growth_increment: usize, eager: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(initial_capacity.min(eager)),
            capacity: initial_capacity,
            growth_increment: growth_increment.max(1),
        }
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Current logical capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Grow until at least [`UNIT_MARGIN`] bytes are free.
    ///
    /// The logical capacity saturates at `usize::MAX`; the backing allocation
    /// never runs more than [`EAGER_LIMIT`] bytes ahead of the written data.
    pub fn reserve_unit(&mut self) {
        let needed = self.len().saturating_add(UNIT_MARGIN);
        if needed > self.capacity {
            let previous = self.capacity;
            let steps = (needed - self.capacity).div_ceil(self.growth_increment);
            self.capacity = self
                .capacity
                .saturating_add(steps.saturating_mul(self.growth_increment));
            tracing::trace!(from = previous, to = self.capacity, "grew output buffer");
        }
        if self.bytes.capacity() < needed {
            let target = self.capacity.min(self.len().saturating_add(EAGER_LIMIT));
            self.bytes.reserve_exact(target - self.len());
        }
    }

    /// Append one encoded unit. The caller must have called
    /// [`OutputBuffer::reserve_unit`] since the previous unit.
    pub fn push_unit(&mut self, unit: &[u8]) {
        debug_assert!(unit.len() <= UNIT_MARGIN);
        debug_assert!(
            self.len() + unit.len() <= self.capacity,
            "unit written without reserving"
        );
        self.bytes.extend_from_slice(unit);
    }

    /// Discard the contents, keeping the allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Hand over the written bytes, releasing any unused capacity.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        let mut bytes = self.bytes;
        bytes.shrink_to_fit();
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_growth_while_margin_remains() {
        let mut buf = OutputBuffer::new(8, 8);
        buf.reserve_unit();
        buf.push_unit(&[1, 2, 3, 4]);
        // len == capacity - 4: a full unit still fits
        buf.reserve_unit();
        assert_eq!(buf.capacity(), 8);
        buf.push_unit(&[5]);
        buf.reserve_unit();
        assert_eq!(buf.capacity(), 16);
    }

    #[test]
    fn small_increments_grow_repeatedly() {
        let mut buf = OutputBuffer::new(0, 1);
        buf.reserve_unit();
        assert_eq!(buf.capacity(), 4);
        buf.push_unit(&[0; 4]);
        buf.reserve_unit();
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    fn zero_increment_is_clamped() {
        let mut buf = OutputBuffer::new(0, 0);
        buf.reserve_unit();
        assert!(buf.capacity() >= UNIT_MARGIN);
    }

    #[test]
    fn huge_increment_saturates() {
        let mut buf = OutputBuffer::new(8, usize::MAX);
        for _ in 0..4 {
            buf.reserve_unit();
            buf.push_unit(&[0; 4]);
        }
        assert_eq!(buf.capacity(), usize::MAX);
        assert_eq!(buf.len(), 16);
    }

    #[test]
    fn huge_initial_capacity_allocates_lazily() {
        let mut buf = OutputBuffer::new(usize::MAX, 512);
        assert!(buf.bytes.capacity() <= EAGER_LIMIT);
        buf.reserve_unit();
        buf.push_unit(b"ok");
        assert_eq!(buf.as_slice(), b"ok");
    }

    #[test]
    fn allocation_follows_input_length() {
        let buf = OutputBuffer::for_input(512, 512, 3);
        assert_eq!(buf.capacity(), 512);
        assert!(buf.bytes.capacity() >= 3 * MAX_UTF8_LEN + UNIT_MARGIN);
        assert!(buf.bytes.capacity() < 512);
    }

    #[test]
    fn into_vec_releases_spare_capacity() {
        let mut buf = OutputBuffer::new(512, 512);
        buf.reserve_unit();
        buf.push_unit(b"abc");
        let bytes = buf.into_vec();
        assert_eq!(bytes, b"abc");
        assert_eq!(bytes.capacity(), 3);
    }
}
