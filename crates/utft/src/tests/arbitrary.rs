use alloc::boxed::Box;

use quickcheck::{Arbitrary, Gen};

/// A Unicode scalar value drawn uniformly from the whole code space, so that
/// supplementary planes are hit as often as the BMP.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Scalar(pub char);

impl Arbitrary for Scalar {
    fn arbitrary(g: &mut Gen) -> Self {
        loop {
            if let Some(c) = char::from_u32(u32::arbitrary(g) % 0x11_0000) {
                return Self(c);
            }
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

/// A buffer growth step in the range `4..=4096`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Increment(pub usize);

impl Arbitrary for Increment {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(4 + usize::arbitrary(g) % 4093)
    }
}
