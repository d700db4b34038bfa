use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;

use crate::num::PrimInt;
use num::{CheckedAdd, Zero};
#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::Dissolve;
use derive_more::Constructor;
use impl_tools::autoimpl;

/// ReadInterval is an aligned read's covered span, stored as a (start, length)
/// pair with half-open semantics [start, start + length).
///
/// It is not represented as a Rust-native Range for a couple of reasons:
/// - Reads arrive as length-coded rows, and the pair keeps them losslessly
///   (including zero-length reads, which cover no position).
/// - Construction performs no validation: accumulation is where negative or
///   overflowing coordinates are reported, so a signed interval is allowed to
///   exist in a malformed state until then.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Dissolve, Constructor)]
pub struct ReadInterval<Idx: PrimInt> {
    start: Idx,
    length: Idx,
}

/// Trait for types that can be generally viewed as length-coded read spans.
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>, Rc<T>, Arc<T>)]
pub trait ReadIntervalOp {
    type Idx: PrimInt;

    /// Start position of the read span.
    fn start(&self) -> Self::Idx;

    /// Length of the read span.
    fn length(&self) -> Self::Idx;

    /// End position (exclusive) of the read span. May wrap if start + length
    /// overflows Idx; use checked_end when the span is not known to be valid.
    fn end(&self) -> Self::Idx {
        self.start() + self.length()
    }

    /// End position (exclusive), or None if start + length overflows Idx.
    fn checked_end(&self) -> Option<Self::Idx> {
        self.start().checked_add(&self.length())
    }

    /// Check if the read span covers no position at all.
    fn is_empty(&self) -> bool {
        self.length() == Self::Idx::zero()
    }

    /// Check if the read span covers a given position.
    fn contains(&self, pos: Self::Idx) -> bool {
        self.start() <= pos && pos < self.end()
    }
}

impl<Idx: PrimInt> ReadIntervalOp for ReadInterval<Idx> {
    type Idx = Idx;

    #[inline(always)]
    fn start(&self) -> Self::Idx {
        self.start
    }
    #[inline(always)]
    fn length(&self) -> Self::Idx {
        self.length
    }
}

impl<Idx: PrimInt> ReadInterval<Idx> {
    pub fn cast<T: PrimInt>(&self) -> Option<ReadInterval<T>> {
        match (T::from(self.start), T::from(self.length)) {
            (Some(start), Some(length)) => Some(ReadInterval { start, length }),
            _ => None,
        }
    }
}

impl<Idx: PrimInt> Display for ReadInterval<Idx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.start, self.length)
    }
}

impl<Idx: PrimInt> From<(Idx, Idx)> for ReadInterval<Idx> {
    fn from((start, length): (Idx, Idx)) -> Self {
        Self { start, length }
    }
}

impl<Idx: PrimInt> From<ReadInterval<Idx>> for (Idx, Idx) {
    fn from(interval: ReadInterval<Idx>) -> Self {
        (interval.start, interval.length)
    }
}

impl<Idx: PrimInt> PartialEq<(Idx, Idx)> for ReadInterval<Idx> {
    fn eq(&self, other: &(Idx, Idx)) -> bool {
        self.start == other.0 && self.length == other.1
    }
}
