use depthit_core_rs::loc::ReadInterval;
use depthit_core_rs::num::PrimInt;
use derive_more::{Display, Error};

/// Failures surfaced by the coverage engine. All variants are local
/// precondition violations: none are transient, none are retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum Error<Idx: PrimInt> {
    /// A read interval has a negative start/length or its end overflows Idx.
    /// Raised during accumulation, before any stored state is touched.
    #[display("invalid read interval {interval}")]
    InvalidInterval { interval: ReadInterval<Idx> },

    /// A depth query outside [0, span). Distinct from a depth of zero, which
    /// is a legitimate value for an in-range position covered by no read.
    #[display("locus {locus} is outside the computed span of {span} positions")]
    LocusOutOfRange { locus: Idx, span: usize },

    /// A depth query before any successful compute_depth call.
    #[display("depth profile has not been computed yet")]
    ProfileNotComputed,

    /// The profile span does not fit a memory index on this platform.
    #[display("profile span past {max_end} is not addressable")]
    SpanOverflow { max_end: Idx },

    /// More reads than a u32 depth cell can count.
    #[display("{reads} reads exceed the depth counter capacity")]
    DepthOverflow { reads: usize },
}
