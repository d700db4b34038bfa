use depthit_core_rs::loc::{ReadInterval, ReadIntervalOp};
use depthit_core_rs::num::PrimInt;
use derive_getters::{Dissolve, Getters};

use crate::error::Error;
use crate::profile::DepthProfile;

/// Accumulates aligned read intervals and loci of interest, then materializes
/// the per-position depth track for the whole covered span.
///
/// The engine is a single-session accumulator: reads and loci only grow, and
/// the profile is rebuilt from scratch by each compute_depth call. Appending
/// reads after a compute leaves the stored profile stale until the next
/// compute_depth; the engine performs no automatic invalidation.
///
/// Not synchronized: one engine instance serves one logical caller at a time.
#[derive(Debug, Clone, Default, Getters, Dissolve)]
pub struct CoverageEngine<Idx: PrimInt> {
    /// Read spans accumulated so far, in normalized order after the last
    /// normalize/compute_depth call.
    reads: Vec<ReadInterval<Idx>>,
    /// Positions to resolve against the profile via loci_depths.
    loci: Vec<Idx>,
    #[getter(skip)]
    profile: Option<DepthProfile>,
}

impl<Idx: PrimInt> CoverageEngine<Idx> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append read intervals to the accumulated set. Duplicates accumulate:
    /// feeding the same source twice doubles its contribution. Coordinates
    /// are not validated here; compute_depth rejects malformed spans before
    /// touching any state.
    pub fn append_reads(&mut self, reads: impl IntoIterator<Item = ReadInterval<Idx>>) -> &mut Self {
        self.reads.extend(reads);
        self
    }

    /// Append loci of interest. Kept verbatim; resolved lazily by
    /// loci_depths.
    pub fn append_loci(&mut self, loci: impl IntoIterator<Item = Idx>) -> &mut Self {
        self.loci.extend(loci);
        self
    }

    /// The last computed profile, or None before the first successful
    /// compute_depth.
    pub fn profile(&self) -> Option<&DepthProfile> {
        self.profile.as_ref()
    }

    /// Sort the read set ascending by (start, length). Pure reordering of the
    /// owned collection; accumulation itself is order-independent, so this
    /// only pins down a deterministic layout.
    pub fn normalize(&mut self) -> &mut Self {
        self.reads.sort();
        self
    }

    /// Recompute the dense depth track across [0, max(start + length)].
    ///
    /// Every interval contributes +1 at its start and -1 at its end in a
    /// delta array whose running prefix sum is the depth at each position.
    /// Two O(1) point updates per read plus one linear sweep over the span,
    /// instead of rescanning all reads per position.
    ///
    /// All-or-nothing: every read is validated up front, and on any error the
    /// previously stored profile (if any) is left untouched.
    pub fn compute_depth(&mut self) -> Result<&DepthProfile, Error<Idx>> {
        self.normalize();

        let zero = Idx::zero();
        let mut max_end = zero;
        for read in &self.reads {
            if read.start() < zero || read.length() < zero {
                return Err(Error::InvalidInterval { interval: *read });
            }
            let end = read
                .checked_end()
                .ok_or(Error::InvalidInterval { interval: *read })?;
            max_end = max_end.max(end);
        }

        // The profile covers positions 0..=max_end; position max_end itself
        // is covered by no read and anchors the span boundary.
        let span = max_end
            .to_usize()
            .and_then(|x| x.checked_add(1))
            .ok_or(Error::SpanOverflow { max_end })?;
        if self.reads.len() > u32::MAX as usize {
            return Err(Error::DepthOverflow {
                reads: self.reads.len(),
            });
        }

        let mut delta = vec![0i64; span];
        for read in &self.reads {
            // In bounds: start <= end <= max_end < span. A zero-length read
            // cancels itself at a single index.
            delta[read.start().to_usize().unwrap()] += 1;
            delta[read.end().to_usize().unwrap()] -= 1;
        }

        let mut depths = Vec::with_capacity(span);
        let mut running = 0i64;
        for d in delta {
            running += d;
            debug_assert!(running >= 0);
            depths.push(running as u32);
        }

        log::debug!(
            "Computed depth profile: {} reads over {} positions",
            self.reads.len(),
            span
        );
        Ok(self.profile.insert(DepthProfile::new(depths)))
    }

    /// Depth at a single locus. Errors before any successful compute_depth,
    /// and for loci outside the computed span. An out-of-range locus is
    /// never reported as depth 0, since 0 is a legitimate in-range value.
    pub fn depth_at(&self, locus: Idx) -> Result<u32, Error<Idx>> {
        let profile = self.profile.as_ref().ok_or(Error::ProfileNotComputed)?;
        let span = profile.len();
        if locus < Idx::zero() {
            return Err(Error::LocusOutOfRange { locus, span });
        }
        locus
            .to_usize()
            .and_then(|pos| profile.get(pos))
            .ok_or(Error::LocusOutOfRange { locus, span })
    }

    /// Resolve every stored locus against the computed profile, in insertion
    /// order.
    pub fn loci_depths(&self) -> Result<Vec<(Idx, u32)>, Error<Idx>> {
        self.loci
            .iter()
            .map(|&locus| self.depth_at(locus).map(|depth| (locus, depth)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_accumulates() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(10u64, 30)]);
        engine.append_reads([ReadInterval::new(10, 30), ReadInterval::new(20, 40)]);
        engine.append_loci([5, 15]);
        engine.append_loci([30]);

        assert_eq!(engine.reads().len(), 3);
        assert_eq!(engine.loci(), &vec![5, 15, 30]);
        assert!(engine.profile().is_none());
    }

    #[test]
    fn test_normalize() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([
            ReadInterval::new(20u64, 40),
            ReadInterval::new(10, 30),
            ReadInterval::new(20, 10),
        ]);
        engine.normalize();

        let expected: Vec<ReadInterval<u64>> = vec![(10, 30).into(), (20, 10).into(), (20, 40).into()];
        assert_eq!(engine.reads(), &expected);
    }

    #[test]
    fn test_empty_read_set() {
        let mut engine = CoverageEngine::<u64>::new();
        let profile = engine.compute_depth().unwrap();
        assert_eq!(profile, &vec![0]);
    }

    #[test]
    fn test_depth_track() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(10u64, 30), ReadInterval::new(20, 40)]);
        let profile = engine.compute_depth().unwrap();

        assert_eq!(profile.len(), 61);
        assert_eq!(profile.get(9), Some(0));
        assert_eq!(profile.get(10), Some(1));
        assert_eq!(profile.get(20), Some(2));
        assert_eq!(profile.get(39), Some(2));
        assert_eq!(profile.get(40), Some(1));
        assert_eq!(profile.get(59), Some(1));
        assert_eq!(profile.get(60), Some(0));
    }

    #[test]
    fn test_zero_length_reads_cover_nothing() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(5u64, 0), ReadInterval::new(0, 0)]);
        let profile = engine.compute_depth().unwrap();

        assert_eq!(profile, &vec![0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_duplicates_accumulate() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(0u64, 2), ReadInterval::new(0, 2)]);
        let profile = engine.compute_depth().unwrap();
        assert_eq!(profile, &vec![2, 2, 0]);
    }

    #[test]
    fn test_invalid_negative_interval() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(-5i64, 10)]);
        assert_eq!(
            engine.compute_depth().unwrap_err(),
            Error::InvalidInterval { interval: ReadInterval::new(-5, 10) }
        );

        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(5i64, -10)]);
        assert!(matches!(
            engine.compute_depth().unwrap_err(),
            Error::InvalidInterval { .. }
        ));
    }

    #[test]
    fn test_invalid_overflowing_end() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(u64::MAX - 1, 10)]);
        assert!(matches!(
            engine.compute_depth().unwrap_err(),
            Error::InvalidInterval { .. }
        ));
    }

    #[test]
    fn test_span_beyond_addressable_memory() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(u64::MAX - 1, 1)]);
        assert!(matches!(
            engine.compute_depth().unwrap_err(),
            Error::SpanOverflow { .. }
        ));
    }

    #[test]
    fn test_failed_compute_preserves_profile() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(0i64, 3)]);
        engine.compute_depth().unwrap();

        engine.append_reads([ReadInterval::new(-1, 1)]);
        assert!(engine.compute_depth().is_err());
        assert_eq!(engine.profile().unwrap(), &vec![1, 1, 1, 0]);
    }

    #[test]
    fn test_depth_at_before_compute() {
        let engine = CoverageEngine::<u64>::new();
        assert_eq!(engine.depth_at(0).unwrap_err(), Error::ProfileNotComputed);
        assert_eq!(engine.loci_depths().unwrap_err(), Error::ProfileNotComputed);
    }

    #[test]
    fn test_depth_at_out_of_range() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(10u64, 30)]);
        engine.compute_depth().unwrap();

        assert_eq!(engine.depth_at(40).unwrap(), 0);
        assert_eq!(
            engine.depth_at(41).unwrap_err(),
            Error::LocusOutOfRange { locus: 41, span: 41 }
        );
    }

    #[test]
    fn test_depth_at_negative_locus() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(0i64, 5)]);
        engine.compute_depth().unwrap();

        assert_eq!(
            engine.depth_at(-1).unwrap_err(),
            Error::LocusOutOfRange { locus: -1, span: 6 }
        );
    }

    #[test]
    fn test_loci_depths() {
        let mut engine = CoverageEngine::new();
        engine.append_reads([ReadInterval::new(10u64, 30), ReadInterval::new(20, 40)]);
        engine.append_loci([5, 15, 30]);
        engine.compute_depth().unwrap();

        assert_eq!(engine.loci_depths().unwrap(), vec![(5, 0), (15, 1), (30, 2)]);
    }
}
