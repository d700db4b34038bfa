use derive_more::Into;

/// Dense per-position depth track: index i holds the number of read
/// intervals covering position i. Entirely derived data, rebuilt from
/// scratch by every compute_depth call and never patched incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Default, Into)]
pub struct DepthProfile {
    depths: Vec<u32>,
}

impl DepthProfile {
    pub fn new(depths: Vec<u32>) -> Self {
        Self { depths }
    }

    /// Number of positions in the profile, from 0 to the last covered
    /// position inclusive.
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Depth at the given position, or None outside the computed span.
    pub fn get(&self, pos: usize) -> Option<u32> {
        self.depths.get(pos).copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.depths
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.depths.iter().copied()
    }

    /// Mean depth across the whole profile.
    pub fn mean(&self) -> f64 {
        if self.depths.is_empty() {
            return 0.0;
        }
        let total: u64 = self.depths.iter().map(|&x| x as u64).sum();
        total as f64 / self.depths.len() as f64
    }

    /// Number of positions covered by at least one read.
    pub fn covered(&self) -> usize {
        self.depths.iter().filter(|&&x| x > 0).count()
    }
}

impl PartialEq<Vec<u32>> for DepthProfile {
    fn eq(&self, other: &Vec<u32>) -> bool {
        &self.depths == other
    }
}

impl PartialEq<&[u32]> for DepthProfile {
    fn eq(&self, other: &&[u32]) -> bool {
        self.depths == *other
    }
}
