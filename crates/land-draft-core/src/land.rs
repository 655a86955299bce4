// Land identifiers and the pool of lands still open for assignment.

use std::collections::BTreeSet;

/// Number of lands on offer in every draft.
pub const LAND_COUNT: u8 = 32;

/// A land identifier in `1..=LAND_COUNT`.
pub type LandId = u8;

/// Whether `land` is a real land identifier.
pub fn is_valid_land(land: LandId) -> bool {
    (1..=LAND_COUNT).contains(&land)
}

/// The lands nobody has been assigned yet.
///
/// Starts full and only ever shrinks. Ordered, so iteration (and therefore
/// anything seeded on top of it) is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandPool {
    available: BTreeSet<LandId>,
}

impl LandPool {
    /// A pool holding every land `1..=LAND_COUNT`.
    pub fn full() -> Self {
        LandPool {
            available: (1..=LAND_COUNT).collect(),
        }
    }

    pub fn contains(&self, land: LandId) -> bool {
        self.available.contains(&land)
    }

    /// Take `land` out of the pool. Returns `false` if it was already gone.
    pub fn take(&mut self, land: LandId) -> bool {
        self.available.remove(&land)
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Remaining lands in ascending order.
    pub fn remaining(&self) -> Vec<LandId> {
        self.available.iter().copied().collect()
    }
}

impl Default for LandPool {
    fn default() -> Self {
        LandPool::full()
    }
}
