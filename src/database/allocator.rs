use std::collections::HashSet;

use rand::Rng;

/// Exclusive upper bound of the random id range
pub const DEFAULT_UPPER_BOUND: u32 = 10_000;

/// Random draws before giving up on the range and appending past the maximum
const MAX_ATTEMPTS: usize = 32;

/// Allocates course ids.
///
/// Ids are drawn uniformly from `[0, upper_bound)` and checked against the ids
/// already in the store. The caller must hold the document write lock while
/// allocating and inserting, otherwise two creations can still pick the same id.
#[derive(Debug, Clone, Copy)]
pub struct IdAllocator {
    upper_bound: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_UPPER_BOUND)
    }
}

impl IdAllocator {
    pub fn new(upper_bound: u32) -> Self {
        Self {
            upper_bound: upper_bound.max(1),
        }
    }

    /// Returns an id not contained in `existing`
    pub fn allocate(&self, existing: &HashSet<u32>) -> u32 {
        let mut rng = rand::thread_rng();
        for _ in 0..MAX_ATTEMPTS {
            let candidate = rng.gen_range(0..self.upper_bound);
            if !existing.contains(&candidate) {
                return candidate;
            }
        }

        // Range is crowded; step past the largest id in use
        match existing.iter().max().and_then(|max| max.checked_add(1)) {
            Some(next) => next,
            None => lowest_free(existing),
        }
    }
}

fn lowest_free(existing: &HashSet<u32>) -> u32 {
    let mut candidate = 0;
    while existing.contains(&candidate) {
        candidate += 1;
    }
    candidate
}
