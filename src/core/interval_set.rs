use serde::{Deserialize, Serialize};

use crate::core::primitives::{MAX_MINUTE, MIN_DURATION_MINUTES};
use crate::core::{BlockId, TimeBlock};

/// Half-open interval intersection test.
///
/// Touching blocks (`a.end == b.start`) do not overlap.
#[must_use]
pub fn overlaps(a: &TimeBlock, b: &TimeBlock) -> bool {
    spans_overlap(a.start_minute, a.end_minute, b.start_minute, b.end_minute)
}

#[must_use]
fn spans_overlap(a_start: u16, a_end: u16, b_start: u16, b_end: u16) -> bool {
    a_start < b_end && a_end > b_start
}

/// Validity predicates for one day's block list.
///
/// All checks are side-effect free and linear or better in the block count for
/// already-sorted input; every mutating path in the editor runs its proposed
/// result through [`IntervalRules::is_valid_day`] before committing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRules {
    min_duration: u16,
}

impl Default for IntervalRules {
    fn default() -> Self {
        Self {
            min_duration: MIN_DURATION_MINUTES,
        }
    }
}

impl IntervalRules {
    #[must_use]
    pub fn new(min_duration: u16) -> Self {
        Self { min_duration }
    }

    #[must_use]
    pub fn min_duration(self) -> u16 {
        self.min_duration
    }

    /// Bounds and duration check for a single block.
    #[must_use]
    pub fn is_valid_block(self, block: &TimeBlock) -> bool {
        block.start_minute < block.end_minute
            && block.end_minute <= MAX_MINUTE
            && block.duration_minutes() >= i32::from(self.min_duration)
    }

    /// Every block is individually valid, ids are unique and no two blocks overlap.
    #[must_use]
    pub fn is_valid_day(self, blocks: &[TimeBlock]) -> bool {
        if !blocks.iter().all(|block| self.is_valid_block(block)) {
            return false;
        }

        let mut ids: Vec<BlockId> = blocks.iter().map(|block| block.id).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|pair| pair[0] == pair[1]) {
            return false;
        }

        let mut spans: Vec<(u16, u16)> = blocks
            .iter()
            .map(|block| (block.start_minute, block.end_minute))
            .collect();
        if !spans.is_sorted() {
            spans.sort_unstable();
        }
        spans
            .windows(2)
            .all(|pair| !spans_overlap(pair[0].0, pair[0].1, pair[1].0, pair[1].1))
    }

    /// Tests `candidate` against all of `blocks` except the block being edited.
    #[must_use]
    pub fn would_overlap(
        self,
        candidate: &TimeBlock,
        blocks: &[TimeBlock],
        excluding: Option<BlockId>,
    ) -> bool {
        blocks
            .iter()
            .filter(|block| Some(block.id) != excluding)
            .any(|block| overlaps(candidate, block))
    }
}
