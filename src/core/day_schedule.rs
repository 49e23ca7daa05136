use serde::{Deserialize, Serialize};

use crate::core::{BlockId, DayOfWeek, IntervalRules, TimeBlock};
use crate::error::ScheduleError;

/// One day's committed blocks, kept sorted by start minute.
///
/// A `DaySchedule` can only be replaced wholesale with a list that passes
/// [`IntervalRules::is_valid_day`], so a value of this type always satisfies
/// the bounds, duration, unique-id and non-overlap invariants. Deserialized
/// values are checked against the default rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedDaySchedule")]
pub struct DaySchedule {
    day: DayOfWeek,
    blocks: Vec<TimeBlock>,
}

#[derive(Deserialize)]
struct UncheckedDaySchedule {
    day: DayOfWeek,
    blocks: Vec<TimeBlock>,
}

impl TryFrom<UncheckedDaySchedule> for DaySchedule {
    type Error = ScheduleError;

    fn try_from(raw: UncheckedDaySchedule) -> Result<Self, Self::Error> {
        let day = raw.day;
        Self::try_new(day, raw.blocks, IntervalRules::default()).ok_or_else(|| {
            ScheduleError::InvalidData(format!("schedule for {day} is not a valid day"))
        })
    }
}

impl DaySchedule {
    #[must_use]
    pub fn empty(day: DayOfWeek) -> Self {
        Self {
            day,
            blocks: Vec::new(),
        }
    }

    /// Builds a schedule when `blocks` form a valid day; `None` otherwise.
    #[must_use]
    pub fn try_new(day: DayOfWeek, blocks: Vec<TimeBlock>, rules: IntervalRules) -> Option<Self> {
        let mut schedule = Self::empty(day);
        schedule.try_replace(blocks, rules).then_some(schedule)
    }

    #[must_use]
    pub fn day(&self) -> DayOfWeek {
        self.day
    }

    #[must_use]
    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn get(&self, id: BlockId) -> Option<&TimeBlock> {
        self.blocks.iter().find(|block| block.id == id)
    }

    /// Replaces every block when the proposal is a valid day.
    ///
    /// Returns `false` and leaves the schedule untouched otherwise.
    pub fn try_replace(&mut self, mut blocks: Vec<TimeBlock>, rules: IntervalRules) -> bool {
        sort_by_start(&mut blocks);
        if !rules.is_valid_day(&blocks) {
            return false;
        }
        self.blocks = blocks;
        true
    }
}

pub(crate) fn sort_by_start(blocks: &mut [TimeBlock]) {
    blocks.sort_by_key(|block| (block.start_minute, block.end_minute, block.id));
}
